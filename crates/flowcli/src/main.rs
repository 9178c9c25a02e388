// crates/flowcli/src/main.rs

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use flowcore::{Connection, Node, NodeTypes};
use floweditor::{
    node_data_to_save, EditorConfig, EditorSession, EditorState, FileStore, NodeTypeRegistry,
    SchemaLoader,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flow")]
#[command(about = "Flow editor CLI", long_about = None)]
struct Cli {
    /// Editor configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory with additional node type schemas
    #[arg(long, global = true)]
    node_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a workflow is ready to be executed
    Check {
        /// Path to editor state JSON file
        file: PathBuf,
    },

    /// Print nodes in the form they are persisted
    Serialize {
        file: PathBuf,

        /// Only this node
        #[arg(short, long)]
        node: Option<String>,
    },

    /// Count nodes per type against each type's limit
    Count { file: PathBuf },

    /// Evaluate an expression as seen from a node
    Eval {
        file: PathBuf,

        #[arg(short, long)]
        node: String,

        #[arg(short, long)]
        expr: String,
    },

    /// Save a workflow into a directory store
    Save {
        file: PathBuf,

        /// Store directory
        #[arg(short, long)]
        store: PathBuf,

        /// Save as a new workflow under this name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List available node types
    Nodes,

    /// Create an example editor file
    Init {
        /// Output file path
        #[arg(short, long, default_value = "workflow.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = match &cli.config {
        Some(path) => EditorConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EditorConfig::default(),
    };

    let mut registry = flownodes::registry();
    if let Some(dir) = &cli.node_dir {
        SchemaLoader::new(dir)
            .load_into(&mut registry)
            .with_context(|| format!("Failed to load node types from {}", dir.display()))?;
    }
    let registry = Arc::new(registry);

    match cli.command {
        Commands::Check { file } => check(&file, registry, config).await?,
        Commands::Serialize { file, node } => serialize(&file, &registry, node.as_deref())?,
        Commands::Count { file } => count(&file, registry, config).await?,
        Commands::Eval { file, node, expr } => eval(&file, registry, config, node, &expr).await?,
        Commands::Save { file, store, name } => {
            save(&file, registry, config, &store, name.as_deref()).await?
        }
        Commands::Nodes => list_nodes(&registry),
        Commands::Init { output } => create_example(&output)?,
    }

    Ok(())
}

fn load_state(file: &Path) -> Result<EditorState> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let state = serde_json::from_str(&raw)?;
    tracing::debug!("Loaded editor state from {}", file.display());
    Ok(state)
}

fn load_session(file: &Path, registry: Arc<NodeTypeRegistry>, config: EditorConfig) -> Result<EditorSession> {
    let state = load_state(file)?;
    println!("📋 Workflow: {}", if state.name.is_empty() { "<unnamed>" } else { state.name.as_str() });
    println!("   Nodes: {}", state.nodes.len());
    println!("   Connections: {}", state.connections.len());
    println!();
    Ok(EditorSession::with_config(registry, state, config))
}

async fn check(file: &Path, registry: Arc<NodeTypeRegistry>, config: EditorConfig) -> Result<()> {
    println!("🔍 Checking workflow: {}", file.display());
    let session = load_session(file, registry, config)?;

    match session.check_ready_for_execution().await? {
        None => println!("✅ Workflow is ready to be executed"),
        Some(issues) => {
            println!("❌ Workflow has issues:");
            for (node, node_issues) in &issues {
                println!("  • {}", node);
                if node_issues.type_unknown {
                    println!("    node type is unknown");
                }
                for (parameter, messages) in &node_issues.parameters {
                    for message in messages {
                        println!("    [{}] {}", parameter, message);
                    }
                }
                for (credential, messages) in &node_issues.credentials {
                    for message in messages {
                        println!("    [{}] {}", credential, message);
                    }
                }
            }
            return Err(anyhow!("{} node(s) are not ready", issues.len()));
        }
    }
    Ok(())
}

fn serialize(file: &Path, registry: &NodeTypeRegistry, node_name: Option<&str>) -> Result<()> {
    let state = load_state(file)?;

    let nodes: Vec<&Node> = match node_name {
        Some(name) => vec![state
            .nodes
            .iter()
            .find(|node| node.name == name)
            .ok_or_else(|| anyhow!("Node not found: {}", name))?],
        None => state.nodes.iter().collect(),
    };

    let persisted: Vec<_> = nodes
        .into_iter()
        .map(|node| node_data_to_save(node, registry))
        .collect();
    println!("{}", serde_json::to_string_pretty(&persisted)?);
    Ok(())
}

async fn count(file: &Path, registry: Arc<NodeTypeRegistry>, config: EditorConfig) -> Result<()> {
    let session = load_session(file, registry, config)?;

    println!("📊 Node types in use:");
    for (node_type, counted) in session.node_types_max_count().await {
        if counted.exist == 0 {
            continue;
        }
        println!(
            "  • {}: {}/{} ({})",
            node_type,
            counted.exist,
            counted.max,
            counted.node_names.join(", ")
        );
    }
    Ok(())
}

async fn eval(
    file: &Path,
    registry: Arc<NodeTypeRegistry>,
    config: EditorConfig,
    node: String,
    expression: &str,
) -> Result<()> {
    let session = load_session(file, registry, config)?;
    session.update(|state| state.active_node = Some(node)).await;

    let value = session.resolve_expression(expression).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

async fn save(
    file: &Path,
    registry: Arc<NodeTypeRegistry>,
    config: EditorConfig,
    dir: &Path,
    name: Option<&str>,
) -> Result<()> {
    let session = load_session(file, registry, config)?;
    let store = FileStore::new(dir);

    let saved = session.save(&store, name).await?;
    let id = saved.id.unwrap_or_default();
    println!("💾 Saved \"{}\" as {}", saved.name, id);
    println!("   {}", store.path_for(&id).display());

    // Keep the editor file in step with the adopted id and name
    let state = session.snapshot().await;
    std::fs::write(file, serde_json::to_string_pretty(&state)?)?;
    Ok(())
}

fn list_nodes(registry: &NodeTypeRegistry) {
    println!("📦 Available Node Types:");
    println!();

    for schema in registry.all() {
        match schema.max_nodes {
            Some(max) => println!("  • {} ({}, at most {})", schema.name, schema.display_name, max),
            None => println!("  • {} ({})", schema.name, schema.display_name),
        }
        println!("    {}", schema.description);
    }
}

fn create_example(output: &Path) -> Result<()> {
    let state = EditorState {
        name: "Example HTTP Workflow".to_string(),
        nodes: vec![
            Node::new("Start", flownodes::START).with_position(250.0, 300.0),
            Node::new("Fetch Data", flownodes::HTTP_REQUEST)
                .with_parameter("url", "https://api.github.com/zen")
                .with_position(450.0, 300.0),
        ],
        connections: vec![Connection::main("Start", "Fetch Data")],
        ..Default::default()
    };

    std::fs::write(output, serde_json::to_string_pretty(&state)?)?;

    println!("✨ Created example workflow: {}", output.display());
    println!();
    println!("Check it with:");
    println!("  flow check {}", output.display());
    Ok(())
}
