use crate::{GraphError, Node, NodeTypeSchema, NodeTypes};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Name of the primary data connection type
pub const MAIN_CONNECTION: &str = "main";

/// Directed edge from an output slot of one node to an input slot of another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from_node: String,
    pub from_port: String,
    #[serde(default)]
    pub from_index: usize,
    pub to_node: String,
    pub to_port: String,
    #[serde(default)]
    pub to_index: usize,
}

impl Connection {
    /// Main-to-main connection between slot 0 of both nodes
    pub fn main(from_node: impl Into<String>, to_node: impl Into<String>) -> Self {
        Self {
            from_node: from_node.into(),
            from_port: MAIN_CONNECTION.to_string(),
            from_index: 0,
            to_node: to_node.into(),
            to_port: MAIN_CONNECTION.to_string(),
            to_index: 0,
        }
    }

    pub fn with_output_index(mut self, index: usize) -> Self {
        self.from_index = index;
        self
    }

    pub fn with_input_index(mut self, index: usize) -> Self {
        self.to_index = index;
        self
    }
}

/// A workflow graph: named nodes, their connections, and the node type
/// registry used to interpret them.
///
/// Nodes keep the order they were supplied in; every per-node pass in this
/// workspace iterates in that order.
#[derive(Clone)]
pub struct Workflow {
    id: Option<String>,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    node_types: Arc<dyn NodeTypes>,
    graph: DiGraph<usize, usize>,
    node_to_index: HashMap<String, NodeIndex>,
}

impl Workflow {
    /// Build a workflow, checking that names are unique and every connection
    /// names nodes that exist.
    pub fn new(
        id: Option<String>,
        nodes: Vec<Node>,
        connections: Vec<Connection>,
        node_types: Arc<dyn NodeTypes>,
    ) -> Result<Self, GraphError> {
        let mut graph = DiGraph::new();
        let mut node_to_index = HashMap::new();

        for (position, node) in nodes.iter().enumerate() {
            if node_to_index.contains_key(&node.name) {
                tracing::warn!("Node name {} is used more than once", node.name);
                return Err(GraphError::DuplicateNode(node.name.clone()));
            }
            let idx = graph.add_node(position);
            node_to_index.insert(node.name.clone(), idx);
        }

        for (position, conn) in connections.iter().enumerate() {
            let from_idx = node_to_index
                .get(&conn.from_node)
                .ok_or_else(|| GraphError::NodeNotFound(conn.from_node.clone()))?;
            let to_idx = node_to_index
                .get(&conn.to_node)
                .ok_or_else(|| GraphError::NodeNotFound(conn.to_node.clone()))?;

            graph.add_edge(*from_idx, *to_idx, position);
        }

        Ok(Self {
            id,
            nodes,
            connections,
            node_types,
            graph,
            node_to_index,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn node_types(&self) -> &Arc<dyn NodeTypes> {
        &self.node_types
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        let idx = self.node_to_index.get(name)?;
        self.graph.node_weight(*idx).map(|position| &self.nodes[*position])
    }

    /// Schema of the given node's type, if the registry knows it
    pub fn node_type_of(&self, node: &Node) -> Option<Arc<NodeTypeSchema>> {
        self.node_types.get_by_name(&node.node_type)
    }

    /// Nodes feeding `node_name` through connections of `connection_type`,
    /// nearest first. `depth` limits how many hops are walked; `None` walks
    /// the whole upstream graph. Each node appears at most once.
    pub fn parent_nodes(&self, node_name: &str, connection_type: &str, depth: Option<usize>) -> Vec<String> {
        self.connected_nodes(node_name, connection_type, depth, Direction::Incoming)
    }

    /// Nodes fed by `node_name` through connections of `connection_type`,
    /// nearest first.
    pub fn child_nodes(&self, node_name: &str, connection_type: &str, depth: Option<usize>) -> Vec<String> {
        self.connected_nodes(node_name, connection_type, depth, Direction::Outgoing)
    }

    fn connected_nodes(
        &self,
        node_name: &str,
        connection_type: &str,
        depth: Option<usize>,
        direction: Direction,
    ) -> Vec<String> {
        let Some(&start) = self.node_to_index.get(node_name) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut seen = HashSet::from([start]);
        let mut frontier = vec![start];
        let mut level = 0;

        while !frontier.is_empty() && depth.map_or(true, |max| level < max) {
            let mut next = Vec::new();

            for idx in frontier {
                for neighbor in self.neighbors(idx, connection_type, direction) {
                    if seen.insert(neighbor) {
                        found.push(self.nodes[self.graph[neighbor]].name.clone());
                        next.push(neighbor);
                    }
                }
            }

            frontier = next;
            level += 1;
        }

        found
    }

    /// Neighbors over matching connections, in slot order then connection order
    fn neighbors(&self, idx: NodeIndex, connection_type: &str, direction: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<(usize, EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, direction)
            .filter_map(|edge| {
                let conn = &self.connections[*edge.weight()];
                let (port, slot, other) = match direction {
                    Direction::Incoming => (&conn.to_port, conn.to_index, edge.source()),
                    Direction::Outgoing => (&conn.from_port, conn.from_index, edge.target()),
                };
                (port == connection_type).then_some((slot, edge.id(), other))
            })
            .collect();

        edges.sort_by_key(|(slot, edge, _)| (*slot, edge.index()));
        edges.into_iter().map(|(_, _, other)| other).collect()
    }
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("id", &self.id)
            .field("nodes", &self.nodes)
            .field("connections", &self.connections)
            .finish_non_exhaustive()
    }
}
