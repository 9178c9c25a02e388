use flowcore::{Item, RunData};

/// Items arriving at a node through one input slot of a previous run.
///
/// Only the first entry of `parent_nodes` is addressed. The result is
/// three-valued:
///
/// - `None` when there is no parent or no run data at all,
/// - an empty slice when a run exists but the parent has nothing recorded at
///   `run_index` / `input_name` / `input_index`,
/// - the recorded batch otherwise.
pub fn connection_input_data<'a>(
    parent_nodes: &[String],
    input_name: &str,
    run_index: usize,
    input_index: usize,
    run_data: Option<&'a RunData>,
) -> Option<&'a [Item]> {
    let parent = parent_nodes.first()?;
    let run_data = run_data?;

    let batch = run_data
        .get(parent)
        .and_then(|runs| runs.get(run_index))
        .and_then(|record| record.batch(input_name, input_index));

    match batch {
        Some(items) => Some(items.as_slice()),
        None => Some(&[]),
    }
}
