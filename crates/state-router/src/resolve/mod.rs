/// Bidirectional resolution between state and paths
///
/// - `path` renders a state through the matched node chain
/// - `state` decodes a path by walking the tree, first match wins

pub mod path;
pub mod state;

pub use path::resolve_path_from_state;
pub use state::resolve_state_from_path;
