use thiserror::Error;

/// Errors raised while building route trees or encoding state
///
/// A path that matches no route is not an error: `Router::decode` returns
/// `None` for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Route options were built without a path
    #[error("route options must include a path")]
    MissingPath,

    /// A child scope name shadows a parameter bound at the same state level
    #[error("scope \"{scope}\" collides with a param of the same name in route \"{pattern}\"")]
    ScopeCollision { scope: String, pattern: String },

    /// A param or scope uses a key the router reserves for itself
    #[error("\"{0}\" is reserved by the router and cannot be used as a param or scope name")]
    ReservedName(String),

    /// State carries keys no route in the tree can consume
    #[error(
        "Unable to find matching route for state. Could not map the following state {} to a valid url: {}",
        key_noun(.0),
        .0.join(", ")
    )]
    UnmappableKeys(Vec<String>),

    /// No node chain can represent the state (the JSON text of the state is attached)
    #[error("Unable to resolve path from given state: {0}")]
    Unresolvable(String),
}

fn key_noun(keys: &[String]) -> &'static str {
    if keys.len() == 1 {
        "key"
    } else {
        "keys"
    }
}
