//! # State Router
//!
//! A declarative route tree that maps nested application state to URL paths
//! and back:
//! - Literal and parameter segments (`/products/:id`)
//! - Scoped sub-routers that nest their state under a key
//! - Per-parameter value transforms
//! - Children computed from decoded state
//! - Intent links (`/intent/:intent/:params/:payload`)
//! - Query strings via `_searchParams`
//!
//! ## Resolution Model
//!
//! Resolution is pure and synchronous. Trees are built once and never mutated,
//! so a `Router` can be shared across threads and used concurrently:
//! - **`encode`**: match the state against the tree, then render the chain
//! - **`decode`**: walk the tree against path components, first match wins
//! - **Not found is not an error**: `decode` returns `None`
//!
//! ## Example
//!
//! ```
//! use serde_json::{json, Value};
//! use state_router::{route, scope};
//!
//! let desk = scope("desk", "/collections/:collection").build().unwrap();
//! let router = route("/:dataset")
//!     .with_child(route("/settings/:setting").build().unwrap())
//!     .with_child(
//!         route("/tools/:tool")
//!             .with_dynamic_children(move |state| match state.get("tool").and_then(Value::as_str) {
//!                 Some("desk") => vec![desk.clone()],
//!                 _ => Vec::new(),
//!             })
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let state = router.decode("/some-dataset/tools/desk/collections/articles").unwrap();
//! assert_eq!(
//!     Value::Object(state.clone()),
//!     json!({"dataset": "some-dataset", "tool": "desk", "desk": {"collection": "articles"}})
//! );
//! assert_eq!(
//!     router.encode(&state).unwrap(),
//!     "/some-dataset/tools/desk/collections/articles"
//! );
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
pub mod intents;
mod matcher;
mod node;
pub mod path;
pub mod resolve;
pub mod route;
mod router;
pub mod search;
pub mod transform;

pub use config::{IntentsConfig, RouterConfig};
pub use error::RouteError;
pub use intents::{intents, intents_with_config};
pub use matcher::{find_matching_nodes, MatchResult};
pub use node::{route, scope, Children, ChildrenFn, RouteOptions, Router};
pub use resolve::{resolve_path_from_state, resolve_state_from_path};
pub use route::{parse, PatternWarning, RoutePattern, Segment, SegmentKind};
pub use transform::{transform, FnTransform, Transform};

// ============================================================================
// Core Types
// ============================================================================

/// Application state: a JSON object, nested per scope
pub type State = serde_json::Map<String, serde_json::Value>;

/// State key holding `[key, value]` query pairs at any state level
pub const SEARCH_PARAMS_KEY: &str = "_searchParams";
