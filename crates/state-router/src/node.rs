/// Route nodes and the construction API
///
/// A `Router` is an immutable node of a route tree: its parsed pattern, an
/// optional scope, per-parameter transforms and its children. Trees are built
/// once, bottom-up, and shared freely afterwards (`Router` is a cheap `Arc`
/// handle and is `Send + Sync`).
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::RouterConfig;
use crate::error::RouteError;
use crate::route::{parse, RoutePattern};
use crate::transform::{SharedTransform, Transform};
use crate::{State, SEARCH_PARAMS_KEY};

/// Function form of children, invoked with the already-decoded local state
pub type ChildrenFn = Arc<dyn Fn(&State) -> Vec<Router> + Send + Sync>;

/// Children of a route node
#[derive(Clone)]
pub enum Children {
    /// Fixed list, tried in declaration order
    Static(Vec<Router>),
    /// Resolved per match from the node's local state
    Dynamic(ChildrenFn),
}

impl Children {
    /// Resolves the children for a given local state
    pub fn resolve(&self, state: &State) -> Vec<Router> {
        match self {
            Children::Static(children) => children.clone(),
            Children::Dynamic(children) => children(state),
        }
    }
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Children::Static(children) => f.debug_tuple("Static").field(children).finish(),
            Children::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl Default for Children {
    fn default() -> Self {
        Children::Static(Vec::new())
    }
}

impl From<Vec<Router>> for Children {
    fn from(children: Vec<Router>) -> Self {
        Children::Static(children)
    }
}

impl From<Router> for Children {
    fn from(child: Router) -> Self {
        Children::Static(vec![child])
    }
}

/// Options record every construction shape normalizes to
///
/// # Examples
///
/// ```
/// use state_router::{route, scope, RouteOptions, Router};
///
/// // Builder form
/// let router = route("/:dataset")
///     .with_child(scope("desk", "/desk/:pane").build().unwrap())
///     .build()
///     .unwrap();
///
/// // Options-object form
/// let options = RouteOptions {
///     path: Some("/settings/:setting".to_string()),
///     ..RouteOptions::default()
/// };
/// let settings = Router::from_options(options).unwrap();
///
/// assert_eq!(router.pattern().raw(), "/:dataset");
/// assert_eq!(settings.pattern().raw(), "/settings/:setting");
/// ```
#[derive(Clone, Default)]
pub struct RouteOptions {
    pub path: Option<String>,
    pub scope: Option<String>,
    pub transform: HashMap<String, SharedTransform>,
    pub children: Children,
    pub config: Arc<RouterConfig>,
}

impl fmt::Debug for RouteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteOptions")
            .field("path", &self.path)
            .field("scope", &self.scope)
            .field("transform", &self.transform.keys().collect::<Vec<_>>())
            .field("children", &self.children)
            .finish()
    }
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Registers a transform for one parameter name
    pub fn with_transform(mut self, param: impl Into<String>, transform: impl Transform + 'static) -> Self {
        self.transform.insert(param.into(), Arc::new(transform));
        self
    }

    /// Appends a static child (switches dynamic children back to a static list)
    pub fn with_child(mut self, child: Router) -> Self {
        if let Children::Static(children) = &mut self.children {
            children.push(child);
        } else {
            self.children = Children::Static(vec![child]);
        }
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Router>,
    {
        self.children = Children::Static(children.into_iter().collect());
        self
    }

    /// Children computed from the node's decoded local state
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::Value;
    /// use state_router::{route, scope};
    ///
    /// let desk = scope("desk", "/collections/:collection").build().unwrap();
    /// let tools = route("/tools/:tool")
    ///     .with_dynamic_children(move |state| match state.get("tool").and_then(Value::as_str) {
    ///         Some("desk") => vec![desk.clone()],
    ///         _ => Vec::new(),
    ///     })
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(tools.decode("/tools/desk/collections/articles").is_some());
    /// assert!(tools.decode("/tools/other/collections/articles").is_none());
    /// ```
    pub fn with_dynamic_children<F>(mut self, children: F) -> Self
    where
        F: Fn(&State) -> Vec<Router> + Send + Sync + 'static,
    {
        self.children = Children::Dynamic(Arc::new(children));
        self
    }

    pub fn with_config(mut self, config: impl Into<Arc<RouterConfig>>) -> Self {
        self.config = config.into();
        self
    }

    /// Builds the node, validating path presence and scope names
    pub fn build(self) -> Result<Router, RouteError> {
        Router::from_options(self)
    }
}

/// Shorthand for `RouteOptions::new().with_path(path)`
pub fn route(path: impl Into<String>) -> RouteOptions {
    RouteOptions::new().with_path(path)
}

/// Shorthand for a scoped route: `route(path).with_scope(name)`
pub fn scope(name: impl Into<String>, path: impl Into<String>) -> RouteOptions {
    route(path).with_scope(name)
}

pub(crate) struct RouteNode {
    pub(crate) pattern: RoutePattern,
    pub(crate) scope: Option<String>,
    pub(crate) transform: HashMap<String, SharedTransform>,
    pub(crate) children: Children,
    pub(crate) config: Arc<RouterConfig>,
}

/// A node of a route tree; the root node is the entry point for `encode`/`decode`
#[derive(Clone)]
pub struct Router {
    pub(crate) node: Arc<RouteNode>,
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("pattern", &self.node.pattern.raw())
            .field("scope", &self.node.scope)
            .field("children", &self.node.children)
            .finish()
    }
}

impl Router {
    /// Builds a node from an options record
    ///
    /// # Errors
    ///
    /// - `RouteError::MissingPath` when `options.path` is `None`
    /// - `RouteError::ReservedName` when a param or the scope is `_searchParams`
    /// - `RouteError::ScopeCollision` when `strict_scopes` is on and a static
    ///   descendant at this state level is scoped under one of this node's params
    pub fn from_options(options: RouteOptions) -> Result<Self, RouteError> {
        let path = options.path.ok_or(RouteError::MissingPath)?;
        let pattern = parse(&path);

        let reserved = pattern
            .param_names()
            .chain(options.scope.as_deref())
            .any(|name| name == SEARCH_PARAMS_KEY);
        if reserved {
            return Err(RouteError::ReservedName(SEARCH_PARAMS_KEY.to_string()));
        }

        if options.config.strict_scopes {
            let params: Vec<&str> = pattern.param_names().collect();
            check_scope_collisions(&pattern, &params, &options.children)?;
        }

        Ok(Self {
            node: Arc::new(RouteNode {
                pattern,
                scope: options.scope,
                transform: options.transform,
                children: options.children,
                config: options.config,
            }),
        })
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.node.pattern
    }

    pub fn scope(&self) -> Option<&str> {
        self.node.scope.as_deref()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.node.config
    }

    pub fn transform_for(&self, param: &str) -> Option<&dyn Transform> {
        self.node.transform.get(param).map(|t| t.as_ref())
    }

    /// Resolves this node's children for the given local state
    pub fn children_for(&self, state: &State) -> Vec<Router> {
        self.node.children.resolve(state)
    }
}

/// Walks static children sharing `pattern`'s state level and rejects any
/// scope named after one of `params`
fn check_scope_collisions(
    pattern: &RoutePattern,
    params: &[&str],
    children: &Children,
) -> Result<(), RouteError> {
    let Children::Static(children) = children else {
        return Ok(());
    };

    for child in children {
        match child.scope() {
            Some(scope) if params.contains(&scope) => {
                return Err(RouteError::ScopeCollision {
                    scope: scope.to_string(),
                    pattern: pattern.raw().to_string(),
                });
            }
            Some(_) => {}
            None => check_scope_collisions(pattern, params, &child.node.children)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::transform;
    use serde_json::{json, Value};

    #[test]
    fn test_missing_path_is_error() {
        let err = Router::from_options(RouteOptions::new()).unwrap_err();
        assert_eq!(err, RouteError::MissingPath);
    }

    #[test]
    fn test_route_shorthands() {
        let leaf = route("/foo/:bar").build().unwrap();
        assert_eq!(leaf.pattern().raw(), "/foo/:bar");
        assert_eq!(leaf.scope(), None);

        let scoped = scope("first", "/foo").build().unwrap();
        assert_eq!(scoped.scope(), Some("first"));
    }

    #[test]
    fn test_with_child_appends() {
        let router = route("/")
            .with_child(route("/a").build().unwrap())
            .with_child(route("/b").build().unwrap())
            .build()
            .unwrap();

        let children = router.children_for(&State::new());
        let raws: Vec<&str> = children.iter().map(|c| c.pattern().raw()).collect();
        assert_eq!(raws, vec!["/a", "/b"]);
    }

    #[test]
    fn test_dynamic_children_receive_state() {
        let branch = route("/x").build().unwrap();
        let router = route("/:tool")
            .with_dynamic_children(move |state| {
                if state.get("tool") == Some(&json!("desk")) {
                    vec![branch.clone()]
                } else {
                    Vec::new()
                }
            })
            .build()
            .unwrap();

        let mut state = State::new();
        assert!(router.children_for(&state).is_empty());
        state.insert("tool".into(), json!("desk"));
        assert_eq!(router.children_for(&state).len(), 1);
    }

    #[test]
    fn test_transform_lookup() {
        let router = route("/:id")
            .with_transform("id", transform(|s: &str| Value::String(s.into()), |v: &Value| v.to_string()))
            .build()
            .unwrap();

        assert!(router.transform_for("id").is_some());
        assert!(router.transform_for("other").is_none());
    }

    #[test]
    fn test_scope_collision_direct_child() {
        let err = route("/:tool")
            .with_child(scope("tool", "/:pane").build().unwrap())
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            RouteError::ScopeCollision {
                scope: "tool".into(),
                pattern: "/:tool".into()
            }
        );
    }

    #[test]
    fn test_scope_collision_through_unscoped_child() {
        let nested = route("/settings").with_child(scope("dataset", "/x").build().unwrap());
        let err = route("/:dataset")
            .with_child(nested.build().unwrap())
            .build()
            .unwrap_err();

        assert!(matches!(err, RouteError::ScopeCollision { .. }));
    }

    #[test]
    fn test_scope_collision_stops_at_scope_boundary() {
        // the inner `dataset` scope lives inside `outer`, not next to `:dataset`
        let outer = scope("outer", "/o").with_child(scope("dataset", "/d").build().unwrap());
        assert!(route("/:dataset").with_child(outer.build().unwrap()).build().is_ok());
    }

    #[test]
    fn test_scope_collision_can_be_disabled() {
        let config = RouterConfig {
            strict_scopes: false,
            ..RouterConfig::default()
        };
        let router = route("/:tool")
            .with_child(scope("tool", "/:pane").build().unwrap())
            .with_config(config)
            .build();

        assert!(router.is_ok());
    }

    #[test]
    fn test_reserved_names_rejected() {
        assert_eq!(
            route("/:_searchParams").build().unwrap_err(),
            RouteError::ReservedName("_searchParams".into())
        );
        assert!(scope("_searchParams", "/x").build().is_err());
    }

    #[test]
    fn test_router_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router>();
    }
}
