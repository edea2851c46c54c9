/// Router facade: `encode`, `decode` and the helpers derived from them
use serde_json::{Map, Value};

use crate::error::RouteError;
use crate::node::Router;
use crate::path;
use crate::resolve::{resolve_path_from_state, resolve_state_from_path};
use crate::State;

impl Router {
    /// State → path (always starts with `/`)
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use state_router::route;
    ///
    /// let router = route("/:dataset")
    ///     .with_child(route("/settings/:setting").build().unwrap())
    ///     .build()
    ///     .unwrap();
    ///
    /// let state = json!({"dataset": "production", "setting": "members"});
    /// assert_eq!(
    ///     router.encode(state.as_object().unwrap()).unwrap(),
    ///     "/production/settings/members"
    /// );
    /// ```
    pub fn encode(&self, state: &State) -> Result<String, RouteError> {
        resolve_path_from_state(self, state)
    }

    /// Path → state, `None` when the path matches no route
    pub fn decode(&self, path: &str) -> Option<State> {
        resolve_state_from_path(self, path)
    }

    /// True iff every `/`-separated component of `path` is empty
    pub fn is_root(&self, path: &str) -> bool {
        path::is_root(path)
    }

    pub fn is_not_found(&self, path: &str) -> bool {
        self.decode(path).is_none()
    }

    /// The path of the empty state
    ///
    /// # Errors
    ///
    /// Fails like `encode` when the root requires params.
    pub fn get_base_path(&self) -> Result<String, RouteError> {
        self.encode(&State::new())
    }

    /// Canonical base path to redirect to when `path` is a bare root that
    /// differs from it
    ///
    /// # Examples
    ///
    /// ```
    /// use state_router::route;
    ///
    /// let router = route("/studio").build().unwrap();
    /// assert_eq!(router.get_redirect_base("/").unwrap(), Some("/studio".to_string()));
    /// assert_eq!(router.get_redirect_base("/studio").unwrap(), None);
    /// ```
    pub fn get_redirect_base(&self, path: &str) -> Result<Option<String>, RouteError> {
        if !self.is_root(path) {
            return Ok(None);
        }

        let base_path = self.get_base_path()?;
        if base_path != path {
            Ok(Some(base_path))
        } else {
            Ok(None)
        }
    }

    /// Encodes an intent link for a tree that mounts `intents(..)`
    ///
    /// Empty params and an absent payload are left out of the state. A payload
    /// needs params to sit under, so a payload with empty params fails with
    /// `RouteError::UnmappableKeys`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use state_router::intents;
    ///
    /// let router = intents("/intent").unwrap();
    /// let params = json!({"id": "abc", "type": "book"});
    /// let link = router
    ///     .resolve_intent_link("edit", params.as_object().unwrap(), None)
    ///     .unwrap();
    /// assert_eq!(link, "/intent/edit/id=abc;type=book");
    /// ```
    pub fn resolve_intent_link(
        &self,
        intent: &str,
        params: &Map<String, Value>,
        payload: Option<&Value>,
    ) -> Result<String, RouteError> {
        let mut state = State::new();
        state.insert("intent".to_string(), Value::String(intent.to_string()));
        if !params.is_empty() {
            state.insert("params".to_string(), Value::Object(params.clone()));
        }
        if let Some(payload) = payload {
            state.insert("payload".to_string(), payload.clone());
        }
        self.encode(&state)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::route;
    use crate::State;
    use serde_json::json;

    #[test]
    fn test_is_not_found() {
        let router = route("/some/basepath").build().unwrap();
        assert!(!router.is_not_found("/some/basepath"));
        assert!(router.is_not_found("/other"));
    }

    #[test]
    fn test_base_path_fails_for_required_root_params() {
        let router = route("/:dataset").build().unwrap();
        assert!(router.get_base_path().is_err());
        assert!(router.get_redirect_base("/").is_err());
        assert_eq!(router.get_redirect_base("/production").unwrap(), None);
    }

    #[test]
    fn test_redirect_base_for_root_router() {
        let router = route("/").build().unwrap();
        assert_eq!(router.get_base_path().unwrap(), "/");
        assert_eq!(router.get_redirect_base("/").unwrap(), None);
        assert_eq!(router.get_redirect_base("").unwrap(), Some("/".to_string()));
    }

    #[test]
    fn test_intent_link_without_params() {
        let router = crate::intents::intents("/intent").unwrap();
        let link = router
            .resolve_intent_link("create", &State::new(), None)
            .unwrap();
        assert_eq!(link, "/intent/create");
    }

    #[test]
    fn test_intent_link_with_payload_round_trips() {
        let router = crate::intents::intents("/intent").unwrap();
        let params = json!({"type": "book"});
        let payload = json!({"title": "Dune"});

        let link = router
            .resolve_intent_link("create", params.as_object().unwrap(), Some(&payload))
            .unwrap();
        let state = router.decode(&link).unwrap();

        assert_eq!(state.get("payload"), Some(&payload));
        assert_eq!(state.get("params"), Some(&params));
    }
}
