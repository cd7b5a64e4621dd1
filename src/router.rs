//! Radix-tree path router.
//!
//! One tree mapping path patterns to routes. O(path-length) lookup. Build it
//! once at startup; pass it to [`Server::serve`](crate::Server::serve).

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::error::Error;
use crate::route::Route;

/// The application router.
#[derive(Default)]
pub struct Router {
    routes: MatchitRouter<Arc<Route>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `route` at `path`. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # fn main() -> Result<(), shunt::Error> {
    /// use shunt::{Route, Router, filter::Registry};
    ///
    /// let registry = Registry::builtin();
    /// let app = Router::new()
    ///     .route("/healthz", Route::parse(r#"inlineContent("ok") -> <shunt>"#, &registry)?)?
    ///     .route("/users/{id}", Route::parse(r#"inlineContent("{}", "application/json") -> <shunt>"#, &registry)?)?;
    /// assert!(app.lookup("/users/42").is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn route(mut self, path: &str, route: Route) -> Result<Self, Error> {
        debug!(path, filters = route.len(), "route installed");
        self.routes
            .insert(path, Arc::new(route))
            .map_err(|e| Error::InvalidPath(format!("`{path}`: {e}")))?;
        Ok(self)
    }

    /// Finds the route for `path` together with its path parameters.
    pub fn lookup(&self, path: &str) -> Option<(Arc<Route>, HashMap<String, String>)> {
        let matched = self.routes.at(path).ok()?;
        let route = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((route, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_with_params() {
        let app = Router::new()
            .route("/a", Route::shunt()).unwrap()
            .route("/b/{id}", Route::shunt()).unwrap();

        assert!(app.lookup("/a").is_some());
        assert!(app.lookup("/c").is_none());

        let (_, params) = app.lookup("/b/7").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("7"));
    }

    #[test]
    fn conflicting_paths_are_rejected() {
        let result = Router::new()
            .route("/a", Route::shunt()).unwrap()
            .route("/a", Route::shunt());
        assert!(matches!(result, Err(Error::InvalidPath(_))));
    }
}
