//! Routes and the per-request filter pipeline.

use std::fmt;

use http::StatusCode;
use tracing::debug;

use crate::error::Error;
use crate::filter::{Context, Filter, FilterContext, Registry};
use crate::handler::{BoxedHandler, Handler};
use crate::parse::{self, RouteDef};
use crate::request::Request;
use crate::response::Response;

/// Where a request goes after the filter chain when no filter served it.
pub enum Backend {
    /// Nothing behind the filters. Unserved requests get `404 Not Found`.
    Shunt,
    Handler(BoxedHandler),
}

impl fmt::Debug for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shunt => f.write_str("Shunt"),
            Self::Handler(_) => f.write_str("Handler"),
        }
    }
}

/// A filter chain and its backend.
///
/// ```rust
/// use shunt::{Route, filter::Registry};
///
/// let registry = Registry::builtin();
/// let route = Route::parse(r#"inlineContent("ok") -> <shunt>"#, &registry).unwrap();
/// assert_eq!(route.len(), 1);
/// ```
pub struct Route {
    filters: Vec<Box<dyn Filter>>,
    backend: Backend,
}

impl Route {
    /// A route with no filters and a `<shunt>` backend.
    pub fn shunt() -> Self {
        Self { filters: Vec::new(), backend: Backend::Shunt }
    }

    /// A route with no filters that ends in `handler`.
    pub fn handler(handler: impl Handler) -> Self {
        Self { filters: Vec::new(), backend: Backend::Handler(handler.into_boxed_handler()) }
    }

    /// Parses a definition that must end in `<shunt>`.
    pub fn parse(src: &str, registry: &Registry) -> Result<Self, Error> {
        let def = parse::parse(src)?;
        if !def.shunt {
            return Err(Error::Syntax { offset: src.len(), message: "expected `<shunt>`" });
        }
        Self::shunt().with_filters(def, registry)
    }

    /// Parses a filter chain that ends in `handler`. The chain must not
    /// contain `<shunt>`.
    pub fn parse_with_handler(
        src: &str,
        registry: &Registry,
        handler: impl Handler,
    ) -> Result<Self, Error> {
        let def = parse::parse(src)?;
        if def.shunt {
            return Err(Error::Syntax { offset: 0, message: "handler route cannot end in `<shunt>`" });
        }
        Self::handler(handler).with_filters(def, registry)
    }

    /// Appends `filter` to the chain.
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    fn with_filters(mut self, def: RouteDef, registry: &Registry) -> Result<Self, Error> {
        for f in &def.filters {
            self.filters.push(registry.create(&f.name, &f.args)?);
        }
        Ok(self)
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Number of filters in the chain.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Runs `req` through the pipeline.
    ///
    /// Request hooks run in order until one serves. If none does, the
    /// backend answers. Response hooks of every visited filter then run in
    /// reverse order.
    pub async fn call(&self, req: Request) -> Response {
        let mut ctx = Context::new(req);

        let mut visited = 0;
        for filter in &self.filters {
            filter.request(&mut ctx);
            visited += 1;
            if ctx.served() {
                debug!(path = ctx.request().path(), filter = visited - 1, "request shunted");
                break;
            }
        }

        if !ctx.served() {
            let response = match &self.backend {
                Backend::Shunt => Response::status(StatusCode::NOT_FOUND),
                Backend::Handler(h) => h.call(ctx.request().clone()).await,
            };
            ctx.set_response(response);
        }

        for filter in self.filters[..visited].iter().rev() {
            filter.response(&mut ctx);
        }

        ctx.into_response()
            .unwrap_or_else(|| Response::status(StatusCode::INTERNAL_SERVER_ERROR))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("filters", &self.filters.len())
            .field("backend", &self.backend)
            .finish()
    }
}
