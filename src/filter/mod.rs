//! Filters: per-route request/response processing stages.
//!
//! A route is a chain of filters followed by a backend. For every request the
//! pipeline calls each filter's [`Filter::request`] hook in order, then the
//! backend, then every visited filter's [`Filter::response`] hook in reverse
//! order. A filter may end the request early by calling
//! [`FilterContext::serve`]; later request hooks and the backend are then
//! skipped. This is called a *shunt*.
//!
//! Filters are built from text by a [`Spec`], a named factory looked up in a
//! [`Registry`]:
//!
//! ```rust
//! use shunt::filter::Registry;
//!
//! let registry = Registry::builtin();
//! let filter = registry.create("inlineContent", &["Enhance Your Calm".into()]);
//! assert!(filter.is_ok());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::args::Arg;
use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

mod context;
pub mod inline_content;

pub use context::Context;
pub use inline_content::{InlineContent, InlineContentSpec, INLINE_CONTENT};

/// Per-request state a filter reads and mutates.
pub trait FilterContext {
    fn request(&self) -> &Request;

    /// The response being returned, once a filter or the backend produced one.
    fn response_mut(&mut self) -> Option<&mut Response>;

    /// Answers the request with `response` and finalizes it. The pipeline
    /// stops calling request hooks and never contacts the backend.
    fn serve(&mut self, response: Response);

    /// Whether [`serve`](FilterContext::serve) has been called.
    fn served(&self) -> bool;
}

/// A configured pipeline stage. One instance serves every request on its
/// route, concurrently, so hooks take `&self`.
pub trait Filter: Send + Sync {
    fn request(&self, ctx: &mut dyn FilterContext);
    fn response(&self, ctx: &mut dyn FilterContext);
}

/// A named filter factory.
pub trait Spec: Send + Sync {
    /// The name routes use to reference this filter.
    fn name(&self) -> &str;

    /// Validates `args` and builds a filter. Errors reject the whole route.
    fn create_filter(&self, args: &[Arg]) -> Result<Box<dyn Filter>, Error>;
}

/// Filter specs by name.
#[derive(Clone, Default)]
pub struct Registry {
    specs: HashMap<String, Arc<dyn Spec>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every filter this crate ships.
    pub fn builtin() -> Self {
        Self::new().register(InlineContentSpec)
    }

    /// Adds `spec`, replacing any spec registered under the same name.
    pub fn register(mut self, spec: impl Spec + 'static) -> Self {
        self.specs.insert(spec.name().to_owned(), Arc::new(spec));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Spec>> {
        self.specs.get(name)
    }

    /// Builds the filter `name` from `args`.
    pub fn create(&self, name: &str, args: &[Arg]) -> Result<Box<dyn Filter>, Error> {
        let spec = self
            .get(name)
            .ok_or_else(|| Error::UnknownFilter(name.to_owned()))?;
        let filter = spec.create_filter(args)?;
        debug!(filter = name, args = args.len(), "filter created");
        Ok(filter)
    }
}
