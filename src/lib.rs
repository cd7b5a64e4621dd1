//! # shunt
//!
//! A filter pipeline for HTTP routes, and the `inlineContent` filter that
//! answers requests with literal, preconfigured content instead of
//! forwarding them anywhere.
//!
//! ## The contract
//!
//! Each route is a chain of filters followed by a backend. Filters run their
//! request hooks in order. A filter that calls
//! [`FilterContext::serve`](filter::FilterContext::serve) *shunts* the
//! request: later request hooks and the backend are skipped, and the
//! response hooks of the filters already visited run in reverse order.
//!
//! `inlineContent` always shunts. It serves `200 OK` with a fixed body, a
//! `Content-Type` that is either given or sniffed from the body, and a
//! `Content-Length`. Use it for mocks, health markers, canned errors and
//! static JSON:
//!
//! ```text
//! inlineContent("Enhance Your Calm") -> <shunt>
//! inlineContent("{\"foo\": 42}", "application/json") -> <shunt>
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use shunt::{Route, Router, Server, filter::Registry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), shunt::Error> {
//!     let registry = Registry::builtin();
//!
//!     let app = Router::new()
//!         .route("/healthz", Route::parse(r#"inlineContent("ok") -> <shunt>"#, &registry)?)?
//!         .route("/config", Route::parse(
//!             r#"inlineContent("{\"debug\": false}", "application/json") -> <shunt>"#,
//!             &registry,
//!         )?)?;
//!
//!     Server::bind("0.0.0.0:3000")?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod route;
mod router;
mod server;

pub mod args;
pub mod filter;
pub mod parse;
pub mod sniff;

pub use error::Error;
pub use handler::Handler;
pub use request::Request;
pub use response::{Body, IntoResponse, Response, ResponseBuilder};
pub use route::{Backend, Route};
pub use router::Router;
pub use server::Server;
