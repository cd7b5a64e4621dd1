//! Mock server built only from `inlineContent` routes, plus one real handler.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example inline
//!
//! Try:
//!   curl -i http://localhost:3000/healthz
//!   curl -i http://localhost:3000/users/42
//!   curl -i http://localhost:3000/calm
//!   curl -i http://localhost:3000/echo/hello

use shunt::filter::Registry;
use shunt::{Request, Route, Router, Server};

#[tokio::main]
async fn main() -> Result<(), shunt::Error> {
    tracing_subscriber::fmt::init();

    let registry = Registry::builtin();

    let app = Router::new()
        .route("/healthz", Route::parse(r#"inlineContent("ok") -> <shunt>"#, &registry)?)?
        .route("/users/{id}", Route::parse(
            r#"inlineContent("{\"id\": 42, \"name\": \"alice\"}", "application/json") -> <shunt>"#,
            &registry,
        )?)?
        .route("/calm", Route::parse(
            r#"inlineContent("<html><body>Enhance Your Calm</body></html>") -> <shunt>"#,
            &registry,
        )?)?
        .route("/echo/{word}", Route::handler(echo))?;

    Server::bind("0.0.0.0:3000")?.serve(app).await
}

// GET /echo/{word} — reaches a handler because no filter shunts it.
async fn echo(req: Request) -> String {
    req.param("word").unwrap_or_default().to_owned()
}
