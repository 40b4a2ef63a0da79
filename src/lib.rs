//! # catalog
//!
//! Small JSON endpoints over an in-memory item store, built on a minimal
//! hyper framework, with the request-validation and response-shaping
//! pipeline spelled out as plain data instead of framework magic.
//!
//! ## The pipeline
//!
//! Every endpoint does the same three things:
//!
//! 1. **Validate.** Path, query and body input is checked against a
//!    [`Schema`](schema::Schema) (kinds, inclusive bounds, required/optional/
//!    default) and deserialized into a typed struct. The first violation is a
//!    `422`; domain rules never see invalid input.
//! 2. **Decide.** One trivial domain rule: a sentinel name, an existence
//!    check against a [`Store`](store::Store).
//! 3. **Shape.** The result is serialized, optionally projected down to an
//!    output schema, and returned. Failures are an [`ApiError`] rendered as
//!    `{"detail": "..."}`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use catalog::{Server, routes::Demo};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), catalog::Error> {
//!     let app = Demo::Search.router();
//!     Server::bind("127.0.0.1:8000".parse().unwrap()).serve(app).await
//! }
//! ```
//!
//! Or drive a router in-process, which is how the tests work:
//!
//! ```rust
//! use catalog::{Method, StatusCode, routes::Demo};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = Demo::PathParams.router();
//! let response = app.call(Method::GET, "/items/42", "").await;
//! assert_eq!(response.status_code(), StatusCode::OK);
//! assert_eq!(response.body(), br#"{"item_id":42}"#);
//! # }
//! ```

mod error;
mod handler;
mod middleware;
mod request;
mod response;
mod router;
mod server;

pub mod config;
pub mod item;
pub mod routes;
pub mod schema;
pub mod store;
pub mod telemetry;

pub use error::{ApiError, Error};
pub use handler::Handler;
pub use http::{Method, StatusCode};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
