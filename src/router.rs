//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup. A path that matches no
//! tree is a 404; a path that matches only under other methods is a 405.
//! Captured parameters are percent-decoded before the handler sees them.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;

use crate::error::ApiError;
use crate::handler::{BoxedHandler, Handler};
use crate::middleware;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::schema::{Location, ValidationError};

/// The application router.
///
/// Build it once at startup and hand it to [`Server::serve`](crate::Server::serve),
/// or drive it in-process with [`Router::call`].
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` or
    /// [`Request::path_input`] retrieves them:
    ///
    /// ```rust
    /// # use catalog::{Method, Request, Router, StatusCode};
    /// # async fn read_item(_: Request) -> StatusCode { StatusCode::OK }
    /// # async fn delete_item(_: Request) -> StatusCode { StatusCode::NO_CONTENT }
    /// Router::new()
    ///     .on(Method::GET,    "/items/{item_id}", read_item)
    ///     .on(Method::DELETE, "/items/{item_id}", delete_item);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, Result<HashMap<String, String>, ValidationError>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| decode_param(k, v).map(|decoded| (k.to_owned(), decoded)))
            .collect();
        Some((handler, params))
    }

    fn matches_other_method(&self, method: &Method, path: &str) -> bool {
        self.routes.iter()
            .any(|(m, tree)| m != method && tree.at(path).is_ok())
    }

    /// Routes one request and produces one response.
    pub async fn handle(&self, req: Request) -> Response {
        let method = req.method().clone();
        let path = req.path().to_owned();

        middleware::trace(&method, &path, async {
            match self.lookup(&method, &path) {
                Some((handler, Ok(params))) => handler.call(req.with_params(params)).await,
                Some((_, Err(invalid))) => ApiError::from(invalid).into_response(),
                None if self.matches_other_method(&method, &path) => {
                    ApiError::MethodNotAllowed.into_response()
                }
                None => ApiError::not_found("Not Found").into_response(),
            }
        })
        .await
    }

    /// Sends a request through the router without a network hop.
    ///
    /// `target` is the request target as it would appear on the wire,
    /// including any query string.
    ///
    /// ```rust
    /// # use catalog::{Method, Request, Router, StatusCode};
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let app = Router::new().on(Method::GET, "/", |_req: Request| async { "hi" });
    /// let response = app.call(Method::GET, "/", "").await;
    /// assert_eq!(response.status_code(), StatusCode::OK);
    /// # }
    /// ```
    pub async fn call(&self, method: Method, target: &str, body: impl Into<Bytes>) -> Response {
        let headers = vec![("content-type".to_owned(), "application/json".to_owned())];
        self.handle(Request::new(method, target, headers, body.into())).await
    }
}

/// Percent-decodes one captured segment. Bytes that do not form UTF-8 are a
/// path validation failure, reported before any handler runs.
fn decode_param(name: &str, raw: &str) -> Result<String, ValidationError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ValidationError::new(Location::Path, name, "Input should be a valid UTF-8 string"))
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
