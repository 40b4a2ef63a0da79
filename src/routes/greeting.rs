//! `GET /`

use http::Method;
use serde_json::{Value, json};

use crate::request::Request;
use crate::response::Json;
use crate::router::Router;

pub const GREETING: &str = "Hello, GiGi! Welcome to the catalog.";

pub fn router() -> Router {
    Router::new().on(Method::GET, "/", greet)
}

pub async fn greet(_req: Request) -> Json<Value> {
    Json(json!({ "message": GREETING }))
}
