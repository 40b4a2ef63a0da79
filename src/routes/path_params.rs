//! `GET /items/{item_id}` echoes the parsed id.

use http::Method;
use serde_json::{Value, json};

use super::{ITEM_ID, ItemId};
use crate::error::ApiError;
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;

pub fn router() -> Router {
    Router::new().on(Method::GET, "/items/{item_id}", read_item)
}

pub async fn read_item(req: Request) -> Result<Json<Value>, ApiError> {
    let ItemId { item_id } = req.path_input(&ITEM_ID)?;
    Ok(Json(json!({ "item_id": item_id })))
}
