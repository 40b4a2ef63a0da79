//! Items appended to an ordered store and served through the output schema.
//!
//! Every response body passes through [`ITEM_OUT`]'s projection, so
//! `in_stock` is accepted and stored but never sent back.

use std::sync::{Arc, LazyLock};

use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::item::{ITEM_IN, ITEM_OUT, Item};
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;
use crate::schema::{Field, Schema};
use crate::store::{OrderedStore, Store};

static ITEM_INDEX: LazyLock<Schema> =
    LazyLock::new(|| Schema::new().field(Field::int("item_index")));

#[derive(Debug, Deserialize)]
struct ItemIndex {
    item_index: i64,
}

pub fn router(store: Arc<OrderedStore<Item>>) -> Router {
    let for_create = Arc::clone(&store);
    let for_list = Arc::clone(&store);
    Router::new()
        .on(Method::POST, "/items/", move |req| {
            create_item(Arc::clone(&for_create), req)
        })
        .on(Method::GET, "/items/", move |req| {
            list_items(Arc::clone(&for_list), req)
        })
        .on(Method::GET, "/items/{item_index}", move |req| {
            get_item(Arc::clone(&store), req)
        })
}

/// Serializes `value` and keeps only the output fields.
pub fn to_output<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    let full = serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(ITEM_OUT.project(&full))
}

pub async fn create_item(
    store: Arc<OrderedStore<Item>>,
    req: Request,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let item: Item = req.body_input(&ITEM_IN)?;
    let output = to_output(&item)?;
    store.insert(item);
    Ok((StatusCode::CREATED, Json(output)))
}

pub async fn list_items(
    store: Arc<OrderedStore<Item>>,
    _req: Request,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(to_output(&store.list())?))
}

pub async fn get_item(
    store: Arc<OrderedStore<Item>>,
    req: Request,
) -> Result<Json<Value>, ApiError> {
    let ItemIndex { item_index } = req.path_input(&ITEM_INDEX)?;
    let item = store.get(&item_index).ok_or_else(|| {
        ApiError::not_found(format!("Item at index {item_index} not found."))
    })?;
    Ok(Json(to_output(&item)?))
}
