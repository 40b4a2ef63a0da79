//! Create, replace and delete items in the keyed store.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `POST` | `/items/` | 201, item echoed back (not stored) |
//! | `PUT` | `/items/{item_id}` | 200, stored item |
//! | `DELETE` | `/items/{item_id}` | 204, empty body |

use std::sync::Arc;

use http::{Method, StatusCode};
use serde::Serialize;

use super::{ITEM_ID, ItemId};
use crate::error::ApiError;
use crate::item::{ITEM_IN, Item};
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;
use crate::store::{KeyedStore, Store};

/// Name reserved to exercise the duplicate-name path.
const TAKEN_NAME: &str = "test item";

#[derive(Debug, Serialize)]
pub struct Confirmation {
    pub message: String,
    pub item: Item,
}

pub fn router(store: Arc<KeyedStore<Item>>) -> Router {
    let for_update = Arc::clone(&store);
    Router::new()
        .on(Method::POST, "/items/", create_item)
        .on(Method::PUT, "/items/{item_id}", move |req| {
            update_item(Arc::clone(&for_update), req)
        })
        .on(Method::DELETE, "/items/{item_id}", move |req| {
            delete_item(Arc::clone(&store), req)
        })
}

fn missing(item_id: i64) -> ApiError {
    ApiError::not_found(format!("Item with ID {item_id} not found."))
}

pub async fn create_item(req: Request) -> Result<(StatusCode, Json<Confirmation>), ApiError> {
    let item: Item = req.body_input(&ITEM_IN)?;

    if item.name.to_lowercase() == TAKEN_NAME {
        return Err(ApiError::conflict("Item with this name already exists."));
    }

    let confirmation = Confirmation {
        message: "Item created successfully.".to_owned(),
        item,
    };
    Ok((StatusCode::CREATED, Json(confirmation)))
}

pub async fn update_item(
    store: Arc<KeyedStore<Item>>,
    req: Request,
) -> Result<Json<Confirmation>, ApiError> {
    let ItemId { item_id } = req.path_input(&ITEM_ID)?;
    let item: Item = req.body_input(&ITEM_IN)?;

    let stored = store.update(&item_id, item).ok_or_else(|| missing(item_id))?;

    Ok(Json(Confirmation {
        message: format!("Item ID {item_id} updated successfully."),
        item: stored,
    }))
}

pub async fn delete_item(
    store: Arc<KeyedStore<Item>>,
    req: Request,
) -> Result<StatusCode, ApiError> {
    let ItemId { item_id } = req.path_input(&ITEM_ID)?;
    store.delete(&item_id).ok_or_else(|| missing(item_id))?;
    Ok(StatusCode::NO_CONTENT)
}
