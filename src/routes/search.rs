//! `GET /search?keyword=..&limit=..`
//!
//! Produces `limit` synthetic hits for `keyword`. The keyword `nothing`
//! (any case) stands in for an empty result and answers 404.

use std::sync::LazyLock;

use http::Method;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::request::Request;
use crate::response::Json;
use crate::router::Router;
use crate::schema::{Field, Schema};

pub static SEARCH_QUERY: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::str("keyword").min_len(3).max_len(50))
        .field(Field::int("limit").range(1, 100).default(10))
});

#[derive(Debug, Deserialize)]
struct SearchQuery {
    keyword: String,
    limit: usize,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub keyword: String,
    pub limit: usize,
    pub results: Vec<String>,
}

pub fn router() -> Router {
    Router::new().on(Method::GET, "/search", search_items)
}

pub async fn search_items(req: Request) -> Result<Json<SearchResults>, ApiError> {
    let SearchQuery { keyword, limit } = req.query_input(&SEARCH_QUERY)?;

    if keyword.to_lowercase() == "nothing" {
        return Err(ApiError::not_found(format!(
            "No items found matching keyword '{keyword}'."
        )));
    }

    let results = (1..=limit)
        .map(|i| format!("Item {i} related to '{keyword}'"))
        .collect();

    Ok(Json(SearchResults { keyword, limit, results }))
}
