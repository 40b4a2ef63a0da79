//! The demo applications.
//!
//! Several endpoints share a method and path (`POST /items/` exists both with
//! and without output filtering), so each group is its own [`Router`] and the
//! binary serves exactly one of them, picked by [`Demo`].

use std::fmt;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;

use crate::item::{self, Item};
use crate::router::Router;
use crate::schema::{Field, Schema};
use crate::store::{KeyedStore, OrderedStore};

pub mod catalog;
pub mod greeting;
pub mod items;
pub mod path_params;
pub mod search;

/// Which demo application to serve.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum Demo {
    /// `GET /`
    Greeting,
    /// `GET /items/{item_id}`
    PathParams,
    /// `GET /search`
    Search,
    /// `POST /items/`, `PUT|DELETE /items/{item_id}` over the seeded keyed store.
    #[default]
    Items,
    /// `POST|GET /items/`, `GET /items/{item_index}` with `in_stock` withheld.
    Catalog,
}

impl Demo {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Greeting   => "greeting",
            Self::PathParams => "path-params",
            Self::Search     => "search",
            Self::Items      => "items",
            Self::Catalog    => "catalog",
        }
    }

    /// Builds the router with a fresh store.
    pub fn router(self) -> Router {
        match self {
            Self::Greeting   => greeting::router(),
            Self::PathParams => path_params::router(),
            Self::Search     => search::router(),
            Self::Items      => items::router(Arc::new(seeded_store())),
            Self::Catalog    => catalog::router(Arc::new(OrderedStore::new())),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The keyed store as the items demo starts with it.
pub fn seeded_store() -> KeyedStore<Item> {
    item::seed().into_iter().collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemId {
    pub item_id: i64,
}

pub(crate) static ITEM_ID: LazyLock<Schema> =
    LazyLock::new(|| Schema::new().field(Field::int("item_id")));
