//! The `Item` record and its input/output schemas.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::schema::{Field, Schema};

/// A named, priced, stock-tracked catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub in_stock: bool,
}

impl Item {
    pub fn new(name: &str, description: Option<&str>, price: f64, in_stock: bool) -> Self {
        Self {
            name: name.to_owned(),
            description: description.map(str::to_owned),
            price,
            in_stock,
        }
    }
}

/// Fields a client submits when creating or replacing an item.
pub static ITEM_IN: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::str("name").min_len(1).max_len(100))
        .field(Field::str("description").max_len(300).optional())
        .field(Field::float("price").gt(0.0))
        .field(Field::bool("in_stock"))
});

/// Fields sent back from the filtered endpoints. `in_stock` stays internal.
pub static ITEM_OUT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::str("name"))
        .field(Field::str("description").optional())
        .field(Field::float("price"))
});

/// Contents of the keyed store at startup.
pub fn seed() -> Vec<(i64, Item)> {
    vec![
        (1, Item::new("Laptop", Some("High-end gaming laptop."), 1500.00, true)),
        (2, Item::new("Smartphone", Some("Latest model smartphone."), 999.99, true)),
    ]
}
