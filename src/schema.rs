//! Declarative field schemas, the generic validator that consumes them, and
//! output projection.
//!
//! A [`Schema`] is plain data: an ordered list of [`Field`]s, each with a
//! kind, bounds and a presence rule. The same description serves three jobs:
//!
//! 1. [`Schema::validate`] checks raw input and normalizes it into a JSON
//!    object holding exactly the declared fields.
//! 2. [`Schema::extract`] does the same and then deserializes into a typed
//!    struct with serde.
//! 3. [`Schema::project`] filters an outgoing value down to the declared
//!    fields, dropping everything else.
//!
//! Path and query values arrive as text and are parsed into the declared
//! kind. Body values are JSON and must already have the right type: a JSON
//! string `"12"` is not an integer.
//!
//! ```rust
//! use catalog::schema::{Field, Location, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field(Field::str("keyword").min_len(3).max_len(50))
//!     .field(Field::int("limit").range(1, 100).default(10));
//!
//! let valid = schema.validate(Location::Query, &json!({ "keyword": "phone" })).unwrap();
//! assert_eq!(valid["limit"], 10);
//!
//! let err = schema.validate(Location::Query, &json!({ "keyword": "ab" })).unwrap_err();
//! assert_eq!(err.to_string(), "query.keyword: String should have at least 3 characters");
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Where an input value came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Location {
    Path,
    Query,
    Body,
}

impl Location {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path  => "path",
            Self::Query => "query",
            Self::Body  => "body",
        }
    }

    fn is_text(self) -> bool {
        !matches!(self, Self::Body)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first constraint an input failed.
///
/// Renders as `location.field: message`, or `location: message` when the
/// failure concerns the input as a whole (e.g. a body that is not JSON).
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationError {
    pub location: Location,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(location: Location, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { location, field: field.into(), message: message.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}: {}", self.location, self.message)
        } else {
            write!(f, "{}.{}: {}", self.location, self.field, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Value kind plus its bounds. All bounds are inclusive except `Float::gt`.
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// Length bounds count Unicode scalar values, not bytes.
    Str { min_len: Option<usize>, max_len: Option<usize> },
    Int { ge: Option<i64>, le: Option<i64> },
    Float { gt: Option<f64> },
    Bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Presence {
    Required,
    /// Missing or `null` normalizes to `null`.
    Optional,
    /// Missing normalizes to the given value.
    Default(Value),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: &'static str,
    kind: Kind,
    presence: Presence,
}

impl Field {
    fn new(name: &'static str, kind: Kind) -> Self {
        Self { name, kind, presence: Presence::Required }
    }

    pub fn str(name: &'static str) -> Self {
        Self::new(name, Kind::Str { min_len: None, max_len: None })
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, Kind::Int { ge: None, le: None })
    }

    pub fn float(name: &'static str) -> Self {
        Self::new(name, Kind::Float { gt: None })
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, Kind::Bool)
    }

    pub fn min_len(mut self, n: usize) -> Self {
        debug_assert!(matches!(self.kind, Kind::Str { .. }), "min_len on non-string `{}`", self.name);
        if let Kind::Str { min_len, .. } = &mut self.kind {
            *min_len = Some(n);
        }
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        debug_assert!(matches!(self.kind, Kind::Str { .. }), "max_len on non-string `{}`", self.name);
        if let Kind::Str { max_len, .. } = &mut self.kind {
            *max_len = Some(n);
        }
        self
    }

    /// Inclusive integer range.
    pub fn range(mut self, lo: i64, hi: i64) -> Self {
        debug_assert!(matches!(self.kind, Kind::Int { .. }), "range on non-integer `{}`", self.name);
        if let Kind::Int { ge, le } = &mut self.kind {
            *ge = Some(lo);
            *le = Some(hi);
        }
        self
    }

    /// Exclusive lower bound.
    pub fn gt(mut self, bound: f64) -> Self {
        debug_assert!(matches!(self.kind, Kind::Float { .. }), "gt on non-float `{}`", self.name);
        if let Kind::Float { gt } = &mut self.kind {
            *gt = Some(bound);
        }
        self
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.presence = Presence::Default(value.into());
        self
    }

    pub fn name(&self) -> &'static str { self.name }
    pub fn kind(&self) -> &Kind { &self.kind }
    pub fn presence(&self) -> &Presence { &self.presence }

    /// Type check first, then bounds. Returns the normalized value.
    fn check(&self, location: Location, value: &Value) -> Result<Value, String> {
        let text = location.is_text();
        match &self.kind {
            Kind::Str { min_len, max_len } => {
                let s = value.as_str().ok_or("Input should be a valid string")?;
                let len = s.chars().count();
                if let Some(min) = *min_len {
                    if len < min {
                        return Err(format!("String should have at least {}", characters(min)));
                    }
                }
                if let Some(max) = *max_len {
                    if len > max {
                        return Err(format!("String should have at most {}", characters(max)));
                    }
                }
                Ok(Value::String(s.to_owned()))
            }
            Kind::Int { ge, le } => {
                let n = match value {
                    Value::String(s) if text => s.parse::<i64>().ok(),
                    Value::Number(n) if !text => n.as_i64(),
                    _ => None,
                }
                .ok_or("Input should be a valid integer")?;
                if let Some(lo) = *ge {
                    if n < lo {
                        return Err(format!("Input should be greater than or equal to {lo}"));
                    }
                }
                if let Some(hi) = *le {
                    if n > hi {
                        return Err(format!("Input should be less than or equal to {hi}"));
                    }
                }
                Ok(Value::from(n))
            }
            Kind::Float { gt } => {
                let x = match value {
                    Value::String(s) if text => s.parse::<f64>().ok().filter(|x| x.is_finite()),
                    Value::Number(n) if !text => n.as_f64(),
                    _ => None,
                }
                .ok_or("Input should be a valid number")?;
                if let Some(bound) = *gt {
                    if x <= bound {
                        return Err(format!("Input should be greater than {bound}"));
                    }
                }
                Ok(Value::from(x))
            }
            Kind::Bool => {
                let b = match value {
                    Value::String(s) if text => parse_bool(s),
                    Value::Bool(b) if !text => Some(*b),
                    _ => None,
                }
                .ok_or("Input should be a valid boolean")?;
                Ok(Value::Bool(b))
            }
        }
    }
}

fn characters(n: usize) -> String {
    if n == 1 { "1 character".to_owned() } else { format!("{n} characters") }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y"  => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

/// An ordered list of field declarations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(Field::name)
    }

    /// Checks `input` against every field in declaration order and returns
    /// the normalized object, or the first failure.
    ///
    /// Undeclared keys in `input` are ignored and do not appear in the output.
    pub fn validate(&self, location: Location, input: &Value) -> Result<Map<String, Value>, ValidationError> {
        let object = input.as_object().ok_or_else(|| {
            ValidationError::new(location, "", "Input should be a valid dictionary")
        })?;

        let mut out = Map::new();
        for field in &self.fields {
            let normalized = match (object.get(field.name), &field.presence) {
                (None, Presence::Required) => {
                    return Err(ValidationError::new(location, field.name, "Field required"));
                }
                (None, Presence::Optional) | (Some(Value::Null), Presence::Optional) => Value::Null,
                (None, Presence::Default(value)) => value.clone(),
                (Some(value), _) => field
                    .check(location, value)
                    .map_err(|msg| ValidationError::new(location, field.name, msg))?,
            };
            out.insert(field.name.to_owned(), normalized);
        }
        Ok(out)
    }

    /// [`validate`](Self::validate), then deserialize into `T`.
    pub fn extract<T: DeserializeOwned>(&self, location: Location, input: &Value) -> Result<T, ValidationError> {
        let valid = self.validate(location, input)?;
        serde_json::from_value(Value::Object(valid))
            .map_err(|e| ValidationError::new(location, "", e.to_string()))
    }

    /// Restricts `value` to the declared fields.
    ///
    /// Objects keep only declared keys that are present; arrays are projected
    /// element-wise; any other value passes through unchanged. Pure.
    pub fn project(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.iter().map(|v| self.project(v)).collect()),
            Value::Object(map) => Value::Object(
                self.fields
                    .iter()
                    .filter_map(|f| map.get(f.name).map(|v| (f.name.to_owned(), v.clone())))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search() -> Schema {
        Schema::new()
            .field(Field::str("keyword").min_len(3).max_len(50))
            .field(Field::int("limit").range(1, 100).default(10))
    }

    fn item() -> Schema {
        Schema::new()
            .field(Field::str("name").min_len(1).max_len(100))
            .field(Field::str("description").max_len(300).optional())
            .field(Field::float("price").gt(0.0))
            .field(Field::bool("in_stock"))
    }

    #[test]
    fn string_bounds_are_inclusive() {
        let s = search();
        for keyword in ["abc".to_owned(), "x".repeat(50)] {
            assert!(s.validate(Location::Query, &json!({ "keyword": keyword })).is_ok());
        }
        for keyword in ["ab".to_owned(), "x".repeat(51)] {
            assert!(s.validate(Location::Query, &json!({ "keyword": keyword })).is_err());
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Three characters, six bytes.
        let valid = search().validate(Location::Query, &json!({ "keyword": "ééé" }));
        assert!(valid.is_ok());
    }

    #[test]
    fn integer_bounds_are_inclusive() {
        let s = search();
        for limit in ["1", "100"] {
            let v = s.validate(Location::Query, &json!({ "keyword": "abc", "limit": limit })).unwrap();
            assert!(v["limit"].is_i64());
        }
        let err = s.validate(Location::Query, &json!({ "keyword": "abc", "limit": "0" })).unwrap_err();
        assert_eq!(err.message, "Input should be greater than or equal to 1");
        let err = s.validate(Location::Query, &json!({ "keyword": "abc", "limit": "101" })).unwrap_err();
        assert_eq!(err.message, "Input should be less than or equal to 100");
    }

    #[test]
    fn default_fills_missing_field() {
        let v = search().validate(Location::Query, &json!({ "keyword": "phone" })).unwrap();
        assert_eq!(v["limit"], json!(10));
    }

    #[test]
    fn text_sources_parse_but_body_is_strict() {
        let schema = Schema::new().field(Field::int("item_id"));
        assert_eq!(schema.validate(Location::Path, &json!({ "item_id": "42" })).unwrap()["item_id"], json!(42));

        let err = schema.validate(Location::Path, &json!({ "item_id": "4.2" })).unwrap_err();
        assert_eq!(err.to_string(), "path.item_id: Input should be a valid integer");

        let err = schema.validate(Location::Body, &json!({ "item_id": "42" })).unwrap_err();
        assert_eq!(err.to_string(), "body.item_id: Input should be a valid integer");
    }

    #[test]
    fn missing_required_field() {
        let err = search().validate(Location::Query, &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "query.keyword: Field required");
    }

    #[test]
    fn first_failing_field_wins() {
        let err = item()
            .validate(Location::Body, &json!({ "name": "", "price": -1.0 }))
            .unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "String should have at least 1 character");
    }

    #[test]
    fn optional_accepts_null_and_absence() {
        let body = json!({ "name": "Pen", "price": 1.5, "in_stock": false });
        let v = item().validate(Location::Body, &body).unwrap();
        assert_eq!(v["description"], Value::Null);

        let body = json!({ "name": "Pen", "description": null, "price": 1.5, "in_stock": false });
        assert!(item().validate(Location::Body, &body).is_ok());
    }

    #[test]
    fn price_must_be_strictly_positive() {
        let body = json!({ "name": "Pen", "price": 0, "in_stock": true });
        let err = item().validate(Location::Body, &body).unwrap_err();
        assert_eq!(err.to_string(), "body.price: Input should be greater than 0");

        let body = json!({ "name": "Pen", "price": 2, "in_stock": true });
        assert_eq!(item().validate(Location::Body, &body).unwrap()["price"], json!(2.0));
    }

    #[test]
    fn bool_from_query_text() {
        let schema = Schema::new().field(Field::bool("flag"));
        assert_eq!(schema.validate(Location::Query, &json!({ "flag": "Yes" })).unwrap()["flag"], json!(true));
        assert!(schema.validate(Location::Query, &json!({ "flag": "maybe" })).is_err());
        assert!(schema.validate(Location::Body, &json!({ "flag": "true" })).is_err());
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = item().validate(Location::Body, &json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "body: Input should be a valid dictionary");
    }

    #[test]
    fn undeclared_keys_are_dropped() {
        let body = json!({ "name": "Pen", "price": 1.5, "in_stock": true, "colour": "red" });
        let v = item().validate(Location::Body, &body).unwrap();
        assert!(!v.contains_key("colour"));
    }

    #[test]
    fn extract_into_typed_struct() {
        #[derive(serde::Deserialize)]
        struct Search {
            keyword: String,
            limit: u8,
        }

        let s: Search = search().extract(Location::Query, &json!({ "keyword": "phone", "limit": "5" })).unwrap();
        assert_eq!(s.keyword, "phone");
        assert_eq!(s.limit, 5);
    }

    #[test]
    fn project_filters_objects_and_arrays() {
        let out = Schema::new().field(Field::str("name")).field(Field::float("price"));
        let value = json!({ "name": "Pen", "price": 1.5, "in_stock": true });
        assert_eq!(out.project(&value), json!({ "name": "Pen", "price": 1.5 }));

        let list = json!([value, { "name": "Cup", "secret": 1 }]);
        assert_eq!(out.project(&list), json!([{ "name": "Pen", "price": 1.5 }, { "name": "Cup" }]));
        assert_eq!(out.project(&json!(3)), json!(3));
    }
}
