//! Incoming HTTP request type and schema-checked input extraction.

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::schema::{Location, Schema, ValidationError};

/// An incoming HTTP request with its body fully buffered.
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    query: Option<String>,
    headers: Vec<(String, String)>,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    /// Builds a request from a method, a request target (`/path?query`),
    /// headers and body. Path parameters are filled in by the router.
    pub fn new(method: Method, target: &str, headers: Vec<(String, String)>, body: Bytes) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path.to_owned(), Some(query.to_owned())),
            None => (target.to_owned(), None),
        };
        Self { method, path, query, headers, body, params: HashMap::new() }
    }

    pub(crate) fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query_string(&self) -> Option<&str> { self.query.as_deref() }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/items/{item_id}`, `req.param("item_id")` on `/items/42`
    /// returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a decoded query parameter. When a key repeats, the last
    /// occurrence wins.
    pub fn query(&self, key: &str) -> Option<String> {
        self.query_map().remove(key).and_then(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    /// Validates the path parameters against `schema` and deserializes them.
    pub fn path_input<T: DeserializeOwned>(&self, schema: &Schema) -> Result<T, ValidationError> {
        let params: Map<String, Value> = self.params.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        schema.extract(Location::Path, &Value::Object(params))
    }

    /// Validates the query string against `schema` and deserializes it.
    pub fn query_input<T: DeserializeOwned>(&self, schema: &Schema) -> Result<T, ValidationError> {
        schema.extract(Location::Query, &Value::Object(self.query_map()))
    }

    /// Parses the body as JSON, validates it against `schema` and
    /// deserializes it.
    pub fn body_input<T: DeserializeOwned>(&self, schema: &Schema) -> Result<T, ValidationError> {
        if self.body.is_empty() {
            return Err(ValidationError::new(Location::Body, "", "Field required"));
        }
        let value: Value = serde_json::from_slice(&self.body)
            .map_err(|e| ValidationError::new(Location::Body, "", format!("JSON decode error: {e}")))?;
        schema.extract(Location::Body, &value)
    }

    fn query_map(&self) -> Map<String, Value> {
        let Some(query) = self.query.as_deref() else {
            return Map::new();
        };
        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn get(target: &str) -> Request {
        Request::new(Method::GET, target, Vec::new(), Bytes::new())
    }

    #[test]
    fn splits_path_and_query() {
        let req = get("/search?keyword=phone&limit=5");
        assert_eq!(req.path(), "/search");
        assert_eq!(req.query_string(), Some("keyword=phone&limit=5"));
        assert_eq!(get("/").query_string(), None);
    }

    #[test]
    fn query_is_decoded_and_last_wins() {
        let req = get("/search?keyword=red+phone&keyword=blue%20phone");
        assert_eq!(req.query("keyword").as_deref(), Some("blue phone"));
        assert_eq!(req.query("limit"), None);
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(
            Method::POST,
            "/items/",
            vec![("Content-Type".to_owned(), "application/json".to_owned())],
            Bytes::new(),
        );
        assert_eq!(req.header("content-type"), Some("application/json"));
    }

    #[test]
    fn path_input_parses_integers() {
        #[derive(serde::Deserialize)]
        struct Id {
            item_id: i64,
        }

        let schema = Schema::new().field(Field::int("item_id"));
        let params = HashMap::from([("item_id".to_owned(), "42".to_owned())]);
        let id: Id = get("/items/42").with_params(params).path_input(&schema).unwrap();
        assert_eq!(id.item_id, 42);
    }

    #[test]
    fn body_input_rejects_empty_and_malformed_bodies() {
        let schema = Schema::new().field(Field::str("name"));

        let err = get("/").path_input::<Value>(&schema).unwrap_err();
        assert_eq!(err.to_string(), "path.name: Field required");

        let empty = Request::new(Method::POST, "/items/", Vec::new(), Bytes::new());
        assert_eq!(empty.body_input::<Value>(&schema).unwrap_err().to_string(), "body: Field required");

        let broken = Request::new(Method::POST, "/items/", Vec::new(), Bytes::from_static(b"{oops"));
        let err = broken.body_input::<Value>(&schema).unwrap_err();
        assert!(err.message.starts_with("JSON decode error"));
    }
}
