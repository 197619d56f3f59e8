//! Uniform `{<items>, nextToken}` envelope for list and search endpoints.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Validated items plus the upstream continuation cursor.
///
/// Serializes as `{"<items_key>": [...], "nextToken": <cursor>}`; `nextToken` is omitted when
/// the upstream response had none.
#[derive(Debug, Clone)]
pub struct Page<T> {
    items_key: &'static str,
    items: Vec<T>,
    next_token: Option<Value>,
}

impl<T> Page<T> {
    /// Wrap `items`, copying `nextToken` from the raw response unchanged.
    pub fn from_response(items: Vec<T>, raw: &Value, items_key: &'static str) -> Self {
        let next_token = raw.get("nextToken").filter(|v| !v.is_null()).cloned();
        Self {
            items_key,
            items,
            next_token,
        }
    }

    pub fn next_token(&self) -> Option<&Value> {
        self.next_token.as_ref()
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.next_token.is_some() { 2 } else { 1 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry(self.items_key, &self.items)?;
        if let Some(ref token) = self.next_token {
            map.serialize_entry("nextToken", token)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cursor_is_copied_verbatim() {
        let raw = json!({ "events": [], "nextToken": "AAEC/+==tok" });
        let page = Page::from_response(vec![1, 2], &raw, "events");
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({ "events": [1, 2], "nextToken": "AAEC/+==tok" })
        );
    }

    #[test]
    fn missing_or_null_cursor_is_omitted() {
        for raw in [json!({ "records": [] }), json!({ "records": [], "nextToken": null })] {
            let page: Page<u8> = Page::from_response(Vec::new(), &raw, "records");
            let out = serde_json::to_value(&page).unwrap();
            assert_eq!(out, json!({ "records": [] }));
            assert!(page.next_token().is_none());
        }
    }
}
