//! Response normalizer: validate raw items against a record schema, drop the rest.

use membrowse_types::Record;
use serde_json::Value;

/// Validate one raw item.
pub fn validate_record<T: Record>(item: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(item)
}

/// Items under `item_key` that validate as `T`, in source order.
///
/// Invalid items are logged and skipped; a missing or non-array key yields nothing.
pub fn normalize_items<T: Record>(raw: &Value, item_key: &str) -> Vec<T> {
    let Some(items) = raw.get(item_key).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match validate_record::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(kind = T::KIND, error = %e, "skipping invalid item");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use membrowse_types::{EventSummary, MemoryRecordSummary, Page};
    use serde_json::json;

    #[test]
    fn drops_only_invalid_events() {
        let raw = json!({
            "events": [
                { "eventId": "e1", "sessionId": "s1", "actorId": "a1" },
                { "sessionId": "s2" }
            ],
            "nextToken": "tok1"
        });
        let events: Vec<EventSummary> = normalize_items(&raw, "events");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_id, "e1");

        let page = Page::from_response(events, &raw, "events");
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({
                "events": [{ "eventId": "e1", "sessionId": "s1", "actorId": "a1" }],
                "nextToken": "tok1"
            })
        );
    }

    #[test]
    fn keeps_source_order_around_bad_items() {
        let raw = json!({
            "memoryRecordSummaries": [
                { "memoryRecordId": "r1", "memoryStrategyId": "st", "createdAt": 1 },
                { "memoryRecordId": "r2", "createdAt": 2 },
                "not an object",
                { "memoryRecordId": "r3", "memoryStrategyId": "st", "createdAt": "2024-01-01" }
            ]
        });
        let records: Vec<MemoryRecordSummary> = normalize_items(&raw, "memoryRecordSummaries");
        let ids: Vec<&str> = records.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
    }

    #[test]
    fn missing_or_malformed_key_is_empty() {
        let none: Vec<EventSummary> = normalize_items(&json!({}), "events");
        assert!(none.is_empty());
        let wrong: Vec<EventSummary> = normalize_items(&json!({ "events": { "a": 1 } }), "events");
        assert!(wrong.is_empty());
    }
}
