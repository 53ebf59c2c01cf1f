//! HAL resources to admin UI records.

use halbridge_api::HalResource;
use halbridge_types::{ID_FIELD, Record, Reference, record_id};
use serde_json::Value;
use tracing::warn;

use crate::TotalSource;

/// Flatten a resource into a record with an `id`.
///
/// An explicit, non-null `id` property wins; otherwise the self-link URL is
/// used, so HAL resources that only identify themselves through links still
/// get a stable identifier.
pub fn normalize_record(resource: &HalResource) -> Record {
    let mut record = resource.to_object();
    if record_id(&record).is_none() {
        match resource.self_href() {
            Some(href) => {
                record.insert(ID_FIELD.to_string(), Value::String(href));
            }
            None => warn!("resource has neither an id nor a self link"),
        }
    }
    record
}

/// Normalize every resource embedded under `name`, keeping server order.
pub fn normalize_collection(resource: &HalResource, name: &str) -> Vec<Record> {
    resource.embedded(name).iter().map(normalize_record).collect()
}

/// Overwrite the record's `id` with the reference it was requested by.
pub fn with_requested_id(mut record: Record, requested: &Reference) -> Record {
    record.insert(ID_FIELD.to_string(), requested.to_value());
    record
}

/// Read a collection total. Absent or non-numeric totals read as `None`.
pub fn read_total(resource: &HalResource, source: &TotalSource) -> Option<u64> {
    let value = match source {
        TotalSource::PageTotalElements => resource.property("page")?.get("totalElements")?,
        TotalSource::Property(name) => resource.property(name)?,
    };
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|total| *total >= 0.0).map(|total| total as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: Value) -> HalResource {
        HalResource::from_value(value)
    }

    #[test]
    fn missing_id_defaults_to_self_href() {
        let record = normalize_record(&resource(json!({
            "title": "Dune",
            "_links": { "self": { "href": "http://api.test/books/1" } }
        })));
        assert_eq!(record["id"], json!("http://api.test/books/1"));
        assert_eq!(record["_links"]["self"]["href"], json!("http://api.test/books/1"));
    }

    #[test]
    fn explicit_id_is_kept() {
        let record = normalize_record(&resource(json!({
            "id": 42,
            "_links": { "self": { "href": "http://api.test/books/42" } }
        })));
        assert_eq!(record["id"], json!(42));
    }

    #[test]
    fn null_id_is_replaced() {
        let record = normalize_record(&resource(json!({
            "id": null,
            "_links": { "self": { "href": "http://api.test/books/7" } }
        })));
        assert_eq!(record["id"], json!("http://api.test/books/7"));
    }

    #[test]
    fn resource_without_identity_is_left_alone() {
        let record = normalize_record(&resource(json!({ "title": "Anonymous" })));
        assert!(record.get("id").is_none());
    }

    #[test]
    fn collection_items_keep_order() {
        let page = resource(json!({
            "_embedded": { "books": [
                { "_links": { "self": { "href": "http://api.test/books/2" } } },
                { "id": "x", "_links": { "self": { "href": "http://api.test/books/1" } } }
            ] }
        }));
        let ids: Vec<Value> = normalize_collection(&page, "books").iter().map(|record| record["id"].clone()).collect();
        assert_eq!(ids, vec![json!("http://api.test/books/2"), json!("x")]);
        assert!(normalize_collection(&page, "authors").is_empty());
    }

    #[test]
    fn requested_id_overrides_server_id() {
        let record = normalize_record(&resource(json!({ "id": 9 })));
        let record = with_requested_id(record, &Reference::from("http://api.test/books/9"));
        assert_eq!(record["id"], json!("http://api.test/books/9"));
    }

    #[test]
    fn numeric_requested_id_stays_numeric() {
        let record = normalize_record(&resource(json!({ "_links": { "self": { "href": "http://api.test/books/4" } } })));
        let record = with_requested_id(record, &Reference::from(4u64));
        assert_eq!(record["id"], json!(4));
    }

    #[test]
    fn totals_follow_each_convention() {
        let page = resource(json!({ "page": { "totalElements": 5 }, "totalBooks": 3.0, "totalAuthors": "many" }));
        assert_eq!(read_total(&page, &TotalSource::PageTotalElements), Some(5));
        assert_eq!(read_total(&page, &TotalSource::Property("totalBooks".into())), Some(3));
        assert_eq!(read_total(&page, &TotalSource::Property("totalAuthors".into())), None);
        assert_eq!(read_total(&resource(json!({})), &TotalSource::PageTotalElements), None);
    }
}
