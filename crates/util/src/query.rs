//! Query parameter construction.
//!
//! List params from the admin UI are mapped onto the paging conventions HAL
//! servers commonly use (`page` counted from zero, `size`, and
//! `sort=<field>,<direction>`), with filter entries copied alongside.
//! Array-valued parameters are always encoded by repeating the key
//! (`tag=a&tag=b`), never with brackets or commas.

use halbridge_types::ListParams;
use serde_json::{Map, Value};
use url::Url;

/// Query parameters before encoding, keyed by parameter name.
pub type QueryMap = Map<String, Value>;

/// Build the query map for a list-shaped request.
///
/// The admin UI counts pages from one; the server counts from zero, so page 1
/// becomes `page=0`. Filter entries are copied verbatim and may override the
/// paging keys when they share a name.
///
/// # Arguments
/// * `params` - Pagination, sort and filter as sent by the admin UI
///
/// # Returns
/// A [`QueryMap`] ready for [`append_query`] or [`encode_query`]. Missing
/// pagination or an empty sort field simply leave those keys out.
///
/// # Example
/// ```rust
/// use halbridge_types::{ListParams, Pagination, Sort, SortOrder};
/// use halbridge_util::{build_list_query, encode_query};
/// use serde_json::json;
///
/// let mut params = ListParams {
///     pagination: Some(Pagination { page: 2, per_page: 10 }),
///     sort: Some(Sort { field: "title".into(), order: SortOrder::Desc }),
///     ..ListParams::default()
/// };
/// params.filter.insert("genre".into(), json!(["scifi", "classic"]));
///
/// let query = build_list_query(&params);
/// assert_eq!(query["page"], json!(1));
/// assert_eq!(query["size"], json!(10));
/// assert_eq!(query["sort"], json!("title,desc"));
/// assert!(encode_query(&query).contains("genre=scifi&genre=classic"));
/// ```
pub fn build_list_query(params: &ListParams) -> QueryMap {
    let mut query = QueryMap::new();

    if let Some(pagination) = params.pagination {
        query.insert("page".into(), Value::from(pagination.page.saturating_sub(1)));
        query.insert("size".into(), Value::from(pagination.per_page));
    }

    if let Some(sort) = params.sort.as_ref().filter(|sort| !sort.field.is_empty()) {
        query.insert(
            "sort".into(),
            Value::String(format!("{},{}", sort.field, sort.order.as_query_direction())),
        );
    }

    for (key, value) in &params.filter {
        query.insert(key.clone(), value.clone());
    }

    query
}

/// Flatten a query map into ordered `(key, value)` pairs.
///
/// Arrays expand into one pair per element under the same key, `null`
/// values are dropped and nested objects are sent as compact JSON.
pub fn build_query_pairs(query: &QueryMap) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in query {
        match value {
            Value::Array(items) => {
                for item in items.iter().filter(|item| !item.is_null()) {
                    pairs.push((key.clone(), query_value_to_string(item)));
                }
            }
            Value::Null => {}
            other => pairs.push((key.clone(), query_value_to_string(other))),
        }
    }
    pairs
}

/// Encode a query map as an `application/x-www-form-urlencoded` string.
pub fn encode_query(query: &QueryMap) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(build_query_pairs(query))
        .finish()
}

/// Append the encoded query to `url`, keeping any parameters already present.
pub fn append_query(url: &mut Url, query: &QueryMap) {
    let pairs = build_query_pairs(query);
    if pairs.is_empty() {
        return;
    }
    url.query_pairs_mut().extend_pairs(pairs);
}

fn query_value_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
