//! The admin UI operation contract in typed form.

use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::{Map, Number, Value};

use crate::ParseOperationKindError;

/// The seven operation types understood by the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    GetList,
    GetOne,
    GetMany,
    GetManyReference,
    Create,
    Update,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 7] = [
        Self::GetList,
        Self::GetOne,
        Self::GetMany,
        Self::GetManyReference,
        Self::Create,
        Self::Update,
        Self::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetList => "GET_LIST",
            Self::GetOne => "GET_ONE",
            Self::GetMany => "GET_MANY",
            Self::GetManyReference => "GET_MANY_REFERENCE",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ParseOperationKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseOperationKindError(s.to_string()))
    }
}

/// A resource reference: an identifier or, for HAL resources, a self-link URL.
///
/// The admin UI may hand over numeric identifiers. Their decimal form is what
/// gets resolved as a URL, while [`Reference::to_value`] gives back the number
/// itself so records and bodies carry the id exactly as it was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    text: String,
    number: Option<Number>,
}

impl Reference {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            text: value.into(),
            number: None,
        }
    }

    /// The reference as it is resolved against the current document.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The reference as originally given: a JSON number for numeric ids,
    /// otherwise a string.
    pub fn to_value(&self) -> Value {
        match &self.number {
            Some(number) => Value::Number(number.clone()),
            None => Value::String(self.text.clone()),
        }
    }
}

impl Deref for Reference {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<Number> for Reference {
    fn from(number: Number) -> Self {
        Self {
            text: number.to_string(),
            number: Some(number),
        }
    }
}

impl From<u64> for Reference {
    fn from(value: u64) -> Self {
        Number::from(value).into()
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.number {
            Some(number) => number.serialize(serializer),
            None => serializer.serialize_str(&self.text),
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => Ok(Self::new(text)),
            Value::Number(number) => Ok(number.into()),
            other => Err(D::Error::custom(format!("expected a string or numeric reference, got {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// One-based page number as the admin UI counts pages.
    pub page: u64,
    pub per_page: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortOrder {
    /// Lower-case direction token used in `sort=<field>,<direction>`.
    pub fn as_query_direction(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

/// Pagination, sort and filter settings shared by list-shaped operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    #[serde(default)]
    pub filter: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetOneParams {
    pub id: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetManyParams {
    pub ids: Vec<Reference>,
}

/// Records of one resource that point at another through a foreign key.
///
/// `target` names the foreign-key relation and `id` holds its value, which
/// for HAL servers is the URL of the owning resource's association link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetManyReferenceParams {
    pub target: String,
    pub id: Reference,
    #[serde(flatten)]
    pub list: ListParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateParams {
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Reference>,
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParams {
    pub id: Reference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<Map<String, Value>>,
}

/// One admin UI operation together with its typed params.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    GetList(ListParams),
    GetOne(GetOneParams),
    GetMany(GetManyParams),
    GetManyReference(GetManyReferenceParams),
    Create(CreateParams),
    Update(UpdateParams),
    Delete(DeleteParams),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::GetList(_) => OperationKind::GetList,
            Self::GetOne(_) => OperationKind::GetOne,
            Self::GetMany(_) => OperationKind::GetMany,
            Self::GetManyReference(_) => OperationKind::GetManyReference,
            Self::Create(_) => OperationKind::Create,
            Self::Update(_) => OperationKind::Update,
            Self::Delete(_) => OperationKind::Delete,
        }
    }

    /// Decode the params JSON of a `kind` operation into its typed form.
    ///
    /// A `null` params value is read as an empty object so parameterless list
    /// calls decode to default pagination.
    pub fn from_params(kind: OperationKind, params: Value) -> Result<Self, serde_json::Error> {
        let params = if params.is_null() { Value::Object(Map::new()) } else { params };
        Ok(match kind {
            OperationKind::GetList => Self::GetList(serde_json::from_value(params)?),
            OperationKind::GetOne => Self::GetOne(serde_json::from_value(params)?),
            OperationKind::GetMany => Self::GetMany(serde_json::from_value(params)?),
            OperationKind::GetManyReference => Self::GetManyReference(serde_json::from_value(params)?),
            OperationKind::Create => Self::Create(serde_json::from_value(params)?),
            OperationKind::Update => Self::Update(serde_json::from_value(params)?),
            OperationKind::Delete => Self::Delete(serde_json::from_value(params)?),
        })
    }

    /// The params in their wire (camelCase JSON) form.
    pub fn params_json(&self) -> Value {
        let encoded = match self {
            Self::GetList(params) => serde_json::to_value(params),
            Self::GetOne(params) => serde_json::to_value(params),
            Self::GetMany(params) => serde_json::to_value(params),
            Self::GetManyReference(params) => serde_json::to_value(params),
            Self::Create(params) => serde_json::to_value(params),
            Self::Update(params) => serde_json::to_value(params),
            Self::Delete(params) => serde_json::to_value(params),
        };
        encoded.unwrap_or(Value::Null)
    }
}

/// An operation addressed at a named resource, e.g. `GET_LIST` on `books`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub resource: String,
    pub operation: Operation,
}

impl Request {
    pub fn new(resource: impl Into<String>, operation: Operation) -> Self {
        Self {
            resource: resource.into(),
            operation,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.operation.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operation_kind_parses_admin_ui_names() {
        assert_eq!("GET_LIST".parse::<OperationKind>(), Ok(OperationKind::GetList));
        assert_eq!(
            "GET_MANY_REFERENCE".parse::<OperationKind>(),
            Ok(OperationKind::GetManyReference)
        );
        assert_eq!(
            "PATCH".parse::<OperationKind>(),
            Err(ParseOperationKindError("PATCH".into()))
        );
    }

    #[test]
    fn list_params_decode_pagination_sort_and_filter() {
        let operation = Operation::from_params(
            OperationKind::GetList,
            json!({
                "pagination": { "page": 2, "perPage": 25 },
                "sort": { "field": "title", "order": "DESC" },
                "filter": { "author": "Herbert" }
            }),
        )
        .unwrap();

        let Operation::GetList(params) = operation else {
            panic!("expected GET_LIST params");
        };
        assert_eq!(params.pagination, Some(Pagination { page: 2, per_page: 25 }));
        assert_eq!(params.sort.as_ref().map(|sort| sort.order), Some(SortOrder::Desc));
        assert_eq!(params.filter.get("author"), Some(&json!("Herbert")));
    }

    #[test]
    fn null_params_decode_as_empty_list_params() {
        let operation = Operation::from_params(OperationKind::GetList, Value::Null).unwrap();
        assert_eq!(operation, Operation::GetList(ListParams::default()));
    }

    #[test]
    fn numeric_references_resolve_as_text_but_keep_their_value() {
        let operation = Operation::from_params(OperationKind::GetMany, json!({ "ids": [1, "http://api/books/2"] })).unwrap();
        let Operation::GetMany(params) = operation else {
            panic!("expected GET_MANY params");
        };
        let ids: Vec<&str> = params.ids.iter().map(Reference::as_str).collect();
        assert_eq!(ids, vec!["1", "http://api/books/2"]);

        let values: Vec<Value> = params.ids.iter().map(Reference::to_value).collect();
        assert_eq!(values, vec![json!(1), json!("http://api/books/2")]);
        assert_eq!(operation_ids_json(&params), json!({ "ids": [1, "http://api/books/2"] }));
    }

    fn operation_ids_json(params: &GetManyParams) -> Value {
        Operation::GetMany(params.clone()).params_json()
    }

    #[test]
    fn reference_rejects_structured_values() {
        let result = Operation::from_params(OperationKind::GetOne, json!({ "id": { "nested": true } }));
        assert!(result.is_err());
    }

    #[test]
    fn many_reference_params_flatten_list_settings() {
        let operation = Operation::from_params(
            OperationKind::GetManyReference,
            json!({
                "target": "author",
                "id": "http://api/authors/1/books",
                "pagination": { "page": 1, "perPage": 10 },
                "filter": {}
            }),
        )
        .unwrap();
        let Operation::GetManyReference(params) = operation else {
            panic!("expected GET_MANY_REFERENCE params");
        };
        assert_eq!(params.target, "author");
        assert_eq!(params.list.pagination, Some(Pagination { page: 1, per_page: 10 }));
    }

    #[test]
    fn params_json_uses_wire_field_names() {
        let operation = Operation::Update(UpdateParams {
            id: Some("http://api/books/1".into()),
            data: Map::new(),
            previous_data: Some(Map::new()),
        });
        let params = operation.params_json();
        assert!(params.get("previousData").is_some());
        assert_eq!(operation.kind().to_string(), "UPDATE");
    }
}
