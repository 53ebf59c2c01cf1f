use serde::Serialize;
use serde_json::{Map, Value};

/// Name of the identifier field every returned record carries.
pub const ID_FIELD: &str = "id";

/// A normalized resource: a flat mapping from field name to value.
pub type Record = Map<String, Value>;

/// Returns the record's identifier, treating an explicit `null` as absent.
pub fn record_id(record: &Record) -> Option<&Value> {
    record.get(ID_FIELD).filter(|value| !value.is_null())
}

/// Payload of a [`ResultEnvelope`]: one record or an ordered list of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvelopeData {
    One(Record),
    Many(Vec<Record>),
}

/// The `{ data, total? }` shape handed back to the admin UI.
///
/// List-shaped operations always carry a `total`; single-record operations
/// never do, and the field is omitted from the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    pub data: EnvelopeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl ResultEnvelope {
    pub fn single(record: Record) -> Self {
        Self {
            data: EnvelopeData::One(record),
            total: None,
        }
    }

    pub fn list(records: Vec<Record>, total: u64) -> Self {
        Self {
            data: EnvelopeData::Many(records),
            total: Some(total),
        }
    }

    /// The single record, when this envelope holds one.
    pub fn record(&self) -> Option<&Record> {
        match &self.data {
            EnvelopeData::One(record) => Some(record),
            EnvelopeData::Many(_) => None,
        }
    }

    /// The records of a list-shaped envelope; empty for single-record envelopes.
    pub fn records(&self) -> &[Record] {
        match &self.data {
            EnvelopeData::Many(records) => records,
            EnvelopeData::One(_) => &[],
        }
    }
}
