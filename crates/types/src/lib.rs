//! Shared type definitions for the halbridge data provider.
//!
//! The admin UI speaks a small contract of seven operations. This crate holds
//! the typed form of that contract ([`Request`], [`Operation`] and the
//! per-operation params), the normalized output ([`Record`] and
//! [`ResultEnvelope`]) and the uniform [`HttpError`] raised whenever a
//! hypermedia navigation answers with an error status.

mod envelope;
mod error;
mod operation;

pub use envelope::{EnvelopeData, ID_FIELD, Record, ResultEnvelope, record_id};
pub use error::{HttpError, ParseOperationKindError};
pub use operation::{
    CreateParams, DeleteParams, GetManyParams, GetManyReferenceParams, GetOneParams, ListParams, Operation, OperationKind, Pagination,
    Reference, Request, Sort, SortOrder, UpdateParams,
};
