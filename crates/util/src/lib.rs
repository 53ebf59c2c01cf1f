//! Helpers shared by the halbridge crates.
//!
//! - [`query`]: admin UI list params to query maps, repeated-key encoding
//! - [`inflection`]: singular resource names and capitalized property names
//! - [`redaction`]: secret scrubbing for diagnostic output

pub mod inflection;
pub mod query;
pub mod redaction;

pub use inflection::{capitalize_first, singularize};
pub use query::{QueryMap, append_query, build_list_query, build_query_pairs, encode_query};
pub use redaction::{redact_json, redact_sensitive};
