//! fielddata - schema-directed decoding of untyped request fields
//!
//! A [`decode::FieldData`] pairs one raw JSON record with a
//! [`schema::SchemaMap`] and hands out typed values, converting compatible
//! representations along the way.

pub mod cli;
pub mod decode;
pub mod schema;

pub use decode::{FieldData, RawRecord};
pub use schema::{DecodeError, FieldSchema, FieldType, FieldValue, SchemaMap};
