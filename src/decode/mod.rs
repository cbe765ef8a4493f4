//! Field decoding
//!
//! Converts untyped request fields into typed values as declared by a
//! [`SchemaMap`](crate::schema::SchemaMap). Conversion is weak: compatible
//! representations are accepted (`"12"` for an int, `1` for a bool) and
//! only incompatible shapes fail.

mod duration;
mod field_data;
mod normalize;
pub mod weak;

pub use duration::parse_duration_seconds;
pub use field_data::{FieldData, RawRecord};
pub use normalize::trim_strings;
