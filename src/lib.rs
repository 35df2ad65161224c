//! Builder and encoder for OData `$expand`, `$filter` and `$select` query
//! options.
//!
//! Options are collected into a [`QueryOptions`] either through the chained
//! builder or the flat [`query_options!`] macro, then turned into a
//! name → values map with [`QueryOptions::to_map`]. Values are percent-encoded
//! with spaces as `%20` unless an option is marked raw.

pub mod query;
pub mod render;

pub use query::{
    encode_value, kind_name, KindError, OptionKind, PairArg, QueryOption, QueryOptions, QueryValue,
};
pub use render::{to_query_string, with_query};
