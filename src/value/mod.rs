//! Typed value model for blueprint configuration.
//!
//! Untyped YAML is decoded into a small tagged algebra ([`TypedValue`]) and
//! stored in string-keyed containers ([`Dict`]). Containers marshal back to a
//! JSON-compatible structure without loss for anything the decoder produces.

mod dict;
mod typed;


pub use dict::Dict;
pub use typed::TypedValue;
