//! # query-group
//!
//! Client-side filtering for the query-group report page: a tree of tracked queries, each
//! annotated with the SQL statement and traceback that produced it, how many related queries it
//! triggered and whether it was a duplicate, plus a form of radio controls that narrow the tree
//! down to one of those properties at a time.
//!
//! ## Architecture
//!
//! - **[`node`]**: `NodeElement` seam and `QueryNode`, the parsed report entry
//! - **[`predicate`]**: `SelectKind` and `NodePredicate`, one predicate per control
//! - **[`group`]**: `QueryGroup`, the shown/hidden partition and its transitions
//! - **[`bootstrap`]**: `FilterGroup`, the explicit entry point binding a page snapshot
//! - **[`config`]**: attribute names and selectors
//! - **`wasm`** (feature `wasm`): `web_sys` adapters and the JavaScript handle
//!
//! ## Quick Start
//!
//! Any environment providing elements and controls can drive a group:
//!
//! ```rust,ignore
//! use query_group::{bootstrap::FilterGroup, config::FilterConfig};
//!
//! let mut group = FilterGroup::bootstrap(entries, controls, &FilterConfig::default())?;
//! // On a click of the second control
//! group.activate(1)?;
//! ```
//!
//! ## Filter transitions
//!
//! Exactly one control is engaged at a time. Clicking another control re-filters incrementally;
//! clicking the engaged control again unchecks it and reveals every entry. See [`group`].
//!
//! ## Features
//!
//! - **default**: platform-neutral core
//! - **wasm**: browser bindings (`wasm-bindgen`, `web-sys`, `tracing-wasm`)

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod group;
pub mod node;
pub mod predicate;
#[cfg(test)]
mod tests;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::*;
