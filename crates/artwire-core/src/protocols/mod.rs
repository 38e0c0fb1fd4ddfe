//! Protocol codecs.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets and ranges (source of truth)
//! - `reader`: bounded byte access and protocol conventions
//! - `parser`: identifier checks and entry points
//! - `error`: explicit, actionable errors
//!
//! Codecs are pure and contain no I/O; capture sources and the scanner
//! handle file access and aggregation.

pub mod artnet;
pub(crate) mod common;
