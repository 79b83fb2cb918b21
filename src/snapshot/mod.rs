//! Snapshot output module
//!
//! One complete pagination walk produces one snapshot: the full record set
//! written as a single CSV file with a fixed column order.

mod writer;

pub use writer::{write_snapshot, CSV_HEADER};
