//! API client library for guardlist.
//!
//! Fetches the paginated guard (paid subscriber) list of a Bilibili live
//! room and normalises each record into a flat, exportable shape.

/// Bilibili live guard list API client.
pub mod bilibili;
