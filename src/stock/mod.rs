//! Internal stock service HTTP surface
//!
//! Unauthenticated by design: it only ever faces the API service over a
//! trusted network.

mod handlers;

pub use handlers::{router, StockState};
