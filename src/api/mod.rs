//! HTTP surface: JSON wire types and the axum adapter.

mod types;

pub use types::*;

#[cfg(feature = "axum_api")]
pub mod axum;
