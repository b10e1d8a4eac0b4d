//! # sji_api_client
//!
//! Typed HTTP client for the Saint-Jacques heritage API.
//!
//! All calls go through [`gateway::Gateway`]; endpoint methods live on
//! [`SjiClient`], grouped by resource under [`endpoints`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod gateway;

pub use client::SjiClient;
pub use error::{ApiError, ApiResult, ErrorKind};
pub use gateway::{Gateway, RequestBody, RequestOptions};
pub use tokio_util::sync::CancellationToken;
