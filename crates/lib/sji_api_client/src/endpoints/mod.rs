//! Endpoint methods on [`SjiClient`](crate::SjiClient), one module per resource.

pub mod account;
pub mod admin;
pub mod auth;
pub mod drafts;
pub mod geo;
pub mod media;
pub mod records;
pub mod search;
pub mod users;
pub mod vocabulary;
