// Adapters layer: concrete implementations for external systems (catalog, summary source, http, export).

pub mod catalog;
pub mod export;
pub mod http;
pub mod summary_client;
