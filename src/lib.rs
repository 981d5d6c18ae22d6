pub mod charts;
pub mod classify;
pub mod export;
pub mod google_auth;
pub mod http_client;
pub mod provider;
pub mod query;
pub mod record;
pub mod sheet;
pub mod sheets_fetch;
pub mod state;
pub mod summary;
