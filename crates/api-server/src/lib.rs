#![warn(clippy::unwrap_used)]

pub mod customer_rest;
pub mod dashboard_rest;
pub mod insights_rest;
pub mod rest;
pub mod server;
pub mod swagger;

pub use rest::AppState;
pub use server::ApiServer;
pub use swagger::ApiDoc;
