//! Shared types for the insights dashboard: customers, channels, products,
//! pain point analysis, configuration, and the error type every other crate
//! returns.

pub mod channels;
pub mod config;
pub mod customers;
pub mod error;
pub mod pain_points;
pub mod products;

pub use channels::{AdChannel, ContentChannel, ContentFormat};
pub use config::AppConfig;
pub use customers::{Customer, CustomerDirectory, CustomerStatus};
pub use error::{InsightsError, InsightsResult};
pub use pain_points::{ImpactLevel, PainPoint, PainPointAnalysis};
pub use products::{DetailEntry, InsightSection, Product, ResolvedEntry};
