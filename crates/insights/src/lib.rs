//! Social media insights feed: fetch from the insights service, drop
//! products without detail lists, and track the analysis page state.

pub mod client;
pub mod normalizer;
pub mod page;

pub use client::InsightsClient;
pub use normalizer::{normalize, NormalizedInsights};
pub use page::{InsightsPageState, InsightsPageView, ProductView};
