//! Outbound content for the dashboard: customer message templates, delayed
//! generation with supersession, the customer page dialog state, and social
//! ad copy selection.
//!
//! Nothing is ever sent. "Send" actions are labels only.

pub mod ads;
pub mod customer_view;
pub mod generator;
pub mod session;
pub mod templates;

pub use ads::{select_ad, AdCopySource, AdCreative};
pub use customer_view::{CustomerDialog, CustomerInsightsPage, CustomerInsightsView, ExpandedKind};
pub use generator::{ContentGenerator, GeneratedContent};
pub use session::{GenerationSession, PendingGeneration};
