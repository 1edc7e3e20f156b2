//! Social media analysis page state.
//!
//! The page is in exactly one of four states. Product selection and the ad
//! preview exist only inside `Ready`, so an ad can never be open without a
//! product to belong to.

use crate::client::InsightsClient;
use crate::normalizer::NormalizedInsights;
use insights_channels::{select_ad, AdCreative};
use insights_core::{
    AdChannel, InsightSection, InsightsError, InsightsResult, Product, ResolvedEntry,
};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

pub const LOADING_MESSAGE: &str = "Loading products...";
pub const EMPTY_MESSAGE: &str = "No products found.";
pub const FETCH_ERROR_FALLBACK: &str = "An error occurred while fetching products";

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyState {
    products: Vec<Product>,
    selected: usize,
    ad_preview: Option<AdCreative>,
}

impl ReadyState {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn selected_product(&self) -> &Product {
        &self.products[self.selected]
    }

    pub fn ad_preview(&self) -> Option<&AdCreative> {
        self.ad_preview.as_ref()
    }

    fn position(&self, product_id: &str) -> InsightsResult<usize> {
        self.products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or_else(|| InsightsError::ProductNotFound(product_id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsightsPageState {
    Loading,
    Failed { message: String },
    Empty,
    Ready(ReadyState),
}

impl InsightsPageState {
    /// State after the fetch settles.
    pub fn from_fetch(result: InsightsResult<NormalizedInsights>) -> Self {
        match result {
            Ok(normalized) if normalized.is_empty() => InsightsPageState::Empty,
            Ok(normalized) => InsightsPageState::Ready(ReadyState {
                products: normalized.into_products(),
                selected: 0,
                ad_preview: None,
            }),
            Err(e) => {
                let message = e.to_string();
                let message = if message.trim().is_empty() {
                    FETCH_ERROR_FALLBACK.to_string()
                } else {
                    message
                };
                InsightsPageState::Failed { message }
            }
        }
    }

    /// Fetch from the service and settle. Errors end up in `Failed`.
    pub async fn load(client: &InsightsClient) -> Self {
        let result = client.fetch_products().await;
        match &result {
            Ok(normalized) => info!(
                products = normalized.len(),
                discarded = normalized.discarded(),
                "Insights loaded"
            ),
            Err(e) => error!(error = %e, endpoint = %client.endpoint(), "Insights fetch failed"),
        }
        Self::from_fetch(result)
    }

    /// Text shown in place of the product list, if any.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            InsightsPageState::Loading => Some(LOADING_MESSAGE),
            InsightsPageState::Failed { message } => Some(message),
            InsightsPageState::Empty => Some(EMPTY_MESSAGE),
            InsightsPageState::Ready(_) => None,
        }
    }

    pub fn products(&self) -> &[Product] {
        match self {
            InsightsPageState::Ready(ready) => ready.products(),
            _ => &[],
        }
    }

    pub fn selected_product(&self) -> Option<&Product> {
        match self {
            InsightsPageState::Ready(ready) => Some(ready.selected_product()),
            _ => None,
        }
    }

    pub fn ad_preview(&self) -> Option<&AdCreative> {
        match self {
            InsightsPageState::Ready(ready) => ready.ad_preview(),
            _ => None,
        }
    }

    fn ready_mut(&mut self, product_id: &str) -> InsightsResult<&mut ReadyState> {
        match self {
            InsightsPageState::Ready(ready) => Ok(ready),
            _ => Err(InsightsError::ProductNotFound(product_id.to_string())),
        }
    }

    /// Make `product_id` the displayed product. Closes any open ad preview.
    pub fn select(&mut self, product_id: &str) -> InsightsResult<&Product> {
        let ready = self.ready_mut(product_id)?;
        ready.selected = ready.position(product_id)?;
        ready.ad_preview = None;
        Ok(ready.selected_product())
    }

    /// Select `product_id` and open its ad preview for `channel`.
    pub fn open_ad(&mut self, product_id: &str, channel: AdChannel) -> InsightsResult<&AdCreative> {
        let ready = self.ready_mut(product_id)?;
        ready.selected = ready.position(product_id)?;
        let creative = select_ad(Some(ready.selected_product()), channel);
        Ok(ready.ad_preview.insert(creative))
    }

    pub fn close_ad(&mut self) {
        if let InsightsPageState::Ready(ready) = self {
            ready.ad_preview = None;
        }
    }
}

// ─── Display Views ──────────────────────────────────────────────────────────

/// One tab of a product card.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct SectionView {
    pub section: InsightSection,
    pub tab_label: String,
    pub entries: Vec<ResolvedEntry>,
    /// Set when the tab has no entries.
    pub empty_message: Option<String>,
}

/// A product card with every entry already resolved.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ProductView {
    pub id: String,
    pub trend_summary: Option<String>,
    pub generated_at: Option<String>,
    pub sections: Vec<SectionView>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        let sections = InsightSection::ALL
            .iter()
            .map(|&section| {
                let entries = product.resolved(section);
                let empty_message = entries
                    .is_empty()
                    .then(|| section.empty_message().to_string());
                SectionView {
                    section,
                    tab_label: section.tab_label().to_string(),
                    entries,
                    empty_message,
                }
            })
            .collect();

        Self {
            id: product.id.clone(),
            trend_summary: product.trend_summary.clone(),
            generated_at: product.generated_at.clone(),
            sections,
        }
    }
}

/// Serializable snapshot of the page.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Loading,
    Failed,
    Empty,
    Ready,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct InsightsPageView {
    pub status: PageStatus,
    /// Loading, error, or empty-state text.
    pub message: Option<String>,
    pub products: Vec<ProductView>,
    pub selected_product_id: Option<String>,
    pub ad_preview: Option<AdCreative>,
}

impl From<&InsightsPageState> for InsightsPageView {
    fn from(state: &InsightsPageState) -> Self {
        let status = match state {
            InsightsPageState::Loading => PageStatus::Loading,
            InsightsPageState::Failed { .. } => PageStatus::Failed,
            InsightsPageState::Empty => PageStatus::Empty,
            InsightsPageState::Ready(_) => PageStatus::Ready,
        };
        Self {
            status,
            message: state.status_text().map(str::to_string),
            products: state.products().iter().map(ProductView::from).collect(),
            selected_product_id: state.selected_product().map(|p| p.id.clone()),
            ad_preview: state.ad_preview().cloned(),
        }
    }
}
