//! Social ad copy selection.
//!
//! Copy written for the product wins; otherwise each platform has a canned
//! mock creative. Nothing here is templated.

use insights_core::{AdChannel, Product};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

/// Canned creative for a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAd {
    pub content: &'static str,
    pub image_url: &'static str,
}

const META_MOCK: MockAd = MockAd {
    content: "Streamline your business operations with our powerful solution. Try Product Alpha today and see how our enterprise-grade platform can transform your data into actionable insights. Start your free trial now!",
    image_url: "/creditCard.jpg?height=400&width=400",
};

const INSTAGRAM_MOCK: MockAd = MockAd {
    content: "Transform your business with data-driven decisions. Our intuitive platform makes complex analytics simple. #BusinessIntelligence #DataAnalytics #ProductAlpha",
    image_url: "/creditCard.jpg?",
};

const LINKEDIN_MOCK: MockAd = MockAd {
    content: "Empower your team with enterprise-grade analytics. Product Alpha helps businesses like yours make smarter decisions with real-time insights and powerful visualization tools. Join thousands of companies already using our platform to drive growth.",
    image_url: "/creditCard.jpg?",
};

pub fn fallback_ad(channel: AdChannel) -> MockAd {
    match channel {
        AdChannel::Meta => META_MOCK,
        AdChannel::Instagram => INSTAGRAM_MOCK,
        AdChannel::Linkedin => LINKEDIN_MOCK,
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdCopySource {
    Product,
    Fallback,
}

/// Ad preview ready for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct AdCreative {
    pub channel: AdChannel,
    /// e.g. `Meta Ad for 42`.
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub source: AdCopySource,
}

/// Pick the ad for `channel`. With no product, the canned creative is used.
pub fn select_ad(product: Option<&Product>, channel: AdChannel) -> AdCreative {
    let mock = fallback_ad(channel);
    let (content, source) = match product.and_then(|p| p.ad_copy(channel)) {
        Some(copy) => (copy.to_string(), AdCopySource::Product),
        None => (mock.content.to_string(), AdCopySource::Fallback),
    };
    let product_id = product.map(|p| p.id.as_str()).unwrap_or_default();

    metrics::counter!("ads.selected", "channel" => channel.as_str()).increment(1);
    debug!(
        product_id,
        channel = channel.as_str(),
        source = ?source,
        "Selected ad copy"
    );

    AdCreative {
        channel,
        title: format!("{} for {}", channel.display_name(), product_id),
        content,
        image_url: mock.image_url.to_string(),
        source,
    }
}
