//! Product (campaign) records from the social-media insights service.
//!
//! The service returns loosely typed JSON: every nested list is optional and
//! each list entry carries its label and detail under one of several field
//! names. Parsing is lenient: a field with the wrong JSON type is treated as
//! absent rather than failing the whole payload. Which field wins is decided
//! by a per-section [`FieldPrecedence`] table.

use crate::channels::AdChannel;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Detail text used when an entry has none of its detail fields.
pub const NO_DETAILS: &str = "No details available";

/// Ordered field names to try for an entry's label and detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPrecedence {
    pub label_fields: &'static [&'static str],
    pub label_fallback: &'static str,
    pub detail_fields: &'static [&'static str],
    pub detail_fallback: &'static str,
}

const CONSUMER_INSIGHT_FIELDS: FieldPrecedence = FieldPrecedence {
    label_fields: &["insight", "title"],
    label_fallback: "Insight",
    detail_fields: &["details", "description"],
    detail_fallback: NO_DETAILS,
};

const MARKET_IMPLICATION_FIELDS: FieldPrecedence = FieldPrecedence {
    label_fields: &["implication", "title"],
    label_fallback: "Implication",
    detail_fields: &["opportunity", "description"],
    detail_fallback: NO_DETAILS,
};

const RECOMMENDATION_FIELDS: FieldPrecedence = FieldPrecedence {
    label_fields: &["recommendation", "title"],
    label_fallback: "Recommendation",
    detail_fields: &["rationale", "description"],
    detail_fallback: NO_DETAILS,
};

/// The three nested lists a product may carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InsightSection {
    ConsumerInsights,
    Recommendations,
    MarketImplications,
}

impl InsightSection {
    /// Tab order on the analysis page.
    pub const ALL: [InsightSection; 3] = [
        InsightSection::ConsumerInsights,
        InsightSection::Recommendations,
        InsightSection::MarketImplications,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            InsightSection::ConsumerInsights => "consumer_insights",
            InsightSection::Recommendations => "recommendations",
            InsightSection::MarketImplications => "market_implications",
        }
    }

    pub fn tab_label(&self) -> &'static str {
        match self {
            InsightSection::ConsumerInsights => "Insights",
            InsightSection::Recommendations => "Recommendations",
            InsightSection::MarketImplications => "Market Implications",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            InsightSection::ConsumerInsights => "No insights available",
            InsightSection::Recommendations => "No recommendations available",
            InsightSection::MarketImplications => "No market implications available",
        }
    }

    pub fn precedence(&self) -> &'static FieldPrecedence {
        match self {
            InsightSection::ConsumerInsights => &CONSUMER_INSIGHT_FIELDS,
            InsightSection::Recommendations => &RECOMMENDATION_FIELDS,
            InsightSection::MarketImplications => &MARKET_IMPLICATION_FIELDS,
        }
    }
}

/// One entry of a nested list, kept exactly as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DetailEntry {
    fields: Map<String, Value>,
}

impl DetailEntry {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// A field counts only when it is a non-empty string.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    fn first_of(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.field(name))
    }

    pub fn resolve(&self, precedence: &FieldPrecedence) -> ResolvedEntry {
        ResolvedEntry {
            label: self
                .first_of(precedence.label_fields)
                .unwrap_or(precedence.label_fallback)
                .to_string(),
            detail: self
                .first_of(precedence.detail_fields)
                .unwrap_or(precedence.detail_fallback)
                .to_string(),
        }
    }
}

/// Label/detail pair ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ResolvedEntry {
    pub label: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_insights: Option<Vec<DetailEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_implications: Option<Vec<DetailEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<DetailEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_ad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_ad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_ad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

impl Product {
    /// Lenient conversion from one element of the service payload.
    /// Returns `None` only when the element is not a JSON object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        Some(Self {
            id: id_from(object.get("id")),
            consumer_insights: entries_from(object.get("consumer_insights")),
            market_implications: entries_from(object.get("market_implications")),
            recommendations: entries_from(object.get("recommendations")),
            trend_summary: string_from(object.get("trend_summary")),
            meta_ad: string_from(object.get("meta_ad")),
            instagram_ad: string_from(object.get("instagram_ad")),
            linkedin_ad: string_from(object.get("linkedin_ad")),
            generated_at: string_from(object.get("generated_at")),
        })
    }

    pub fn entries(&self, section: InsightSection) -> &[DetailEntry] {
        let list = match section {
            InsightSection::ConsumerInsights => &self.consumer_insights,
            InsightSection::Recommendations => &self.recommendations,
            InsightSection::MarketImplications => &self.market_implications,
        };
        list.as_deref().unwrap_or(&[])
    }

    /// True when at least one nested list is present and non-empty.
    pub fn has_details(&self) -> bool {
        InsightSection::ALL
            .iter()
            .any(|section| !self.entries(*section).is_empty())
    }

    pub fn resolved(&self, section: InsightSection) -> Vec<ResolvedEntry> {
        let precedence = section.precedence();
        self.entries(section)
            .iter()
            .map(|entry| entry.resolve(precedence))
            .collect()
    }

    /// Copy the product supplies for `channel`, if any.
    pub fn ad_copy(&self, channel: AdChannel) -> Option<&str> {
        let copy = match channel {
            AdChannel::Meta => &self.meta_ad,
            AdChannel::Instagram => &self.instagram_ad,
            AdChannel::Linkedin => &self.linkedin_ad,
        };
        copy.as_deref().filter(|s| !s.is_empty())
    }
}

fn id_from(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn string_from(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

// A non-array value is treated as absent. Non-object items are kept as
// empty entries so they count toward the list length and render with the
// section fallbacks.
fn entries_from(value: Option<&Value>) -> Option<Vec<DetailEntry>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| {
                item.as_object()
                    .cloned()
                    .map(DetailEntry::new)
                    .unwrap_or_default()
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(value: Value) -> DetailEntry {
        match value {
            Value::Object(map) => DetailEntry::new(map),
            _ => panic!("test entry must be an object"),
        }
    }

    #[test]
    fn test_insight_without_details_uses_fallback() {
        let e = entry(json!({ "insight": "Travel rewards" }));
        let resolved = e.resolve(InsightSection::ConsumerInsights.precedence());
        assert_eq!(resolved.label, "Travel rewards");
        assert_eq!(resolved.detail, NO_DETAILS);
    }

    #[test]
    fn test_detail_precedence_order() {
        let both = entry(json!({ "details": "first", "description": "second" }));
        let resolved = both.resolve(InsightSection::ConsumerInsights.precedence());
        assert_eq!(resolved.detail, "first");

        let only_description = entry(json!({ "description": "second" }));
        let resolved = only_description.resolve(InsightSection::ConsumerInsights.precedence());
        assert_eq!(resolved.detail, "second");
        assert_eq!(resolved.label, "Insight");
    }

    #[test]
    fn test_empty_and_non_string_fields_are_skipped() {
        let e = entry(json!({
            "recommendation": "",
            "title": "Use LinkedIn",
            "rationale": 42,
            "description": "Decision makers live there"
        }));
        let resolved = e.resolve(InsightSection::Recommendations.precedence());
        assert_eq!(resolved.label, "Use LinkedIn");
        assert_eq!(resolved.detail, "Decision makers live there");
    }

    #[test]
    fn test_market_implication_fields() {
        let e = entry(json!({ "implication": "Mid-market", "opportunity": "15% share" }));
        let resolved = e.resolve(InsightSection::MarketImplications.precedence());
        assert_eq!(
            resolved,
            ResolvedEntry {
                label: "Mid-market".to_string(),
                detail: "15% share".to_string(),
            }
        );
    }

    #[test]
    fn test_from_value_is_lenient() {
        let product = Product::from_value(&json!({
            "id": 7,
            "consumer_insights": "not a list",
            "recommendations": [ { "recommendation": "Go" }, "junk", 3 ],
            "meta_ad": ["wrong type"],
            "trend_summary": "Rising"
        }))
        .unwrap();

        assert_eq!(product.id, "7");
        assert!(product.consumer_insights.is_none());
        assert_eq!(product.entries(InsightSection::Recommendations).len(), 3);
        assert!(product.meta_ad.is_none());
        assert_eq!(product.trend_summary.as_deref(), Some("Rising"));
        assert!(product.has_details());
    }

    #[test]
    fn test_non_object_items_render_as_fallbacks() {
        let product = Product::from_value(&json!({
            "id": "cc",
            "consumer_insights": ["Travel rewards are trending"]
        }))
        .unwrap();

        assert!(product.has_details());
        assert_eq!(
            product.resolved(InsightSection::ConsumerInsights),
            vec![ResolvedEntry {
                label: "Insight".to_string(),
                detail: NO_DETAILS.to_string(),
            }]
        );
    }

    #[test]
    fn test_non_object_is_not_a_product() {
        assert!(Product::from_value(&json!("product")).is_none());
        assert!(Product::from_value(&json!(null)).is_none());
    }

    #[test]
    fn test_has_details_requires_a_non_empty_list() {
        let product = Product::from_value(&json!({ "id": "p", "recommendations": [] })).unwrap();
        assert!(!product.has_details());

        let product = Product::from_value(&json!({ "id": "p" })).unwrap();
        assert!(!product.has_details());
    }

    #[test]
    fn test_ad_copy_ignores_empty_strings() {
        let product = Product {
            id: "p".to_string(),
            meta_ad: Some("X".to_string()),
            instagram_ad: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(product.ad_copy(AdChannel::Meta), Some("X"));
        assert_eq!(product.ad_copy(AdChannel::Instagram), None);
        assert_eq!(product.ad_copy(AdChannel::Linkedin), None);
    }
}
