//! Filtering of the raw insights payload.

use insights_core::{InsightsError, InsightsResult, Product};
use serde_json::Value;
use tracing::debug;

/// Products that survived filtering, in payload order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedInsights {
    products: Vec<Product>,
    discarded: usize,
}

impl NormalizedInsights {
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    /// The product shown first: the first survivor.
    pub fn default_product(&self) -> Option<&Product> {
        self.products.first()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Elements dropped because they carried no detail lists.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

/// Normalize a whole service response. The payload must be a JSON array.
pub fn normalize(payload: Value) -> InsightsResult<NormalizedInsights> {
    match payload {
        Value::Array(elements) => Ok(normalize_elements(&elements)),
        other => Err(InsightsError::InvalidPayload(format!(
            "expected a JSON array of products, got {}",
            json_kind(&other)
        ))),
    }
}

/// Keep elements with at least one non-empty detail list.
pub fn normalize_elements(elements: &[Value]) -> NormalizedInsights {
    let products: Vec<Product> = elements
        .iter()
        .filter_map(Product::from_value)
        .filter(Product::has_details)
        .collect();
    let discarded = elements.len() - products.len();

    metrics::counter!("insights.products.retained").increment(products.len() as u64);
    debug!(
        received = elements.len(),
        retained = products.len(),
        discarded,
        "Normalized insights payload"
    );

    NormalizedInsights {
        products,
        discarded,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
