//! Customer records shown on the customer-insights page.
//!
//! The directory is a fixed in-memory list; nothing is loaded or written.

use crate::error::{InsightsError, InsightsResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Previews in the customer table are cut at this many characters.
pub const PREVIEW_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub enum CustomerStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: CustomerStatus,
    /// ISO-8601 date of the last purchase.
    pub last_purchase: String,
    /// Lifetime spend in whole US dollars.
    pub total_spent: u64,
    pub insight: String,
    pub recommendation: String,
}

impl Customer {
    /// Lifetime spend formatted the way the table shows it, e.g. `$12,500`.
    pub fn total_spent_display(&self) -> String {
        let digits = self.total_spent.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        format!("${grouped}")
    }

    pub fn insight_preview(&self) -> String {
        truncate_preview(&self.insight, PREVIEW_CHARS)
    }

    pub fn recommendation_preview(&self) -> String {
        truncate_preview(&self.recommendation, PREVIEW_CHARS)
    }

    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }
}

/// Cut `text` to `max_chars` characters and append `...` when it was longer.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Read-only customer list.
#[derive(Debug, Clone)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    /// The five demo customers the dashboard ships with.
    pub fn mock() -> Self {
        let seed = [
            (
                1,
                "Jane Cooper",
                "jane.cooper@example.com",
                "Acme Inc",
                CustomerStatus::Active,
                "2023-12-15",
                12_500,
                "Jane is highly engaged with our premium features.",
                "Offer Jane early access to our new AI-powered tools.",
            ),
            (
                2,
                "Wade Warren",
                "wade.warren@example.com",
                "Globex Corp",
                CustomerStatus::Active,
                "2024-01-20",
                8_200,
                "Wade frequently uses our mobile app.",
                "Promote our mobile-exclusive deals to Wade.",
            ),
            (
                3,
                "Esther Howard",
                "esther.howard@example.com",
                "Soylent Corp",
                CustomerStatus::Inactive,
                "2023-10-05",
                5_100,
                "Esther hasn't logged in for several months.",
                "Send Esther a personalized re-engagement email.",
            ),
            (
                4,
                "Cameron Williamson",
                "cameron.williamson@example.com",
                "Initech",
                CustomerStatus::Active,
                "2024-02-10",
                15_800,
                "Cameron is a power user of our API.",
                "Invite Cameron to our developer conference.",
            ),
            (
                5,
                "Brooklyn Simmons",
                "brooklyn.simmons@example.com",
                "Umbrella Corp",
                CustomerStatus::Active,
                "2024-01-05",
                9_300,
                "Brooklyn often provides valuable feedback.",
                "Nominate Brooklyn for our customer advisory board.",
            ),
        ];

        let customers = seed
            .into_iter()
            .map(
                |(id, name, email, company, status, last_purchase, total_spent, insight, rec)| {
                    Customer {
                        id,
                        name: name.to_string(),
                        email: email.to_string(),
                        company: company.to_string(),
                        status,
                        last_purchase: last_purchase.to_string(),
                        total_spent,
                        insight: insight.to_string(),
                        recommendation: rec.to_string(),
                    }
                },
            )
            .collect();

        Self::new(customers)
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, id: u32) -> InsightsResult<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .ok_or(InsightsError::CustomerNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl Default for CustomerDirectory {
    fn default() -> Self {
        Self::mock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_directory_contents() {
        let directory = CustomerDirectory::mock();
        assert_eq!(directory.len(), 5);
        assert!(directory.all().iter().all(|c| !c.name.is_empty()));

        let esther = directory.get(3).unwrap();
        assert_eq!(esther.name, "Esther Howard");
        assert!(!esther.is_active());
    }

    #[test]
    fn test_unknown_customer() {
        let directory = CustomerDirectory::mock();
        let err = directory.get(42).unwrap_err();
        assert!(matches!(err, InsightsError::CustomerNotFound(42)));
    }

    #[test]
    fn test_total_spent_display() {
        let directory = CustomerDirectory::mock();
        assert_eq!(directory.get(1).unwrap().total_spent_display(), "$12,500");
        assert_eq!(directory.get(4).unwrap().total_spent_display(), "$15,800");

        let mut small = directory.get(1).unwrap().clone();
        small.total_spent = 999;
        assert_eq!(small.total_spent_display(), "$999");
        small.total_spent = 1_234_567;
        assert_eq!(small.total_spent_display(), "$1,234,567");
    }

    #[test]
    fn test_preview_truncation() {
        let directory = CustomerDirectory::mock();
        let jane = directory.get(1).unwrap();
        let preview = jane.insight_preview();
        assert_eq!(preview, "Jane is highly engaged with our premium ...");

        let wade = directory.get(2).unwrap();
        assert_eq!(wade.insight_preview(), wade.insight);
    }

    #[test]
    fn test_truncate_preview_counts_chars_not_bytes() {
        assert_eq!(truncate_preview("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_preview("short", 40), "short");
        assert_eq!(truncate_preview("", 40), "");
    }
}
