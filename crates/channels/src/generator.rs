//! Template content generator.
//!
//! Rendering itself is instant; [`ContentGenerator::generate`] holds the
//! result back for the configured delay before handing it over.

use crate::templates;
use chrono::{DateTime, Utc};
use insights_core::config::GenerationConfig;
use insights_core::{ContentChannel, ContentFormat, Customer};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

/// A finished message for one customer and channel.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct GeneratedContent {
    pub id: Uuid,
    pub customer_id: u32,
    pub customer_name: String,
    pub channel: ContentChannel,
    pub format: ContentFormat,
    /// Dialog title, e.g. `Email Template for Jane Cooper`.
    pub title: String,
    pub send_label: String,
    pub body: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ContentGenerator {
    delay: Duration,
}

impl ContentGenerator {
    pub fn new(config: &GenerationConfig) -> Self {
        Self::with_delay(config.delay())
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Render content immediately.
    pub fn render(&self, customer: &Customer, channel: ContentChannel) -> GeneratedContent {
        let body = templates::render(channel, &customer.name);

        debug!(
            customer_id = customer.id,
            channel = channel.as_str(),
            bytes = body.len(),
            "Rendered customer content"
        );

        GeneratedContent {
            id: Uuid::new_v4(),
            customer_id: customer.id,
            customer_name: customer.name.clone(),
            channel,
            format: channel.format(),
            title: format!("{} for {}", channel.display_name(), customer.name),
            send_label: channel.send_label().to_string(),
            body,
            generated_at: Utc::now(),
        }
    }

    /// Render content after the artificial generation delay.
    pub async fn generate(&self, customer: &Customer, channel: ContentChannel) -> GeneratedContent {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.render(customer, channel)
    }
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self::new(&GenerationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::CustomerDirectory;
    use tokio::time::Instant;

    #[test]
    fn test_email_for_every_customer() {
        let generator = ContentGenerator::default();
        for customer in CustomerDirectory::mock().all() {
            let content = generator.render(customer, ContentChannel::Email);
            assert!(content.body.contains(&customer.name));
            assert!(!content.body.contains(templates::CUSTOMER_NAME_PLACEHOLDER));
            assert_eq!(content.format, ContentFormat::Html);
        }
    }

    #[test]
    fn test_push_for_every_customer_is_the_template() {
        let generator = ContentGenerator::default();
        for customer in CustomerDirectory::mock().all() {
            let content = generator.render(customer, ContentChannel::PushNotification);
            assert_eq!(content.body, templates::PUSH_TEMPLATE);
        }
    }

    #[test]
    fn test_dialog_metadata() {
        let directory = CustomerDirectory::mock();
        let jane = directory.get(1).unwrap();
        let content = ContentGenerator::default().render(jane, ContentChannel::Sms);
        assert_eq!(content.title, "SMS Message for Jane Cooper");
        assert_eq!(content.send_label, "Send SMS");
        assert_eq!(content.customer_id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_waits_for_the_delay() {
        let directory = CustomerDirectory::mock();
        let generator = ContentGenerator::with_delay(Duration::from_millis(500));

        let started = Instant::now();
        let content = generator
            .generate(directory.get(2).unwrap(), ContentChannel::Email)
            .await;

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(content.body.contains("Wade Warren"));
    }
}
