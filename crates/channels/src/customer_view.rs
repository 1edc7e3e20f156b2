//! Customer insights page state.
//!
//! The page has exactly one dialog slot. The selected customer is derived
//! from whatever the dialog shows, so selection and dialog can never
//! disagree.

use crate::generator::{ContentGenerator, GeneratedContent};
use crate::session::GenerationSession;
use insights_core::{ContentChannel, Customer, CustomerDirectory, InsightsResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExpandedKind {
    Insight,
    Recommendation,
}

impl ExpandedKind {
    pub fn title(&self) -> &'static str {
        match self {
            ExpandedKind::Insight => "Customer Insight",
            ExpandedKind::Recommendation => "Recommendation",
        }
    }

    pub fn text<'a>(&self, customer: &'a Customer) -> &'a str {
        match self {
            ExpandedKind::Insight => &customer.insight,
            ExpandedKind::Recommendation => &customer.recommendation,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CustomerDialog {
    #[default]
    Closed,
    Generating {
        customer_id: u32,
        channel: ContentChannel,
        ticket: u64,
    },
    Content {
        content: GeneratedContent,
    },
    Expanded {
        customer_id: u32,
        kind: ExpandedKind,
        title: String,
        text: String,
    },
}

impl CustomerDialog {
    pub fn selected_customer(&self) -> Option<u32> {
        match self {
            CustomerDialog::Closed => None,
            CustomerDialog::Generating { customer_id, .. }
            | CustomerDialog::Expanded { customer_id, .. } => Some(*customer_id),
            CustomerDialog::Content { content } => Some(content.customer_id),
        }
    }

    /// Whether a dialog is visible. A generation in progress shows nothing yet.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            CustomerDialog::Content { .. } | CustomerDialog::Expanded { .. }
        )
    }
}

/// Transition rules for the dialog slot.
#[derive(Debug, Default)]
pub struct CustomerInsightsView {
    dialog: CustomerDialog,
    latest_ticket: u64,
}

impl CustomerInsightsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialog(&self) -> &CustomerDialog {
        &self.dialog
    }

    /// Record a started generation. Tickets older than one already seen
    /// are ignored.
    pub fn begin_generation(
        &mut self,
        customer_id: u32,
        channel: ContentChannel,
        ticket: u64,
    ) -> bool {
        if ticket < self.latest_ticket {
            return false;
        }
        self.latest_ticket = ticket;
        self.dialog = CustomerDialog::Generating {
            customer_id,
            channel,
            ticket,
        };
        true
    }

    /// Show generated content if it belongs to the generation in progress.
    pub fn complete(&mut self, ticket: u64, content: GeneratedContent) -> bool {
        match &self.dialog {
            CustomerDialog::Generating { ticket: current, .. } if *current == ticket => {
                self.dialog = CustomerDialog::Content { content };
                true
            }
            _ => false,
        }
    }

    /// Drop a generation that will never deliver.
    pub fn abandon(&mut self, ticket: u64) -> bool {
        match &self.dialog {
            CustomerDialog::Generating { ticket: current, .. } if *current == ticket => {
                self.dialog = CustomerDialog::Closed;
                true
            }
            _ => false,
        }
    }

    pub fn expand(&mut self, customer: &Customer, kind: ExpandedKind) {
        self.dialog = CustomerDialog::Expanded {
            customer_id: customer.id,
            kind,
            title: kind.title().to_string(),
            text: kind.text(customer).to_string(),
        };
    }

    pub fn close(&mut self) {
        self.dialog = CustomerDialog::Closed;
    }
}

/// One user's customer insights page: directory, generation session, and
/// dialog state.
#[derive(Debug)]
pub struct CustomerInsightsPage {
    directory: Arc<CustomerDirectory>,
    session: GenerationSession,
    view: Arc<Mutex<CustomerInsightsView>>,
}

impl CustomerInsightsPage {
    pub fn new(directory: Arc<CustomerDirectory>, generator: Arc<ContentGenerator>) -> Self {
        Self {
            directory,
            session: GenerationSession::new(generator),
            view: Arc::new(Mutex::new(CustomerInsightsView::new())),
        }
    }

    pub fn directory(&self) -> &CustomerDirectory {
        &self.directory
    }

    pub fn dialog(&self) -> CustomerDialog {
        self.view.lock().dialog().clone()
    }

    /// True when no generation is running and no dialog is showing.
    pub fn is_idle(&self) -> bool {
        !self.session.is_pending() && matches!(self.view.lock().dialog(), CustomerDialog::Closed)
    }

    /// Generate content for a customer and open it in the dialog.
    /// A newer call on the same page supersedes this one.
    ///
    /// The generation task settles the dialog itself, so dropping the
    /// returned future does not leave the page stuck in `Generating`.
    pub async fn generate(
        &self,
        customer_id: u32,
        channel: ContentChannel,
    ) -> InsightsResult<GeneratedContent> {
        let customer = self.directory.get(customer_id)?;

        let settle = {
            let view = self.view.clone();
            move |ticket: u64, content: &GeneratedContent| {
                view.lock().complete(ticket, content.clone());
            }
        };
        // The view stays locked until `Generating` is recorded so the task
        // cannot settle first.
        let (pending, ticket) = {
            let mut view = self.view.lock();
            let pending = self.session.request_then(customer, channel, settle);
            let ticket = pending.ticket();
            view.begin_generation(customer_id, channel, ticket);
            (pending, ticket)
        };

        match pending.wait().await {
            Ok(content) => {
                info!(
                    customer_id,
                    channel = channel.as_str(),
                    ticket,
                    "Content ready"
                );
                Ok(content)
            }
            Err(e) => {
                self.view.lock().abandon(ticket);
                debug!(customer_id, ticket, error = %e, "Generation did not complete");
                Err(e)
            }
        }
    }

    /// Open the full insight or recommendation text. Any generation in
    /// progress is cancelled since only one dialog can be open.
    pub fn expand(&self, customer_id: u32, kind: ExpandedKind) -> InsightsResult<CustomerDialog> {
        let customer = self.directory.get(customer_id)?;
        self.session.cancel();
        let mut view = self.view.lock();
        view.expand(customer, kind);
        Ok(view.dialog().clone())
    }

    /// Cancel any running generation. Returns whether one was running.
    pub fn cancel_generation(&self) -> bool {
        let cancelled = self.session.cancel();
        let mut view = self.view.lock();
        if let CustomerDialog::Generating { ticket, .. } = *view.dialog() {
            view.abandon(ticket);
        }
        cancelled
    }

    pub fn close(&self) {
        self.session.cancel();
        self.view.lock().close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insights_core::InsightsError;
    use std::time::Duration;

    fn page() -> Arc<CustomerInsightsPage> {
        Arc::new(CustomerInsightsPage::new(
            Arc::new(CustomerDirectory::mock()),
            Arc::new(ContentGenerator::with_delay(Duration::from_millis(500))),
        ))
    }

    #[test]
    fn test_stale_ticket_does_not_complete() {
        let directory = CustomerDirectory::mock();
        let generator = ContentGenerator::with_delay(Duration::ZERO);
        let mut view = CustomerInsightsView::new();

        assert!(view.begin_generation(1, ContentChannel::Email, 1));
        assert!(view.begin_generation(2, ContentChannel::Sms, 2));
        assert!(!view.begin_generation(1, ContentChannel::Email, 1));

        let stale = generator.render(directory.get(1).unwrap(), ContentChannel::Email);
        assert!(!view.complete(1, stale));
        assert_eq!(view.dialog().selected_customer(), Some(2));
        assert!(!view.dialog().is_open());

        let fresh = generator.render(directory.get(2).unwrap(), ContentChannel::Sms);
        assert!(view.complete(2, fresh));
        assert!(view.dialog().is_open());
        assert_eq!(view.dialog().selected_customer(), Some(2));
    }

    #[test]
    fn test_expand_replaces_content_dialog() {
        let directory = CustomerDirectory::mock();
        let mut view = CustomerInsightsView::new();
        let brooklyn = directory.get(5).unwrap();

        view.expand(brooklyn, ExpandedKind::Recommendation);
        match view.dialog() {
            CustomerDialog::Expanded { title, text, .. } => {
                assert_eq!(title, "Recommendation");
                assert_eq!(text, "Nominate Brooklyn for our customer advisory board.");
            }
            other => panic!("unexpected dialog: {other:?}"),
        }

        view.close();
        assert_eq!(view.dialog(), &CustomerDialog::Closed);
        assert_eq!(view.dialog().selected_customer(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_opens_content_dialog() {
        let page = page();
        let content = page.generate(3, ContentChannel::Email).await.unwrap();
        assert!(content.body.contains("Esther Howard"));

        match page.dialog() {
            CustomerDialog::Content { content: shown } => assert_eq!(shown, content),
            other => panic!("unexpected dialog: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_generations_last_request_wins() {
        let page = page();

        let first = tokio::spawn({
            let page = page.clone();
            async move { page.generate(1, ContentChannel::Email).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = page.generate(2, ContentChannel::Sms).await.unwrap();

        let first = first.await.unwrap();
        assert!(matches!(first, Err(InsightsError::GenerationSuperseded)));

        match page.dialog() {
            CustomerDialog::Content { content } => {
                assert_eq!(content.customer_id, 2);
                assert_eq!(content, second);
            }
            other => panic!("unexpected dialog: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_expand_cancels_generation() {
        let page = page();

        let pending = tokio::spawn({
            let page = page.clone();
            async move { page.generate(4, ContentChannel::PushNotification).await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        let dialog = page.expand(4, ExpandedKind::Insight).unwrap();
        assert_eq!(dialog.selected_customer(), Some(4));

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(InsightsError::GenerationCancelled)));
        assert!(matches!(page.dialog(), CustomerDialog::Expanded { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_waiter_still_settles_dialog() {
        let page = page();

        let waited =
            tokio::time::timeout(Duration::from_millis(100), page.generate(1, ContentChannel::Email))
                .await;
        assert!(waited.is_err());
        assert!(matches!(page.dialog(), CustomerDialog::Generating { .. }));

        tokio::time::sleep(Duration::from_secs(60)).await;
        match page.dialog() {
            CustomerDialog::Content { content } => assert_eq!(content.customer_id, 1),
            other => panic!("unexpected dialog: {other:?}"),
        }
        assert!(!page.is_idle());

        page.close();
        assert!(page.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_customer() {
        let page = page();
        let err = page.generate(99, ContentChannel::Sms).await.unwrap_err();
        assert!(matches!(err, InsightsError::CustomerNotFound(99)));
        assert_eq!(page.dialog(), CustomerDialog::Closed);
    }
}
