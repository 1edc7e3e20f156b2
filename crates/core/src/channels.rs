//! Delivery channels for generated content and ad platforms for social copy.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ─── Content Channels ───────────────────────────────────────────────────────

/// Channel a customer message is generated for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContentChannel {
    Email,
    #[serde(alias = "pushNotification")]
    PushNotification,
    Sms,
}

impl ContentChannel {
    pub const ALL: [ContentChannel; 3] = [
        ContentChannel::Email,
        ContentChannel::PushNotification,
        ContentChannel::Sms,
    ];

    /// Title shown on the content dialog.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentChannel::Email => "Email Template",
            ContentChannel::PushNotification => "Push Notification",
            ContentChannel::Sms => "SMS Message",
        }
    }

    pub fn send_label(&self) -> &'static str {
        match self {
            ContentChannel::Email => "Send Email",
            ContentChannel::PushNotification => "Send Notification",
            ContentChannel::Sms => "Send SMS",
        }
    }

    pub fn format(&self) -> ContentFormat {
        match self {
            ContentChannel::Email => ContentFormat::Html,
            ContentChannel::PushNotification | ContentChannel::Sms => ContentFormat::PlainText,
        }
    }

    /// Stable tag used in metrics labels and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentChannel::Email => "email",
            ContentChannel::PushNotification => "push-notification",
            ContentChannel::Sms => "sms",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentFormat {
    Html,
    PlainText,
}

// ─── Ad Channels ────────────────────────────────────────────────────────────

/// Social platform an ad preview is produced for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdChannel {
    Meta,
    Instagram,
    Linkedin,
}

impl AdChannel {
    pub const ALL: [AdChannel; 3] = [AdChannel::Meta, AdChannel::Instagram, AdChannel::Linkedin];

    pub fn display_name(&self) -> &'static str {
        match self {
            AdChannel::Meta => "Meta Ad",
            AdChannel::Instagram => "Instagram Ad",
            AdChannel::Linkedin => "LinkedIn Ad",
        }
    }

    /// Product field carrying copy written for this platform.
    pub fn product_field(&self) -> &'static str {
        match self {
            AdChannel::Meta => "meta_ad",
            AdChannel::Instagram => "instagram_ad",
            AdChannel::Linkedin => "linkedin_ad",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdChannel::Meta => "meta",
            AdChannel::Instagram => "instagram",
            AdChannel::Linkedin => "linkedin",
        }
    }
}
