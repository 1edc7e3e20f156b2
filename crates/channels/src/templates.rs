//! Static message templates for customer outreach.
//!
//! Only one placeholder exists, `[Customer Name]`. The email body also
//! mentions `[Product Name]`, which is left untouched.

use insights_core::ContentChannel;

pub const CUSTOMER_NAME_PLACEHOLDER: &str = "[Customer Name]";

pub const EMAIL_TEMPLATE: &str = r#"<p>Dear [Customer Name],</p>
<p>I hope this email finds you well. We wanted to take a moment to thank you for your continued partnership with us.</p>
<p>We've noticed that you've been using our [Product Name] solution, and we wanted to check in to see how it's working for you. Our records show that you might benefit from some of the new features we've recently added:</p>
<ul>
  <li>Advanced reporting capabilities</li>
  <li>Improved integration with third-party tools</li>
  <li>Enhanced security features</li>
</ul>
<p>Would you be interested in scheduling a brief call to discuss how these features could help streamline your operations further?</p>
<p>Best regards,<br>
Your Account Manager<br>
Company Name</p>"#;

pub const PUSH_TEMPLATE: &str = "New feature alert! We've just launched our advanced reporting dashboard. Check it out now to gain deeper insights into your business performance.";

pub const SMS_TEMPLATE: &str = "Hi [Customer Name], thank you for your recent purchase! Use code THANKS10 for 10% off your next order. Valid for 7 days. Reply STOP to opt out.";

pub fn template_for(channel: ContentChannel) -> &'static str {
    match channel {
        ContentChannel::Email => EMAIL_TEMPLATE,
        ContentChannel::PushNotification => PUSH_TEMPLATE,
        ContentChannel::Sms => SMS_TEMPLATE,
    }
}

/// Replace the first `[Customer Name]` in `template`. No placeholder, no change.
pub fn substitute_customer_name(template: &str, name: &str) -> String {
    template.replacen(CUSTOMER_NAME_PLACEHOLDER, name, 1)
}

/// Render the channel's template for a customer name.
pub fn render(channel: ContentChannel, customer_name: &str) -> String {
    let template = template_for(channel);
    match channel {
        ContentChannel::Email | ContentChannel::Sms => {
            substitute_customer_name(template, customer_name)
        }
        ContentChannel::PushNotification => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_names_the_customer() {
        let body = render(ContentChannel::Email, "Jane Cooper");
        assert!(body.starts_with("<p>Dear Jane Cooper,</p>"));
        assert!(!body.contains(CUSTOMER_NAME_PLACEHOLDER));
        assert!(body.contains("[Product Name]"));
    }

    #[test]
    fn test_push_is_verbatim() {
        let body = render(ContentChannel::PushNotification, "Jane Cooper");
        assert_eq!(body, PUSH_TEMPLATE);
    }

    #[test]
    fn test_sms_names_the_customer() {
        let body = render(ContentChannel::Sms, "Wade Warren");
        assert!(body.starts_with("Hi Wade Warren, thank you"));
        assert!(!body.contains(CUSTOMER_NAME_PLACEHOLDER));
    }

    #[test]
    fn test_only_first_placeholder_is_replaced() {
        let out = substitute_customer_name("[Customer Name] and [Customer Name]", "Esther");
        assert_eq!(out, "Esther and [Customer Name]");
    }

    #[test]
    fn test_missing_placeholder_is_a_no_op() {
        assert_eq!(substitute_customer_name("Hello there", "Esther"), "Hello there");
    }
}
