//! Newsletter signup field.

use std::fmt;
use std::rc::Rc;

use techstore_commerce::{Email, EmailError};

use crate::document::Document;
use crate::notification::{NotificationService, Severity};

pub const INVALID_EMAIL: &str = "Please enter a valid email address.";
pub const SUBSCRIBED: &str = "Thank you for subscribing to our newsletter!";

/// What [`NewsletterForm::subscribe`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// The address was accepted and the field cleared.
    Subscribed(Email),
    /// The field was empty or not an address. The field is left as typed.
    Rejected(EmailError),
}

/// Checks the newsletter email field. Nothing is sent anywhere.
pub struct NewsletterForm {
    document: Rc<dyn Document>,
    notifications: Rc<NotificationService>,
    input_id: String,
}

impl NewsletterForm {
    pub fn new(
        document: Rc<dyn Document>,
        notifications: Rc<NotificationService>,
        input_id: impl Into<String>,
    ) -> Self {
        Self {
            document,
            notifications,
            input_id: input_id.into(),
        }
    }

    pub fn subscribe(&self) -> SubscribeOutcome {
        let value = self.document.input_value(&self.input_id).unwrap_or_default();

        match Email::parse(&value) {
            Ok(email) => {
                self.notifications.show(SUBSCRIBED, Severity::Success);
                self.document.set_input_value(&self.input_id, "");
                SubscribeOutcome::Subscribed(email)
            }
            Err(e) => {
                self.notifications.show(INVALID_EMAIL, Severity::Danger);
                SubscribeOutcome::Rejected(e)
            }
        }
    }
}

impl fmt::Debug for NewsletterForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsletterForm")
            .field("input_id", &self.input_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::scheduler::VirtualScheduler;

    fn form(value: &str) -> (Rc<MemoryDocument>, NewsletterForm) {
        let doc = Rc::new(MemoryDocument::new().with_input("newsletter-email", value));
        let notifications = Rc::new(NotificationService::new(
            doc.clone(),
            Rc::new(VirtualScheduler::new()),
            3000,
        ));
        let form = NewsletterForm::new(doc.clone(), notifications, "newsletter-email");
        (doc, form)
    }

    fn last_banner(doc: &MemoryDocument) -> String {
        let id = doc.body_children().pop().unwrap();
        let banner = doc.element(&id).unwrap();
        format!("{} {}", banner.class_name, banner.inner_html)
    }

    #[test]
    fn test_valid_address_is_accepted_and_cleared() {
        let (doc, form) = form("shopper@techstore.com");

        let outcome = form.subscribe();

        assert!(matches!(outcome, SubscribeOutcome::Subscribed(_)));
        assert_eq!(doc.input_value("newsletter-email").as_deref(), Some(""));
        let banner = last_banner(&doc);
        assert!(banner.contains("alert-success"));
        assert!(banner.contains(SUBSCRIBED));
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let (doc, form) = form("");

        assert_eq!(form.subscribe(), SubscribeOutcome::Rejected(EmailError::Empty));
        let banner = last_banner(&doc);
        assert!(banner.contains("alert-danger"));
        assert!(banner.contains(INVALID_EMAIL));
    }

    #[test]
    fn test_invalid_address_is_kept() {
        let (doc, form) = form("a@b");

        assert!(matches!(form.subscribe(), SubscribeOutcome::Rejected(_)));
        assert_eq!(doc.input_value("newsletter-email").as_deref(), Some("a@b"));
    }

    #[test]
    fn test_missing_field_counts_as_empty() {
        let doc = Rc::new(MemoryDocument::new());
        let notifications = Rc::new(NotificationService::new(
            doc.clone(),
            Rc::new(VirtualScheduler::new()),
            3000,
        ));
        let form = NewsletterForm::new(doc.clone(), notifications, "newsletter-email");

        assert_eq!(form.subscribe(), SubscribeOutcome::Rejected(EmailError::Empty));
    }
}
