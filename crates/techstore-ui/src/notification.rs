//! Toast notifications.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::document::{Document, ElementSpec};
use crate::html::html_escape;
use crate::scheduler::{Scheduler, TimerHandle};

/// Inline style placing the banner in the top-right corner.
pub const NOTIFICATION_STYLE: &str = "top: 20px; right: 20px; z-index: 9999; min-width: 300px;";

/// Bootstrap alert variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
    Primary,
    Secondary,
    Light,
    Dark,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Look up a variant by its bootstrap name.
    pub fn from_name(name: &str) -> Option<Self> {
        let severity = match name {
            "info" => Self::Info,
            "success" => Self::Success,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => return None,
        };
        Some(severity)
    }

    /// The `alert-*` class for this variant.
    pub fn alert_class(&self) -> String {
        format!("alert-{}", self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class list of a notification banner.
pub fn notification_classes(severity: Severity) -> String {
    format!(
        "alert {} alert-dismissible fade show position-fixed",
        severity.alert_class()
    )
}

/// Body of a notification banner: the escaped message and a close button.
pub fn render_notification_body(message: &str) -> String {
    format!(
        r#"
        {}
        <button type="button" class="btn-close" data-bs-dismiss="alert"></button>
    "#,
        html_escape(message)
    )
}

/// A notification on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationHandle {
    /// Id of the banner element.
    pub element_id: String,
    /// The pending auto-dismiss task.
    pub timer: TimerHandle,
}

/// Shows banners and removes them after a delay.
///
/// Banners stack in arrival order; there is no queueing or dedup.
pub struct NotificationService {
    document: Rc<dyn Document>,
    scheduler: Rc<dyn Scheduler>,
    delay_ms: u32,
    next_id: Cell<u64>,
}

impl NotificationService {
    pub fn new(document: Rc<dyn Document>, scheduler: Rc<dyn Scheduler>, delay_ms: u32) -> Self {
        Self {
            document,
            scheduler,
            delay_ms,
            next_id: Cell::new(0),
        }
    }

    /// Append a banner to the body and schedule its removal.
    pub fn show(&self, message: &str, severity: Severity) -> NotificationHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let element_id = format!("techstore-notification-{}", id);

        self.document.append_to_body(&ElementSpec {
            id: element_id.clone(),
            tag: "div",
            class_name: notification_classes(severity),
            style: NOTIFICATION_STYLE.to_string(),
            inner_html: render_notification_body(message),
        });

        let document = Rc::clone(&self.document);
        let target = element_id.clone();
        let timer = self.scheduler.schedule(
            self.delay_ms,
            Box::new(move || {
                remove_if_attached(document.as_ref(), &target);
            }),
        );

        NotificationHandle { element_id, timer }
    }

    /// Remove a banner now and cancel its timer.
    /// Returns `false` if it was already gone.
    pub fn dismiss(&self, handle: &NotificationHandle) -> bool {
        self.scheduler.cancel(handle.timer);
        remove_if_attached(self.document.as_ref(), &handle.element_id)
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

impl fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationService")
            .field("delay_ms", &self.delay_ms)
            .field("shown", &self.next_id.get())
            .finish_non_exhaustive()
    }
}

fn remove_if_attached(document: &dyn Document, id: &str) -> bool {
    document.is_attached(id) && document.remove(id)
}
