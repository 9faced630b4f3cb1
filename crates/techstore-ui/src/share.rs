//! Sharing a product link.

use std::cell::RefCell;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::UiError;

pub const SHARE_TITLE: &str = "Check out this product on TechStore";
pub const LINK_COPIED: &str = "Product link copied to clipboard!";

/// Payload for the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareData {
    pub title: String,
    pub url: String,
}

/// The platform's share sheet and clipboard.
#[async_trait(?Send)]
pub trait ShareTarget {
    /// Whether a native share sheet exists.
    fn can_share(&self) -> bool;

    async fn share(&self, data: &ShareData) -> Result<(), UiError>;

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), UiError>;
}

/// What a [`RecordingShareTarget`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareCall {
    Shared(ShareData),
    Copied(String),
}

/// A [`ShareTarget`] that records calls, for native builds and tests.
#[derive(Debug, Default)]
pub struct RecordingShareTarget {
    native: bool,
    failing: bool,
    calls: RefCell<Vec<ShareCall>>,
}

impl RecordingShareTarget {
    /// A target with a native share sheet.
    pub fn native() -> Self {
        Self {
            native: true,
            ..Default::default()
        }
    }

    /// A target with only a clipboard.
    pub fn clipboard_only() -> Self {
        Self::default()
    }

    /// Make every call fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> Vec<ShareCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: ShareCall) -> Result<(), UiError> {
        self.calls.borrow_mut().push(call);
        if self.failing {
            return Err(UiError::Dom("permission denied".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ShareTarget for RecordingShareTarget {
    fn can_share(&self) -> bool {
        self.native
    }

    async fn share(&self, data: &ShareData) -> Result<(), UiError> {
        self.record(ShareCall::Shared(data.clone()))
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<(), UiError> {
        self.record(ShareCall::Copied(text.to_string()))
    }
}
