//! The TechStore storefront page component.
//!
//! Client-side behavior for the storefront page: a persisted cart with a
//! badge, toast notifications, the newsletter field check, the registered
//! users modal, the theme toggle and a few page-wide interactions.
//!
//! All of it runs against the [`Document`], [`Scheduler`] and [`ShareTarget`]
//! traits plus the storage and fetch adapters of `techstore-cache` and
//! `techstore-data`. On `wasm32` the [`browser`] module supplies the real
//! implementations and exports the functions the page calls; natively the
//! in-memory implementations stand in.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use techstore_cache::Cache;
//! use techstore_commerce::ProductId;
//! use techstore_data::{FetchClient, MockTransport};
//! use techstore_observability::StructuredLogger;
//! use techstore_ui::prelude::*;
//!
//! let document = Rc::new(MemoryDocument::new());
//! let storefront = Storefront::new(
//!     StorefrontConfig::default(),
//!     Adapters {
//!         document: document.clone(),
//!         scheduler: Rc::new(VirtualScheduler::new()),
//!         cache: Cache::memory(),
//!         client: FetchClient::new(MockTransport::new()),
//!         share: Rc::new(RecordingShareTarget::clipboard_only()),
//!         logger: StructuredLogger::new("storefront"),
//!     },
//! );
//!
//! storefront.add_to_cart(ProductId::new(1)).unwrap();
//! assert_eq!(storefront.update_cart_badge(), 1);
//! assert_eq!(document.body_children().len(), 1);
//! ```

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod cart;
pub mod config;
pub mod document;
mod error;
pub mod html;
pub mod interactions;
pub mod newsletter;
pub mod notification;
pub mod scheduler;
pub mod share;
pub mod storefront;
pub mod theme;
pub mod users;

pub use cart::{AddToCartOutcome, CartManager};
pub use config::StorefrontConfig;
pub use document::{Document, ElementSpec, MemoryDocument, MemoryElement};
pub use error::UiError;
pub use newsletter::{NewsletterForm, SubscribeOutcome};
pub use notification::{NotificationHandle, NotificationService, Severity};
pub use scheduler::{Scheduler, Task, TimerHandle, VirtualScheduler};
pub use share::{RecordingShareTarget, ShareData, ShareTarget};
pub use storefront::{Adapters, Bootstrapped, ShareOutcome, Storefront};
pub use theme::{Theme, ThemeController};
pub use users::{User, UserListOutcome, UserListViewer};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Adapters, AddToCartOutcome, Document, MemoryDocument, RecordingShareTarget, Scheduler,
        Severity, Storefront, StorefrontConfig, Theme, UiError, VirtualScheduler,
    };
}
