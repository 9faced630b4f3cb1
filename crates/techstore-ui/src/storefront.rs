//! The storefront page component.

use std::fmt;
use std::rc::Rc;

use techstore_cache::Cache;
use techstore_commerce::{is_valid_email, Cart, ProductId};
use techstore_data::FetchClient;
use techstore_observability::StructuredLogger;

use crate::cart::{AddToCartOutcome, CartManager};
use crate::config::StorefrontConfig;
use crate::document::Document;
use crate::error::UiError;
use crate::interactions::{self, PressTarget, RequiredField, REQUIRED_FIELDS_MISSING};
use crate::newsletter::{NewsletterForm, SubscribeOutcome};
use crate::notification::{NotificationHandle, NotificationService, Severity};
use crate::scheduler::{Scheduler, TimerHandle};
use crate::share::{ShareData, ShareTarget, LINK_COPIED, SHARE_TITLE};
use crate::theme::{Theme, ThemeController};
use crate::users::{UserListOutcome, UserListViewer};

pub const ADDED_TO_WISHLIST: &str = "Product added to wishlist!";

/// The platform services a [`Storefront`] runs on.
pub struct Adapters {
    pub document: Rc<dyn Document>,
    pub scheduler: Rc<dyn Scheduler>,
    pub cache: Cache,
    pub client: FetchClient,
    pub share: Rc<dyn ShareTarget>,
    pub logger: StructuredLogger,
}

/// State after [`Storefront::bootstrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bootstrapped {
    pub total_items: u32,
    pub theme: Theme,
}

/// What [`Storefront::share_product`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the native share sheet.
    Shared,
    /// Copied to the clipboard and confirmed with a notification.
    Copied,
    /// The platform refused; logged only.
    Failed,
}

/// Every page action, over one set of [`Adapters`].
pub struct Storefront {
    config: StorefrontConfig,
    document: Rc<dyn Document>,
    scheduler: Rc<dyn Scheduler>,
    notifications: Rc<NotificationService>,
    cart: CartManager,
    newsletter: NewsletterForm,
    users: UserListViewer,
    theme: ThemeController,
    share: Rc<dyn ShareTarget>,
    logger: StructuredLogger,
}

impl Storefront {
    /// Wire the components and load the stored cart.
    pub fn new(config: StorefrontConfig, adapters: Adapters) -> Self {
        let Adapters {
            document,
            scheduler,
            cache,
            client,
            share,
            logger,
        } = adapters;

        let logger = logger
            .with_min_level(config.log_level)
            .with_format(config.log_format);

        let notifications = Rc::new(NotificationService::new(
            Rc::clone(&document),
            Rc::clone(&scheduler),
            config.notification_delay_ms,
        ));
        let cart = CartManager::load(
            cache.clone(),
            &config.cart_key,
            Rc::clone(&document),
            Rc::clone(&notifications),
            config.cart_badge_id.clone(),
            logger.child("cart"),
        );
        let newsletter = NewsletterForm::new(
            Rc::clone(&document),
            Rc::clone(&notifications),
            config.newsletter_input_id.clone(),
        );
        let users = UserListViewer::new(
            Rc::clone(&document),
            client,
            config.users_endpoint.clone(),
            config.user_modal_id.clone(),
            config.user_content_id.clone(),
            logger.child("users"),
        );
        let theme = ThemeController::new(
            Rc::clone(&document),
            cache,
            config.theme_key.clone(),
            config.dark_theme_class.clone(),
        );

        Self {
            config,
            document,
            scheduler,
            notifications,
            cart,
            newsletter,
            users,
            theme,
            share,
            logger,
        }
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Page-load work: the initial badge and the stored theme.
    pub fn bootstrap(&self) -> Bootstrapped {
        let total_items = self.cart.update_badge();
        let theme = self.theme.restore().unwrap_or_else(|e| {
            self.logger
                .warn("Could not read stored theme")
                .field("error", e.to_string())
                .emit();
            Theme::Light
        });
        Bootstrapped { total_items, theme }
    }

    pub fn add_to_cart(&self, id: ProductId) -> Result<AddToCartOutcome, UiError> {
        self.cart.add_to_cart(id)
    }

    pub fn update_cart_badge(&self) -> u32 {
        self.cart.update_badge()
    }

    pub fn cart(&self) -> Cart {
        self.cart.cart()
    }

    pub fn show_notification(&self, message: &str, severity: Severity) -> NotificationHandle {
        self.notifications.show(message, severity)
    }

    pub fn subscribe_newsletter(&self) -> SubscribeOutcome {
        self.newsletter.subscribe()
    }

    pub fn is_valid_email(email: &str) -> bool {
        is_valid_email(email)
    }

    pub async fn show_user_list(&self) -> UserListOutcome {
        self.users.show().await
    }

    /// Placeholder search: logs the query and says so.
    pub fn search_products(&self, query: &str) -> NotificationHandle {
        self.logger
            .info(format!("Searching for: {}", query))
            .field("query", query)
            .emit();
        self.notifications
            .show(&format!("Searching for \"{}\"...", query), Severity::Info)
    }

    /// Placeholder wishlist: confirms without storing anything.
    pub fn add_to_wishlist(&self, id: ProductId) -> NotificationHandle {
        self.logger
            .debug("Wishlist add")
            .field("product_id", id.get())
            .emit();
        self.notifications.show(ADDED_TO_WISHLIST, Severity::Success)
    }

    /// Share the current page, falling back to copying its URL.
    pub async fn share_product(&self, id: ProductId) -> ShareOutcome {
        let url = self.document.location();

        let result = if self.share.can_share() {
            let data = ShareData {
                title: SHARE_TITLE.to_string(),
                url,
            };
            self.share.share(&data).await.map(|()| ShareOutcome::Shared)
        } else {
            self.share
                .copy_to_clipboard(&url)
                .await
                .map(|()| ShareOutcome::Copied)
        };

        match result {
            Ok(ShareOutcome::Copied) => {
                self.notifications.show(LINK_COPIED, Severity::Success);
                ShareOutcome::Copied
            }
            Ok(outcome) => outcome,
            Err(e) => {
                self.logger
                    .warn("Share failed")
                    .field("product_id", id.get())
                    .field("error", e.to_string())
                    .emit();
                ShareOutcome::Failed
            }
        }
    }

    pub fn toggle_theme(&self) -> Result<Theme, UiError> {
        self.theme.toggle()
    }

    /// Click effect for a `.btn`.
    pub fn press_button<T>(&self, button: Rc<T>) -> Option<TimerHandle>
    where
        T: PressTarget + ?Sized + 'static,
    {
        interactions::press(button, self.scheduler.as_ref(), self.config.press_revert_ms)
    }

    /// Submit guard for a form. Returns `false` if submission must be
    /// prevented, after marking the empty fields and notifying.
    pub fn guard_form<F: RequiredField + ?Sized>(&self, required: &[&F]) -> bool {
        let valid = interactions::check_required_fields(required);
        if !valid {
            self.notifications
                .show(REQUIRED_FIELDS_MISSING, Severity::Danger);
        }
        valid
    }
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("config", &self.config)
            .field("cart", &self.cart)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}
