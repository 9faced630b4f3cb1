//! Browser entry point and the functions the page calls.
//!
//! The page's inline handlers (`onclick="addToCart(1)"` and friends) call
//! the exports below. They share one [`Storefront`] created on first use.

mod dom;
mod events;
mod share;
mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use techstore_cache::Cache;
use techstore_commerce::ProductId;
use techstore_data::FetchClient;
use techstore_observability::StructuredLogger;

use crate::config::{StorefrontConfig, CONFIG_ELEMENT_ID};
use crate::error::UiError;
use crate::notification::Severity;
use crate::storefront::{Adapters, Storefront};

pub use dom::{BrowserDocument, RequiredControl};
pub use share::NavigatorShare;
pub use timers::BrowserScheduler;

thread_local! {
    static STOREFRONT: RefCell<Option<Rc<Storefront>>> = const { RefCell::new(None) };
}

/// Bootstrap once the document is ready.
#[cfg_attr(not(test), wasm_bindgen(start))]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let ready_state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))?;
    if ready_state.as_string().as_deref() == Some("loading") {
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = boot() {
                web_sys::console::error_1(&e);
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        Ok(())
    } else {
        boot()
    }
}

fn boot() -> Result<(), JsValue> {
    let storefront = storefront()?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    storefront.bootstrap();
    events::bind_page(&storefront, &document)
}

/// The page's storefront, created on first call.
fn storefront() -> Result<Rc<Storefront>, JsValue> {
    if let Some(existing) = STOREFRONT.with(|slot| slot.borrow().clone()) {
        return Ok(existing);
    }

    let created = Rc::new(create_storefront().map_err(ui_to_js)?);
    STOREFRONT.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&created)));
    Ok(created)
}

fn create_storefront() -> Result<Storefront, UiError> {
    let document = BrowserDocument::current()?;
    let mut logger = StructuredLogger::new("storefront");
    if let Some(path) = web_sys::window().and_then(|w| w.location().pathname().ok()) {
        logger = logger.with_page(path);
    }

    let config = read_config(&logger);
    let cache = Cache::open_local().unwrap_or_else(|e| {
        logger
            .warn("localStorage unavailable, cart and theme will not persist")
            .field("error", e.to_string())
            .emit();
        Cache::memory()
    });

    Ok(Storefront::new(
        config,
        Adapters {
            document: Rc::new(document),
            scheduler: Rc::new(BrowserScheduler::default()),
            cache,
            client: FetchClient::browser(),
            share: Rc::new(NavigatorShare),
            logger,
        },
    ))
}

fn read_config(logger: &StructuredLogger) -> StorefrontConfig {
    let block = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|e| e.text_content());

    match block {
        Some(json) => StorefrontConfig::from_json(&json).unwrap_or_else(|e| {
            logger
                .warn("Ignoring malformed storefront config")
                .field("error", e.to_string())
                .emit();
            StorefrontConfig::default()
        }),
        None => StorefrontConfig::default(),
    }
}

/// `target[name](...args)`
fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: js_sys::Function =
        js_sys::Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    let args: js_sys::Array = args.iter().collect();
    method.apply(target, &args)
}

fn js_to_ui(e: JsValue) -> UiError {
    UiError::Dom(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn ui_to_js(e: UiError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

#[wasm_bindgen(js_name = addToCart)]
pub fn add_to_cart(product_id: u32) -> Result<(), JsValue> {
    storefront()?
        .add_to_cart(ProductId::new(product_id))
        .map(|_| ())
        .map_err(ui_to_js)
}

#[wasm_bindgen(js_name = updateCartBadge)]
pub fn update_cart_badge() -> Result<u32, JsValue> {
    Ok(storefront()?.update_cart_badge())
}

#[wasm_bindgen(js_name = showNotification)]
pub fn show_notification(message: &str, kind: Option<String>) -> Result<(), JsValue> {
    let severity = kind
        .as_deref()
        .and_then(Severity::from_name)
        .unwrap_or_default();
    storefront()?.show_notification(message, severity);
    Ok(())
}

#[wasm_bindgen(js_name = subscribeNewsletter)]
pub fn subscribe_newsletter() -> Result<(), JsValue> {
    storefront()?.subscribe_newsletter();
    Ok(())
}

#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email(email: &str) -> bool {
    Storefront::is_valid_email(email)
}

#[wasm_bindgen(js_name = showUserList)]
pub fn show_user_list() -> Result<(), JsValue> {
    let storefront = storefront()?;
    wasm_bindgen_futures::spawn_local(async move {
        storefront.show_user_list().await;
    });
    Ok(())
}

#[wasm_bindgen(js_name = searchProducts)]
pub fn search_products(query: &str) -> Result<(), JsValue> {
    storefront()?.search_products(query);
    Ok(())
}

#[wasm_bindgen(js_name = addToWishlist)]
pub fn add_to_wishlist(product_id: u32) -> Result<(), JsValue> {
    storefront()?.add_to_wishlist(ProductId::new(product_id));
    Ok(())
}

#[wasm_bindgen(js_name = shareProduct)]
pub fn share_product(product_id: u32) -> Result<(), JsValue> {
    let storefront = storefront()?;
    wasm_bindgen_futures::spawn_local(async move {
        storefront.share_product(ProductId::new(product_id)).await;
    });
    Ok(())
}

/// Returns the new theme, `"dark"` or `"light"`.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> Result<String, JsValue> {
    storefront()?
        .toggle_theme()
        .map(|theme| theme.as_str().to_string())
        .map_err(ui_to_js)
}
