//! Page-wide listeners installed once the document is ready.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::interactions::anchor_target;
use crate::storefront::Storefront;

use super::dom::RequiredControl;

/// Elements matching `selector`, as `T`.
fn select_all<T: JsCast>(root: &web_sys::Document, selector: &str) -> Result<Vec<T>, JsValue> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    callback.forget();
    Ok(())
}

pub fn bind_page(storefront: &Rc<Storefront>, document: &web_sys::Document) -> Result<(), JsValue> {
    bind_anchors(document)?;
    bind_buttons(storefront, document)?;
    bind_forms(storefront, document)?;
    Ok(())
}

fn bind_anchors(document: &web_sys::Document) -> Result<(), JsValue> {
    for link in select_all::<Element>(document, r##"a[href^="#"]"##)? {
        let doc = document.clone();
        let this = link.clone();
        listen(&link, "click", move |event| {
            event.prevent_default();
            let href = this.get_attribute("href").unwrap_or_default();
            let Some(selector) = anchor_target(&href) else {
                return;
            };
            if let Ok(Some(target)) = doc.query_selector(selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}

fn bind_buttons(storefront: &Rc<Storefront>, document: &web_sys::Document) -> Result<(), JsValue> {
    for button in select_all::<HtmlElement>(document, ".btn")? {
        let storefront = Rc::clone(storefront);
        let pressed = Rc::new(button.clone());
        listen(&button, "click", move |_event| {
            storefront.press_button(Rc::clone(&pressed));
        })?;
    }
    Ok(())
}

fn bind_forms(storefront: &Rc<Storefront>, document: &web_sys::Document) -> Result<(), JsValue> {
    for form in select_all::<Element>(document, "form")? {
        let storefront = Rc::clone(storefront);
        let this = form.clone();
        listen(&form, "submit", move |event| {
            let Ok(list) = this.query_selector_all("[required]") else {
                return;
            };
            let invalid_class = &storefront.config().invalid_class;
            let controls: Vec<RequiredControl> = (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .map(|element| RequiredControl {
                    element,
                    invalid_class: invalid_class.clone(),
                })
                .collect();
            let fields: Vec<&RequiredControl> = controls.iter().collect();

            if !storefront.guard_form(&fields) {
                event.prevent_default();
            }
        })?;
    }
    Ok(())
}
