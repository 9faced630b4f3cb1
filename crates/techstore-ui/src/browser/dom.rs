//! [`Document`] over the live page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, HtmlInputElement};

use crate::document::{Document, ElementSpec};
use crate::error::UiError;
use crate::interactions::{PressTarget, RequiredField};

pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }

    pub fn current() -> Result<Self, UiError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| UiError::Dom("no document".to_string()))
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }
}

impl Document for BrowserDocument {
    fn input_value(&self, id: &str) -> Option<String> {
        self.element(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(|input| input.value())
    }

    fn set_input_value(&self, id: &str, value: &str) -> bool {
        match self.element(id).and_then(|e| e.dyn_into::<HtmlInputElement>().ok()) {
            Some(input) => {
                input.set_value(value);
                true
            }
            None => false,
        }
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        match self.element(id) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        match self.element(id) {
            Some(element) => {
                element.set_inner_html(html);
                true
            }
            None => false,
        }
    }

    fn append_to_body(&self, spec: &ElementSpec) -> bool {
        let Some(body) = self.document.body() else {
            return false;
        };
        let Ok(element) = self.document.create_element(spec.tag) else {
            return false;
        };
        element.set_id(&spec.id);
        element.set_class_name(&spec.class_name);
        if element.set_attribute("style", &spec.style).is_err() {
            return false;
        }
        element.set_inner_html(&spec.inner_html);
        body.append_child(&element).is_ok()
    }

    fn is_attached(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn remove(&self, id: &str) -> bool {
        match self.element(id) {
            Some(element) => {
                element.remove();
                true
            }
            None => false,
        }
    }

    fn show_modal(&self, id: &str) -> bool {
        match self.element(id) {
            Some(element) => open_bootstrap_modal(&element).is_ok(),
            None => false,
        }
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.document
            .body()
            .map(|b| b.class_list().contains(class))
            .unwrap_or(false)
    }

    fn set_body_class(&self, class: &str, on: bool) {
        if let Some(body) = self.document.body() {
            let classes = body.class_list();
            let _ = if on {
                classes.add_1(class)
            } else {
                classes.remove_1(class)
            };
        }
    }

    fn location(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default()
    }
}

/// `bootstrap.Modal.getOrCreateInstance(element).show()`
fn open_bootstrap_modal(element: &Element) -> Result<(), JsValue> {
    let bootstrap = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap"))?;
    let modal = js_sys::Reflect::get(&bootstrap, &JsValue::from_str("Modal"))?;
    let instance = super::call_method(&modal, "getOrCreateInstance", &[JsValue::from(element.clone())])?;
    super::call_method(&instance, "show", &[])?;
    Ok(())
}

impl PressTarget for HtmlElement {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn set_transform(&self, value: &str) {
        let _ = self.style().set_property("transform", value);
    }
}

/// A `[required]` control inside a form.
pub struct RequiredControl {
    pub element: Element,
    pub invalid_class: String,
}

impl RequiredField for RequiredControl {
    fn value(&self) -> String {
        js_sys::Reflect::get(&self.element, &JsValue::from_str("value"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    }

    fn set_invalid(&self, invalid: bool) {
        let classes = self.element.class_list();
        let _ = if invalid {
            classes.add_1(&self.invalid_class)
        } else {
            classes.remove_1(&self.invalid_class)
        };
    }
}
