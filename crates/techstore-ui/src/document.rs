//! The page the component runs on.
//!
//! [`Document`] covers the id-addressed operations the storefront needs.
//! Operations on a missing element report `false` or `None` and do nothing
//! else; callers treat that as a silent no-op.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// An element to create and append to the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub id: String,
    pub tag: &'static str,
    pub class_name: String,
    pub style: String,
    pub inner_html: String,
}

/// Id-addressed access to the page.
pub trait Document {
    /// Value of a form control.
    fn input_value(&self, id: &str) -> Option<String>;

    fn set_input_value(&self, id: &str, value: &str) -> bool;

    fn set_text(&self, id: &str, text: &str) -> bool;

    fn set_inner_html(&self, id: &str, html: &str) -> bool;

    /// Create an element as the last child of the body.
    fn append_to_body(&self, element: &ElementSpec) -> bool;

    /// Whether the element is still in the page.
    fn is_attached(&self, id: &str) -> bool;

    /// Detach the element. Returns `false` if it was not attached.
    fn remove(&self, id: &str) -> bool;

    /// Open a bootstrap modal.
    fn show_modal(&self, id: &str) -> bool;

    fn body_has_class(&self, class: &str) -> bool;

    /// Add (`on`) or remove a class on the body.
    fn set_body_class(&self, class: &str, on: bool);

    /// URL of the current page.
    fn location(&self) -> String;
}

/// An element held by [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    pub tag: String,
    pub class_name: String,
    pub style: String,
    pub inner_html: String,
    pub text: String,
    pub value: String,
}

impl MemoryElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Whether `class_name` lists `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }
}

#[derive(Debug, Default)]
struct PageState {
    elements: BTreeMap<String, MemoryElement>,
    body: Vec<String>,
    body_classes: BTreeSet<String>,
    opened_modals: Vec<String>,
    location: String,
}

/// An in-memory page for native builds and tests.
#[derive(Default)]
pub struct MemoryDocument {
    state: RefCell<PageState>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        let doc = Self::default();
        doc.state.borrow_mut().location = "http://localhost/".to_string();
        doc
    }

    /// Add an element that is part of the page markup.
    pub fn with_element(self, id: impl Into<String>, element: MemoryElement) -> Self {
        self.state.borrow_mut().elements.insert(id.into(), element);
        self
    }

    /// Add an `<input>` holding `value`.
    pub fn with_input(self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_element(id, MemoryElement::new("input").with_value(value))
    }

    pub fn with_location(self, url: impl Into<String>) -> Self {
        self.state.borrow_mut().location = url.into();
        self
    }

    pub fn element(&self, id: &str) -> Option<MemoryElement> {
        self.state.borrow().elements.get(id).cloned()
    }

    /// Ids of elements appended to the body, in order.
    pub fn body_children(&self) -> Vec<String> {
        self.state.borrow().body.clone()
    }

    pub fn body_classes(&self) -> Vec<String> {
        self.state.borrow().body_classes.iter().cloned().collect()
    }

    /// Ids passed to [`Document::show_modal`], in order.
    pub fn opened_modals(&self) -> Vec<String> {
        self.state.borrow().opened_modals.clone()
    }

    fn with_existing(&self, id: &str, f: impl FnOnce(&mut MemoryElement)) -> bool {
        match self.state.borrow_mut().elements.get_mut(id) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }
}

impl Document for MemoryDocument {
    fn input_value(&self, id: &str) -> Option<String> {
        self.state.borrow().elements.get(id).map(|e| e.value.clone())
    }

    fn set_input_value(&self, id: &str, value: &str) -> bool {
        self.with_existing(id, |e| e.value = value.to_string())
    }

    fn set_text(&self, id: &str, text: &str) -> bool {
        self.with_existing(id, |e| {
            e.text = text.to_string();
            e.inner_html.clear();
        })
    }

    fn set_inner_html(&self, id: &str, html: &str) -> bool {
        self.with_existing(id, |e| {
            e.inner_html = html.to_string();
            e.text.clear();
        })
    }

    fn append_to_body(&self, element: &ElementSpec) -> bool {
        let mut state = self.state.borrow_mut();
        state.body.retain(|id| id != &element.id);
        state.body.push(element.id.clone());
        state.elements.insert(
            element.id.clone(),
            MemoryElement {
                tag: element.tag.to_string(),
                class_name: element.class_name.clone(),
                style: element.style.clone(),
                inner_html: element.inner_html.clone(),
                ..Default::default()
            },
        );
        true
    }

    fn is_attached(&self, id: &str) -> bool {
        self.state.borrow().elements.contains_key(id)
    }

    fn remove(&self, id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.body.retain(|child| child != id);
        state.elements.remove(id).is_some()
    }

    fn show_modal(&self, id: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.elements.contains_key(id) {
            return false;
        }
        state.opened_modals.push(id.to_string());
        true
    }

    fn body_has_class(&self, class: &str) -> bool {
        self.state.borrow().body_classes.contains(class)
    }

    fn set_body_class(&self, class: &str, on: bool) {
        let mut state = self.state.borrow_mut();
        if on {
            state.body_classes.insert(class.to_string());
        } else {
            state.body_classes.remove(class);
        }
    }

    fn location(&self) -> String {
        self.state.borrow().location.clone()
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryDocument")
            .field("elements", &state.elements.len())
            .field("body", &state.body)
            .field("body_classes", &state.body_classes)
            .finish()
    }
}
