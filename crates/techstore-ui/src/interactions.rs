//! Page-wide behaviors wired up at load: anchor scrolling, the button
//! press effect and the required-field guard on forms.

use std::rc::Rc;

use crate::scheduler::{Scheduler, TimerHandle};

pub const REQUIRED_FIELDS_MISSING: &str = "Please fill in all required fields.";

/// Transform applied while a button is pressed.
pub const PRESSED_TRANSFORM: &str = "scale(0.95)";

/// Selector an in-page link scrolls to, or `None` for a bare `#`.
pub fn anchor_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(fragment) if !fragment.is_empty() => Some(href),
        _ => None,
    }
}

/// Something with a class list and an inline transform.
pub trait PressTarget {
    fn has_class(&self, class: &str) -> bool;
    fn set_transform(&self, value: &str);
}

/// Scale a clicked `.btn` down and schedule the revert.
///
/// Close buttons are left alone; returns `None` for them.
pub fn press<T>(target: Rc<T>, scheduler: &dyn Scheduler, revert_ms: u32) -> Option<TimerHandle>
where
    T: PressTarget + ?Sized + 'static,
{
    if target.has_class("btn-close") {
        return None;
    }

    target.set_transform(PRESSED_TRANSFORM);
    Some(scheduler.schedule(revert_ms, Box::new(move || target.set_transform(""))))
}

/// A form control marked `required`.
pub trait RequiredField {
    fn value(&self) -> String;
    fn set_invalid(&self, invalid: bool);
}

/// Mark every empty field and report whether the form may be submitted.
///
/// Values are trimmed before the check. Every field is visited, so filled
/// fields lose a stale mark even when others are empty.
pub fn check_required_fields<F: RequiredField + ?Sized>(fields: &[&F]) -> bool {
    let mut valid = true;
    for field in fields {
        let empty = field.value().trim().is_empty();
        field.set_invalid(empty);
        valid &= !empty;
    }
    valid
}
