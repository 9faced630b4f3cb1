//! [`Scheduler`] over `setTimeout`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::scheduler::{Scheduler, Task, TimerHandle, TimerSlots};

type Slots = RefCell<TimerSlots<Closure<dyn FnMut()>>>;

/// Browser timers. Callbacks are owned here rather than leaked, so a
/// cancelled timer frees its closure.
#[derive(Debug, Default)]
pub struct BrowserScheduler {
    slots: Rc<Slots>,
}

fn fire(slots: &Weak<Slots>, handle: Option<TimerHandle>, task: Task) {
    let (Some(slots), Some(handle)) = (slots.upgrade(), handle) else {
        return task();
    };
    slots.borrow_mut().begin_fire(handle);
    task();
    slots.borrow_mut().end_fire();
}

fn handle_for(timeout_id: i32) -> TimerHandle {
    TimerHandle(u64::from(timeout_id.unsigned_abs()))
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let slots = Rc::downgrade(&self.slots);
        let handle = Rc::new(Cell::new(None));
        let fired = Rc::clone(&handle);
        let callback: Closure<dyn FnMut()> =
            Closure::once(move || fire(&slots, fired.get(), task));

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let scheduled = web_sys::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay,
            )
            .ok()
        });

        match scheduled {
            Some(id) => {
                handle.set(Some(handle_for(id)));
                self.slots.borrow_mut().insert(handle_for(id), callback);
                handle_for(id)
            }
            // Timeout ids are positive, so 0 never matches a live timer.
            None => TimerHandle(0),
        }
    }

    fn cancel(&self, handle: TimerHandle) -> bool {
        let Ok(id) = i32::try_from(handle.0) else {
            return false;
        };
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(id);
        }
        self.slots.borrow_mut().cancel(handle)
    }
}
