//! Browser interval timers.
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::dom;

/// A repeating `setInterval` timer. Dropping the handle clears the interval.
pub struct IntervalHandle {
    id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl IntervalHandle {
    /// Run `callback` every `period_ms` milliseconds.
    ///
    /// If the browser refuses the timer the handle is still returned but
    /// never fires.
    pub fn start<F>(period_ms: u32, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::<dyn FnMut()>::new(callback);
        let id = dom::window().and_then(|win| {
            let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
            win.set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|err| {
                log::warn!("interval refused: {}", dom::js_error_message(&err));
            })
            .ok()
        });
        Self {
            id,
            _callback: callback,
        }
    }

    #[must_use]
    pub const fn is_scheduled(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        if let Some(id) = self.id
            && let Some(win) = dom::window()
        {
            win.clear_interval_with_handle(id);
        }
    }
}

/// Call `step` every `period_ms` until it returns `true`.
///
/// The callback is leaked for the page's lifetime; the interval itself is
/// cleared once `step` reports completion.
pub fn repeat_until<F>(period_ms: u32, mut step: F)
where
    F: FnMut() -> bool + 'static,
{
    let Some(win) = dom::window() else {
        return;
    };
    let id = std::rc::Rc::new(std::cell::Cell::new(None::<i32>));
    let callback = {
        let id = id.clone();
        Closure::<dyn FnMut()>::new(move || {
            if step()
                && let Some(handle) = id.take()
                && let Some(win) = dom::window()
            {
                win.clear_interval_with_handle(handle);
            }
        })
    };
    let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
    match win.set_interval_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        timeout,
    ) {
        Ok(handle) => {
            id.set(Some(handle));
            callback.forget();
        }
        Err(err) => log::warn!("interval refused: {}", dom::js_error_message(&err)),
    }
}
