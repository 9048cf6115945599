//! Browser timers: the debounce `Scheduler` and an async sleep.

use beach_sync::Scheduler;
use js_sys::Promise;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// A pending `setTimeout`. Dropping it clears the timeout and releases the
/// callback.
pub struct TimeoutHandle {
    id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        if let (Some(id), Some(window)) = (self.id, web_sys::window()) {
            window.clear_timeout_with_handle(id);
        }
    }
}

/// `setTimeout`-backed [`Scheduler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Token = TimeoutHandle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimeoutHandle {
        let callback = Closure::once(task);
        let id = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.as_ref().unchecked_ref(),
                    delay_ms as i32,
                )
                .map_err(|e| log::warn!("setTimeout failed: {:?}", e))
                .ok()
        });
        TimeoutHandle {
            id,
            _callback: callback,
        }
    }

    fn cancel(&self, token: TimeoutHandle) {
        drop(token);
    }
}

/// Resolve after `ms` milliseconds. Resolves at once without a window.
pub async fn sleep_ms(ms: u32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32)
        });
        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = JsFuture::from(promise).await;
}
