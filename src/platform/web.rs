//! Browser implementations of the platform capabilities
//!
//! Screen wake lock and vibration are progressive enhancements: feature
//! presence is probed first, and every failure path is logged and swallowed.
//! The clock must keep working on browsers that support neither.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{WakeLockSentinel, WakeLockType};

use super::{Haptics, ScreenLock};
use crate::consts::VIBRATION_PULSE_MS;

/// Screen wake lock backed by `navigator.wakeLock`
///
/// The sentinel slot is shared with the async request, so a release that
/// races an in-flight acquisition still drops the lock once it resolves.
#[derive(Debug, Default)]
pub struct WebWakeLock {
    sentinel: Rc<RefCell<Option<WakeLockSentinel>>>,
    /// Cleared by `release`; an acquisition resolving afterwards lets go
    wanted: Rc<RefCell<bool>>,
}

impl WebWakeLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScreenLock for WebWakeLock {
    fn acquire(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let navigator = window.navigator();
        if !js_sys::Reflect::has(navigator.as_ref(), &JsValue::from_str("wakeLock"))
            .unwrap_or(false)
        {
            log::debug!("wake lock unsupported by this browser");
            return;
        }

        *self.wanted.borrow_mut() = true;
        let promise = navigator.wake_lock().request(WakeLockType::Screen);
        let slot = Rc::clone(&self.sentinel);
        let wanted = Rc::clone(&self.wanted);
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(value) => {
                    let sentinel: WakeLockSentinel = value.unchecked_into();
                    if *wanted.borrow() {
                        *slot.borrow_mut() = Some(sentinel);
                    } else {
                        // Released while the request was in flight
                        let _ = sentinel.release();
                    }
                }
                Err(err) => log::warn!("wake lock request failed: {err:?}"),
            }
        });
    }

    fn release(&mut self) {
        *self.wanted.borrow_mut() = false;
        if let Some(sentinel) = self.sentinel.borrow_mut().take() {
            // Fire and forget; the browser drops the lock either way
            let _ = sentinel.release();
        }
    }
}

/// Haptic pulse backed by `navigator.vibrate`
#[derive(Debug, Default)]
pub struct WebHaptics;

impl Haptics for WebHaptics {
    fn pulse(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let navigator = window.navigator();
        if !js_sys::Reflect::has(navigator.as_ref(), &JsValue::from_str("vibrate"))
            .unwrap_or(false)
        {
            return;
        }
        let _ = navigator.vibrate_with_duration(VIBRATION_PULSE_MS);
    }
}
