//! DOM event listeners that unregister themselves when dropped.
use wasm_bindgen::{JsCast, prelude::Closure};

use crate::{Str, error::Result};

use super::dom_result;

pub struct EventListener {
    /// The DOM that the event listener is registered upon.
    target: web_sys::EventTarget,
    /// The name of the event being listened for.
    event_name: Str,
    /// The callback registered that will be invoked when the event occurs.
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let removed = dom_result(
            self.target.remove_event_listener_with_callback(
                self.event_name.as_str(),
                self.callback.as_ref().unchecked_ref(),
            ),
            "remove event listener",
        );
        match removed {
            Ok(()) => log::trace!("dropped listener for {}", self.event_name),
            Err(err) => log::warn!("{err}"),
        }
    }
}

impl EventListener {
    pub fn new(
        target: impl AsRef<web_sys::EventTarget>,
        event_name: impl Into<Str>,
        f: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self> {
        let event_name = event_name.into();
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
        let target = target.as_ref().clone();
        dom_result(
            target.add_event_listener_with_callback(
                event_name.as_str(),
                callback.as_ref().unchecked_ref(),
            ),
            "add event listener",
        )?;
        Ok(Self {
            target,
            event_name,
            callback,
        })
    }

    pub fn event_name(&self) -> &str {
        self.event_name.as_str()
    }
}
