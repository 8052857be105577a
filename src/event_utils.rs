use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

#[derive(Clone, Debug)]
pub struct EventOptions {
    pub passive: bool,
    pub capture: bool,
    pub once: bool,
}

impl Default for EventOptions {
    fn default() -> Self {
        Self { passive: true, capture: false, once: false }
    }
}

impl EventOptions {
    /// Options for handlers that call `prevent_default`, e.g. wheel zoom.
    pub fn active() -> Self {
        Self { passive: false, ..Self::default() }
    }
}

/// Registered listener; dropping it without `remove` leaves the listener
/// attached but invalidates the callback, so keep it alive or remove it.
pub struct EventListenerHandle {
    target: EventTarget,
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
    capture: bool,
}

impl EventListenerHandle {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn remove(self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

pub fn event_listener_with_options<E>(
    target: &EventTarget,
    event: E,
    options: &EventOptions,
    mut cb: impl FnMut(E::EventType) + 'static,
) -> EventListenerHandle
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let opts = AddEventListenerOptions::new();
    opts.set_passive(options.passive);
    opts.set_capture(options.capture);
    opts.set_once(options.once);

    let event_name = event.name().into_owned();
    let callback = Closure::wrap(Box::new(move |ev: Event| {
        cb(ev.unchecked_into::<E::EventType>());
    }) as Box<dyn FnMut(Event)>);

    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        &event_name,
        callback.as_ref().unchecked_ref(),
        &opts,
    );

    EventListenerHandle { target: target.clone(), event_name, callback, capture: options.capture }
}

/// Listener on `window`, used for releases that happen outside the canvas.
pub fn window_event_listener_with_options<E>(
    event: E,
    options: &EventOptions,
    cb: impl FnMut(E::EventType) + 'static,
) -> Option<EventListenerHandle>
where
    E: EventDescriptor + 'static,
    E::EventType: JsCast,
{
    let window = web_sys::window()?;
    Some(event_listener_with_options(window.as_ref(), event, options, cb))
}
