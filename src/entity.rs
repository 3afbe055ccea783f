//! Entity handles standing in for the host framework's entities.
//!
//! Each handle keeps the latest published state and a list of state
//! subscribers. In firmware these adapt the host registry's entities; here
//! `publish_state` (or [`Button::press`]) doubles as the simulation surface
//! driven by the CLI and the tests. Handles are `Rc`-shared between the
//! registry and the screens that display them, and are single-threaded.

#[cfg(any(
    feature = "switch",
    feature = "sensor",
    feature = "light",
    feature = "number",
    feature = "cover",
    feature = "fan",
    feature = "select"
))]
use std::cell::Cell;
#[cfg(any(feature = "text-sensor", feature = "select"))]
use std::cell::RefCell;

#[cfg(any(
    feature = "switch",
    feature = "sensor",
    feature = "text-sensor",
    feature = "light",
    feature = "number",
    feature = "cover",
    feature = "button",
    feature = "fan",
    feature = "select"
))]
use crate::callback::CallbackList;

/// On/off entity (relay, outlet).
#[cfg(feature = "switch")]
#[derive(Debug, Default)]
pub struct Switch {
    state: Cell<bool>,
    on_state: CallbackList<bool>,
}

#[cfg(feature = "switch")]
impl Switch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> bool {
        self.state.get()
    }

    pub fn add_on_state_callback(&self, callback: impl FnMut(bool) + 'static) {
        self.on_state.add(callback);
    }

    /// Stores `state` and notifies subscribers, as the host framework would on
    /// a hardware or network update.
    pub fn publish_state(&self, state: bool) {
        self.state.set(state);
        self.on_state.call(state);
    }

    pub fn toggle(&self) {
        self.publish_state(!self.state.get());
    }
}

/// Numeric read-only entity (temperature, humidity, power).
#[cfg(feature = "sensor")]
#[derive(Debug, Default)]
pub struct Sensor {
    state: Cell<f32>,
    on_state: CallbackList<f32>,
}

#[cfg(feature = "sensor")]
impl Sensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> f32 {
        self.state.get()
    }

    pub fn add_on_state_callback(&self, callback: impl FnMut(f32) + 'static) {
        self.on_state.add(callback);
    }

    pub fn publish_state(&self, state: f32) {
        self.state.set(state);
        self.on_state.call(state);
    }
}

/// Read-only entity with a textual state.
#[cfg(feature = "text-sensor")]
#[derive(Debug, Default)]
pub struct TextSensor {
    state: RefCell<String>,
    on_state: CallbackList<String>,
}

#[cfg(feature = "text-sensor")]
impl TextSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> String {
        self.state.borrow().clone()
    }

    pub fn add_on_state_callback(&self, callback: impl FnMut(String) + 'static) {
        self.on_state.add(callback);
    }

    pub fn publish_state(&self, state: &str) {
        *self.state.borrow_mut() = state.to_string();
        self.on_state.call(state.to_string());
    }
}

/// Light with an on/off remote state; dimming and color live host-side.
#[cfg(feature = "light")]
#[derive(Debug, Default)]
pub struct Light {
    on: Cell<bool>,
    on_state: CallbackList<()>,
}

#[cfg(feature = "light")]
impl Light {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    pub fn add_on_state_callback(&self, mut callback: impl FnMut() + 'static) {
        self.on_state.add(move |_| callback());
    }

    pub fn publish_state(&self, on: bool) {
        self.on.set(on);
        self.on_state.call(());
    }

    pub fn toggle(&self) {
        self.publish_state(!self.on.get());
    }
}

/// Adjustable numeric entity.
#[cfg(feature = "number")]
#[derive(Debug, Default)]
pub struct Number {
    value: Cell<f32>,
    on_state: CallbackList<f32>,
}

#[cfg(feature = "number")]
impl Number {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.value.get()
    }

    pub fn add_on_state_callback(&self, callback: impl FnMut(f32) + 'static) {
        self.on_state.add(callback);
    }

    pub fn publish_state(&self, value: f32) {
        self.value.set(value);
        self.on_state.call(value);
    }
}

/// Cover position in `0.0..=1.0` (0 closed, 1 open); notification is a pulse.
#[cfg(feature = "cover")]
#[derive(Debug, Default)]
pub struct Cover {
    position: Cell<f32>,
    on_state: CallbackList<()>,
}

#[cfg(feature = "cover")]
impl Cover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f32 {
        self.position.get()
    }

    pub fn add_on_state_callback(&self, mut callback: impl FnMut() + 'static) {
        self.on_state.add(move |_| callback());
    }

    pub fn publish_state(&self, position: f32) {
        self.position.set(position.clamp(0.0, 1.0));
        self.on_state.call(());
    }
}

/// Momentary press entity; carries no state.
#[cfg(feature = "button")]
#[derive(Debug, Default)]
pub struct Button {
    on_press: CallbackList<()>,
}

#[cfg(feature = "button")]
impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_on_press_callback(&self, mut callback: impl FnMut() + 'static) {
        self.on_press.add(move |_| callback());
    }

    pub fn press(&self) {
        self.on_press.call(());
    }
}

/// Fan with an on/off state; speed control lives host-side.
#[cfg(feature = "fan")]
#[derive(Debug, Default)]
pub struct Fan {
    on: Cell<bool>,
    on_state: CallbackList<()>,
}

#[cfg(feature = "fan")]
impl Fan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    pub fn add_on_state_callback(&self, mut callback: impl FnMut() + 'static) {
        self.on_state.add(move |_| callback());
    }

    pub fn publish_state(&self, on: bool) {
        self.on.set(on);
        self.on_state.call(());
    }

    pub fn toggle(&self) {
        self.publish_state(!self.on.get());
    }
}

/// Entity choosing one option out of a fixed list. Subscribers receive the
/// chosen option and its index.
#[cfg(feature = "select")]
#[derive(Debug, Default)]
pub struct Select {
    options: RefCell<Vec<String>>,
    active: Cell<Option<usize>>,
    on_state: CallbackList<(String, usize)>,
}

#[cfg(feature = "select")]
impl Select {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options: RefCell::new(options),
            active: Cell::new(None),
            on_state: CallbackList::new(),
        }
    }

    pub fn options(&self) -> Vec<String> {
        self.options.borrow().clone()
    }

    pub fn active_option(&self) -> Option<String> {
        let index = self.active.get()?;
        self.options.borrow().get(index).cloned()
    }

    pub fn add_on_state_callback(&self, mut callback: impl FnMut(String, usize) + 'static) {
        self.on_state.add(move |(value, index)| callback(value, index));
    }

    /// Publishes the option at `index`. Indexes past the option list are
    /// ignored (stale input from the host).
    pub fn publish_state(&self, index: usize) {
        let Some(value) = self.options.borrow().get(index).cloned() else {
            return;
        };
        self.active.set(Some(index));
        self.on_state.call((value, index));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[cfg(feature = "switch")]
    #[test]
    fn switch_publish_updates_state_and_notifies() {
        let switch = Switch::new();
        let last = Rc::new(Cell::new(None));
        let last_cb = Rc::clone(&last);
        switch.add_on_state_callback(move |state| last_cb.set(Some(state)));

        switch.publish_state(true);
        assert!(switch.state());
        assert_eq!(last.get(), Some(true));

        switch.toggle();
        assert!(!switch.state());
        assert_eq!(last.get(), Some(false));
    }

    #[cfg(feature = "text-sensor")]
    #[test]
    fn text_sensor_delivers_published_text() {
        let sensor = TextSensor::new();
        let seen = Rc::new(std::cell::RefCell::new(String::new()));
        let seen_cb = Rc::clone(&seen);
        sensor.add_on_state_callback(move |state| *seen_cb.borrow_mut() = state);

        sensor.publish_state("heating");
        assert_eq!(sensor.state(), "heating");
        assert_eq!(*seen.borrow(), "heating");
    }

    #[cfg(feature = "button")]
    #[test]
    fn button_press_fires_once_per_press() {
        let button = Button::new();
        let presses = Rc::new(Cell::new(0u32));
        let presses_cb = Rc::clone(&presses);
        button.add_on_press_callback(move || presses_cb.set(presses_cb.get() + 1));

        button.press();
        button.press();
        assert_eq!(presses.get(), 2);
    }

    #[cfg(feature = "cover")]
    #[test]
    fn cover_position_is_clamped() {
        let cover = Cover::new();
        cover.publish_state(1.5);
        assert_eq!(cover.position(), 1.0);
        cover.publish_state(-0.2);
        assert_eq!(cover.position(), 0.0);
    }

    #[cfg(feature = "select")]
    #[test]
    fn select_ignores_out_of_range_index() {
        let select = Select::new(vec!["auto".to_string(), "eco".to_string()]);
        let seen = Rc::new(Cell::new(None));
        let seen_cb = Rc::clone(&seen);
        select.add_on_state_callback(move |_value, index| seen_cb.set(Some(index)));

        select.publish_state(5);
        assert_eq!(seen.get(), None);
        assert_eq!(select.active_option(), None);

        select.publish_state(1);
        assert_eq!(seen.get(), Some(1));
        assert_eq!(select.active_option(), Some("eco".to_string()));
    }
}
