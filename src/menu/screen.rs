use std::rc::Rc;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::callback::CallbackList;
#[cfg(feature = "button")]
use crate::entity::Button;
#[cfg(feature = "cover")]
use crate::entity::Cover;
#[cfg(feature = "fan")]
use crate::entity::Fan;
#[cfg(feature = "light")]
use crate::entity::Light;
#[cfg(feature = "number")]
use crate::entity::Number;
#[cfg(feature = "select")]
use crate::entity::Select;
#[cfg(feature = "sensor")]
use crate::entity::Sensor;
#[cfg(feature = "switch")]
use crate::entity::Switch;
#[cfg(feature = "text-sensor")]
use crate::entity::TextSensor;

use super::command::MenuCommand;
use super::titles::MenuTitle;
use super::{EntityRef, ItemKind, MenuItem};

/// A named, ordered list of menu items with selection, navigation, and
/// aggregated change notification.
///
/// Items are registered during startup configuration and only read afterwards;
/// registration is append-only. References returned by [`get_item`] and
/// [`get_selected`] borrow from the item list and are valid until the next
/// `register_*` call. All operations run on the display loop's thread.
///
/// [`get_item`]: MenuScreen::get_item
/// [`get_selected`]: MenuScreen::get_selected
#[derive(Debug)]
pub struct MenuScreen {
    name: String,
    index: u32,
    show_version: bool,
    items: Vec<MenuItem>,
    selected: Option<usize>,
    on_change: Rc<CallbackList>,
}

impl MenuScreen {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            index: 0,
            show_version: false,
            items: Vec::new(),
            selected: None,
            on_change: Rc::new(CallbackList::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Ordinal assigned by the controller that owns the set of screens.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn set_index(&mut self, index: u32) {
        self.index = index;
    }

    pub fn show_version(&self) -> bool {
        self.show_version
    }

    pub fn set_show_version(&mut self, show_version: bool) {
        self.show_version = show_version;
    }

    // Every stateful registration below wires the entity's own notification to
    // this hook; the delivered state value is discarded and only used as a
    // trigger pulse for the aggregate callback.
    fn change_hook(&self) -> impl FnMut() + 'static {
        let on_change = Rc::clone(&self.on_change);
        move || on_change.call(())
    }

    fn push_item(&mut self, entity: EntityRef, name: &str) {
        debug!(screen = %self.name, kind = %entity.kind(), name, "registering menu item");
        self.items.push(MenuItem::new(entity, name));
    }

    /// Appends a plain title row. Title rows render as headers and have no
    /// backing entity.
    pub fn register_title(&mut self, name: &str) {
        self.push_item(EntityRef::Title, name);
    }

    /// Appends a command. Commands have no state subscription; their trigger
    /// list gains a hook so that a fired command also reports "screen
    /// changed".
    pub fn register_command(&mut self, command: Rc<MenuCommand>, name: &str) {
        command.add_on_trigger_callback(self.change_hook());
        self.push_item(EntityRef::Command(command), name);
    }

    #[cfg(feature = "switch")]
    pub fn register_switch(&mut self, switch: Rc<Switch>, name: &str) {
        let mut changed = self.change_hook();
        switch.add_on_state_callback(move |_state| changed());
        self.push_item(EntityRef::Switch(switch), name);
    }

    #[cfg(feature = "text-sensor")]
    pub fn register_text_sensor(&mut self, text_sensor: Rc<TextSensor>, name: &str) {
        let mut changed = self.change_hook();
        text_sensor.add_on_state_callback(move |_state| changed());
        self.push_item(EntityRef::TextSensor(text_sensor), name);
    }

    #[cfg(feature = "sensor")]
    pub fn register_sensor(&mut self, sensor: Rc<Sensor>, name: &str) {
        let mut changed = self.change_hook();
        sensor.add_on_state_callback(move |_state| changed());
        self.push_item(EntityRef::Sensor(sensor), name);
    }

    #[cfg(feature = "light")]
    pub fn register_light(&mut self, light: Rc<Light>, name: &str) {
        light.add_on_state_callback(self.change_hook());
        self.push_item(EntityRef::Light(light), name);
    }

    #[cfg(feature = "number")]
    pub fn register_number(&mut self, number: Rc<Number>, name: &str) {
        let mut changed = self.change_hook();
        number.add_on_state_callback(move |_value| changed());
        self.push_item(EntityRef::Number(number), name);
    }

    #[cfg(feature = "cover")]
    pub fn register_cover(&mut self, cover: Rc<Cover>, name: &str) {
        cover.add_on_state_callback(self.change_hook());
        self.push_item(EntityRef::Cover(cover), name);
    }

    #[cfg(feature = "button")]
    pub fn register_button(&mut self, button: Rc<Button>, name: &str) {
        button.add_on_press_callback(self.change_hook());
        self.push_item(EntityRef::Button(button), name);
    }

    #[cfg(feature = "fan")]
    pub fn register_fan(&mut self, fan: Rc<Fan>, name: &str) {
        fan.add_on_state_callback(self.change_hook());
        self.push_item(EntityRef::Fan(fan), name);
    }

    #[cfg(feature = "select")]
    pub fn register_select(&mut self, select: Rc<Select>, name: &str) {
        let mut changed = self.change_hook();
        select.add_on_state_callback(move |_value, _index| changed());
        self.push_item(EntityRef::Select(select), name);
    }

    pub fn entity_count(&self) -> usize {
        self.items.len()
    }

    /// Display name of the item at `index`. Out of range is a contract
    /// violation; callers navigate within `0..entity_count()`.
    pub fn entity_name_at(&self, index: usize) -> Result<&str> {
        self.items
            .get(index)
            .map(MenuItem::name)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Item at `index`; same contract as [`entity_name_at`]. The reference is
    /// valid until the next `register_*` call.
    ///
    /// [`entity_name_at`]: MenuScreen::entity_name_at
    pub fn get_item(&self, index: usize) -> Result<&MenuItem> {
        self.items.get(index).ok_or_else(|| self.out_of_range(index))
    }

    fn out_of_range(&self, index: usize) -> anyhow::Error {
        anyhow!(
            "index {index} out of range for screen '{}' (0..{})",
            self.name,
            self.items.len()
        )
    }

    /// Marks `items[index]` selected, returning false (selection untouched)
    /// when `index` is out of range — the caller is driven by physical input
    /// that may momentarily point past the list. Selecting a command triggers
    /// it immediately.
    pub fn select(&mut self, index: usize) -> bool {
        self.select_impl(index, false)
    }

    /// Long-press variant of [`select`]. Commands trigger on either gesture;
    /// for every other kind both gestures only stage the selection, and the
    /// input collaborator applies its hold action to [`get_selected`].
    ///
    /// [`select`]: MenuScreen::select
    /// [`get_selected`]: MenuScreen::get_selected
    pub fn select_hold(&mut self, index: usize) -> bool {
        self.select_impl(index, true)
    }

    fn select_impl(&mut self, index: usize, hold: bool) -> bool {
        let Some(item) = self.items.get(index) else {
            debug!(screen = %self.name, index, hold, "selection out of range");
            return false;
        };

        debug!(screen = %self.name, index, hold, item = item.name(), "selected");
        self.selected = Some(index);

        if let EntityRef::Command(command) = item.entity() {
            command.trigger();
        }
        true
    }

    pub fn get_selected(&self) -> Option<&MenuItem> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Appends display-ready titles for every item: an optional screen-name
    /// header when `show_name`, one entry per item (title rows become
    /// headers), and a trailing version entry when the screen shows versions.
    pub fn menu_titles(&self, titles: &mut Vec<MenuTitle>, show_name: bool) {
        if show_name {
            titles.push(MenuTitle::Header(self.name.clone()));
        }
        for item in &self.items {
            titles.push(match item.kind() {
                ItemKind::Title => MenuTitle::Header(item.name().to_string()),
                kind => MenuTitle::Entity {
                    kind,
                    text: item.name().to_string(),
                },
            });
        }
        if self.show_version {
            titles.push(MenuTitle::Version(format!("v{}", crate::VERSION)));
        }
    }

    /// Registers a zero-argument callback invoked whenever any registered
    /// entity's state changes or a command fires.
    pub fn add_on_change_callback(&self, mut callback: impl FnMut() + 'static) {
        self.on_change.add(move |_| callback());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0u32));
        let count_cb = Rc::clone(&count);
        (count, move || count_cb.set(count_cb.get() + 1))
    }

    #[test]
    fn count_matches_registrations() {
        let mut screen = MenuScreen::new("Hall");
        assert_eq!(screen.entity_count(), 0);

        screen.register_title("Scenes");
        screen.register_command(Rc::new(MenuCommand::new("Movie night")), "Movie night");
        screen.register_command(Rc::new(MenuCommand::new("All off")), "All off");
        assert_eq!(screen.entity_count(), 3);
    }

    #[test]
    fn names_preserve_registration_order() {
        let mut screen = MenuScreen::new("Hall");
        for name in ["Scenes", "Movie night", "All off"] {
            screen.register_command(Rc::new(MenuCommand::new(name)), name);
        }

        assert_eq!(screen.entity_name_at(0).unwrap(), "Scenes");
        assert_eq!(screen.entity_name_at(1).unwrap(), "Movie night");
        assert_eq!(screen.entity_name_at(2).unwrap(), "All off");
    }

    #[test]
    fn out_of_range_lookups_fail() {
        let mut screen = MenuScreen::new("Hall");
        screen.register_title("Scenes");

        assert!(screen.entity_name_at(1).is_err());
        assert!(screen.get_item(7).is_err());
        let message = screen.entity_name_at(1).unwrap_err().to_string();
        assert!(message.contains("out of range"), "{message}");
    }

    #[test]
    fn select_stages_item_without_side_effects() {
        let mut screen = MenuScreen::new("Hall");
        screen.register_title("Scenes");
        screen.register_title("Climate");

        assert!(screen.get_selected().is_none());
        assert!(screen.select(1));
        assert_eq!(screen.get_selected().unwrap().name(), "Climate");
        assert_eq!(screen.get_selected().unwrap().kind(), ItemKind::Title);
    }

    #[test]
    fn select_out_of_range_keeps_previous_selection() {
        let mut screen = MenuScreen::new("Hall");
        screen.register_title("Scenes");

        assert!(screen.select(0));
        assert!(!screen.select(5));
        assert!(!screen.select_hold(5));
        assert_eq!(screen.get_selected().unwrap().name(), "Scenes");
    }

    #[test]
    fn selecting_a_command_triggers_it() {
        let mut screen = MenuScreen::new("Hall");
        let command = Rc::new(MenuCommand::new("Reboot"));
        let (reboots, on_trigger) = counter();
        command.add_on_trigger_callback(on_trigger);
        screen.register_title("Actions");
        screen.register_command(command, "Reboot");

        assert!(screen.select(1));
        assert_eq!(reboots.get(), 1);
        assert!(screen.select_hold(1));
        assert_eq!(reboots.get(), 2);
        assert_eq!(screen.get_selected().unwrap().kind(), ItemKind::Command);
    }

    #[test]
    fn fired_command_reports_screen_changed() {
        let mut screen = MenuScreen::new("Hall");
        let command = Rc::new(MenuCommand::new("Reboot"));
        screen.register_command(Rc::clone(&command), "Reboot");

        let (changes, on_change) = counter();
        screen.add_on_change_callback(on_change);

        command.trigger();
        assert_eq!(changes.get(), 1);
        screen.select(0);
        assert_eq!(changes.get(), 2);
    }

    #[test]
    fn clear_selection_drops_the_staged_item() {
        let mut screen = MenuScreen::new("Hall");
        screen.register_title("Scenes");
        screen.select(0);
        screen.clear_selection();
        assert!(screen.get_selected().is_none());
    }

    #[cfg(all(feature = "switch", feature = "sensor"))]
    #[test]
    fn entity_state_changes_fire_the_aggregate_callback() {
        let mut screen = MenuScreen::new("Kitchen");
        let switch = Rc::new(Switch::new());
        let sensor = Rc::new(Sensor::new());
        screen.register_switch(Rc::clone(&switch), "Light");
        screen.register_sensor(Rc::clone(&sensor), "Temp");

        let (changes, on_change) = counter();
        screen.add_on_change_callback(on_change);

        switch.publish_state(true);
        assert_eq!(changes.get(), 1);
        sensor.publish_state(21.5);
        assert_eq!(changes.get(), 2);
        sensor.publish_state(21.6);
        assert_eq!(changes.get(), 3);
    }

    #[cfg(feature = "button")]
    #[test]
    fn button_press_counts_as_a_state_change() {
        let mut screen = MenuScreen::new("Hall");
        let button = Rc::new(Button::new());
        screen.register_button(Rc::clone(&button), "Doorbell");

        let (changes, on_change) = counter();
        screen.add_on_change_callback(on_change);

        button.press();
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn titles_project_headers_items_and_version() {
        let mut screen = MenuScreen::new("Kitchen");
        screen.set_show_version(true);
        screen.register_title("Actions");
        screen.register_command(Rc::new(MenuCommand::new("Reboot")), "Reboot");

        let mut titles = Vec::new();
        screen.menu_titles(&mut titles, true);

        assert_eq!(titles.len(), 4);
        assert_eq!(titles[0], MenuTitle::Header("Kitchen".to_string()));
        assert_eq!(titles[1], MenuTitle::Header("Actions".to_string()));
        assert_eq!(
            titles[2],
            MenuTitle::Entity {
                kind: ItemKind::Command,
                text: "Reboot".to_string(),
            }
        );
        assert_eq!(
            titles[3],
            MenuTitle::Version(format!("v{}", crate::VERSION))
        );

        let mut bare = Vec::new();
        screen.menu_titles(&mut bare, false);
        assert_eq!(bare.len(), 3);
        assert_eq!(bare[0], MenuTitle::Header("Actions".to_string()));
    }

    #[test]
    fn plain_accessors_store_values() {
        let mut screen = MenuScreen::new("Hall");
        screen.set_name("Hallway");
        screen.set_index(3);
        screen.set_show_version(true);

        assert_eq!(screen.name(), "Hallway");
        assert_eq!(screen.index(), 3);
        assert!(screen.show_version());
    }
}
