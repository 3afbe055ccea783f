//! Menu item model shared by screens, commands, and the title projection.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

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

use self::command::MenuCommand;

pub mod command;
pub mod screen;
pub mod titles;

/// Kind tag for a menu item. Stateful kinds only exist when their feature is
/// compiled in, so configuration naming a disabled kind fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    None,
    Title,
    Command,
    #[cfg(feature = "switch")]
    Switch,
    #[cfg(feature = "text-sensor")]
    TextSensor,
    #[cfg(feature = "sensor")]
    Sensor,
    #[cfg(feature = "light")]
    Light,
    #[cfg(feature = "number")]
    Number,
    #[cfg(feature = "cover")]
    Cover,
    #[cfg(feature = "button")]
    Button,
    #[cfg(feature = "fan")]
    Fan,
    #[cfg(feature = "select")]
    Select,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ItemKind::None => "none",
            ItemKind::Title => "title",
            ItemKind::Command => "command",
            #[cfg(feature = "switch")]
            ItemKind::Switch => "switch",
            #[cfg(feature = "text-sensor")]
            ItemKind::TextSensor => "text_sensor",
            #[cfg(feature = "sensor")]
            ItemKind::Sensor => "sensor",
            #[cfg(feature = "light")]
            ItemKind::Light => "light",
            #[cfg(feature = "number")]
            ItemKind::Number => "number",
            #[cfg(feature = "cover")]
            ItemKind::Cover => "cover",
            #[cfg(feature = "button")]
            ItemKind::Button => "button",
            #[cfg(feature = "fan")]
            ItemKind::Fan => "fan",
            #[cfg(feature = "select")]
            ItemKind::Select => "select",
        })
    }
}

/// Non-owning reference to whatever backs a menu item.
///
/// Stateful variants hold `Rc` handles shared with the host's entity
/// registry; the screen never constructs or tears down the referent. `Title`
/// and `None` carry no payload.
#[derive(Debug, Clone)]
pub enum EntityRef {
    None,
    Title,
    Command(Rc<MenuCommand>),
    #[cfg(feature = "switch")]
    Switch(Rc<Switch>),
    #[cfg(feature = "text-sensor")]
    TextSensor(Rc<TextSensor>),
    #[cfg(feature = "sensor")]
    Sensor(Rc<Sensor>),
    #[cfg(feature = "light")]
    Light(Rc<Light>),
    #[cfg(feature = "number")]
    Number(Rc<Number>),
    #[cfg(feature = "cover")]
    Cover(Rc<Cover>),
    #[cfg(feature = "button")]
    Button(Rc<Button>),
    #[cfg(feature = "fan")]
    Fan(Rc<Fan>),
    #[cfg(feature = "select")]
    Select(Rc<Select>),
}

impl EntityRef {
    pub fn kind(&self) -> ItemKind {
        match self {
            EntityRef::None => ItemKind::None,
            EntityRef::Title => ItemKind::Title,
            EntityRef::Command(_) => ItemKind::Command,
            #[cfg(feature = "switch")]
            EntityRef::Switch(_) => ItemKind::Switch,
            #[cfg(feature = "text-sensor")]
            EntityRef::TextSensor(_) => ItemKind::TextSensor,
            #[cfg(feature = "sensor")]
            EntityRef::Sensor(_) => ItemKind::Sensor,
            #[cfg(feature = "light")]
            EntityRef::Light(_) => ItemKind::Light,
            #[cfg(feature = "number")]
            EntityRef::Number(_) => ItemKind::Number,
            #[cfg(feature = "cover")]
            EntityRef::Cover(_) => ItemKind::Cover,
            #[cfg(feature = "button")]
            EntityRef::Button(_) => ItemKind::Button,
            #[cfg(feature = "fan")]
            EntityRef::Fan(_) => ItemKind::Fan,
            #[cfg(feature = "select")]
            EntityRef::Select(_) => ItemKind::Select,
        }
    }
}

/// Screen-local record pairing an entity reference with its display name.
/// The screen owns the record, not the referent.
#[derive(Debug, Clone)]
pub struct MenuItem {
    entity: EntityRef,
    name: String,
}

impl MenuItem {
    pub(crate) fn new(entity: EntityRef, name: &str) -> Self {
        Self {
            entity,
            name: name.to_string(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.entity.kind()
    }

    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
