use super::ItemKind;

/// Display-ready projection of a screen's items, consumed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuTitle {
    /// Non-selectable heading (the screen's name or a title row).
    Header(String),
    /// A selectable entity row.
    Entity { kind: ItemKind, text: String },
    /// Version footer, present on screens that show the firmware version.
    Version(String),
}

impl MenuTitle {
    pub fn text(&self) -> &str {
        match self {
            MenuTitle::Header(text) | MenuTitle::Version(text) => text,
            MenuTitle::Entity { text, .. } => text,
        }
    }
}
