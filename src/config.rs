use std::{env, fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::menu::ItemKind;

/// Panel configuration: the set of menu screens the display cycles through.
/// A screen's position in `screens` is its controller-assigned index.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub screens: Vec<ScreenConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScreenConfig {
    pub name: String,

    /// Appends the firmware version to this screen's rendered titles.
    #[serde(default)]
    pub show_version: bool,

    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemConfig {
    /// Entity kind; kinds compiled out of this build fail to parse.
    pub kind: ItemKind,

    pub name: String,

    /// Options for `select` items; ignored for other kinds.
    #[serde(default)]
    pub options: Vec<String>,
}

pub fn load_optional() -> Result<Option<Config>> {
    let Some(path) = resolve_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(cfg))
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(p) = env::var("HOMEPANEL_CONFIG") {
        if !p.trim().is_empty() {
            return Some(PathBuf::from(p));
        }
    }

    let local = PathBuf::from("homepanel.json");
    if local.exists() {
        return Some(local);
    }

    if let Some(appdata) = env::var_os("APPDATA") {
        return Some(PathBuf::from(appdata).join("homepanel").join("config.json"));
    }

    if let Some(home) = env::var_os("HOME") {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("homepanel")
                .join("config.json"),
        );
    }

    None
}

pub fn ensure_config_file_exists() -> Result<PathBuf> {
    let Some(path) = resolve_config_path() else {
        return Err(anyhow!(
            "No config path available (set HOMEPANEL_CONFIG or ensure APPDATA/HOME is present)"
        ));
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config dir {}", parent.display()))?;
    }

    if !path.exists() {
        let template = serde_json::json!({
            "screens": [
                {
                    "name": "Kitchen",
                    "show_version": false,
                    "items": [
                        { "kind": "switch", "name": "Light" },
                        { "kind": "sensor", "name": "Temp" },
                        { "kind": "command", "name": "Reboot" }
                    ]
                }
            ]
        });
        let mut s = serde_json::to_string_pretty(&template).context("serialize config template")?;
        s.push('\n');
        fs::write(&path, s.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    }

    Ok(path)
}

pub fn find_screen<'a>(config: &'a Config, name: &str) -> Option<(usize, &'a ScreenConfig)> {
    config
        .screens
        .iter()
        .enumerate()
        .find(|(_, screen)| screen.name == name)
}
