use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use homepanel::config;
#[cfg(feature = "button")]
use homepanel::entity::Button;
#[cfg(feature = "cover")]
use homepanel::entity::Cover;
#[cfg(feature = "fan")]
use homepanel::entity::Fan;
#[cfg(feature = "light")]
use homepanel::entity::Light;
#[cfg(feature = "number")]
use homepanel::entity::Number;
#[cfg(feature = "select")]
use homepanel::entity::Select;
#[cfg(feature = "sensor")]
use homepanel::entity::Sensor;
#[cfg(feature = "switch")]
use homepanel::entity::Switch;
#[cfg(feature = "text-sensor")]
use homepanel::entity::TextSensor;
use homepanel::menu::command::MenuCommand;
use homepanel::menu::screen::MenuScreen;
use homepanel::menu::titles::MenuTitle;
use homepanel::menu::ItemKind;

#[derive(Parser, Debug)]
#[command(name = "homepanel", version, about = "Menu screen simulator for home-automation display panels")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Prints configured screens and their items.
    List,
    /// Prints the rendered title projection of a screen.
    Titles {
        /// Screen name as configured.
        screen: String,
        /// Prefix the list with the screen-name header.
        #[arg(long)]
        show_name: bool,
    },
    /// Simulates a selection on a screen (short press by default).
    Select {
        /// Screen name as configured.
        screen: String,
        /// Zero-based item index, e.g. an encoder position.
        index: usize,
        /// Treat the selection as a long press.
        #[arg(long)]
        hold: bool,
    },
    /// Prints the config path in use, creating a template if absent.
    ConfigPath,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => {
            let cfg = load_config()?;
            for (index, screen) in cfg.screens.iter().enumerate() {
                println!("[{index}] {} ({} items)", screen.name, screen.items.len());
                for (item_index, item) in screen.items.iter().enumerate() {
                    println!("  [{item_index}] {:<12} {}", item.kind, item.name);
                }
            }
        }
        Command::Titles { screen, show_name } => {
            let cfg = load_config()?;
            let (index, screen_cfg) = config::find_screen(&cfg, &screen)
                .with_context(|| format!("no screen named '{screen}' in config"))?;
            let built = build_screen(screen_cfg, index as u32)?;

            let mut titles = Vec::new();
            built.menu_titles(&mut titles, show_name);
            for title in titles {
                match title {
                    MenuTitle::Header(text) => println!("-- {text} --"),
                    MenuTitle::Entity { kind, text } => println!("{kind:<12} {text}"),
                    MenuTitle::Version(text) => println!("{text}"),
                }
            }
        }
        Command::Select {
            screen,
            index,
            hold,
        } => {
            let cfg = load_config()?;
            let (screen_index, screen_cfg) = config::find_screen(&cfg, &screen)
                .with_context(|| format!("no screen named '{screen}' in config"))?;
            let mut built = build_screen(screen_cfg, screen_index as u32)?;

            let name = built.name().to_string();
            built.add_on_change_callback(move || println!("screen '{name}' changed"));

            let ok = if hold {
                built.select_hold(index)
            } else {
                built.select(index)
            };
            if !ok {
                bail!(
                    "index {index} out of range (screen '{screen}' has {} items)",
                    built.entity_count()
                );
            }

            let selected = built
                .get_selected()
                .map(|item| format!("{} '{}'", item.kind(), item.name()))
                .unwrap_or_default();
            println!("selected {selected}");
        }
        Command::ConfigPath => {
            let path = config::ensure_config_file_exists()?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

fn load_config() -> Result<config::Config> {
    let Some(cfg) = config::load_optional()? else {
        bail!("No config found (run `homepanel config-path` to create one)");
    };
    Ok(cfg)
}

/// Builds a screen from its configuration, playing the host registry: every
/// item gets a fresh simulated entity. Command items print their firings.
fn build_screen(screen_cfg: &config::ScreenConfig, index: u32) -> Result<MenuScreen> {
    let mut screen = MenuScreen::new(&screen_cfg.name);
    screen.set_index(index);
    screen.set_show_version(screen_cfg.show_version);

    for item in &screen_cfg.items {
        match item.kind {
            ItemKind::None => {
                bail!("item '{}' has kind 'none', which is not registrable", item.name)
            }
            ItemKind::Title => screen.register_title(&item.name),
            ItemKind::Command => {
                let command = Rc::new(MenuCommand::new(&item.name));
                let name = item.name.clone();
                command.add_on_trigger_callback(move || println!("command '{name}' fired"));
                screen.register_command(command, &item.name);
            }
            #[cfg(feature = "switch")]
            ItemKind::Switch => screen.register_switch(Rc::new(Switch::new()), &item.name),
            #[cfg(feature = "text-sensor")]
            ItemKind::TextSensor => {
                screen.register_text_sensor(Rc::new(TextSensor::new()), &item.name)
            }
            #[cfg(feature = "sensor")]
            ItemKind::Sensor => screen.register_sensor(Rc::new(Sensor::new()), &item.name),
            #[cfg(feature = "light")]
            ItemKind::Light => screen.register_light(Rc::new(Light::new()), &item.name),
            #[cfg(feature = "number")]
            ItemKind::Number => screen.register_number(Rc::new(Number::new()), &item.name),
            #[cfg(feature = "cover")]
            ItemKind::Cover => screen.register_cover(Rc::new(Cover::new()), &item.name),
            #[cfg(feature = "button")]
            ItemKind::Button => screen.register_button(Rc::new(Button::new()), &item.name),
            #[cfg(feature = "fan")]
            ItemKind::Fan => screen.register_fan(Rc::new(Fan::new()), &item.name),
            #[cfg(feature = "select")]
            ItemKind::Select => {
                screen.register_select(Rc::new(Select::new(item.options.clone())), &item.name)
            }
        }
    }

    Ok(screen)
}
