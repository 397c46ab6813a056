use clap::Subcommand;
use pomidor_core::{Database, NullNotifier, PomodoroApp};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a settings value
    Get {
        /// Settings key (e.g. "work_duration", "auto_start_breaks")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings
    List,
    /// Reset settings to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Database::open()?;
    let mut app = PomodoroApp::load(store, NullNotifier);

    match action {
        ConfigAction::Get { key } => match app.settings().get(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("unknown key: {key}");
                std::process::exit(1);
            }
        },
        ConfigAction::Set { key, value } => {
            app.set_setting(&key, &value)?;
            println!("ok");
        }
        ConfigAction::List => {
            println!("{}", serde_json::to_string_pretty(app.settings())?);
        }
        ConfigAction::Reset => {
            app.reset_settings();
            println!("settings reset to defaults");
        }
    }
    Ok(())
}
