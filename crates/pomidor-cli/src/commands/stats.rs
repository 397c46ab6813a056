use clap::Subcommand;
use pomidor_core::{Database, NullNotifier, PomodoroApp};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// All-time stats
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Database::open()?;
    let app = PomodoroApp::load(store, NullNotifier);
    let stats = app.stats();

    match action {
        StatsAction::Today => {
            let today = serde_json::json!({
                "pomodoros": stats.today_pomodoros,
                "focus_min": stats.today_focus_min,
            });
            println!("{}", serde_json::to_string_pretty(&today)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
