use clap::Subcommand;
use pomidor_core::{Database, NullNotifier, PomodoroApp};

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List recent sessions, most recent first
    List {
        /// Maximum number of sessions to print
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

pub fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Database::open()?;
    let app = PomodoroApp::load(store, NullNotifier);

    match action {
        SessionsAction::List { limit } => {
            let recent: Vec<_> = app.sessions().iter().rev().take(limit).collect();
            println!("{}", serde_json::to_string_pretty(&recent)?);
        }
    }
    Ok(())
}
