use clap::{Subcommand, ValueEnum};
use pomidor_core::{
    runner, Database, DesktopNotifier, Event, Notifier, NullNotifier, PomodoroApp, StateStore,
    TimerMode,
};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the countdown (time advances only while `run` is active)
    Start,
    /// Pause the countdown
    Pause,
    /// Restart the current interval at its full duration
    Reset,
    /// Move to the next interval; no session is recorded
    Skip,
    /// Jump directly to a mode
    Select { mode: ModeArg },
    /// Print current timer state as JSON
    Status,
    /// Drive the countdown in the foreground until idle or Ctrl-C
    Run {
        /// Suppress desktop notifications
        #[arg(long)]
        quiet: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Work,
    ShortBreak,
    LongBreak,
}

impl From<ModeArg> for TimerMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Work => TimerMode::Work,
            ModeArg::ShortBreak => TimerMode::ShortBreak,
            ModeArg::LongBreak => TimerMode::LongBreak,
        }
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    if let TimerAction::Run { quiet } = action {
        return run_foreground(quiet);
    }

    let store = Database::open()?;
    let mut app = PomodoroApp::load(store, DesktopNotifier);

    let event = match action {
        TimerAction::Start => app.start(),
        TimerAction::Pause => app.pause(),
        TimerAction::Reset => Some(app.reset()),
        TimerAction::Skip => Some(app.skip()),
        TimerAction::Select { mode } => Some(app.select_mode(mode.into())),
        TimerAction::Status => None,
        TimerAction::Run { .. } => None,
    };

    if let Some(event) = event {
        println!("{}", serde_json::to_string_pretty(&event)?);
    }
    println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    Ok(())
}

fn run_foreground(quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = Database::open()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    if quiet {
        let mut app = PomodoroApp::load(store, NullNotifier);
        runtime.block_on(drive(&mut app))
    } else {
        let mut app = PomodoroApp::load(store, DesktopNotifier);
        runtime.block_on(drive(&mut app))
    }
}

async fn drive<S, N>(app: &mut PomodoroApp<S, N>) -> Result<(), Box<dyn std::error::Error>>
where
    S: StateStore,
    N: Notifier,
{
    if let Some(event) = app.start() {
        println!("{}", serde_json::to_string(&event)?);
    }

    let interrupted = tokio::select! {
        _ = runner::run(app, print_event) => false,
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        eprintln!();
        if let Some(event) = app.pause() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    Ok(())
}

fn print_event(event: &Event) {
    match event {
        Event::StateSnapshot {
            mode, remaining, ..
        } => {
            // Live countdown line, overwritten in place.
            eprint!("\r{} {}  ", mode.label(), remaining);
        }
        other => {
            eprintln!();
            println!(
                "{}",
                serde_json::to_string(other).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
            );
        }
    }
}
