mod engine;
mod sequencer;

pub use engine::{format_mmss, Completion, TimerEngine};
pub use sequencer::{next_mode, TimerMode};
