//! Matchup Module
//!
//! Orchestrates rounds of two random contenders and decides the winner.

mod orchestrator;
mod picker;
mod verdict;

pub use orchestrator::{MatchupView, Orchestrator, RoundResult};
pub use picker::{Picker, RandomPicker};
pub use verdict::{Contender, Verdict};
