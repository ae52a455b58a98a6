//! Score tracking
//!
//! Lives for the whole process; nothing is written to disk.

use serde::{Deserialize, Serialize};

/// Current, last and best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    /// Score of the run in progress
    pub current: u32,
    /// Final score of the previous run
    pub last: u32,
    /// Best final score seen by this process
    pub high: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the current score for a new run
    pub fn start_run(&mut self) {
        self.current = 0;
    }

    /// Count one collectible; returns the new current score
    pub fn collect(&mut self) -> u32 {
        self.current += 1;
        self.current
    }

    /// Record the finished run into `last` and `high`
    ///
    /// Returns true when the run set a new high score.
    pub fn finish_run(&mut self) -> bool {
        self.last = self.current;
        if self.current > self.high {
            self.high = self.current;
            log::info!("New high score: {}", self.high);
            true
        } else {
            false
        }
    }
}
