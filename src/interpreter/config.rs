//! Evaluator configuration

use crate::interpreter::constants::DEFAULT_MAX_CALL_DEPTH;
use crate::rewrite::DEFAULT_MAX_ROUNDS;

/// When a closure sees the bindings of the environment it was created in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    /// The closure keeps a reference to its defining environment, so
    /// bindings made after creation (including its own name) are visible
    #[default]
    Live,
    /// The closure copies the visible bindings at creation time
    Snapshot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalConfig {
    pub capture_mode: CaptureMode,
    pub max_call_depth: usize,
    /// Run the rewrite pipeline before evaluating in [`Interpreter::run`]
    ///
    /// [`Interpreter::run`]: crate::interpreter::Interpreter::run
    pub rewrite: bool,
    pub max_rewrite_rounds: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            capture_mode: CaptureMode::Live,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            rewrite: true,
            max_rewrite_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl EvalConfig {
    pub fn with_capture_mode(mut self, capture_mode: CaptureMode) -> Self {
        self.capture_mode = capture_mode;
        self
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn with_rewrite(mut self, rewrite: bool) -> Self {
        self.rewrite = rewrite;
        self
    }

    pub fn with_max_rewrite_rounds(mut self, rounds: usize) -> Self {
        self.max_rewrite_rounds = rounds;
        self
    }
}
