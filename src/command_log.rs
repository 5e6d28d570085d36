//! Command log: executes reversible actions and keeps them for undo/redo.
//!
//! Every entry still in the log can be reverted. Entries leave the log only
//! through `undo` (moved to the redo stack), `clear`, or the history limit.

use std::collections::VecDeque;
use std::fmt;

use log::debug;

use crate::config::CommandLogConfig;
use crate::error::{BoxError, PatternError};

/// A reversible unit of work.
pub trait Action {
    fn describe(&self) -> String;
    fn perform(&mut self) -> Result<(), BoxError>;
    fn revert(&mut self) -> Result<(), BoxError>;
}

/// An action together with its logical timestamp.
pub struct Invocation {
    sequence: u64,
    action: Box<dyn Action>,
}

impl Invocation {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn describe(&self) -> String {
        self.action.describe()
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("sequence", &self.sequence)
            .field("action", &self.action.describe())
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct CommandLog {
    done: VecDeque<Invocation>,
    undone: Vec<Invocation>,
    next_sequence: u64,
    history_limit: Option<usize>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` undoable entries, dropping the oldest first.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history_limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn from_config(config: &CommandLogConfig) -> Self {
        match config.history_limit {
            Some(limit) => Self::with_history_limit(limit),
            None => Self::new(),
        }
    }

    /// Performs `action` and records it. Returns the assigned sequence number.
    ///
    /// A failed `perform` records nothing and leaves the redo stack intact.
    pub fn execute(&mut self, mut action: Box<dyn Action>) -> Result<u64, PatternError> {
        let description = action.describe();
        action
            .perform()
            .map_err(|source| PatternError::action_failed(&description, source))?;

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        debug!("executed #{sequence}: {description}");

        self.undone.clear();
        self.done.push_back(Invocation { sequence, action });
        self.enforce_limit();
        Ok(sequence)
    }

    /// Reverts the most recent action.
    pub fn undo(&mut self) -> Result<u64, PatternError> {
        let mut invocation = self.done.pop_back().ok_or(PatternError::EmptyLog)?;
        if let Err(source) = invocation.action.revert() {
            let description = invocation.describe();
            self.done.push_back(invocation);
            return Err(PatternError::revert_failed(description, source));
        }

        let sequence = invocation.sequence;
        debug!("undid #{sequence}: {}", invocation.describe());
        self.undone.push(invocation);
        Ok(sequence)
    }

    /// Performs the most recently undone action again.
    pub fn redo(&mut self) -> Result<u64, PatternError> {
        let mut invocation = self.undone.pop().ok_or(PatternError::NothingToRedo)?;
        if let Err(source) = invocation.action.perform() {
            let description = invocation.describe();
            self.undone.push(invocation);
            return Err(PatternError::action_failed(description, source));
        }

        let sequence = invocation.sequence;
        debug!("redid #{sequence}: {}", invocation.describe());
        self.done.push_back(invocation);
        self.enforce_limit();
        Ok(sequence)
    }

    pub fn can_undo(&self) -> bool {
        !self.done.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    /// Number of undoable entries.
    pub fn len(&self) -> usize {
        self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.done.is_empty()
    }

    /// Undoable entries, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Invocation> + '_ {
        self.done.iter()
    }

    pub fn clear(&mut self) {
        self.done.clear();
        self.undone.clear();
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.history_limit else {
            return;
        };
        while self.done.len() > limit {
            if let Some(dropped) = self.done.pop_front() {
                debug!("history limit reached, forgetting #{}", dropped.sequence);
            }
        }
    }
}
