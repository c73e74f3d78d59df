//! Undo/redo history management.
//!
//! ## Cursor Model
//!
//! The history is one linear timeline: a log of committed commands plus a
//! cursor. Everything before the cursor is reflected in the document;
//! everything after it is only kept so it can be redone.
//!
//! ```text
//! log:    [ c0 | c1 | c2 | c3 ]
//!                     ^ head = 2   (c3 is redoable)
//! ```
//!
//! Executing a new command while redoable commands exist discards them
//! for good (branch truncation). There is no undo tree.
//!
//! Internally the cursor is kept as the number of applied commands, so
//! "nothing applied" is `0` instead of `-1`; [`History::head`] exposes it
//! as an `Option<usize>` index.

use std::collections::VecDeque;

use crate::CoreResult;
use crate::command::Command;

/// Linear log of executed commands with an undo cursor.
///
/// ## Learning: VecDeque
///
/// `VecDeque` gives cheap truncation at the back (branch truncation)
/// and cheap eviction at the front (bounded history).
#[derive(Debug, Default)]
pub struct History {
    /// Committed commands, oldest first
    log: VecDeque<Box<dyn Command>>,
    /// Number of commands currently applied (`head + 1`)
    applied: usize,
    /// Maximum number of commands to keep, 0 for unlimited
    limit: usize,
}

impl History {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `limit` commands.
    ///
    /// A limit of 0 means unlimited.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            log: VecDeque::new(),
            applied: 0,
            limit,
        }
    }

    /// Applies `command` and commits it at the cursor.
    ///
    /// The command is executed first. If it fails (for instance because it
    /// is not bound to a live document) the error is returned and the log
    /// and cursor are left exactly as they were. On success every redoable
    /// command is discarded before the new one is appended.
    pub fn execute(&mut self, mut command: Box<dyn Command>) -> CoreResult<()> {
        command.execute()?;

        let discarded = self.log.len() - self.applied;
        if discarded > 0 {
            tracing::trace!(discarded, "Discarding redo branch");
            self.log.truncate(self.applied);
        }

        tracing::debug!(command = %command.label(), "Executed");
        self.log.push_back(command);
        self.applied = self.log.len();

        self.enforce_limit();
        Ok(())
    }

    /// Undoes the command at the cursor.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. On error the
    /// cursor does not move.
    pub fn undo(&mut self) -> CoreResult<bool> {
        let Some(index) = self.applied.checked_sub(1) else {
            return Ok(false);
        };

        let command = &mut self.log[index];
        command.undo()?;
        tracing::debug!(command = %command.label(), "Undone");

        self.applied = index;
        Ok(true)
    }

    /// Redoes the command just after the cursor.
    ///
    /// Returns `Ok(false)` when there is nothing to redo. On error the
    /// cursor does not move.
    pub fn redo(&mut self) -> CoreResult<bool> {
        let Some(command) = self.log.get_mut(self.applied) else {
            return Ok(false);
        };

        command.redo()?;
        tracing::debug!(command = %command.label(), "Redone");

        self.applied += 1;
        Ok(true)
    }

    /// Returns true if there are commands to undo.
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    /// Returns true if there are commands to redo.
    pub fn can_redo(&self) -> bool {
        self.applied < self.log.len()
    }

    /// Index of the most recently applied command, `None` if nothing is applied.
    pub fn head(&self) -> Option<usize> {
        self.applied.checked_sub(1)
    }

    /// Number of committed commands, applied or not.
    pub fn len(&self) -> usize {
        self.log.len()
    }

    /// Returns true if nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Returns the number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.applied
    }

    /// Returns the number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.log.len() - self.applied
    }

    /// Maximum number of commands kept, 0 for unlimited.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Label of the command at `index`, if there is one.
    pub fn label_at(&self, index: usize) -> Option<String> {
        self.log.get(index).map(|command| command.label())
    }

    /// Lists `(index, label, applied)` for every committed command.
    pub fn labels(&self) -> impl Iterator<Item = (usize, String, bool)> + '_ {
        self.log
            .iter()
            .enumerate()
            .map(|(index, command)| (index, command.label(), index < self.applied))
    }

    /// Drops the whole log. The document is left as it is.
    pub fn clear(&mut self) {
        self.log.clear();
        self.applied = 0;
    }

    fn enforce_limit(&mut self) {
        if self.limit == 0 {
            return;
        }
        while self.log.len() > self.limit {
            if let Some(evicted) = self.log.pop_front() {
                tracing::trace!(command = %evicted.label(), "Evicted from history");
            }
            self.applied = self.applied.saturating_sub(1);
        }
    }
}
