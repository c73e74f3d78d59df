//! Property tests for the history engine.
//!
//! Random sequences of edits, undos and redos are run against a live
//! document; after every step the cursor must stay in bounds and the
//! content must equal a fresh replay of the applied prefix of the log.

use proptest::prelude::*;
use quill_buffer::Document;
use quill_core::{
    Command, DeleteCommand, DocumentHandle, History, InsertCommand, ReplaceCommand,
};

#[derive(Debug, Clone)]
enum Edit {
    Insert(String),
    Delete(usize),
    Replace(usize, String),
}

impl Edit {
    fn bind(&self, doc: &DocumentHandle) -> Box<dyn Command> {
        let weak = doc.downgrade();
        match self {
            Edit::Insert(text) => Box::new(InsertCommand::new(weak, text.clone())),
            Edit::Delete(count) => Box::new(DeleteCommand::new(weak, *count)),
            Edit::Replace(count, text) => {
                Box::new(ReplaceCommand::new(weak, *count, text.clone()))
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Step {
    Execute(Edit),
    Undo,
    Redo,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        "[a-z !é猴]{0,6}".prop_map(Edit::Insert),
        (0usize..8).prop_map(Edit::Delete),
        ((0usize..5), "[A-Z]{0,4}").prop_map(|(count, text)| Edit::Replace(count, text)),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => edit_strategy().prop_map(Step::Execute),
        2 => Just(Step::Undo),
        2 => Just(Step::Redo),
    ]
}

/// Replays the applied edits onto a fresh empty document.
fn replay(applied: &[Edit]) -> String {
    let doc = DocumentHandle::new(Document::new());
    let mut commands: Vec<_> = applied.iter().map(|edit| edit.bind(&doc)).collect();
    for command in &mut commands {
        command.execute().unwrap();
    }
    doc.snapshot().unwrap()
}

proptest! {
    #[test]
    fn cursor_stays_in_bounds_and_content_matches_replay(
        steps in prop::collection::vec(step_strategy(), 0..40)
    ) {
        let doc = DocumentHandle::new(Document::new());
        let mut history = History::new();
        // Mirror of the log, kept to replay the applied prefix
        let mut log: Vec<Edit> = Vec::new();
        let mut applied = 0usize;

        for step in steps {
            match step {
                Step::Execute(edit) => {
                    history.execute(edit.bind(&doc)).unwrap();
                    log.truncate(applied);
                    log.push(edit);
                    applied = log.len();
                }
                Step::Undo => {
                    let undone = history.undo().unwrap();
                    prop_assert_eq!(undone, applied > 0);
                    applied = applied.saturating_sub(1);
                }
                Step::Redo => {
                    let redone = history.redo().unwrap();
                    prop_assert_eq!(redone, applied < log.len());
                    if redone {
                        applied += 1;
                    }
                }
            }

            prop_assert_eq!(history.len(), log.len());
            prop_assert_eq!(history.head(), applied.checked_sub(1));
            if let Some(head) = history.head() {
                prop_assert!(head < history.len());
            }
            prop_assert_eq!(doc.snapshot().unwrap(), replay(&log[..applied]));
        }
    }

    #[test]
    fn every_command_round_trips(base in "[a-z猴]{0,10}", edit in edit_strategy()) {
        let doc = DocumentHandle::new(Document::from(base.as_str()));
        let mut command = edit.bind(&doc);

        command.execute().unwrap();
        command.undo().unwrap();
        prop_assert_eq!(doc.snapshot().unwrap(), base.clone());

        command.redo().unwrap();
        command.undo().unwrap();
        prop_assert_eq!(doc.snapshot().unwrap(), base);
    }

    #[test]
    fn new_edit_after_undo_makes_redo_unreachable(
        first in "[a-z]{1,5}",
        second in "[a-z]{1,5}",
        third in "[a-z]{1,5}",
    ) {
        let doc = DocumentHandle::new(Document::new());
        let mut history = History::new();

        history.execute(Edit::Insert(first.clone()).bind(&doc)).unwrap();
        history.execute(Edit::Insert(second).bind(&doc)).unwrap();
        history.undo().unwrap();
        history.execute(Edit::Insert(third.clone()).bind(&doc)).unwrap();

        prop_assert_eq!(history.len(), 2);
        prop_assert_eq!(history.head(), Some(1));
        prop_assert!(!history.redo().unwrap());
        prop_assert_eq!(doc.snapshot().unwrap(), format!("{first}{third}"));
    }
}
