//! The processing questions as an explicit state machine.

use std::fmt;

use jiff::civil::Date;

use crate::{
    error::{Result, SieveError},
    stage_model::{Decision, Delegation, DelegationMode},
};

/// A question asked about the item being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Actionable,
    NonActionable,
    TwoMinute,
    WhoDoesIt,
    DelegationForm,
    Brainstorm,
}

impl Question {
    pub fn prompt(&self) -> &'static str {
        match self {
            Question::Actionable => "Is this actionable?",
            Question::NonActionable => "What should happen to it?",
            Question::TwoMinute => "Can it be done in under two minutes?",
            Question::WhoDoesIt => "Who should do it?",
            Question::DelegationForm => "Who is it delegated to?",
            Question::Brainstorm => "What does it need?",
        }
    }

    /// Answer keywords accepted for this question, for help text.
    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            Question::Actionable => &["yes", "no"],
            Question::NonActionable => &["trash", "reference", "someday"],
            Question::TwoMinute => &["yes", "no", "later"],
            Question::WhoDoesIt => &["me", "someone", "think", "later"],
            Question::DelegationForm => &["<name>"],
            Question::Brainstorm => &["notes", "convert"],
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt())
    }
}

/// A reply to a [`Question`].
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Yes,
    No,
    Trash,
    Reference,
    Someday,
    /// Actionable, but the next step is decided at a later review
    Later,
    Me,
    SomeoneElse,
    NeedsThought,
    Delegate {
        to: String,
        follow_up: Option<Date>,
        notes: Option<String>,
    },
    SaveNotes {
        notes: Option<String>,
    },
    Convert {
        notes: Option<String>,
        next_actions: Vec<String>,
    },
}

impl Answer {
    fn name(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
            Answer::Trash => "trash",
            Answer::Reference => "reference",
            Answer::Someday => "someday",
            Answer::Later => "later",
            Answer::Me => "me",
            Answer::SomeoneElse => "someone else",
            Answer::NeedsThought => "needs more thought",
            Answer::Delegate { .. } => "delegate",
            Answer::SaveNotes { .. } => "save notes",
            Answer::Convert { .. } => "convert",
        }
    }
}

/// What follows an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Ask(Question),
    Decide(Decision),
}

/// Walks one item from "Is this actionable?" to a [`Decision`].
///
/// Reaching a decision leaves the tree on the last question, so a decision
/// rejected as invalid can be answered again. Call [`DecisionTree::reset`]
/// before the next item.
///
/// # Examples
///
/// ```rust
/// use sieve_core::{
///     stage_model::{Decision, DelegationMode},
///     workflow::{Answer, DecisionTree, Question, Step},
/// };
///
/// let mut tree = DecisionTree::new(DelegationMode::WaitingFor);
/// assert_eq!(tree.answer(Answer::No)?, Step::Ask(Question::NonActionable));
/// assert_eq!(tree.answer(Answer::Trash)?, Step::Decide(Decision::Trash));
/// # Ok::<(), sieve_core::SieveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTree {
    current: Question,
    history: Vec<Question>,
    mode: DelegationMode,
}

impl DecisionTree {
    /// Starts at the first question. Delegations are filed in `mode`.
    pub fn new(mode: DelegationMode) -> Self {
        Self {
            current: Question::Actionable,
            history: Vec::new(),
            mode,
        }
    }

    pub fn current(&self) -> Question {
        self.current
    }

    /// Answers the current question.
    ///
    /// # Errors
    ///
    /// `SieveError::InvalidInput` if the answer does not fit the question.
    pub fn answer(&mut self, answer: Answer) -> Result<Step> {
        let step = match (self.current, answer) {
            (Question::Actionable, Answer::Yes) => Step::Ask(Question::TwoMinute),
            (Question::Actionable, Answer::No) => Step::Ask(Question::NonActionable),

            (Question::NonActionable, Answer::Trash) => Step::Decide(Decision::Trash),
            (Question::NonActionable, Answer::Reference) => Step::Decide(Decision::Reference),
            (Question::NonActionable, Answer::Someday) => Step::Decide(Decision::Someday),

            (Question::TwoMinute, Answer::Yes) => Step::Decide(Decision::DoNow),
            (Question::TwoMinute, Answer::No) => Step::Ask(Question::WhoDoesIt),
            (Question::TwoMinute | Question::WhoDoesIt, Answer::Later) => {
                Step::Decide(Decision::MarkActionable)
            }

            (Question::WhoDoesIt, Answer::Me) => Step::Decide(Decision::NextAction),
            (Question::WhoDoesIt, Answer::SomeoneElse) => Step::Ask(Question::DelegationForm),
            (Question::WhoDoesIt, Answer::NeedsThought) => Step::Ask(Question::Brainstorm),

            (
                Question::DelegationForm,
                Answer::Delegate {
                    to,
                    follow_up,
                    notes,
                },
            ) => Step::Decide(Decision::Delegate(Delegation {
                to,
                follow_up,
                notes,
                mode: self.mode,
            })),

            (Question::Brainstorm, Answer::SaveNotes { notes }) => {
                Step::Decide(Decision::Brainstorm { notes })
            }
            (
                Question::Brainstorm,
                Answer::Convert {
                    notes,
                    next_actions,
                },
            ) => Step::Decide(Decision::ConvertBrainstorm {
                notes,
                next_actions,
            }),

            (question, answer) => {
                return Err(SieveError::invalid_input("answer").with_reason(format!(
                    "'{}' does not answer \"{}\" (expected: {})",
                    answer.name(),
                    question.prompt(),
                    question.choices().join(", ")
                )));
            }
        };

        if let Step::Ask(next) = step {
            self.history.push(self.current);
            self.current = next;
        }
        Ok(step)
    }

    /// Returns to the previous question. At the first question this stays put.
    pub fn back(&mut self) -> Question {
        if let Some(previous) = self.history.pop() {
            self.current = previous;
        }
        self.current
    }

    /// Starts over at the first question.
    pub fn reset(&mut self) {
        self.current = Question::Actionable;
        self.history.clear();
    }
}
