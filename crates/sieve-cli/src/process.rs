//! Interactive inbox processing over a line-based input.
//!
//! Every question accepts `skip`, `back` and `quit` besides its own answers.
//! The delegation form and the brainstorm answers read their fields on the
//! following lines.

use std::io::BufRead;

use anyhow::{Context, Result};
use jiff::civil::Date;
use sieve_core::{
    display::Notice,
    workflow::{Answer, InboxSession, Progress, Question},
};

use crate::renderer::TerminalRenderer;

enum Command {
    Quit,
    Skip,
    Back,
    Answer(Answer),
    Invalid(String),
}

/// Reads answers from `input` until the queue is exhausted, `quit` is entered
/// or the input ends.
pub async fn run<R: BufRead>(
    session: &mut InboxSession,
    input: &mut R,
    renderer: &TerminalRenderer,
) -> Result<()> {
    if session.is_empty() {
        return renderer.notice(&Notice::info("Inbox is empty"));
    }

    let mut shown = None;
    while let Some(item) = session.current() {
        if shown != Some(session.position()) {
            renderer.render(&format!(
                "\n## Item {} of {}\n\n{item}\n",
                session.position() + 1,
                session.len()
            ))?;
            shown = Some(session.position());
        }

        let question = session.question();
        if let Some(hint) = hint(question) {
            renderer.render(&format!("{hint}\n"))?;
        }
        renderer.prompt(&format!(
            "{} [{}]",
            question.prompt(),
            question.choices().join(" / ")
        ))?;

        let Some(line) = read_line(input)? else {
            break;
        };
        match parse(question, &line, input)? {
            Command::Quit => break,
            Command::Skip => renderer.notice(&session.skip())?,
            Command::Back => {
                session.back();
            }
            Command::Invalid(message) => renderer.notice(&Notice::error(message))?,
            Command::Answer(answer) => match session.answer(answer).await {
                Ok(Progress::Asked(_)) => {}
                Ok(Progress::Done(notice)) => renderer.notice(&notice)?,
                Err(e) => renderer.notice(&Notice::error(e.to_string()))?,
            },
        }
    }

    let summary = session.summary();
    renderer.render(&format!(
        "\nProcessed {}, skipped {}, failed {}. {} left in this session.\n",
        summary.processed,
        summary.skipped,
        summary.failed,
        session.len().saturating_sub(session.position())
    ))
}

/// How the lines after the answer are read, for the multi-line answers.
fn hint(question: Question) -> Option<&'static str> {
    match question {
        Question::DelegationForm => Some(
            "Enter the name, then a follow-up date (YYYY-MM-DD) and notes on the next two lines. Leave a line blank to skip it.",
        ),
        Question::Brainstorm => Some(
            "'notes' saves the notes on the next line. 'convert' reads the notes, then one next action per line until a blank line.",
        ),
        _ => None,
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read answer")?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

fn optional(line: Option<String>) -> Option<String> {
    line.filter(|l| !l.is_empty())
}

fn parse<R: BufRead>(question: Question, line: &str, input: &mut R) -> Result<Command> {
    let command = match (question, line.to_lowercase().as_str()) {
        (_, "quit" | "q") => Command::Quit,
        (_, "skip") => Command::Skip,
        (_, "back") => Command::Back,
        (_, "") => Command::Invalid("Please enter an answer".to_string()),

        (Question::Actionable | Question::TwoMinute, "yes" | "y") => Command::Answer(Answer::Yes),
        (Question::Actionable | Question::TwoMinute, "no" | "n") => Command::Answer(Answer::No),
        (Question::TwoMinute | Question::WhoDoesIt, "later") => Command::Answer(Answer::Later),

        (Question::NonActionable, "trash") => Command::Answer(Answer::Trash),
        (Question::NonActionable, "reference") => Command::Answer(Answer::Reference),
        (Question::NonActionable, "someday") => Command::Answer(Answer::Someday),

        (Question::WhoDoesIt, "me") => Command::Answer(Answer::Me),
        (Question::WhoDoesIt, "someone") => Command::Answer(Answer::SomeoneElse),
        (Question::WhoDoesIt, "think") => Command::Answer(Answer::NeedsThought),

        (Question::DelegationForm, _) => delegation(line.to_string(), input)?,

        (Question::Brainstorm, "notes" | "save") => {
            let notes = optional(read_line(input)?);
            Command::Answer(Answer::SaveNotes { notes })
        }
        (Question::Brainstorm, "convert") => {
            let notes = optional(read_line(input)?);
            let mut next_actions = Vec::new();
            while let Some(action) = optional(read_line(input)?) {
                next_actions.push(action);
            }
            Command::Answer(Answer::Convert {
                notes,
                next_actions,
            })
        }

        (question, other) => Command::Invalid(format!(
            "'{other}' does not answer \"{}\"; try {}",
            question.prompt(),
            question.choices().join(", ")
        )),
    };
    Ok(command)
}

/// Name on the first line, follow-up date and notes on the next two.
fn delegation<R: BufRead>(to: String, input: &mut R) -> Result<Command> {
    let follow_up = match optional(read_line(input)?) {
        Some(text) => match text.parse::<Date>() {
            Ok(date) => Some(date),
            Err(e) => return Ok(Command::Invalid(format!("Invalid follow-up date '{text}': {e}"))),
        },
        None => None,
    };
    let notes = optional(read_line(input)?);

    Ok(Command::Answer(Answer::Delegate {
        to,
        follow_up,
        notes,
    }))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn parse_str(question: Question, line: &str, rest: &str) -> Command {
        parse(question, line, &mut Cursor::new(rest.as_bytes())).expect("parse")
    }

    #[test]
    fn test_simple_answers() {
        assert!(matches!(
            parse_str(Question::Actionable, "Y", ""),
            Command::Answer(Answer::Yes)
        ));
        assert!(matches!(
            parse_str(Question::NonActionable, "trash", ""),
            Command::Answer(Answer::Trash)
        ));
        assert!(matches!(parse_str(Question::WhoDoesIt, "skip", ""), Command::Skip));
        assert!(matches!(
            parse_str(Question::NonActionable, "yes", ""),
            Command::Invalid(_)
        ));
    }

    #[test]
    fn test_delegation_form_reads_following_lines() {
        let command = parse_str(Question::DelegationForm, "Alex", "2025-07-01\nsend the deck\n");
        let Command::Answer(Answer::Delegate {
            to,
            follow_up,
            notes,
        }) = command
        else {
            panic!("expected a delegation");
        };
        assert_eq!(to, "Alex");
        assert_eq!(follow_up, Some(jiff::civil::date(2025, 7, 1)));
        assert_eq!(notes.as_deref(), Some("send the deck"));

        assert!(matches!(
            parse_str(Question::DelegationForm, "Alex", "next week\n\n"),
            Command::Invalid(_)
        ));
    }

    #[test]
    fn test_convert_reads_actions_until_blank() {
        let command = parse_str(Question::Brainstorm, "convert", "why now\nA\nB\n\nignored\n");
        let Command::Answer(Answer::Convert {
            notes,
            next_actions,
        }) = command
        else {
            panic!("expected a conversion");
        };
        assert_eq!(notes.as_deref(), Some("why now"));
        assert_eq!(next_actions, vec!["A", "B"]);
    }
}
