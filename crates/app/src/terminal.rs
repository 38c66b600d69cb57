//! Interactive quiz loop over a line-oriented reader.

use std::io::{self, BufRead, Write};

use prep_core::model::QuizResult;
use services::{Navigation, QuizController, QuizError};

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// Zero-based choice index; `None` for a blank line.
    Answer(Option<usize>),
    Next,
    Prev,
    Jump(usize),
    Submit,
    Quit,
    Unknown(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line {
            "" => return Self::Answer(None),
            "n" => return Self::Next,
            "p" => return Self::Prev,
            "s" => return Self::Submit,
            "q" => return Self::Quit,
            _ => {}
        }

        if let Some(rest) = line.strip_prefix('g') {
            return match rest.trim().parse::<usize>() {
                Ok(n) if n > 0 => Self::Jump(n - 1),
                _ => Self::Unknown(line.to_string()),
            };
        }
        match line.parse::<usize>() {
            Ok(n) if n > 0 => Self::Answer(Some(n - 1)),
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// How an interactive quiz ended.
#[derive(Debug)]
pub enum QuizOutcome {
    Submitted(QuizResult),
    Abandoned,
}

fn report(out: &mut impl Write, err: &QuizError) -> io::Result<()> {
    match err {
        QuizError::NoSelectionMade => writeln!(out, "Please select an answer."),
        other => writeln!(out, "{other}"),
    }
}

/// Report a `n`/`p` step; returns whether the question should be redrawn.
fn step(out: &mut impl Write, step: Result<Navigation, QuizError>) -> io::Result<bool> {
    match step {
        Ok(nav) if nav.moved() => Ok(true),
        Ok(_) => {
            writeln!(out, "No more questions in that direction.")?;
            Ok(false)
        }
        Err(err) => {
            report(out, &err)?;
            Ok(false)
        }
    }
}

/// Drive the controller's current session from `input` until the exam is
/// submitted, abandoned with `q`, or input runs out.
///
/// Quiz errors are shown to the user and the loop carries on; only I/O
/// failures are returned.
pub fn run_quiz(
    controller: &mut QuizController,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<QuizOutcome> {
    let mut lines = input.lines();
    let mut show = true;

    loop {
        if show {
            if let Some(view) = controller.current_view() {
                render::question(out, &view)?;
            }
        }
        show = true;

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            controller.discard_session();
            return Ok(QuizOutcome::Abandoned);
        };

        match Input::parse(&line) {
            Input::Answer(selection) => match controller.submit_answer(selection) {
                Ok(feedback) => {
                    render::feedback(out, &feedback)?;
                    show = false;
                }
                Err(err) => {
                    report(out, &err)?;
                    show = false;
                }
            },
            Input::Next => show = step(out, controller.next())?,
            Input::Prev => show = step(out, controller.prev())?,
            Input::Jump(index) => {
                if let Err(err) = controller.go_to(index) {
                    report(out, &err)?;
                    show = false;
                }
            }
            Input::Submit => match controller.complete_exam() {
                Ok(result) => return Ok(QuizOutcome::Submitted(result)),
                Err(err) => report(out, &err)?,
            },
            Input::Quit => {
                controller.discard_session();
                writeln!(out, "Quiz abandoned.")?;
                return Ok(QuizOutcome::Abandoned);
            }
            Input::Unknown(raw) => {
                writeln!(out, "unknown command: {raw} (1-4 answer, n, p, g <n>, s, q)")?;
                show = false;
            }
        }
    }
}
