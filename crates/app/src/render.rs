//! Plain-text output for the terminal driver.

use std::io::{self, Write};

use prep_core::model::{Category, QuizResult, StatsStore, StudyGuide};
use services::{AnswerFeedback, QuestionView};

pub fn question(out: &mut impl Write, view: &QuestionView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Question {} of {}  [{}]",
        view.number, view.total, view.category
    )?;
    writeln!(out, "{}", view.prompt)?;
    for (index, choice) in view.choices.iter().enumerate() {
        let marker = if view.selected == Some(index) { '*' } else { ' ' };
        writeln!(out, " {marker} {}) {choice}", index + 1)?;
    }

    let nav = view.navigation;
    let prev = if nav.can_go_prev { "[p] prev" } else { "   -    " };
    let next = if nav.can_go_next { "[n] next" } else { "   -    " };
    writeln!(out, "{prev}  {next}  [g <n>] jump  [s] submit exam  [q] quit")
}

pub fn feedback(out: &mut impl Write, feedback: &AnswerFeedback) -> io::Result<()> {
    if feedback.is_correct {
        writeln!(out, "Correct!")?;
    } else {
        writeln!(out, "Incorrect.")?;
    }
    if let (Some(index), Some(choice)) = (feedback.correct_index, &feedback.correct_choice) {
        writeln!(out, "Correct answer: {}) {choice}", index + 1)?;
    }
    if let Some(explanation) = &feedback.explanation {
        writeln!(out, "Explanation: {explanation}")?;
    }
    Ok(())
}

pub fn result(out: &mut impl Write, result: &QuizResult) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}/{} ({}%)",
        result.total_correct, result.total_questions, result.percent
    )?;
    let unanswered = result.unanswered();
    if unanswered > 0 {
        writeln!(out, "Unanswered (counted wrong): {unanswered}")?;
    }
    for (category, percent) in result.category_percentages() {
        writeln!(out, "  {category:<26} {percent:>3}%")?;
    }

    let missed: Vec<usize> = result
        .outcomes
        .iter()
        .enumerate()
        .filter(|(_, o)| !o.is_correct)
        .map(|(i, _)| i + 1)
        .collect();
    if !missed.is_empty() {
        let list: Vec<String> = missed.iter().map(ToString::to_string).collect();
        writeln!(out, "Missed questions: {}", list.join(", "))?;
    }
    Ok(())
}

pub fn stats(out: &mut impl Write, stats: &StatsStore, threshold: f64) -> io::Result<()> {
    if stats.is_empty() {
        return writeln!(out, "No quizzes taken yet.");
    }

    writeln!(
        out,
        "Questions attempted: {}   Correct: {}   Overall: {}%",
        stats.questions_attempted(),
        stats.correct_answers(),
        stats.overall_percent()
    )?;
    writeln!(out)?;
    writeln!(out, "{:<26} {:>8} {:>8} {:>5}", "Category", "Attempts", "Correct", "%")?;
    for category in Category::ALL {
        let Some(perf) = stats.performance(category) else {
            continue;
        };
        writeln!(
            out,
            "{:<26} {:>8} {:>8} {:>4}%",
            category.label(),
            perf.attempts,
            perf.correct,
            perf.percent()
        )?;
    }

    let weak = stats.weak_categories(threshold);
    writeln!(out)?;
    if weak.is_empty() {
        writeln!(out, "No weak categories.")?;
    } else {
        let labels: Vec<&str> = weak.iter().map(|c| c.label()).collect();
        writeln!(out, "Focus on: {}", labels.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "History:")?;
    for (n, entry) in stats.history().iter().enumerate() {
        let date = entry
            .completed_at()
            .map_or_else(|| entry.date.clone(), |t| t.format("%Y-%m-%d %H:%M").to_string());
        writeln!(
            out,
            "  #{:<3} {}  {}/{} ({}%)",
            n + 1,
            date,
            entry.correct_answers,
            entry.total_questions,
            entry.percent
        )?;
    }
    Ok(())
}

pub fn guide(
    out: &mut impl Write,
    guide: &StudyGuide,
    only: Option<Category>,
) -> io::Result<()> {
    let sections = guide
        .sections()
        .iter()
        .filter(|s| only.is_none_or(|c| c == s.category));

    for section in sections {
        writeln!(out, "== {} ==", section.title)?;
        if let Some(outline) = &section.outline {
            writeln!(out, "{}", outline.summary)?;
            for point in &outline.key_points {
                writeln!(out, "  - {}: {}", point.term, point.detail)?;
            }
        }
        writeln!(out)?;
        if !section.has_questions() {
            writeln!(out, "  (no questions)")?;
        }
        for (n, question) in section.questions.iter().enumerate() {
            writeln!(out, "{}. {}", n + 1, question.prompt())?;
            writeln!(out, "   Answer: {}", question.correct_choice())?;
            writeln!(out, "   {}", question.explanation())?;
        }
        writeln!(out)?;
    }
    Ok(())
}
