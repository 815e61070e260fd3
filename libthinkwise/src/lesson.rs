//! Lessons and the lesson runner
//!
//! A [`LessonRun`] walks the questions of one lesson: pick an answer,
//! submit it, move on. When the last question is passed it hands back a
//! [`LessonOutcome`] that credits XP and records the lesson as completed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::ProgressStore;
use crate::types::{Question, UserProgress};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub subject: String,
    /// XP awarded for a perfect score
    pub xp: u32,
    pub questions: Vec<Question>,
}

// ============================================================================
// Learning path
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStatus {
    Completed,
    Current,
    Locked,
}

impl LessonStatus {
    /// Completed and current lessons can be opened
    pub fn is_open(&self) -> bool {
        !matches!(self, LessonStatus::Locked)
    }
}

/// Status of every lesson in a path. The first lesson not yet completed is
/// the current one; everything after it is locked.
pub fn learning_path<'a>(
    lessons: &'a [Lesson],
    progress: &UserProgress,
) -> Vec<(&'a Lesson, LessonStatus)> {
    let mut current_assigned = false;
    lessons
        .iter()
        .map(|lesson| {
            let status = if progress.has_completed(&lesson.id) {
                LessonStatus::Completed
            } else if !current_assigned {
                current_assigned = true;
                LessonStatus::Current
            } else {
                LessonStatus::Locked
            };
            (lesson, status)
        })
        .collect()
}

// ============================================================================
// Runner
// ============================================================================

/// Result of a finished lesson
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonOutcome {
    pub lesson_id: String,
    pub score: u32,
    pub total: u32,
    pub earned_xp: u32,
}

impl LessonOutcome {
    /// Credit the XP, then mark the lesson completed
    pub fn apply(&self, progress: &mut ProgressStore) {
        progress.add_xp(self.earned_xp);
        progress.complete_lesson(self.lesson_id.clone());
        info!(
            "Lesson {} finished: {}/{} correct, {} XP",
            self.lesson_id, self.score, self.total, self.earned_xp
        );
    }
}

/// `floor(score / total * xp)`, zero for an empty lesson
pub fn earned_xp(score: u32, total: u32, xp: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (u64::from(score) * u64::from(xp) / u64::from(total)) as u32
}

#[derive(Debug, Clone)]
pub struct LessonRun {
    lesson: Lesson,
    index: usize,
    selected: Option<String>,
    /// Whether the current answer was correct, once submitted
    verdict: Option<bool>,
    score: u32,
    finished: bool,
}

impl LessonRun {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            index: 0,
            selected: None,
            verdict: None,
            score: 0,
            finished: false,
        }
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    pub fn current(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.lesson.questions.get(self.index)
    }

    /// Zero-based index of the current question
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.lesson.questions.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn verdict(&self) -> Option<bool> {
        self.verdict
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Percentage of questions already passed
    pub fn progress_percent(&self) -> u32 {
        match self.total() {
            0 => 100,
            total => (self.index * 100 / total) as u32,
        }
    }

    /// Pick an answer. Ignored once the answer has been submitted.
    pub fn select(&mut self, answer: impl Into<String>) {
        if self.verdict.is_none() && !self.finished {
            self.selected = Some(answer.into());
        }
    }

    /// Score the selected answer. Returns `None` when nothing is selected or
    /// the answer was already submitted.
    pub fn submit(&mut self) -> Option<bool> {
        if self.verdict.is_some() {
            return None;
        }
        let question = self.current()?;
        let answer = self.selected.as_deref()?;

        let correct = question.is_correct(answer);
        if correct {
            self.score += 1;
        }
        self.verdict = Some(correct);
        Some(correct)
    }

    /// Move past a submitted question. Returns the outcome when that was the
    /// last one.
    pub fn next(&mut self) -> Option<LessonOutcome> {
        if self.finished {
            return None;
        }
        if self.verdict.is_none() && self.total() > 0 {
            return None;
        }

        self.selected = None;
        self.verdict = None;
        if self.index + 1 < self.total() {
            self.index += 1;
            return None;
        }

        self.index = self.total();
        self.finished = true;
        Some(self.outcome())
    }

    fn outcome(&self) -> LessonOutcome {
        let total = self.total() as u32;
        LessonOutcome {
            lesson_id: self.lesson.id.clone(),
            score: self.score,
            total,
            earned_xp: earned_xp(self.score, total, self.lesson.xp),
        }
    }
}
