//! Reviewer builder: filter the question bank, pick questions, save a
//! review session
//!
//! Filters only shape what is shown; they never touch the store. The
//! selection is kept as ids in pick order and resolved against the live
//! question bank when the session is saved, so the session stores copies of
//! the questions as they were at that moment.

use chrono::Utc;
use std::str::FromStr;
use tracing::info;

use crate::error::{Result, ThinkwiseError};
use crate::store::AdminStore;
use crate::types::{new_id, Difficulty, Question, ReviewSession, ReviewSettings};

pub const SAVE_VALIDATION_MESSAGE: &str = "Please provide a title and select at least one question.";
pub const START_VALIDATION_MESSAGE: &str = "Please select at least one question to start the review.";

/// Equality filter with an "all" sentinel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> Filter<T> {
    /// Parse a select-box token where `"all"` disables the filter
    pub fn from_token(token: &str) -> std::result::Result<Self, T::Err> {
        if token.trim().eq_ignore_ascii_case("all") {
            return Ok(Filter::All);
        }
        token.trim().parse().map(Filter::Only)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewerBuilder {
    pub title: String,
    pub description: String,
    pub settings: ReviewSettings,
    subject: Filter<String>,
    difficulty: Filter<Difficulty>,
    selected: Vec<String>,
}

impl ReviewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_details(
        mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        settings: ReviewSettings,
    ) -> Self {
        self.title = title.into();
        self.description = description.into();
        self.settings = settings;
        self
    }

    // === Filtering ===

    pub fn set_subject_filter(&mut self, filter: Filter<String>) {
        self.subject = filter;
    }

    pub fn set_difficulty_filter(&mut self, filter: Filter<Difficulty>) {
        self.difficulty = filter;
    }

    pub fn subject_filter(&self) -> &Filter<String> {
        &self.subject
    }

    pub fn difficulty_filter(&self) -> &Filter<Difficulty> {
        &self.difficulty
    }

    /// Questions passing both filters, in bank order
    pub fn filtered<'a>(&self, questions: &'a [Question]) -> Vec<&'a Question> {
        questions
            .iter()
            .filter(|q| self.subject.accepts(&q.subject) && self.difficulty.accepts(&q.difficulty))
            .collect()
    }

    // === Selection ===

    /// Select `id` if it is not selected, deselect it if it is
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Copies of the selected questions still present in `questions`, in
    /// pick order
    pub fn selected_questions(&self, questions: &[Question]) -> Vec<Question> {
        self.selected
            .iter()
            .filter_map(|id| questions.iter().find(|q| &q.id == id))
            .cloned()
            .collect()
    }

    pub fn selected_points(&self, questions: &[Question]) -> u32 {
        self.selected_questions(questions).iter().map(|q| q.points).sum()
    }

    // === Compose ===

    /// Build the session without storing it
    pub fn build(&self, questions: &[Question], creator_id: &str) -> Result<ReviewSession> {
        let snapshot = self.selected_questions(questions);
        if self.title.trim().is_empty() || snapshot.is_empty() {
            return Err(ThinkwiseError::Validation(SAVE_VALIDATION_MESSAGE.to_string()));
        }

        Ok(ReviewSession {
            id: new_id(),
            title: self.title.clone(),
            description: self.description.clone(),
            questions: snapshot,
            settings: self.settings,
            created_by: creator_id.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Validate, snapshot the selection and add the session to `admin`,
    /// owned by `creator_id`. On error the store is left untouched.
    pub fn save(&self, admin: &mut AdminStore, creator_id: &str) -> Result<ReviewSession> {
        let session = self.build(admin.questions(), creator_id)?;
        admin.add_review_session(session.clone())?;
        info!(
            "Saved review session '{}' with {} questions for {}",
            session.title,
            session.questions.len(),
            creator_id
        );
        Ok(session)
    }

    /// Questions for an immediate, unsaved review run
    pub fn start_review(&self, questions: &[Question]) -> Result<Vec<Question>> {
        let snapshot = self.selected_questions(questions);
        if snapshot.is_empty() {
            return Err(ThinkwiseError::Validation(START_VALIDATION_MESSAGE.to_string()));
        }
        Ok(snapshot)
    }
}
