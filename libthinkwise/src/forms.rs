//! Admin editor forms
//!
//! A form holds raw field text the way an editor collects it. `build` turns
//! it into a domain value or fails with a user-facing message; `save` also
//! adds or updates the entry in the admin store.

use chrono::{DateTime, Utc};

use crate::error::{Result, ThinkwiseError};
use crate::seed::ADMIN_ID;
use crate::store::AdminStore;
use crate::types::{new_id, Answer, Difficulty, Module, Question, QuestionKind, QuestionType};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// Split a comma separated field, trimming entries and dropping empty ones
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn required(fields: &[&str]) -> Result<()> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ThinkwiseError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
    }
    Ok(())
}

/// Free-form answers with commas hold several parts
fn answer_from_text(raw: &str) -> Answer {
    let parts = split_list(raw);
    if parts.len() > 1 {
        Answer::Multiple(parts)
    } else {
        Answer::Single(raw.trim().to_string())
    }
}

// ============================================================================
// Questions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionForm {
    pub question_type: QuestionType,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    pub image_url: String,
    pub options: Vec<String>,
    pub correct: String,
    pub explanation: String,
    pub points: u32,
    /// Comma separated
    pub tags: String,
    editing: Option<(String, DateTime<Utc>)>,
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self {
            question_type: QuestionType::MultipleChoice,
            subject: "Mathematics".to_string(),
            topic: String::new(),
            difficulty: Difficulty::Intermediate,
            prompt: String::new(),
            image_url: String::new(),
            options: vec![String::new(); 4],
            correct: String::new(),
            explanation: String::new(),
            points: 10,
            tags: String::new(),
            editing: None,
        }
    }
}

impl QuestionForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill from an existing question. Saving updates it in place.
    pub fn edit(question: &Question) -> Self {
        let correct = match question.kind.correct_answer() {
            Answer::Single(value) => value,
            Answer::Multiple(parts) => parts.join(", "),
        };
        Self {
            question_type: question.question_type(),
            subject: question.subject.clone(),
            topic: question.topic.clone(),
            difficulty: question.difficulty,
            prompt: question.prompt.clone(),
            image_url: question.image_url.clone().unwrap_or_default(),
            options: question
                .kind
                .options()
                .map(<[String]>::to_vec)
                .unwrap_or_else(|| vec![String::new(); 4]),
            correct,
            explanation: question.explanation.clone(),
            points: question.points,
            tags: question.tags.join(", "),
            editing: Some((question.id.clone(), question.created_at)),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn kind(&self) -> Result<QuestionKind> {
        match self.question_type {
            QuestionType::MultipleChoice => {
                let options: Vec<String> = self
                    .options
                    .iter()
                    .map(|o| o.trim())
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect();
                QuestionKind::multiple_choice(options, self.correct.trim())
            }
            QuestionType::TrueFalse => match self.correct.trim().to_lowercase().as_str() {
                "true" => Ok(QuestionKind::TrueFalse { correct: true }),
                "false" => Ok(QuestionKind::TrueFalse { correct: false }),
                _ => Err(ThinkwiseError::Validation(
                    "A true/false answer must be 'true' or 'false'.".to_string(),
                )),
            },
            free_form => {
                required(&[self.correct.as_str()])?;
                let correct = answer_from_text(&self.correct);
                Ok(match free_form {
                    QuestionType::FillBlank => QuestionKind::FillBlank { correct },
                    QuestionType::DragDrop => QuestionKind::DragDrop { correct },
                    _ => QuestionKind::CodeCompletion { correct },
                })
            }
        }
    }

    pub fn build(&self) -> Result<Question> {
        required(&[self.prompt.as_str(), self.topic.as_str()])?;
        let kind = self.kind()?;

        let (id, created_at) = match &self.editing {
            Some((id, created_at)) => (id.clone(), *created_at),
            None => (new_id(), Utc::now()),
        };
        let image_url = Some(self.image_url.trim())
            .filter(|url| !url.is_empty())
            .map(String::from);

        Ok(Question {
            id,
            kind,
            subject: self.subject.clone(),
            topic: self.topic.trim().to_string(),
            difficulty: self.difficulty,
            prompt: self.prompt.trim().to_string(),
            image_url,
            explanation: self.explanation.clone(),
            points: if self.points == 0 { 10 } else { self.points },
            tags: split_list(&self.tags),
            created_by: ADMIN_ID.to_string(),
            created_at,
        })
    }

    /// Build, then add or update in `admin`
    pub fn save(&self, admin: &mut AdminStore) -> Result<Question> {
        let question = self.build()?;
        if self.is_editing() {
            admin.update_question(question.clone());
        } else {
            admin.add_question(question.clone())?;
        }
        Ok(question)
    }
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleForm {
    pub title: String,
    pub subject: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Minutes
    pub estimated_time: u32,
    /// Comma separated
    pub prerequisites: String,
    editing: Option<Module>,
}

impl Default for ModuleForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            subject: "Mathematics".to_string(),
            description: String::new(),
            difficulty: Difficulty::Intermediate,
            estimated_time: 30,
            prerequisites: String::new(),
            editing: None,
        }
    }
}

impl ModuleForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(module: &Module) -> Self {
        Self {
            title: module.title.clone(),
            subject: module.subject.clone(),
            description: module.description.clone(),
            difficulty: module.difficulty,
            estimated_time: module.estimated_time,
            prerequisites: module.prerequisites.join(", "),
            editing: Some(module.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Editing keeps the id, creation time, embedded questions and publish
    /// flag of the original module
    pub fn build(&self) -> Result<Module> {
        required(&[self.title.as_str(), self.description.as_str()])?;

        let mut module = match &self.editing {
            Some(original) => original.clone(),
            None => Module::new("", "", "", self.difficulty, ADMIN_ID),
        };
        module.title = self.title.trim().to_string();
        module.subject = self.subject.clone();
        module.description = self.description.trim().to_string();
        module.difficulty = self.difficulty;
        module.estimated_time = self.estimated_time;
        module.prerequisites = split_list(&self.prerequisites);
        Ok(module)
    }

    pub fn save(&self, admin: &mut AdminStore) -> Result<Module> {
        let module = self.build()?;
        if self.is_editing() {
            admin.update_module(module.clone());
        } else {
            admin.add_module(module.clone())?;
        }
        Ok(module)
    }
}
