//! Core types for ThinkWise

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Result, ThinkwiseError};

/// XP needed to climb one level
pub const XP_PER_LEVEL: u32 = 200;

/// Level reached with `total_xp` experience points
pub fn level_for_xp(total_xp: u32) -> u32 {
    total_xp / XP_PER_LEVEL + 1
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Anything stored in an id-keyed collection
pub trait Entity {
    fn id(&self) -> &str;
}

// ============================================================================
// Users
// ============================================================================

/// Identity of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// A single emoji glyph
    pub avatar: String,
}

pub const DEFAULT_AVATAR: &str = "🧑‍🎓";

/// Progress fields of one user. The level is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Consecutive active days, maintained outside this crate
    pub streak: u32,
    pub total_xp: u32,
    /// Lesson ids in completion order, without duplicates
    pub completed_lessons: Vec<String>,
    /// Achievement names in award order, without duplicates
    pub achievements: Vec<String>,
    pub daily_goal: u32,
    pub today_xp: u32,
}

impl UserProgress {
    pub fn level(&self) -> u32 {
        level_for_xp(self.total_xp)
    }

    /// XP earned since the current level began
    pub fn xp_into_level(&self) -> u32 {
        self.total_xp % XP_PER_LEVEL
    }

    pub fn daily_goal_met(&self) -> bool {
        self.today_xp >= self.daily_goal
    }

    /// XP still missing for today's goal
    pub fn xp_to_goal(&self) -> u32 {
        self.daily_goal.saturating_sub(self.today_xp)
    }

    /// Percentage of today's goal, capped at 100. A zero goal counts as met.
    pub fn daily_goal_progress(&self) -> u32 {
        if self.daily_goal == 0 {
            return 100;
        }
        let percent = u64::from(self.today_xp) * 100 / u64::from(self.daily_goal);
        percent.min(100) as u32
    }

    pub fn has_completed(&self, lesson_id: &str) -> bool {
        self.completed_lessons.iter().any(|id| id == lesson_id)
    }
}

/// A user together with their progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: User,
    pub progress: UserProgress,
}

impl UserProfile {
    pub fn level(&self) -> u32 {
        self.progress.level()
    }
}

// ============================================================================
// Questions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ThinkwiseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ThinkwiseError::InvalidInput(format!("Unknown difficulty: {}", s)))
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Question type without its payload, used by forms and listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillBlank,
    DragDrop,
    CodeCompletion,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::FillBlank,
        QuestionType::DragDrop,
        QuestionType::CodeCompletion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple-choice",
            Self::TrueFalse => "true-false",
            Self::FillBlank => "fill-blank",
            Self::DragDrop => "drag-drop",
            Self::CodeCompletion => "code-completion",
        }
    }
}

impl FromStr for QuestionType {
    type Err = ThinkwiseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ThinkwiseError::InvalidInput(format!("Unknown question type: {}", s)))
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expected answer of a free-form question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    /// Several accepted parts, e.g. the ordered items of a drag-drop
    Multiple(Vec<String>),
}

impl Answer {
    /// Whether `given` is this answer. Multi-part answers are compared
    /// against `given` split on commas.
    pub fn matches(&self, given: &str) -> bool {
        match self {
            Answer::Single(expected) => expected.trim() == given.trim(),
            Answer::Multiple(parts) => {
                let given: Vec<&str> = given.split(',').map(str::trim).collect();
                given.len() == parts.len()
                    && parts.iter().zip(given).all(|(expected, got)| expected.trim() == got)
            }
        }
    }

    /// Flat single-line form used by the CSV export
    pub fn joined(&self) -> String {
        match self {
            Answer::Single(value) => value.clone(),
            Answer::Multiple(parts) => parts.join("; "),
        }
    }
}

/// Question type with exactly the fields that type needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String>, correct: String },
    TrueFalse { correct: bool },
    FillBlank { correct: Answer },
    DragDrop { correct: Answer },
    CodeCompletion { correct: Answer },
}

impl QuestionKind {
    /// Build a multiple-choice payload; `correct` must be one of `options`.
    pub fn multiple_choice(options: Vec<String>, correct: impl Into<String>) -> Result<Self> {
        let correct = correct.into();
        if options.is_empty() {
            return Err(ThinkwiseError::Validation(
                "A multiple-choice question needs at least one option.".to_string(),
            ));
        }
        if !options.iter().any(|o| *o == correct) {
            return Err(ThinkwiseError::Validation(format!(
                "The correct answer '{}' is not one of the options.",
                correct
            )));
        }
        Ok(Self::MultipleChoice { options, correct })
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Self::TrueFalse { .. } => QuestionType::TrueFalse,
            Self::FillBlank { .. } => QuestionType::FillBlank,
            Self::DragDrop { .. } => QuestionType::DragDrop,
            Self::CodeCompletion { .. } => QuestionType::CodeCompletion,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::MultipleChoice { options, .. } => Some(options),
            _ => None,
        }
    }

    pub fn correct_answer(&self) -> Answer {
        match self {
            Self::MultipleChoice { correct, .. } => Answer::Single(correct.clone()),
            Self::TrueFalse { correct } => Answer::Single(correct.to_string()),
            Self::FillBlank { correct }
            | Self::DragDrop { correct }
            | Self::CodeCompletion { correct } => correct.clone(),
        }
    }

    pub fn is_correct(&self, given: &str) -> bool {
        match self {
            Self::MultipleChoice { correct, .. } => correct == given,
            Self::TrueFalse { correct } => given
                .trim()
                .parse::<bool>()
                .map(|b| b == *correct)
                .unwrap_or(false),
            Self::FillBlank { correct }
            | Self::DragDrop { correct }
            | Self::CodeCompletion { correct } => correct.matches(given),
        }
    }
}

/// What a view should show for a question's image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    None,
    Url(&'a str),
    /// The URL is unusable; show the fallback notice instead
    Broken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub explanation: String,
    pub points: u32,
    pub tags: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// New question with a fresh id, created now
    pub fn new(
        kind: QuestionKind,
        subject: impl Into<String>,
        topic: impl Into<String>,
        difficulty: Difficulty,
        prompt: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            kind,
            subject: subject.into(),
            topic: topic.into(),
            difficulty,
            prompt: prompt.into(),
            image_url: None,
            explanation: String::new(),
            points: 10,
            tags: Vec::new(),
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    pub fn is_correct(&self, given: &str) -> bool {
        self.kind.is_correct(given)
    }

    pub fn image(&self) -> ImageSource<'_> {
        match self.image_url.as_deref().map(str::trim) {
            None | Some("") => ImageSource::None,
            Some(url) if is_web_url(url) => ImageSource::Url(url),
            Some(_) => ImageSource::Broken,
        }
    }
}

fn is_web_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty() && !url.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl Entity for Question {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// Snapshots taken when the module was authored
    pub questions: Vec<Question>,
    /// Minutes
    pub estimated_time: u32,
    pub prerequisites: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub is_published: bool,
}

impl Module {
    /// New unpublished module with a fresh id
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            subject: subject.into(),
            description: description.into(),
            difficulty,
            questions: Vec::new(),
            estimated_time: 30,
            prerequisites: Vec::new(),
            created_by: created_by.into(),
            created_at: Utc::now(),
            is_published: false,
        }
    }

    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }
}

impl Entity for Module {
    fn id(&self) -> &str {
        &self.id
    }
}

// ============================================================================
// Review sessions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSettings {
    /// Minutes; `None` means untimed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub randomize_questions: bool,
    pub show_explanations: bool,
    pub allow_retakes: bool,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            time_limit: None,
            randomize_questions: true,
            show_explanations: true,
            allow_retakes: true,
        }
    }
}

impl ReviewSettings {
    /// Form-style time limit where 0 means "no limit"
    pub fn with_time_limit_minutes(mut self, minutes: u32) -> Self {
        self.time_limit = (minutes > 0).then_some(minutes);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSession {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Copies of the questions as they were when selected
    pub questions: Vec<Question>,
    pub settings: ReviewSettings,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl ReviewSession {
    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(|q| q.points).sum()
    }

    /// Questions in the order a run should present them
    pub fn ordered_questions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self.questions.iter().collect();
        if self.settings.randomize_questions {
            questions.shuffle(rng);
        }
        questions
    }
}

impl Entity for ReviewSession {
    fn id(&self) -> &str {
        &self.id
    }
}
