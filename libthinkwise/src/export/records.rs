//! Export payload shapes

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Question, ReviewSession, User, UserProfile, UserProgress};

/// Format version stamped into every JSON export
pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
pub struct ProgressSummary<'a> {
    pub completed_lessons: &'a [String],
    pub achievements: &'a [String],
    pub total_xp: u32,
    pub level: u32,
    pub streak: u32,
}

impl<'a> From<&'a UserProgress> for ProgressSummary<'a> {
    fn from(progress: &'a UserProgress) -> Self {
        Self {
            completed_lessons: &progress.completed_lessons,
            achievements: &progress.achievements,
            total_xp: progress.total_xp,
            level: progress.level(),
            streak: progress.streak,
        }
    }
}

/// Profile download
#[derive(Debug, Serialize)]
pub struct ProfileExport<'a> {
    pub profile: &'a User,
    pub progress: ProgressSummary<'a>,
    pub export_date: DateTime<Utc>,
    pub version: &'static str,
}

impl<'a> ProfileExport<'a> {
    pub fn new(profile: &'a UserProfile, export_date: DateTime<Utc>) -> Self {
        Self {
            profile: &profile.user,
            progress: ProgressSummary::from(&profile.progress),
            export_date,
            version: EXPORT_VERSION,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BackupProgress<'a> {
    #[serde(flatten)]
    pub summary: ProgressSummary<'a>,
    pub daily_goal: u32,
    pub today_xp: u32,
}

/// Everything a user owns, in one document
#[derive(Debug, Serialize)]
pub struct CompleteBackup<'a> {
    pub user: &'a User,
    pub review_sessions: Vec<&'a ReviewSession>,
    pub progress: BackupProgress<'a>,
    pub export_date: DateTime<Utc>,
    pub version: &'static str,
}

impl<'a> CompleteBackup<'a> {
    pub fn new(
        profile: &'a UserProfile,
        review_sessions: Vec<&'a ReviewSession>,
        export_date: DateTime<Utc>,
    ) -> Self {
        let progress = &profile.progress;
        Self {
            user: &profile.user,
            review_sessions,
            progress: BackupProgress {
                summary: ProgressSummary::from(progress),
                daily_goal: progress.daily_goal,
                today_xp: progress.today_xp,
            },
            export_date,
            version: EXPORT_VERSION,
        }
    }
}

/// One flattened question in the CSV download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRow {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    pub question: String,
    pub image_url: String,
    pub correct_answer: String,
    pub explanation: String,
    pub points: u32,
    pub tags: String,
    pub created_date: String,
}

impl From<&Question> for QuestionRow {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.clone(),
            question_type: q.question_type().to_string(),
            subject: q.subject.clone(),
            topic: q.topic.clone(),
            difficulty: q.difficulty.to_string(),
            question: q.prompt.clone(),
            image_url: q.image_url.clone().unwrap_or_default(),
            correct_answer: q.kind.correct_answer().joined(),
            explanation: q.explanation.clone(),
            points: q.points,
            tags: q.tags.join(", "),
            created_date: q.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}
