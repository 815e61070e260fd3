//! The five named downloads offered to a signed-in user
//!
//! Every download only reads the user's profile and the review sessions that
//! user created; nothing here mutates a store.

use chrono::{DateTime, Utc};
use std::str::FromStr;
use tracing::info;

use super::csv::to_csv;
use super::json::to_pretty_json;
use super::records::{CompleteBackup, ProfileExport, QuestionRow};
use super::report::progress_report;
use super::sink::FileSink;
use crate::error::{ExportError, Result, ThinkwiseError};
use crate::store::AdminStore;
use crate::types::{ReviewSession, UserProfile};

pub const NO_QUESTIONS_MESSAGE: &str =
    "No questions found to export. Create some review sessions first!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Profile,
    Reviewers,
    Report,
    Questions,
    Backup,
}

impl ExportKind {
    pub const ALL: [ExportKind; 5] = [
        ExportKind::Profile,
        ExportKind::Reviewers,
        ExportKind::Report,
        ExportKind::Questions,
        ExportKind::Backup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Reviewers => "reviewers",
            Self::Report => "report",
            Self::Questions => "questions",
            Self::Backup => "backup",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Profile => "User Profile Data",
            Self::Reviewers => "Review Sessions",
            Self::Report => "Progress Report",
            Self::Questions => "Questions Database",
            Self::Backup => "Complete Backup",
        }
    }

    /// Label of the file format
    pub fn format(&self) -> &'static str {
        match self {
            Self::Profile | Self::Reviewers | Self::Backup => "JSON",
            Self::Report => "TXT",
            Self::Questions => "CSV",
        }
    }
}

impl FromStr for ExportKind {
    type Err = ThinkwiseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .ok_or_else(|| ThinkwiseError::InvalidInput(format!("Unknown export kind: {}", s)))
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rendered download, ready for a [`FileSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
}

/// Lowercase a display name for use in a filename. Every run of characters
/// that is not alphanumeric (path separators and dots included) becomes a
/// single dash.
pub fn name_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    match slug.trim_end_matches('-') {
        "" => "user".to_string(),
        trimmed => trimmed.to_string(),
    }
}

pub struct DownloadCenter<'a> {
    profile: &'a UserProfile,
    admin: &'a AdminStore,
    now: DateTime<Utc>,
}

impl<'a> DownloadCenter<'a> {
    pub fn new(profile: &'a UserProfile, admin: &'a AdminStore) -> Self {
        Self::at(profile, admin, Utc::now())
    }

    /// Render with a fixed clock
    pub fn at(profile: &'a UserProfile, admin: &'a AdminStore, now: DateTime<Utc>) -> Self {
        Self {
            profile,
            admin,
            now,
        }
    }

    /// Review sessions owned by the current user
    pub fn user_sessions(&self) -> Vec<&'a ReviewSession> {
        self.admin.sessions_by_creator(&self.profile.user.id)
    }

    fn date(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }

    pub fn filename(&self, kind: ExportKind) -> String {
        match kind {
            ExportKind::Profile => {
                format!("thinkwise-profile-{}.json", name_slug(&self.profile.user.name))
            }
            ExportKind::Reviewers => format!("thinkwise-reviewers-{}.json", self.date()),
            ExportKind::Report => format!("thinkwise-progress-report-{}.txt", self.date()),
            ExportKind::Questions => format!("thinkwise-questions-{}.csv", self.date()),
            ExportKind::Backup => format!("thinkwise-complete-backup-{}.json", self.date()),
        }
    }

    pub fn render(&self, kind: ExportKind) -> Result<ExportFile> {
        let contents = match kind {
            ExportKind::Profile => to_pretty_json(&ProfileExport::new(self.profile, self.now))?,
            ExportKind::Reviewers => to_pretty_json(&self.user_sessions())?,
            ExportKind::Report => {
                progress_report(self.profile, self.user_sessions().len(), self.now)
            }
            ExportKind::Questions => self.questions_csv()?,
            ExportKind::Backup => to_pretty_json(&CompleteBackup::new(
                self.profile,
                self.user_sessions(),
                self.now,
            ))?,
        };

        Ok(ExportFile {
            filename: self.filename(kind),
            contents,
        })
    }

    fn questions_csv(&self) -> Result<String> {
        let rows: Vec<QuestionRow> = self
            .user_sessions()
            .iter()
            .flat_map(|session| session.questions.iter())
            .map(QuestionRow::from)
            .collect();

        if rows.is_empty() {
            return Err(ExportError::NothingToExport(NO_QUESTIONS_MESSAGE.to_string()).into());
        }
        to_csv(&rows)
    }

    /// Render `kind` and hand it to `sink`. Returns the filename used.
    pub fn download<S: FileSink + ?Sized>(&self, kind: ExportKind, sink: &mut S) -> Result<String> {
        let file = self.render(kind)?;
        sink.save(&file.filename, file.contents.as_bytes())?;
        info!("Exported {} as {}", kind, file.filename);
        Ok(file.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sink::{DirectorySink, MemorySink};
    use crate::reviewer::ReviewerBuilder;
    use crate::seed;
    use crate::types::ReviewSettings;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn admin_with_session(creator: &str) -> AdminStore {
        let mut admin = AdminStore::new();
        let mut builder =
            ReviewerBuilder::new().with_details("Midterm", "Mixed", ReviewSettings::default());
        builder.toggle("1");
        builder.toggle("3");
        builder.save(&mut admin, creator).unwrap();
        admin
    }

    #[test]
    fn test_name_slug() {
        assert_eq!(name_slug("Alex Johnson"), "alex-johnson");
        assert_eq!(name_slug("  Mary  Ann   Lee "), "mary-ann-lee");
    }

    #[test]
    fn test_name_slug_strips_path_characters() {
        assert_eq!(name_slug("AC/DC Fan"), "ac-dc-fan");
        assert_eq!(name_slug("../x"), "x");
        assert_eq!(name_slug("a\\b.c"), "a-b-c");
        assert_eq!(name_slug("Mary-Ann"), "mary-ann");
        assert_eq!(name_slug("../.."), "user");
    }

    #[test]
    fn test_profile_download_stays_in_output_dir() {
        let mut profile = seed::demo_profile();
        profile.user.name = "AC/DC ../Fan".to_string();
        let admin = AdminStore::new();
        let center = DownloadCenter::at(&profile, &admin, fixed_now());

        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut sink = DirectorySink::new(temp_dir.path());
        let filename = center.download(ExportKind::Profile, &mut sink).unwrap();

        assert_eq!(filename, "thinkwise-profile-ac-dc-fan.json");
        assert!(temp_dir.path().join(&filename).is_file());
    }

    #[test]
    fn test_filenames() {
        let profile = seed::demo_profile();
        let admin = AdminStore::new();
        let center = DownloadCenter::at(&profile, &admin, fixed_now());

        let names: Vec<String> = ExportKind::ALL.iter().map(|k| center.filename(*k)).collect();
        assert_eq!(
            names,
            vec![
                "thinkwise-profile-alex-johnson.json",
                "thinkwise-reviewers-2024-06-15.json",
                "thinkwise-progress-report-2024-06-15.txt",
                "thinkwise-questions-2024-06-15.csv",
                "thinkwise-complete-backup-2024-06-15.json",
            ]
        );
    }

    #[test]
    fn test_only_own_sessions_are_exported() {
        let profile = seed::demo_profile();
        let admin = admin_with_session("someone-else");
        let center = DownloadCenter::at(&profile, &admin, fixed_now());

        assert!(center.user_sessions().is_empty());
        let reviewers = center.render(ExportKind::Reviewers).unwrap();
        assert_eq!(reviewers.contents, "[]");
    }

    #[test]
    fn test_questions_csv_requires_sessions() {
        let profile = seed::demo_profile();
        let admin = AdminStore::new();
        let center = DownloadCenter::at(&profile, &admin, fixed_now());

        let err = center.render(ExportKind::Questions).unwrap_err();
        assert_eq!(err.alert_message(), NO_QUESTIONS_MESSAGE);
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_questions_csv_flattens_session_questions() {
        let profile = seed::demo_profile();
        let admin = admin_with_session(&profile.user.id);
        let center = DownloadCenter::at(&profile, &admin, fixed_now());

        let file = center.render(ExportKind::Questions).unwrap();
        let lines: Vec<&str> = file.contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,type,subject,topic,difficulty,question,"));
        assert!(lines[1].starts_with("1,multiple-choice,Mathematics,Algebra,intermediate,"));
        assert!(lines[2].contains("\"periodic-table, elements, symbols\""));
    }

    #[test]
    fn test_backup_contains_sessions_and_version() {
        let profile = seed::demo_profile();
        let admin = admin_with_session(&profile.user.id);
        let center = DownloadCenter::at(&profile, &admin, fixed_now());

        let file = center.render(ExportKind::Backup).unwrap();
        let json: serde_json::Value = serde_json::from_str(&file.contents).unwrap();
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["export_date"], "2024-06-15T12:00:00Z");
        assert_eq!(json["review_sessions"][0]["title"], "Midterm");
        assert_eq!(json["progress"]["today_xp"], 35);
    }

    #[test]
    fn test_download_saves_to_sink() {
        let profile = seed::demo_profile();
        let admin = AdminStore::new();
        let center = DownloadCenter::at(&profile, &admin, fixed_now());
        let mut sink = MemorySink::new();

        let filename = center.download(ExportKind::Report, &mut sink).unwrap();
        assert_eq!(filename, "thinkwise-progress-report-2024-06-15.txt");
        assert!(sink
            .get_str(&filename)
            .unwrap()
            .starts_with("THINKWISE LEARNING REPORT"));

        assert!(center.download(ExportKind::Questions, &mut sink).is_err());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_export_kind_parse() {
        assert_eq!("backup".parse::<ExportKind>().unwrap(), ExportKind::Backup);
        assert!("zip".parse::<ExportKind>().is_err());
    }
}
