//! Test the store wiring in AppContext
//!
//! Covers the session lifecycle, lesson completion, reviewer saving and
//! downloads, including how failures surface as alerts.

use libthinkwise::config::{AuthConfig, Config};
use libthinkwise::export::{ExportKind, MemorySink};
use libthinkwise::forms::QuestionForm;
use libthinkwise::lesson::LessonStatus;
use libthinkwise::ReviewSettings;
use secrecy::SecretString;
use std::time::Duration;
use thinkwise_app::app::{Screen, View, ViewToken};
use thinkwise_app::{AppContext, AppError};

fn instant_config() -> Config {
    Config {
        auth: AuthConfig {
            simulated_delay_ms: 0,
        },
        ..Config::default()
    }
}

fn password() -> SecretString {
    SecretString::from("secret".to_string())
}

async fn signed_in() -> AppContext {
    let mut ctx = AppContext::new(&instant_config());
    ctx.login("alex@example.com", password()).await.unwrap();
    ctx
}

#[tokio::test]
async fn test_login_shows_dashboard_with_default_progress() {
    let ctx = signed_in().await;

    assert_eq!(ctx.state().screen(), Screen::Main(ViewToken::Dashboard));
    let progress = ctx.progress().unwrap();
    assert_eq!(progress.user().name, "Alex Johnson");
    assert_eq!(progress.level(), 13);
}

#[tokio::test]
async fn test_register_uses_submitted_name() {
    let mut ctx = AppContext::new(&instant_config());
    let user = ctx
        .register("Sam Rivera", "sam@example.com", password())
        .await
        .unwrap();

    assert_eq!(user.name, "Sam Rivera");
    assert_eq!(ctx.progress().unwrap().user().id, user.id);
}

#[tokio::test]
async fn test_empty_password_alerts_and_stays_signed_out() {
    let mut ctx = AppContext::new(&instant_config());
    let result = ctx
        .login("alex@example.com", SecretString::from(String::new()))
        .await;

    assert!(result.is_err());
    assert_eq!(ctx.state().screen(), Screen::Login);
    assert!(ctx.state().alert.is_some());
    assert!(ctx.progress().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_login_returns_to_login_form() {
    let mut ctx = AppContext::new(&Config::default());
    let result = ctx
        .login_until(
            "alex@example.com",
            password(),
            tokio::time::sleep(Duration::from_millis(10)),
        )
        .await;

    assert!(result.is_err());
    assert!(!ctx.auth().is_loading());
    assert_eq!(ctx.state().screen(), Screen::Login);
}

#[tokio::test]
async fn test_logout_drops_progress_and_memory() {
    let mut ctx = signed_in().await;
    ctx.open_subject("Physics");
    ctx.logout();

    assert!(ctx.progress().is_none());
    assert!(ctx.current_user().is_none());
    assert_eq!(ctx.state().screen(), Screen::Login);
    assert!(ctx.state().last_subject.is_none());
}

#[tokio::test]
async fn test_finishing_a_lesson_credits_xp_and_returns_to_path() {
    let mut ctx = signed_in().await;
    let path = ctx.learning_path("Mathematics").unwrap();
    assert_eq!(path[1].1, LessonStatus::Current);

    ctx.open_lesson(path[1].0.clone());
    assert_eq!(ctx.state().screen(), Screen::Main(ViewToken::Lesson));

    let outcome = loop {
        let run = ctx.lesson_run_mut().unwrap();
        let answer = run.current().unwrap().kind.correct_answer().joined();
        run.select(answer);
        run.submit();
        if let Some(outcome) = ctx.lesson_next().unwrap() {
            break outcome;
        }
    };

    assert_eq!(outcome.earned_xp, 25);
    assert_eq!(ctx.progress().unwrap().progress().total_xp, 2475);
    assert_eq!(
        ctx.state().view,
        View::Learning {
            subject: "Mathematics".to_string()
        }
    );
    let path = ctx.learning_path("Mathematics").unwrap();
    assert_eq!(path[1].1, LessonStatus::Completed);
    assert_eq!(path[2].1, LessonStatus::Current);
}

#[tokio::test]
async fn test_reviewer_save_failure_becomes_alert() {
    let mut ctx = signed_in().await;
    ctx.reviewer_mut().toggle("1");

    let err = ctx.save_reviewer().unwrap_err();
    assert_eq!(
        ctx.state().alert.as_deref(),
        Some("Please provide a title and select at least one question.")
    );
    assert_eq!(err.alert_message(), ctx.state().alert.clone().unwrap());
    assert!(ctx.admin().review_sessions().is_empty());
}

#[tokio::test]
async fn test_saved_reviewer_is_scoped_to_user() {
    let mut ctx = signed_in().await;
    {
        let builder = ctx.reviewer_mut();
        builder.title = "Warm-up".to_string();
        builder.settings = ReviewSettings::default().with_time_limit_minutes(10);
        builder.toggle("2");
    }
    let session = ctx.save_reviewer().unwrap();

    assert_eq!(session.created_by, "1");
    assert_eq!(ctx.my_review_sessions().len(), 1);
    assert_eq!(ctx.state().view, View::ReviewerList);
    assert!(ctx.reviewer().selected_ids().is_empty());
}

#[tokio::test]
async fn test_question_form_errors_become_alerts() {
    let mut ctx = signed_in().await;
    let result = ctx.save_question(&QuestionForm::new());

    assert!(result.is_err());
    assert_eq!(
        ctx.state().alert.as_deref(),
        Some("Please fill in all required fields.")
    );
    ctx.dismiss_alert();
    assert!(ctx.state().alert.is_none());
}

#[tokio::test]
async fn test_download_questions_without_sessions_alerts() {
    let mut ctx = signed_in().await;
    let mut sink = MemorySink::new();

    assert!(ctx.download(ExportKind::Questions, &mut sink).is_err());
    assert_eq!(
        ctx.state().alert.as_deref(),
        Some("No questions found to export. Create some review sessions first!")
    );
    assert!(sink.is_empty());

    let filename = ctx.download(ExportKind::Profile, &mut sink).unwrap();
    assert_eq!(filename, "thinkwise-profile-alex-johnson.json");
}

#[test]
fn test_download_requires_sign_in() {
    let mut ctx = AppContext::new(&instant_config());
    let mut sink = MemorySink::new();

    let err = ctx.download(ExportKind::Report, &mut sink).unwrap_err();
    assert!(matches!(err, AppError::NotSignedIn));
}

#[tokio::test]
async fn test_download_center_opens_only_when_signed_in() {
    let mut ctx = AppContext::new(&instant_config());
    assert!(matches!(ctx.open_downloads(), Err(AppError::NotSignedIn)));
    assert!(!ctx.state().downloads_open);
    assert!(ctx.state().alert.is_some());

    ctx.dismiss_alert();
    ctx.login("alex@example.com", password()).await.unwrap();
    ctx.open_downloads().unwrap();
    assert!(ctx.state().downloads_open);

    ctx.close_downloads();
    assert!(!ctx.state().downloads_open);
}

#[tokio::test]
async fn test_download_status_is_cleared_by_next_command() {
    let mut ctx = signed_in().await;
    let mut sink = MemorySink::new();

    let filename = ctx.download(ExportKind::Profile, &mut sink).unwrap();
    assert_eq!(
        ctx.state().status.as_deref(),
        Some(format!("Downloaded {}", filename).as_str())
    );

    ctx.clear_status();
    assert!(ctx.state().status.is_none());
}

#[tokio::test]
async fn test_listed_subjects_open_their_learning_path() {
    let mut ctx = signed_in().await;
    assert!(ctx.subjects().contains(&"Physics"));

    let subject = ctx.subjects()[1];
    ctx.open_subject(subject);
    assert_eq!(
        ctx.state().view,
        View::Learning {
            subject: "Physics".to_string()
        }
    );
    assert!(!ctx.learning_path(subject).unwrap().is_empty());
}
