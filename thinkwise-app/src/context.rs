//! Store wiring
//!
//! `AppContext` owns one of each store and the shell state. Views call its
//! methods; validation and export failures end up as an alert on the shell
//! state as well as in the returned error.

use libthinkwise::export::{DownloadCenter, ExportKind, FileSink};
use libthinkwise::forms::{ModuleForm, QuestionForm};
use libthinkwise::lesson::{learning_path, Lesson, LessonOutcome, LessonRun, LessonStatus};
use libthinkwise::store::{Authenticator, SimulatedAuthenticator};
use libthinkwise::{
    seed, AdminStore, AuthStore, Config, Module, ProgressStore, Question, ReviewSession,
    ReviewerBuilder, User,
};
use secrecy::SecretString;
use std::future::Future;
use tracing::{debug, info};

use crate::app::{reduce, Action, AppState, View};
use crate::error::{AppError, Result};

pub struct AppContext<A: Authenticator = SimulatedAuthenticator> {
    state: AppState,
    auth: AuthStore<A>,
    /// Present while someone is signed in
    progress: Option<ProgressStore>,
    admin: AdminStore,
    reviewer: ReviewerBuilder,
    lesson_run: Option<LessonRun>,
}

impl AppContext<SimulatedAuthenticator> {
    pub fn new(config: &Config) -> Self {
        Self::with_auth(AuthStore::simulated(&config.auth))
    }
}

impl<A: Authenticator> AppContext<A> {
    pub fn with_auth(auth: AuthStore<A>) -> Self {
        Self {
            state: AppState::new(),
            auth,
            progress: None,
            admin: AdminStore::new(),
            reviewer: ReviewerBuilder::new(),
            lesson_run: None,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "app dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Record a failure as an alert and hand it back
    fn alert<T>(&mut self, error: impl Into<AppError>) -> Result<T> {
        let error = error.into();
        self.dispatch(Action::ShowAlert(error.alert_message()));
        Err(error)
    }

    pub fn dismiss_alert(&mut self) {
        self.dispatch(Action::DismissAlert);
    }

    pub fn clear_status(&mut self) {
        self.dispatch(Action::ClearStatus);
    }

    // === Session ===

    pub fn auth(&self) -> &AuthStore<A> {
        &self.auth
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub async fn login(&mut self, email: &str, password: SecretString) -> Result<User> {
        self.login_until(email, password, std::future::pending()).await
    }

    /// Login that is abandoned when `cancel` completes
    pub async fn login_until<F>(&mut self, email: &str, password: SecretString, cancel: F) -> Result<User>
    where
        F: Future<Output = ()>,
    {
        match self.auth.login_until(email, password, cancel).await {
            Ok(user) => Ok(self.signed_in(user)),
            Err(e) => self.alert(e),
        }
    }

    pub async fn register(&mut self, name: &str, email: &str, password: SecretString) -> Result<User> {
        match self.auth.register(name, email, password).await {
            Ok(user) => Ok(self.signed_in(user)),
            Err(e) => self.alert(e),
        }
    }

    fn signed_in(&mut self, user: User) -> User {
        self.progress = Some(ProgressStore::for_user(user.clone()));
        self.dispatch(Action::SignedIn);
        user
    }

    /// Drop the user's progress and any work in progress
    pub fn logout(&mut self) {
        self.auth.logout();
        self.progress = None;
        self.lesson_run = None;
        self.reviewer = ReviewerBuilder::new();
        self.dispatch(Action::SignedOut);
    }

    fn user_id(&self) -> Result<String> {
        self.auth
            .current_user()
            .map(|u| u.id.clone())
            .ok_or(AppError::NotSignedIn)
    }

    // === Navigation ===

    pub fn navigate(&mut self, token: &str) {
        self.dispatch(Action::Navigate(token.to_string()));
    }

    /// Subjects offered on the dashboard
    pub fn subjects(&self) -> &'static [&'static str] {
        &seed::SUBJECTS
    }

    pub fn open_subject(&mut self, subject: &str) {
        self.dispatch(Action::NavigateTo(View::Learning {
            subject: subject.to_string(),
        }));
    }

    // === Progress ===

    pub fn progress(&self) -> Option<&ProgressStore> {
        self.progress.as_ref()
    }

    pub fn progress_mut(&mut self) -> Option<&mut ProgressStore> {
        self.progress.as_mut()
    }

    /// Lessons of `subject` with their status for the current user
    pub fn learning_path(&self, subject: &str) -> Result<Vec<(Lesson, LessonStatus)>> {
        let progress = self.progress.as_ref().ok_or(AppError::NotSignedIn)?;
        let lessons = seed::lessons(subject);
        Ok(learning_path(&lessons, progress.progress())
            .into_iter()
            .map(|(lesson, status)| (lesson.clone(), status))
            .collect())
    }

    // === Lessons ===

    /// Open a lesson and start a fresh run through it
    pub fn open_lesson(&mut self, lesson: Lesson) {
        self.lesson_run = Some(LessonRun::new(lesson.clone()));
        self.dispatch(Action::NavigateTo(View::Lesson { lesson }));
    }

    pub fn lesson_run(&self) -> Option<&LessonRun> {
        self.lesson_run.as_ref()
    }

    pub fn lesson_run_mut(&mut self) -> Option<&mut LessonRun> {
        self.lesson_run.as_mut()
    }

    /// Advance the open lesson. When it finishes the XP is credited and the
    /// learning path of its subject is shown again.
    pub fn lesson_next(&mut self) -> Result<Option<LessonOutcome>> {
        let run = self.lesson_run.as_mut().ok_or(AppError::NoLesson)?;
        let Some(outcome) = run.next() else {
            return Ok(None);
        };
        let subject = run.lesson().subject.clone();

        let progress = self.progress.as_mut().ok_or(AppError::NotSignedIn)?;
        outcome.apply(progress);
        self.lesson_run = None;

        self.dispatch(Action::SetStatus(format!(
            "Lesson complete! {}/{} correct, +{} XP",
            outcome.score, outcome.total, outcome.earned_xp
        )));
        self.dispatch(Action::NavigateTo(View::Learning { subject }));
        Ok(Some(outcome))
    }

    // === Reviewers ===

    pub fn reviewer(&self) -> &ReviewerBuilder {
        &self.reviewer
    }

    pub fn reviewer_mut(&mut self) -> &mut ReviewerBuilder {
        &mut self.reviewer
    }

    /// Save the reviewer being built, owned by the current user
    pub fn save_reviewer(&mut self) -> Result<ReviewSession> {
        let user_id = self.user_id()?;
        match self.reviewer.save(&mut self.admin, &user_id) {
            Ok(session) => {
                self.reviewer = ReviewerBuilder::new();
                self.dispatch(Action::SetStatus(format!("Saved \"{}\"", session.title)));
                self.dispatch(Action::NavigateTo(View::ReviewerList));
                Ok(session)
            }
            Err(e) => self.alert(e),
        }
    }

    /// Questions for reviewing the current selection without saving it
    pub fn start_review(&mut self) -> Result<Vec<Question>> {
        match self.reviewer.start_review(self.admin.questions()) {
            Ok(questions) => Ok(questions),
            Err(e) => self.alert(e),
        }
    }

    pub fn my_review_sessions(&self) -> Vec<&ReviewSession> {
        match self.auth.current_user() {
            Some(user) => self.admin.sessions_by_creator(&user.id),
            None => Vec::new(),
        }
    }

    // === Admin ===

    pub fn admin(&self) -> &AdminStore {
        &self.admin
    }

    pub fn admin_mut(&mut self) -> &mut AdminStore {
        &mut self.admin
    }

    pub fn save_question(&mut self, form: &QuestionForm) -> Result<Question> {
        match form.save(&mut self.admin) {
            Ok(question) => Ok(question),
            Err(e) => self.alert(e),
        }
    }

    pub fn save_module(&mut self, form: &ModuleForm) -> Result<Module> {
        match form.save(&mut self.admin) {
            Ok(module) => Ok(module),
            Err(e) => self.alert(e),
        }
    }

    // === Downloads ===

    /// Show the download center overlay
    pub fn open_downloads(&mut self) -> Result<()> {
        if self.progress.is_none() {
            return self.alert(AppError::NotSignedIn);
        }
        self.dispatch(Action::ShowDownloads);
        Ok(())
    }

    pub fn close_downloads(&mut self) {
        self.dispatch(Action::HideDownloads);
    }

    /// Render `kind` for the current user and save it to `sink`
    pub fn download<S: FileSink + ?Sized>(&mut self, kind: ExportKind, sink: &mut S) -> Result<String> {
        let profile = match &self.progress {
            Some(progress) => progress.profile(),
            None => return self.alert(AppError::NotSignedIn),
        };

        let result = DownloadCenter::new(profile, &self.admin).download(kind, sink);
        match result {
            Ok(filename) => {
                info!("Download ready: {}", filename);
                self.dispatch(Action::SetStatus(format!("Downloaded {}", filename)));
                Ok(filename)
            }
            Err(e) => self.alert(e),
        }
    }
}
