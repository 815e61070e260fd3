//! Application state
//!
//! All transitions go through the reducer (see `reducer.rs`).

use super::actions::{AuthScreen, View, ViewToken};
use libthinkwise::lesson::Lesson;

/// Subject opened when nothing was remembered
pub const DEFAULT_SUBJECT: &str = "Mathematics";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Main view shown once signed in
    pub view: View,

    /// Form shown while signed out
    pub auth_screen: AuthScreen,

    pub signed_in: bool,

    /// Last subject opened, reused by a bare "learning" token
    pub last_subject: Option<String>,

    /// Last lesson opened, reused by a bare "lesson" token
    pub last_lesson: Option<Lesson>,

    /// Blocking message the user has to dismiss
    pub alert: Option<String>,

    /// Download center overlay visible?
    pub downloads_open: bool,

    pub status: Option<String>,

    pub should_quit: bool,
}

/// What is actually on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Main(ViewToken),
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signed-out visitors only ever see the auth forms
    pub fn screen(&self) -> Screen {
        if !self.signed_in {
            return match self.auth_screen {
                AuthScreen::Login => Screen::Login,
                AuthScreen::Register => Screen::Register,
            };
        }
        Screen::Main(self.view.token())
    }

    /// Build the view a bare token stands for
    pub fn resolve(&self, token: &str) -> View {
        let subject = || {
            self.last_subject
                .clone()
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
        };

        match ViewToken::parse(token) {
            ViewToken::Dashboard => View::Dashboard,
            ViewToken::Learning => View::Learning { subject: subject() },
            ViewToken::Lesson => match &self.last_lesson {
                Some(lesson) => View::Lesson {
                    lesson: lesson.clone(),
                },
                None => View::Learning { subject: subject() },
            },
            ViewToken::Profile => View::Profile,
            ViewToken::ReviewerCreator => View::ReviewerCreator,
            ViewToken::ReviewerList => View::ReviewerList,
            ViewToken::AdminPanel => View::AdminPanel,
        }
    }
}
