//! Pure reducer function for state transitions
//!
//! `(AppState, Action) -> AppState`, with no I/O. Store commands run in
//! `AppContext`, which feeds their results back in as actions.

use super::actions::{Action, View};
use super::state::AppState;

pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === Navigation ===
        Action::NavigateTo(view) => navigate(state, view),

        Action::Navigate(token) => {
            let view = state.resolve(&token);
            navigate(state, view)
        }

        // === Session ===
        Action::ShowAuthScreen(auth_screen) => AppState {
            auth_screen,
            alert: None,
            ..state
        },

        Action::SignedIn => AppState {
            signed_in: true,
            view: View::Dashboard,
            alert: None,
            ..state
        },

        Action::SignedOut => AppState {
            should_quit: state.should_quit,
            ..AppState::default()
        },

        // === Overlays ===
        Action::ShowAlert(message) => AppState {
            alert: Some(message),
            ..state
        },

        Action::DismissAlert => AppState {
            alert: None,
            ..state
        },

        Action::ShowDownloads => AppState {
            downloads_open: state.signed_in,
            ..state
        },

        Action::HideDownloads => AppState {
            downloads_open: false,
            ..state
        },

        // === Status Bar ===
        Action::SetStatus(message) => AppState {
            status: Some(message),
            ..state
        },

        Action::ClearStatus => AppState {
            status: None,
            ..state
        },

        Action::Quit => AppState {
            should_quit: true,
            ..state
        },
    }
}

/// Switch views, remembering the subject and lesson that were opened
fn navigate(state: AppState, view: View) -> AppState {
    let last_subject = match &view {
        View::Learning { subject } => Some(subject.clone()),
        View::Lesson { lesson } => Some(lesson.subject.clone()),
        _ => state.last_subject,
    };
    let last_lesson = match &view {
        View::Lesson { lesson } => Some(lesson.clone()),
        _ => state.last_lesson,
    };

    AppState {
        view,
        last_subject,
        last_lesson,
        downloads_open: false,
        ..state
    }
}
