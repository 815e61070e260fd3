//! Actions for the reducer pattern
//!
//! Every change to the shell state is described by an [`Action`]. The
//! reducer in `reducer.rs` applies them.

use libthinkwise::lesson::Lesson;
use std::str::FromStr;

/// Name of a main view, as used in links and commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewToken {
    Dashboard,
    Learning,
    Lesson,
    Profile,
    ReviewerCreator,
    ReviewerList,
    AdminPanel,
}

impl ViewToken {
    pub const ALL: [ViewToken; 7] = [
        ViewToken::Dashboard,
        ViewToken::Learning,
        ViewToken::Lesson,
        ViewToken::Profile,
        ViewToken::ReviewerCreator,
        ViewToken::ReviewerList,
        ViewToken::AdminPanel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Learning => "learning",
            Self::Lesson => "lesson",
            Self::Profile => "profile",
            Self::ReviewerCreator => "reviewer-creator",
            Self::ReviewerList => "reviewer-list",
            Self::AdminPanel => "admin-panel",
        }
    }

    /// Unknown tokens resolve to the dashboard
    pub fn parse(token: &str) -> Self {
        token.parse().unwrap_or(ViewToken::Dashboard)
    }
}

impl FromStr for ViewToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown view: {}", s))
    }
}

impl std::fmt::Display for ViewToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A main view together with exactly the data it needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Learning {
        subject: String,
    },
    Lesson {
        lesson: Lesson,
    },
    Profile,
    ReviewerCreator,
    ReviewerList,
    AdminPanel,
}

impl View {
    pub fn token(&self) -> ViewToken {
        match self {
            View::Dashboard => ViewToken::Dashboard,
            View::Learning { .. } => ViewToken::Learning,
            View::Lesson { .. } => ViewToken::Lesson,
            View::Profile => ViewToken::Profile,
            View::ReviewerCreator => ViewToken::ReviewerCreator,
            View::ReviewerList => ViewToken::ReviewerList,
            View::AdminPanel => ViewToken::AdminPanel,
        }
    }
}

/// Which form an anonymous visitor sees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScreen {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // === Navigation ===
    /// Go to a fully specified view
    NavigateTo(View),

    /// Go to a view by name, filling its data from what was open last
    Navigate(String),

    // === Session ===
    /// Switch between the login and register forms
    ShowAuthScreen(AuthScreen),

    SignedIn,

    /// Back to the login form with everything remembered forgotten
    SignedOut,

    // === Overlays ===
    ShowAlert(String),
    DismissAlert,
    ShowDownloads,
    HideDownloads,

    // === Status Bar ===
    SetStatus(String),
    ClearStatus,

    Quit,
}
