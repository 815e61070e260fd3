//! Admin content store: questions, modules and review sessions
//!
//! One pure reducer drives three independent collections. Embedded
//! questions inside modules and review sessions are snapshots, so deleting
//! a question never touches them.

use tracing::{debug, warn};

use super::collection::Collection;
use crate::error::{Result, ThinkwiseError};
use crate::seed;
use crate::types::{Entity, Module, Question, ReviewSession};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub questions: Collection<Question>,
    pub modules: Collection<Module>,
    pub review_sessions: Collection<ReviewSession>,
    pub is_loading: bool,
}

impl AdminState {
    /// State holding the seeded question bank and module
    pub fn seeded() -> Self {
        Self {
            questions: Collection::from_items(seed::questions()),
            modules: Collection::from_items(seed::modules()),
            review_sessions: Collection::new(),
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AdminAction {
    // === Questions ===
    AddQuestion(Question),
    UpdateQuestion(Question),
    DeleteQuestion(String),

    // === Modules ===
    AddModule(Module),
    UpdateModule(Module),
    DeleteModule(String),
    SetModulePublished { id: String, published: bool },

    // === Review sessions ===
    AddReviewSession(ReviewSession),
    UpdateReviewSession(ReviewSession),
    DeleteReviewSession(String),

    SetLoading(bool),
}

impl AdminAction {
    /// Short name for logs; payloads can be large
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddQuestion(_) => "add_question",
            Self::UpdateQuestion(_) => "update_question",
            Self::DeleteQuestion(_) => "delete_question",
            Self::AddModule(_) => "add_module",
            Self::UpdateModule(_) => "update_module",
            Self::DeleteModule(_) => "delete_module",
            Self::SetModulePublished { .. } => "set_module_published",
            Self::AddReviewSession(_) => "add_review_session",
            Self::UpdateReviewSession(_) => "update_review_session",
            Self::DeleteReviewSession(_) => "delete_review_session",
            Self::SetLoading(_) => "set_loading",
        }
    }
}

fn add<T: Entity>(collection: Collection<T>, item: T, kind: &str) -> Collection<T> {
    let id = item.id().to_string();
    let (collection, inserted) = collection.added(item);
    if !inserted {
        warn!("Ignoring {} with duplicate id {}", kind, id);
    }
    collection
}

/// Pure reducer: `(AdminState, AdminAction) -> AdminState`
pub fn reduce(state: AdminState, action: AdminAction) -> AdminState {
    match action {
        AdminAction::AddQuestion(question) => AdminState {
            questions: add(state.questions, question, "question"),
            ..state
        },
        AdminAction::UpdateQuestion(question) => AdminState {
            questions: state.questions.updated(question),
            ..state
        },
        AdminAction::DeleteQuestion(id) => AdminState {
            questions: state.questions.removed(&id),
            ..state
        },

        AdminAction::AddModule(module) => AdminState {
            modules: add(state.modules, module, "module"),
            ..state
        },
        AdminAction::UpdateModule(module) => AdminState {
            modules: state.modules.updated(module),
            ..state
        },
        AdminAction::DeleteModule(id) => AdminState {
            modules: state.modules.removed(&id),
            ..state
        },
        AdminAction::SetModulePublished { id, published } => {
            let modules = match state.modules.get(&id) {
                Some(module) if module.is_published != published => {
                    let module = Module {
                        is_published: published,
                        ..module.clone()
                    };
                    state.modules.updated(module)
                }
                _ => state.modules,
            };
            AdminState { modules, ..state }
        }

        AdminAction::AddReviewSession(session) => AdminState {
            review_sessions: add(state.review_sessions, session, "review session"),
            ..state
        },
        AdminAction::UpdateReviewSession(session) => AdminState {
            review_sessions: state.review_sessions.updated(session),
            ..state
        },
        AdminAction::DeleteReviewSession(id) => AdminState {
            review_sessions: state.review_sessions.removed(&id),
            ..state
        },

        AdminAction::SetLoading(is_loading) => AdminState { is_loading, ..state },
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Container owning the admin state, with one command per operation
#[derive(Debug, Clone, Default)]
pub struct AdminStore {
    state: AdminState,
}

impl AdminStore {
    /// Store starting from the seeded content
    pub fn new() -> Self {
        Self::with_state(AdminState::seeded())
    }

    pub fn with_state(state: AdminState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    pub fn dispatch(&mut self, action: AdminAction) {
        debug!(action = action.name(), "admin dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    fn ensure_new_id(exists: bool, kind: &str, id: &str) -> Result<()> {
        if exists {
            return Err(ThinkwiseError::InvalidInput(format!(
                "A {} with id {} already exists",
                kind, id
            )));
        }
        Ok(())
    }

    // === Questions ===

    pub fn questions(&self) -> &[Question] {
        self.state.questions.as_slice()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.state.questions.get(id)
    }

    pub fn add_question(&mut self, question: Question) -> Result<()> {
        Self::ensure_new_id(self.state.questions.contains(&question.id), "question", &question.id)?;
        self.dispatch(AdminAction::AddQuestion(question));
        Ok(())
    }

    pub fn update_question(&mut self, question: Question) {
        self.dispatch(AdminAction::UpdateQuestion(question));
    }

    pub fn delete_question(&mut self, id: &str) {
        self.dispatch(AdminAction::DeleteQuestion(id.to_string()));
    }

    /// Case-insensitive match on prompt, subject or topic. An empty term
    /// matches everything.
    pub fn search_questions(&self, term: &str) -> Vec<&Question> {
        let term = term.trim().to_lowercase();
        self.state
            .questions
            .iter()
            .filter(|q| {
                contains_ci(&q.prompt, &term)
                    || contains_ci(&q.subject, &term)
                    || contains_ci(&q.topic, &term)
            })
            .collect()
    }

    // === Modules ===

    pub fn modules(&self) -> &[Module] {
        self.state.modules.as_slice()
    }

    pub fn module(&self, id: &str) -> Option<&Module> {
        self.state.modules.get(id)
    }

    pub fn add_module(&mut self, module: Module) -> Result<()> {
        Self::ensure_new_id(self.state.modules.contains(&module.id), "module", &module.id)?;
        self.dispatch(AdminAction::AddModule(module));
        Ok(())
    }

    pub fn update_module(&mut self, module: Module) {
        self.dispatch(AdminAction::UpdateModule(module));
    }

    pub fn delete_module(&mut self, id: &str) {
        self.dispatch(AdminAction::DeleteModule(id.to_string()));
    }

    pub fn publish_module(&mut self, id: &str) {
        self.dispatch(AdminAction::SetModulePublished {
            id: id.to_string(),
            published: true,
        });
    }

    pub fn unpublish_module(&mut self, id: &str) {
        self.dispatch(AdminAction::SetModulePublished {
            id: id.to_string(),
            published: false,
        });
    }

    pub fn published_module_count(&self) -> usize {
        self.state.modules.iter().filter(|m| m.is_published).count()
    }

    /// Case-insensitive match on title, subject or description
    pub fn search_modules(&self, term: &str) -> Vec<&Module> {
        let term = term.trim().to_lowercase();
        self.state
            .modules
            .iter()
            .filter(|m| {
                contains_ci(&m.title, &term)
                    || contains_ci(&m.subject, &term)
                    || contains_ci(&m.description, &term)
            })
            .collect()
    }

    // === Review sessions ===

    pub fn review_sessions(&self) -> &[ReviewSession] {
        self.state.review_sessions.as_slice()
    }

    pub fn review_session(&self, id: &str) -> Option<&ReviewSession> {
        self.state.review_sessions.get(id)
    }

    pub fn add_review_session(&mut self, session: ReviewSession) -> Result<()> {
        Self::ensure_new_id(
            self.state.review_sessions.contains(&session.id),
            "review session",
            &session.id,
        )?;
        self.dispatch(AdminAction::AddReviewSession(session));
        Ok(())
    }

    pub fn update_review_session(&mut self, session: ReviewSession) {
        self.dispatch(AdminAction::UpdateReviewSession(session));
    }

    pub fn delete_review_session(&mut self, id: &str) {
        self.dispatch(AdminAction::DeleteReviewSession(id.to_string()));
    }

    /// Sessions owned by `creator_id`, in creation order
    pub fn sessions_by_creator(&self, creator_id: &str) -> Vec<&ReviewSession> {
        self.state
            .review_sessions
            .iter()
            .filter(|s| s.created_by == creator_id)
            .collect()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.dispatch(AdminAction::SetLoading(loading));
    }
}
