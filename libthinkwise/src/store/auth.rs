//! Authentication store
//!
//! Phases: anonymous -> authenticating -> authenticated, back to anonymous
//! on failure, cancellation or logout. The credential check itself is an
//! [`Authenticator`]; the shipped one only simulates a backend.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::{new_id, User, DEFAULT_AVATAR};

/// Which form started the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequest {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Authenticating(AuthRequest),
    Authenticated,
}

/// `user` is `Some` exactly when the phase is `Authenticated`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub phase: AuthPhase,
    pub user: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, AuthPhase::Authenticating(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Started(AuthRequest),
    Succeeded(User),
    Failed,
    Logout,
}

/// Pure reducer: `(AuthState, AuthAction) -> AuthState`
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Started(request) => AuthState {
            phase: AuthPhase::Authenticating(request),
            user: None,
        },
        AuthAction::Succeeded(user) => AuthState {
            phase: AuthPhase::Authenticated,
            user: Some(user),
        },
        AuthAction::Failed | AuthAction::Logout => AuthState::default(),
    }
}

/// Backend that checks credentials and hands back the signed-in identity
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, email: &str, password: &SecretString) -> Result<User, AuthError>;

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<User, AuthError>;
}

/// Accepts every submission after a fixed delay
#[derive(Debug, Clone)]
pub struct SimulatedAuthenticator {
    delay: Duration,
}

impl SimulatedAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.simulated_delay())
    }
}

impl Default for SimulatedAuthenticator {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

#[async_trait]
impl Authenticator for SimulatedAuthenticator {
    async fn login(&self, email: &str, _password: &SecretString) -> Result<User, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(User {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            email: email.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        })
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &SecretString,
    ) -> Result<User, AuthError> {
        tokio::time::sleep(self.delay).await;
        Ok(User {
            id: new_id(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: DEFAULT_AVATAR.to_string(),
        })
    }
}

/// Puts the state back to anonymous if a request is dropped mid-flight
struct InFlight<'a> {
    state: &'a mut AuthState,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut AuthState, request: AuthRequest) -> Self {
        *state = reduce(std::mem::take(state), AuthAction::Started(request));
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, outcome: Result<User, AuthError>) -> Result<User, AuthError> {
        self.settled = true;
        let action = match &outcome {
            Ok(user) => AuthAction::Succeeded(user.clone()),
            Err(_) => AuthAction::Failed,
        };
        *self.state = reduce(std::mem::take(self.state), action);
        outcome
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("Authentication request dropped before completion");
            *self.state = reduce(std::mem::take(self.state), AuthAction::Failed);
        }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::MissingField(field));
    }
    Ok(())
}

/// Container owning the auth state and the authenticator
pub struct AuthStore<A = SimulatedAuthenticator> {
    state: AuthState,
    authenticator: A,
}

impl AuthStore<SimulatedAuthenticator> {
    pub fn simulated(config: &AuthConfig) -> Self {
        Self::new(SimulatedAuthenticator::from_config(config))
    }
}

impl<A: Authenticator> AuthStore<A> {
    pub fn new(authenticator: A) -> Self {
        Self {
            state: AuthState::default(),
            authenticator,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub async fn login(&mut self, email: &str, password: SecretString) -> Result<User, AuthError> {
        self.login_until(email, password, std::future::pending()).await
    }

    /// Like [`login`](Self::login), but gives up with `Cancelled` as soon as
    /// `cancel` completes (e.g. when the view that asked goes away).
    pub async fn login_until<F>(
        &mut self,
        email: &str,
        password: SecretString,
        cancel: F,
    ) -> Result<User, AuthError>
    where
        F: Future<Output = ()>,
    {
        require(email, "email")?;
        require(password.expose_secret(), "password")?;

        let in_flight = InFlight::begin(&mut self.state, AuthRequest::Login);
        let outcome = tokio::select! {
            result = self.authenticator.login(email, &password) => result,
            _ = cancel => Err(AuthError::Cancelled),
        };
        log_outcome("Login", email, &outcome);
        in_flight.settle(outcome)
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: SecretString,
    ) -> Result<User, AuthError> {
        self.register_until(name, email, password, std::future::pending())
            .await
    }

    pub async fn register_until<F>(
        &mut self,
        name: &str,
        email: &str,
        password: SecretString,
        cancel: F,
    ) -> Result<User, AuthError>
    where
        F: Future<Output = ()>,
    {
        require(name, "name")?;
        require(email, "email")?;
        require(password.expose_secret(), "password")?;

        let in_flight = InFlight::begin(&mut self.state, AuthRequest::Register);
        let outcome = tokio::select! {
            result = self.authenticator.register(name, email, &password) => result,
            _ = cancel => Err(AuthError::Cancelled),
        };
        log_outcome("Registration", email, &outcome);
        in_flight.settle(outcome)
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.state.user {
            info!("Logging out {}", user.email);
        }
        self.state = reduce(std::mem::take(&mut self.state), AuthAction::Logout);
    }
}

fn log_outcome(what: &str, email: &str, outcome: &Result<User, AuthError>) {
    match outcome {
        Ok(user) => info!("{} succeeded for {} (user {})", what, email, user.id),
        Err(AuthError::Cancelled) => info!("{} for {} cancelled", what, email),
        Err(e) => warn!("{} failed for {}: {}", what, email, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    struct RejectingAuthenticator;

    #[async_trait]
    impl Authenticator for RejectingAuthenticator {
        async fn login(&self, _email: &str, _password: &SecretString) -> Result<User, AuthError> {
            Err(AuthError::Rejected("unknown account".to_string()))
        }

        async fn register(
            &self,
            _name: &str,
            _email: &str,
            _password: &SecretString,
        ) -> Result<User, AuthError> {
            Err(AuthError::Rejected("email taken".to_string()))
        }
    }

    #[test]
    fn test_reducer_transitions() {
        let state = AuthState::default();
        assert_eq!(state.phase, AuthPhase::Anonymous);

        let state = reduce(state, AuthAction::Started(AuthRequest::Login));
        assert!(state.is_loading());
        assert!(state.user.is_none());

        let user = crate::seed::demo_user();
        let state = reduce(state, AuthAction::Succeeded(user.clone()));
        assert!(state.is_authenticated());
        assert_eq!(state.user, Some(user));

        let state = reduce(state, AuthAction::Logout);
        assert_eq!(state, AuthState::default());
    }

    #[test]
    fn test_signing_in_again_clears_current_user() {
        let state = reduce(
            AuthState::default(),
            AuthAction::Succeeded(crate::seed::demo_user()),
        );
        let state = reduce(state, AuthAction::Started(AuthRequest::Login));

        assert!(state.is_loading());
        assert!(state.user.is_none());
    }

    #[test]
    fn test_failure_returns_to_anonymous() {
        let state = reduce(
            AuthState::default(),
            AuthAction::Started(AuthRequest::Register),
        );
        let state = reduce(state, AuthAction::Failed);
        assert_eq!(state, AuthState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_login_succeeds_after_delay() {
        let mut store = AuthStore::new(SimulatedAuthenticator::new(Duration::from_millis(1000)));
        let started = tokio::time::Instant::now();

        let user = store.login("sam@example.com", secret("pw")).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(user.id, "1");
        assert_eq!(user.email, "sam@example.com");
        assert_eq!(user.avatar, DEFAULT_AVATAR);
        assert!(store.is_authenticated());
        assert_eq!(store.current_user(), Some(&user));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_register_uses_given_name() {
        let mut store = AuthStore::new(SimulatedAuthenticator::default());
        let user = store
            .register("Jordan", "jordan@example.com", secret("hunter2"))
            .await
            .unwrap();

        assert_eq!(user.name, "Jordan");
        assert_ne!(user.id, "1");
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_empty_fields_fail_without_transition() {
        let mut store = AuthStore::new(SimulatedAuthenticator::new(Duration::ZERO));

        let err = store.login("  ", secret("pw")).await.unwrap_err();
        assert_eq!(err, AuthError::MissingField("email"));

        let err = store.login("a@b.c", secret("")).await.unwrap_err();
        assert_eq!(err, AuthError::MissingField("password"));

        let err = store.register("", "a@b.c", secret("pw")).await.unwrap_err();
        assert_eq!(err, AuthError::MissingField("name"));

        assert_eq!(store.state(), &AuthState::default());
    }

    #[tokio::test]
    async fn test_rejected_login_resets_to_anonymous() {
        let mut store = AuthStore::new(RejectingAuthenticator);
        let err = store.login("a@b.c", secret("pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::Rejected(_)));
        assert_eq!(store.state(), &AuthState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_response() {
        let mut store = AuthStore::new(SimulatedAuthenticator::new(Duration::from_secs(5)));
        let cancel = tokio::time::sleep(Duration::from_millis(10));

        let err = store
            .login_until("a@b.c", secret("pw"), cancel)
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::Cancelled);
        assert!(!store.is_loading());
        assert!(!store.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_request_does_not_stay_loading() {
        let mut store = AuthStore::new(SimulatedAuthenticator::new(Duration::from_secs(5)));

        let timed_out = tokio::time::timeout(
            Duration::from_millis(10),
            store.login("a@b.c", secret("pw")),
        )
        .await;

        assert!(timed_out.is_err());
        assert!(!store.is_loading());
        assert_eq!(store.state(), &AuthState::default());
    }

    #[tokio::test]
    async fn test_logout_clears_user() {
        let mut store = AuthStore::new(SimulatedAuthenticator::new(Duration::ZERO));
        store.login("a@b.c", secret("pw")).await.unwrap();
        store.logout();
        assert!(store.current_user().is_none());
        assert!(!store.is_authenticated());

        // Logging out while anonymous is harmless
        store.logout();
        assert_eq!(store.state(), &AuthState::default());
    }
}
