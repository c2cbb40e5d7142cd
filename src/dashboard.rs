//! Dashboard State
//!
//! Bookkeeping behind the dashboard view: applying refresh results,
//! optimistic removal after a deactivation, and checkout. Both the browser
//! UI and the native poller drive the same state transitions.

use std::time::Duration;

use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::models::{DashboardResponse, User};
use crate::session::TokenStore;

/// Dashboard auto-refresh period
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Notice shown when the backend no longer recognises the session
pub const SESSION_OVER_MESSAGE: &str = "Your session is over!";

/// Banner shown when a dashboard fetch fails
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred.";

/// Why a refresh was started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshKind {
    /// First fetch on mount; shows the loading spinner
    Initial,
    /// Timer-driven fetch; silent
    Auto,
}

/// What a refresh did to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated,
    SessionExpired,
    Failed,
}

/// Registered / active / inactive totals shown in the sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserCounts {
    pub registered: usize,
    pub active: usize,
    pub inactive: usize,
}

/// View state of the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Signed-in administrator, shown in the header
    pub user: Option<User>,
    pub active_users: Vec<User>,
    pub all_users: Vec<User>,
    pub loading: bool,
    /// Error banner
    pub error: Option<String>,
    /// Warning banner (session over)
    pub notice: Option<String>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a refresh as started. Only the initial fetch shows a spinner.
    pub fn begin_refresh(&mut self, kind: RefreshKind) {
        if kind == RefreshKind::Initial {
            self.loading = true;
        }
    }

    /// Apply the result of a `GET dashboard` call.
    ///
    /// A response without a user means the session is over: the stored
    /// token is deleted and the re-authentication notice is shown. Failed
    /// fetches keep the previously displayed lists.
    pub fn apply_refresh(
        &mut self,
        kind: RefreshKind,
        result: ApiResult<DashboardResponse>,
        tokens: &dyn TokenStore,
    ) -> RefreshOutcome {
        let outcome = match result {
            Ok(DashboardResponse {
                user: Some(user),
                active_users,
                all_users,
            }) => {
                self.user = Some(user);
                self.active_users = active_users;
                self.all_users = all_users;
                self.notice = None;
                self.error = None;
                RefreshOutcome::Updated
            }
            Ok(DashboardResponse { user: None, .. }) => {
                self.user = None;
                if let Err(e) = tokens.clear() {
                    tracing::warn!("Failed to clear session token: {}", e);
                }
                self.notice = Some(SESSION_OVER_MESSAGE.to_string());
                self.error = None;
                RefreshOutcome::SessionExpired
            }
            Err(e) => {
                tracing::error!("Dashboard refresh failed: {}", e);
                self.error = Some(GENERIC_ERROR_MESSAGE.to_string());
                RefreshOutcome::Failed
            }
        };

        if kind == RefreshKind::Initial {
            self.loading = false;
        }

        outcome
    }

    /// Sidebar totals
    pub fn counts(&self) -> UserCounts {
        UserCounts {
            registered: self.all_users.len(),
            active: self.active_users.len(),
            inactive: self.all_users.len().saturating_sub(self.active_users.len()),
        }
    }

    /// Whether the summary panel and table should be rendered
    pub fn shows_panel(&self) -> bool {
        !self.loading && !self.all_users.is_empty()
    }

    /// Remove a user from the active list after the backend acknowledged
    /// its deactivation. Returns false when the user was not listed.
    pub fn remove_active(&mut self, user_id: &str) -> bool {
        let before = self.active_users.len();
        self.active_users.retain(|u| u.id != user_id);
        self.active_users.len() != before
    }

    /// Record a failed action in the error banner
    pub fn record_error(&mut self, error: &ApiError, context: ErrorContext) {
        tracing::error!("{:?} failed: {}", context, error);
        self.error = Some(error.banner(context).join(" "));
    }

    /// After a successful deactivate-all: no one is active, the session ends.
    pub fn checkout(&mut self, tokens: &dyn TokenStore) -> ApiResult<()> {
        self.active_users.clear();
        self.user = None;
        tokens.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            first_name: name.to_string(),
            middle_name: None,
            last_name: String::new(),
            full_name: Some(name.to_string()),
            username: None,
            is_active: true,
            check_in_time: None,
            purpose: Some("Visit".to_string()),
        }
    }

    fn response() -> DashboardResponse {
        DashboardResponse {
            user: Some(user("admin", "Admin")),
            active_users: vec![user("u1", "Grace"), user("u2", "Alan"), user("u3", "Ada")],
            all_users: vec![
                user("u1", "Grace"),
                user("u2", "Alan"),
                user("u3", "Ada"),
                user("u4", "Edsger"),
                user("u5", "Barbara"),
            ],
        }
    }

    #[test]
    fn test_initial_refresh_shows_spinner() {
        let tokens = MemoryTokenStore::with_token("t");
        let mut state = DashboardState::new();

        state.begin_refresh(RefreshKind::Initial);
        assert!(state.loading);
        assert!(!state.shows_panel());

        let outcome = state.apply_refresh(RefreshKind::Initial, Ok(response()), &tokens);
        assert_eq!(outcome, RefreshOutcome::Updated);
        assert!(!state.loading);
        assert!(state.shows_panel());
        assert_eq!(
            state.counts(),
            UserCounts {
                registered: 5,
                active: 3,
                inactive: 2
            }
        );
    }

    #[test]
    fn test_auto_refresh_is_silent() {
        let tokens = MemoryTokenStore::with_token("t");
        let mut state = DashboardState::new();

        state.begin_refresh(RefreshKind::Auto);
        assert!(!state.loading);
        state.apply_refresh(RefreshKind::Auto, Ok(response()), &tokens);
        assert!(!state.loading);
    }

    #[test]
    fn test_missing_user_clears_token() {
        let tokens = MemoryTokenStore::with_token("expired");
        let mut state = DashboardState::new();
        state.apply_refresh(RefreshKind::Initial, Ok(response()), &tokens);

        let outcome = state.apply_refresh(
            RefreshKind::Auto,
            Ok(DashboardResponse::default()),
            &tokens,
        );

        assert_eq!(outcome, RefreshOutcome::SessionExpired);
        assert!(state.user.is_none());
        assert!(tokens.get().is_none());
        assert_eq!(state.notice.as_deref(), Some("Your session is over!"));
    }

    #[test]
    fn test_failed_refresh_keeps_lists() {
        let tokens = MemoryTokenStore::with_token("t");
        let mut state = DashboardState::new();
        state.apply_refresh(RefreshKind::Initial, Ok(response()), &tokens);

        state.begin_refresh(RefreshKind::Initial);
        let outcome = state.apply_refresh(
            RefreshKind::Initial,
            Err(ApiError::Network("offline".to_string())),
            &tokens,
        );

        assert_eq!(outcome, RefreshOutcome::Failed);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("An error occurred."));
        assert_eq!(state.active_users.len(), 3);
        assert_eq!(tokens.get().as_deref(), Some("t"));

        state.apply_refresh(RefreshKind::Auto, Ok(response()), &tokens);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_remove_active_removes_exactly_one_user() {
        let tokens = MemoryTokenStore::new();
        let mut state = DashboardState::new();
        state.apply_refresh(RefreshKind::Initial, Ok(response()), &tokens);

        assert!(state.remove_active("u2"));
        let ids: Vec<&str> = state.active_users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u3"]);
        assert_eq!(state.all_users.len(), 5);
        assert_eq!(state.counts().inactive, 3);

        assert!(!state.remove_active("u2"));
    }

    #[test]
    fn test_checkout_clears_session() {
        let tokens = MemoryTokenStore::with_token("t");
        let mut state = DashboardState::new();
        state.apply_refresh(RefreshKind::Initial, Ok(response()), &tokens);

        state.checkout(&tokens).unwrap();
        assert!(state.active_users.is_empty());
        assert!(state.user.is_none());
        assert!(tokens.get().is_none());
        assert_eq!(state.counts().inactive, 5);
    }

    #[test]
    fn test_record_error_uses_context_message() {
        let mut state = DashboardState::new();
        state.record_error(
            &ApiError::Network("refused".to_string()),
            ErrorContext::Deactivate,
        );
        assert_eq!(
            state.error.as_deref(),
            Some("Unable to deactivate the user. Please try again.")
        );
    }
}
