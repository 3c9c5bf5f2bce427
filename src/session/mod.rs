use crate::api::{ApiClient, ApiError, ApiResponse};
use crate::models::{AuthResponse, LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, User};
use crate::services::{AuthService, UserService};
use crate::storage::{ClientStorage, TOKEN_KEY, USER_KEY};
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Observable session snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("{message} (status {status})")]
    Rejected { status: u16, message: String },
    #[error("server answered with status {status} but sent no {expected}")]
    MissingPayload { status: u16, expected: &'static str },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl SessionError {
    fn rejected<T>(response: &ApiResponse<T>) -> Self {
        SessionError::Rejected {
            status: response.status,
            message: response.error_text(),
        }
    }

    /// Error for a response that carried no usable `expected` record
    fn unusable<T>(response: &ApiResponse<T>, expected: &'static str) -> Self {
        if response.success {
            SessionError::MissingPayload {
                status: response.status,
                expected,
            }
        } else {
            Self::rejected(response)
        }
    }
}

/// Process-wide authentication state
///
/// Subscribers receive every change through a `watch` channel. Each call is
/// independent; there is no refresh, rotation or request de-duplication.
pub struct SessionStore {
    storage: Arc<dyn ClientStorage>,
    auth: AuthService,
    users: UserService,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            storage: api.storage().clone(),
            auth: AuthService::new(api.clone()),
            users: UserService::new(api),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().user.as_ref().is_some_and(User::is_admin)
    }

    /// User record persisted by the last successful sign-in
    pub async fn cached_user(&self) -> Option<User> {
        let raw = match self.storage.get(USER_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read cached user: {:#}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring corrupt cached user: {}", e);
                None
            }
        }
    }

    /// Resolve the session from the persisted token
    ///
    /// Any failure clears the stored token; nothing is surfaced as an error.
    pub async fn init(&self) -> Option<User> {
        self.begin();

        let user = self.resolve_stored_session().await;
        if user.is_none() {
            if let Err(e) = self.forget().await {
                warn!("Failed to clear stored session: {:#}", e);
            }
        }

        self.state.send_modify(|s| {
            s.user = user.clone();
            s.loading = false;
            s.error = None;
        });
        user
    }

    async fn resolve_stored_session(&self) -> Option<User> {
        let token = match self.storage.get(TOKEN_KEY).await {
            Ok(Some(token)) if !token.is_empty() => token,
            Ok(_) => {
                debug!("No stored session");
                return None;
            }
            Err(e) => {
                warn!("Failed to read stored token: {:#}", e);
                return None;
            }
        };

        match self.users.me().await {
            Ok(response) if response.success => {
                let user = response.data?;
                if let Err(e) = self.persist(Some(&token), &user).await {
                    warn!("Failed to cache current user: {:#}", e);
                }
                info!("Restored session for {}", user.email);
                Some(user)
            }
            Ok(response) => {
                info!("Stored session rejected with status {}", response.status);
                None
            }
            Err(e) => {
                warn!("Auth check failed: {}", e);
                None
            }
        }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, SessionError> {
        self.begin();
        let result = match self.auth.login(credentials).await {
            Ok(response) => self.establish(response).await,
            Err(e) => Err(e.into()),
        };
        self.finish(result)
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<User, SessionError> {
        self.begin();
        let result = match self.auth.register(payload).await {
            Ok(response) => self.establish(response).await,
            Err(e) => Err(e.into()),
        };
        self.finish(result)
    }

    async fn establish(&self, response: ApiResponse<AuthResponse>) -> Result<User, SessionError> {
        let rejected = SessionError::unusable(&response, "session");
        let session = match response.data {
            Some(session) if response.success => session,
            _ => return Err(rejected),
        };

        self.persist(Some(&session.token), &session.user).await?;
        info!("Signed in as {}", session.user.email);

        let user = session.user;
        self.state.send_modify(|s| s.user = Some(user.clone()));
        Ok(user)
    }

    /// Notify the backend (best effort) and drop the local session
    pub async fn logout(&self) -> Result<(), SessionError> {
        let has_token = matches!(self.storage.get(TOKEN_KEY).await, Ok(Some(ref t)) if !t.is_empty());

        if has_token {
            match self.auth.logout().await {
                Ok(response) if !response.success => {
                    warn!("Remote logout returned status {}", response.status);
                }
                Ok(_) => {}
                Err(e) => warn!("Remote logout failed: {}", e),
            }
        }

        let cleared = self.forget().await;
        self.state.send_modify(|s| {
            s.user = None;
            s.loading = false;
            s.error = None;
        });
        info!("Signed out");
        cleared.map_err(SessionError::from)
    }

    /// Re-read the current user; a rejected token ends the session
    pub async fn refresh_user(&self) -> Result<Option<User>, SessionError> {
        let response = self.users.me().await?;
        let rejected = SessionError::unusable(&response, "user record");

        if let Some(user) = response.data.filter(|_| response.success) {
            self.persist(None, &user).await?;
            self.state.send_modify(|s| s.user = Some(user.clone()));
            return Ok(Some(user));
        }

        if response.status == 401 {
            self.forget().await?;
            self.state.send_modify(|s| s.user = None);
            return Ok(None);
        }

        Err(rejected)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, SessionError> {
        self.begin();
        let result = self.apply_profile_update(update).await;
        self.finish(result)
    }

    async fn apply_profile_update(&self, update: &ProfileUpdate) -> Result<User, SessionError> {
        let response = self.users.update_me(update).await?;
        let rejected = SessionError::unusable(&response, "user record");
        let user = match response.data {
            Some(user) if response.success => user,
            _ => return Err(rejected),
        };
        self.persist(None, &user).await?;
        self.state.send_modify(|s| s.user = Some(user.clone()));
        Ok(user)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), SessionError> {
        self.begin();
        let result = match self.users.change_password(change).await {
            Ok(response) if response.success => Ok(()),
            Ok(response) => Err(SessionError::rejected(&response)),
            Err(e) => Err(e.into()),
        };
        self.finish(result)
    }

    /// Wipe every persisted key, not only the session
    pub async fn clear_all_data(&self) -> Result<(), SessionError> {
        self.storage.clear().await.context("Failed to clear client storage")?;
        self.state.send_replace(SessionState::default());
        info!("Cleared all client data");
        Ok(())
    }

    async fn persist(&self, token: Option<&str>, user: &User) -> anyhow::Result<()> {
        if let Some(token) = token {
            self.storage.set(TOKEN_KEY, token).await?;
        }
        let json = serde_json::to_string(user).context("Failed to serialize user")?;
        self.storage.set(USER_KEY, &json).await
    }

    async fn forget(&self) -> anyhow::Result<()> {
        let token = self.storage.remove(TOKEN_KEY).await;
        let user = self.storage.remove(USER_KEY).await;
        token.and(user)
    }

    fn begin(&self) {
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn finish<T>(&self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        let error = result.as_ref().err().map(ToString::to_string);
        self.state.send_modify(|s| {
            s.loading = false;
            s.error = error;
        });
        result
    }
}
