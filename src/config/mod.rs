use std::path::PathBuf;

/// Default base URL of the portal backend
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

const DEFAULT_USER_AGENT: &str = concat!("estate-portal/", env!("CARGO_PKG_VERSION"));
const STORAGE_DIR_NAME: &str = "estate-portal";

/// Runtime configuration, resolved from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL every endpoint path is appended to
    pub api_url: String,
    /// Directory holding the persisted session (token + cached user)
    pub storage_dir: PathBuf,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Config {
    /// Read configuration from process environment variables
    ///
    /// `ESTATE_API_URL`, `ESTATE_STORAGE_DIR` and `ESTATE_USER_AGENT` are
    /// honoured; anything unset falls back to its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("ESTATE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage_dir = non_empty("ESTATE_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_dir);
        let user_agent =
            non_empty("ESTATE_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Self {
            api_url: normalize_base_url(&api_url),
            storage_dir,
            user_agent,
        }
    }

    /// Replace the API base URL (e.g. from a command-line flag)
    pub fn with_api_url(mut self, api_url: &str) -> Self {
        self.api_url = normalize_base_url(api_url);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join(STORAGE_DIR_NAME)
}
