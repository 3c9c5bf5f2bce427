//! Client for the real-estate portal REST API.
//!
//! [`api::ApiClient`] wraps every HTTP call in a uniform
//! [`api::ApiResponse`] envelope, the [`services`] map REST resources onto
//! typed calls, and [`session::SessionStore`] tracks the signed-in user
//! across runs through [`storage::ClientStorage`].

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ApiError, ApiResponse};
pub use config::Config;
pub use session::{SessionError, SessionState, SessionStore};
