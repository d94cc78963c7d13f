//! Resilient session acquisition
//!
//! Login against the vendor cloud is the one retried call in the system:
//! a fixed number of attempts with a fixed delay between them, no backoff
//! growth, no jitter. Exhaustion is a terminal failure the refresh reports
//! as "no data available this cycle" — never a partial snapshot.

use std::fmt;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::WearableClient;
use crate::error::{FetchError, RefreshError};

/// Vendor account credentials, threaded explicitly into acquisition.
///
/// Always passed by value from the caller's configuration; nothing in the
/// crate reads credentials from ambient state.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Manual Debug so the password never reaches logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Retry policy for session acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Total login attempts before giving up
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub retry_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(3),
        }
    }
}

/// Vendor login boundary.
///
/// Implementations own authentication against the wearable cloud and hand
/// back an authenticated [`WearableClient`]. A single `login` call is one
/// attempt; the retry loop lives in [`acquire_session`].
pub trait SessionBackend {
    type Client: WearableClient;

    fn login(&self, credentials: &Credentials) -> Result<Self::Client, FetchError>;
}

/// Acquire an authenticated session, retrying per `config`.
///
/// Blocks the calling thread for the full delay between attempts. There is
/// no sleep after the final failure. On exhaustion returns
/// [`RefreshError::SessionUnavailable`] carrying the attempt count and the
/// last login error.
pub fn acquire_session<B: SessionBackend>(
    backend: &B,
    credentials: &Credentials,
    config: &SessionConfig,
) -> Result<B::Client, RefreshError> {
    let attempts = config.max_attempts.max(1);
    let mut last_error = FetchError::Network("no attempt made".to_string());

    for attempt in 1..=attempts {
        match backend.login(credentials) {
            Ok(client) => return Ok(client),
            Err(e) => {
                last_error = e;
                if attempt < attempts {
                    thread::sleep(config.retry_delay);
                }
            }
        }
    }

    Err(RefreshError::SessionUnavailable {
        attempts,
        last_error,
    })
}
