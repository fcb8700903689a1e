//! Shared router state

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::config::EnvPresence;
use crate::db::{DatabaseProbe, NullProbe};
use crate::middleware::REQUEST_TIMEOUT;

/// Upper bound on the diagnostics probe when no database timeout is configured
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest the diagnostics endpoint may wait on the probe. Stays under
/// `REQUEST_TIMEOUT` so `/test` answers before the request timeout fires.
pub const MAX_PROBE_TIMEOUT: Duration = REQUEST_TIMEOUT.saturating_sub(Duration::from_secs(5));

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Language catalog
    pub catalog: Catalog,

    /// Optional database collaborator (a `NullProbe` when none is configured)
    pub probe: Arc<dyn DatabaseProbe>,

    /// Which database variables were set at startup
    pub env_presence: EnvPresence,

    /// How long the diagnostics endpoint waits on the probe
    pub probe_timeout: Duration,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(NullProbe), EnvPresence::default())
    }
}

impl AppState {
    /// State over the builtin catalog
    pub fn new(probe: Arc<dyn DatabaseProbe>, env_presence: EnvPresence) -> Self {
        Self {
            catalog: Catalog::builtin(),
            probe,
            env_presence,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Sets the probe bound, capped at `MAX_PROBE_TIMEOUT`
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        if timeout > MAX_PROBE_TIMEOUT {
            tracing::warn!(
                "Probe timeout of {:?} exceeds the request timeout, capping at {:?}",
                timeout,
                MAX_PROBE_TIMEOUT
            );
        }
        self.probe_timeout = timeout.min(MAX_PROBE_TIMEOUT);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_timeout_stays_below_request_timeout() {
        let state = AppState::default().with_probe_timeout(Duration::from_secs(60));

        assert_eq!(state.probe_timeout, MAX_PROBE_TIMEOUT);
        assert!(state.probe_timeout < REQUEST_TIMEOUT);
    }

    #[test]
    fn test_short_probe_timeout_is_kept() {
        let state = AppState::default().with_probe_timeout(Duration::from_secs(2));
        assert_eq!(state.probe_timeout, Duration::from_secs(2));

        assert_eq!(AppState::default().probe_timeout, DEFAULT_PROBE_TIMEOUT);
    }
}
