// Diagnostics handler
// Best-effort report on the optional database collaborator

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::{
    config::EnvPresence,
    db::{DatabaseProbe, ProbeState},
    error::ProbeError,
    state::AppState,
};

/// Most collection names the report will list
pub const MAX_COLLECTIONS: usize = 10;

/// Longest error text copied into the report, in characters
pub const MAX_ERROR_CHARS: usize = 50;

const SET: &str = "✅ Set";
const NOT_SET: &str = "❌ Not Set";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl DiagnosticsReport {
    fn new(env: EnvPresence) -> Self {
        let presence = |set: bool| (if set { SET } else { NOT_SET }).to_string();

        DiagnosticsReport {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: presence(env.database_url),
            database_name: presence(env.database_name),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

/// Cuts `message` down to at most `MAX_ERROR_CHARS` characters
pub fn truncate_error(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}

/// Probes the database and describes what happened. Every failure, including a
/// panicking or hung probe, ends up as text in the report.
pub async fn build_report(
    probe: Arc<dyn DatabaseProbe>,
    env: EnvPresence,
    timeout: Duration,
) -> DiagnosticsReport {
    let mut report = DiagnosticsReport::new(env);

    match probe.state() {
        ProbeState::Missing => {
            report.database =
                "❌ Database module not found (set DATABASE_URL to enable)".to_string();
        }
        ProbeState::Uninitialized => {
            report.database = "⚠️  Available but not initialized".to_string();
        }
        ProbeState::Ready => {
            report.database = "✅ Available".to_string();
            report.connection_status = "Connected".to_string();

            let mut task =
                tokio::spawn(async move { probe.collection_names(MAX_COLLECTIONS).await });

            match tokio::time::timeout(timeout, &mut task).await {
                Ok(Ok(Ok(mut names))) => {
                    names.truncate(MAX_COLLECTIONS);
                    report.collections = names;
                    report.database = "✅ Connected & Working".to_string();
                }
                Ok(Ok(Err(e))) => {
                    warn!("Listing database collections failed: {}", e);
                    report.database =
                        format!("⚠️  Connected but Error: {}", truncate_error(&e.to_string()));
                }
                Ok(Err(join_error)) => {
                    warn!("Database probe task failed: {}", join_error);
                    report.database = format!("❌ Error: {}", truncate_error(&join_error.to_string()));
                }
                Err(_) => {
                    task.abort();
                    let e = ProbeError::Timeout(timeout);
                    warn!("Listing database collections failed: {}", e);
                    report.database =
                        format!("⚠️  Connected but Error: {}", truncate_error(&e.to_string()));
                }
            }
        }
    }

    report
}

/// Database diagnostics, always 200
/// GET /test
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    info!("Running database diagnostics against {}", state.probe.describe());

    let report = build_report(
        Arc::clone(&state.probe),
        state.env_presence,
        state.probe_timeout,
    )
    .await;

    info!("Database diagnostics: {}", report.database);
    Json(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Probe with a scripted outcome
    enum FakeProbe {
        Uninitialized,
        Names(Vec<String>),
        Fails(String),
        Hangs,
        Panics,
    }

    #[async_trait]
    impl DatabaseProbe for FakeProbe {
        fn state(&self) -> ProbeState {
            match self {
                FakeProbe::Uninitialized => ProbeState::Uninitialized,
                _ => ProbeState::Ready,
            }
        }

        fn describe(&self) -> String {
            "fake".to_string()
        }

        async fn collection_names(&self, limit: usize) -> Result<Vec<String>, ProbeError> {
            match self {
                FakeProbe::Uninitialized => Err(ProbeError::NotInitialized),
                FakeProbe::Names(names) => Ok(names.iter().take(limit).cloned().collect()),
                FakeProbe::Fails(message) => Err(ProbeError::unavailable(message.clone())),
                FakeProbe::Hangs => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(Vec::new())
                }
                FakeProbe::Panics => panic!("probe exploded"),
            }
        }
    }

    async fn report_for(probe: FakeProbe) -> DiagnosticsReport {
        build_report(
            Arc::new(probe),
            EnvPresence::default(),
            Duration::from_millis(100),
        )
        .await
    }

    #[tokio::test]
    async fn test_missing_module() {
        let report = build_report(
            Arc::new(crate::db::NullProbe),
            EnvPresence::default(),
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(report.backend, "✅ Running");
        assert!(report.database.starts_with("❌ Database module not found"));
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
        assert_eq!(report.database_url, NOT_SET);
        assert_eq!(report.database_name, NOT_SET);
    }

    #[tokio::test]
    async fn test_uninitialized_handle() {
        let report = report_for(FakeProbe::Uninitialized).await;

        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.connection_status, "Not Connected");
    }

    #[tokio::test]
    async fn test_connected_and_working_caps_collections() {
        let names: Vec<String> = (0..15).map(|i| format!("table_{:02}", i)).collect();
        let report = report_for(FakeProbe::Names(names)).await;

        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), MAX_COLLECTIONS);
        assert_eq!(report.collections[0], "table_00");
        assert_eq!(report.collections[9], "table_09");
    }

    #[tokio::test]
    async fn test_connected_with_no_collections() {
        let report = report_for(FakeProbe::Names(Vec::new())).await;

        assert_eq!(report.database, "✅ Connected & Working");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn test_enumeration_error_is_truncated() {
        let report = report_for(FakeProbe::Fails("x".repeat(200))).await;

        let prefix = "⚠️  Connected but Error: ";
        assert!(report.database.starts_with(prefix));
        assert_eq!(report.database[prefix.len()..].chars().count(), MAX_ERROR_CHARS);
        assert_eq!(report.connection_status, "Connected");
        assert!(report.collections.is_empty());
    }

    #[tokio::test]
    async fn test_hung_probe_times_out() {
        let report = report_for(FakeProbe::Hangs).await;

        assert_eq!(report.database, "⚠️  Connected but Error: timed out after 100ms");
    }

    #[tokio::test]
    async fn test_panicking_probe_is_contained() {
        let report = report_for(FakeProbe::Panics).await;

        assert!(report.database.starts_with("❌ Error: "));
        assert!(report.database.chars().count() <= "❌ Error: ".chars().count() + MAX_ERROR_CHARS);
    }

    #[tokio::test]
    async fn test_presence_flags_never_echo_values() {
        let env = EnvPresence {
            database_url: true,
            database_name: false,
        };
        let report = build_report(Arc::new(crate::db::NullProbe), env, Duration::from_secs(1)).await;

        assert_eq!(report.database_url, SET);
        assert_eq!(report.database_name, NOT_SET);
    }

    #[test]
    fn test_truncate_error_counts_characters() {
        assert_eq!(truncate_error("short"), "short");
        assert_eq!(truncate_error(&"é".repeat(80)).chars().count(), MAX_ERROR_CHARS);
    }
}
