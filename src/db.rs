use crate::config::DatabaseConfig;
use crate::error::ProbeError;
use anyhow::Context;
use async_trait::async_trait;
use deadpool_postgres::{Config, Pool, Runtime};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tracing::{info, warn};

/// What the diagnostics endpoint can learn about the database collaborator
/// before talking to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    /// No database support is configured at all
    Missing,
    /// Configured, but no usable handle could be built
    Uninitialized,
    /// A handle exists and can be queried
    Ready,
}

impl ProbeState {
    pub fn is_available(self) -> bool {
        !matches!(self, ProbeState::Missing)
    }
}

/// Capability interface over an optional database. Nothing outside the
/// diagnostics endpoint depends on it.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    fn state(&self) -> ProbeState;

    /// Short human readable description, used in logs
    fn describe(&self) -> String;

    /// Lists at most `limit` collection (table) names.
    async fn collection_names(&self, limit: usize) -> Result<Vec<String>, ProbeError>;
}

/// Stand-in used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProbe;

#[async_trait]
impl DatabaseProbe for NullProbe {
    fn state(&self) -> ProbeState {
        ProbeState::Missing
    }

    fn describe(&self) -> String {
        "no database configured".to_string()
    }

    async fn collection_names(&self, _limit: usize) -> Result<Vec<String>, ProbeError> {
        Err(ProbeError::NotInitialized)
    }
}

/// PostgreSQL collaborator backed by a deadpool pool.
/// The pool is `None` when the configuration could not be turned into one.
#[derive(Clone)]
pub struct Database {
    pool: Option<Pool>,
    name: Option<String>,
}

impl Database {
    /// Builds the pool from configuration. Connections are opened lazily,
    /// so an unreachable server only shows up once the pool is used.
    pub fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        config.validate()?;

        info!("Creating PostgreSQL connection pool ({:?})", config);

        let pool = Self::create_pool(config)?;

        Ok(Database {
            pool: Some(pool),
            name: config.name.clone(),
        })
    }

    /// Database whose handle could not be created
    pub fn uninitialized(name: Option<String>) -> Self {
        Database { pool: None, name }
    }

    /// Same as `connect`, but degrades to an uninitialized handle on failure.
    pub fn connect_or_uninitialized(config: &DatabaseConfig) -> Self {
        match Self::connect(config) {
            Ok(db) => db,
            Err(e) => {
                warn!("Database left uninitialized: {:#}", e);
                Self::uninitialized(config.name.clone())
            }
        }
    }

    fn create_pool(config: &DatabaseConfig) -> anyhow::Result<Pool> {
        let mut pg_config = Config::new();

        pg_config.url = Some(config.url.clone());
        // DATABASE_NAME wins over the database named in the URL
        if let Some(ref name) = config.name {
            pg_config.dbname = Some(name.clone());
        }

        pg_config.ssl_mode = Some(match config.ssl_mode.as_str() {
            "disable" => deadpool_postgres::SslMode::Disable,
            "require" => deadpool_postgres::SslMode::Require,
            _ => deadpool_postgres::SslMode::Prefer,
        });

        pg_config.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        pg_config.pool = Some(deadpool_postgres::PoolConfig::new(config.max_connections));

        let tls_connector = TlsConnector::builder()
            .build()
            .context("TLS connector creation failed")?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config
            .create_pool(Some(Runtime::Tokio1), tls)
            .context("Connection pool creation failed")
    }
}

#[async_trait]
impl DatabaseProbe for Database {
    fn state(&self) -> ProbeState {
        if self.pool.is_some() {
            ProbeState::Ready
        } else {
            ProbeState::Uninitialized
        }
    }

    fn describe(&self) -> String {
        let name = self.name.as_deref().unwrap_or("database from DATABASE_URL");
        match self.state() {
            ProbeState::Ready => format!("PostgreSQL ({})", name),
            _ => format!("PostgreSQL ({}, not initialized)", name),
        }
    }

    async fn collection_names(&self, limit: usize) -> Result<Vec<String>, ProbeError> {
        let pool = self.pool.as_ref().ok_or(ProbeError::NotInitialized)?;
        let client = pool.get().await?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let query = r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = 'public'
            ORDER BY table_name
            LIMIT $1
        "#;

        let rows = client.query(query, &[&limit]).await?;

        Ok(rows.iter().map(|row| row.get(0)).collect())
    }
}
