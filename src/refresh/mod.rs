//! Schedule source and the periodic refresh job.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::Config;
use crate::errors::{Result, ScheduleError};
use crate::index::ScheduleIndexBuilder;
use crate::models::{RawScheduleDocument, ScheduleSnapshot};
use crate::store::SnapshotStore;

/// Anything that can hand out the current upstream document.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch(&self) -> Result<RawScheduleDocument>;
}

/// Fetches the document over HTTP.
pub struct HttpScheduleSource {
    client: reqwest::Client,
    url: String,
}

impl HttpScheduleSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.source_url.clone(), config.fetch_timeout)
    }
}

#[async_trait]
impl ScheduleSource for HttpScheduleSource {
    async fn fetch(&self) -> Result<RawScheduleDocument> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleError::Fetch(format!(
                "{} returned {}",
                self.url, status
            )));
        }

        let body = response.bytes().await?;
        RawScheduleDocument::from_slice(&body)
    }
}

/// Fetches, builds and publishes snapshots.
pub struct RefreshScheduler<S> {
    source: S,
    builder: ScheduleIndexBuilder,
    interval: Duration,
}

impl<S: ScheduleSource + 'static> RefreshScheduler<S> {
    pub fn new(source: S, builder: ScheduleIndexBuilder, interval: Duration) -> Self {
        Self {
            source,
            builder,
            interval,
        }
    }

    /// Fetch and build one snapshot without publishing it.
    pub async fn load(&self) -> Result<ScheduleSnapshot> {
        let document = self.source.fetch().await?;
        self.builder.build(&document, Utc::now())
    }

    /// Build the first snapshot. Failure here has no fallback and must stop startup.
    pub async fn initial_store(&self) -> Result<SnapshotStore> {
        let snapshot = self.load().await?;
        log_snapshot("Initial schedule loaded", &snapshot);
        Ok(SnapshotStore::new(snapshot))
    }

    /// One tick: replace the snapshot on success, keep the current one on failure.
    pub async fn refresh_once(&self, store: &SnapshotStore) -> Result<()> {
        match self.load().await {
            Ok(snapshot) => {
                log_snapshot("Schedule refreshed", &snapshot);
                store.replace(snapshot);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    code = e.error_code(),
                    "Failed to refresh schedule, keeping current snapshot: {}",
                    e
                );
                Err(e)
            }
        }
    }

    /// Refresh every interval until the runtime shuts down.
    pub fn spawn(self, store: Arc<SnapshotStore>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; the initial load already covered it.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let _ = self.refresh_once(&store).await;
            }
        })
    }
}

fn log_snapshot(message: &str, snapshot: &ScheduleSnapshot) {
    tracing::info!(
        version = %snapshot.version,
        classes = snapshot.class_index.len(),
        teachers = snapshot.teacher_index.len(),
        "{}",
        message
    );
}
