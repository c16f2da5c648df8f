//! Wiring for commands that work on challenge data.
//!
//! Opens the configured store, the tracker and (when configured) the
//! background mirror.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

use sixtysix::clock::{Clock, SystemClock};
use sixtysix::config::{Config, RemoteSettings};
use sixtysix::mirror::{BackgroundMirror, MirrorSink, NoMirror, RestMirror, StaticIdentity};
use sixtysix::store::{open_backend, Persistence};
use sixtysix::subscription::{effective_subscription, SubscriptionState};
use sixtysix::{Applied, ChallengeTracker, RolloverKind};

pub struct Session {
    pub config: Config,
    pub tracker: ChallengeTracker,
    clock: Arc<dyn Clock>,
    mirror: Option<Arc<BackgroundMirror>>,
}

impl Session {
    pub fn open(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;
        let data_dir = data_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.data_dir());

        let store = open_backend(config.storage.backend, &data_dir).with_context(|| {
            format!(
                "Failed to open {} store at {}",
                config.storage.backend.as_str(),
                data_dir.display()
            )
        })?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let (mirror, sink) = build_mirror(&config.remote);
        let (tracker, rollover) = ChallengeTracker::open(Persistence::new(store), clock.clone(), sink);

        report_rollover(&rollover.value);
        saved(rollover);

        Ok(Self {
            config,
            tracker,
            clock,
            mirror,
        })
    }

    pub fn persistence(&self) -> &Persistence {
        self.tracker.persistence()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now_utc()
    }

    /// Plan the user is entitled to right now
    pub fn subscription(&self) -> SubscriptionState {
        let persistence = self.persistence();
        effective_subscription(
            persistence.subscription(),
            persistence.trial().as_ref(),
            self.now_utc(),
        )
    }

    /// Flush queued mirror writes
    pub fn finish(self) {
        if let Some(mirror) = self.mirror {
            mirror.close();
        }
    }
}

/// Unwrap a tracker result, warning when it could not be written to disk
pub fn saved<T>(applied: Applied<T>) -> T {
    if let Err(e) = &applied.persisted {
        eprintln!("Warning: change kept for this run only, saving failed: {}", e);
    }
    applied.value
}

fn build_mirror(remote: &RemoteSettings) -> (Option<Arc<BackgroundMirror>>, Arc<dyn MirrorSink>) {
    if !remote.is_ready() {
        tracing::debug!("Remote mirror disabled");
        return (None, Arc::new(NoMirror));
    }

    let rest = RestMirror::new(
        &remote.base_url,
        &remote.api_key,
        Duration::from_secs(remote.timeout_secs),
    );
    let identity = Arc::new(StaticIdentity::new(Some(remote.user_id.clone())));
    let mirror = Arc::new(BackgroundMirror::spawn(Box::new(rest), identity));
    let sink: Arc<dyn MirrorSink> = mirror.clone();
    (Some(mirror), sink)
}

fn report_rollover(kind: &RolloverKind) {
    match kind {
        RolloverKind::None => {}
        RolloverKind::Completed { date, achievements } => {
            println!("{} had every habit checked and was completed.", date);
            for achievement in achievements {
                println!("Achievement unlocked: {} - {}", achievement.name, achievement.description);
            }
        }
        RolloverKind::Failed { date, failed_day } => {
            println!(
                "{} was left unfinished. Day {} is lost, back to day 1.",
                date, failed_day
            );
        }
        RolloverKind::Lapsed { date } => {
            println!("{} was left unfinished. Still on day 1, fresh checklist.", date);
        }
    }
}
