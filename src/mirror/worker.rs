//! Background thread that drains mirror events

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use super::{IdentityProvider, MirrorEvent, MirrorSink, RemoteMirror};

/// Sends events to a [`RemoteMirror`] on a worker thread.
///
/// `submit` never blocks on the network. Call [`BackgroundMirror::close`]
/// before exiting to let queued events go out.
pub struct BackgroundMirror {
    tx: Mutex<Option<Sender<MirrorEvent>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl BackgroundMirror {
    pub fn spawn(remote: Box<dyn RemoteMirror>, identity: Arc<dyn IdentityProvider>) -> Self {
        let (tx, rx) = mpsc::channel();
        let handle = std::thread::Builder::new()
            .name("sixtysix-mirror".to_string())
            .spawn(move || mirror_loop(remote, identity, rx));

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::warn!("Failed to start mirror thread, remote sync disabled: {}", e);
                None
            }
        };

        Self {
            tx: Mutex::new(handle.as_ref().map(|_| tx)),
            handle: Mutex::new(handle),
        }
    }

    /// Stop accepting events and wait for the queue to drain
    pub fn close(&self) {
        self.tx.lock().unwrap_or_else(|e| e.into_inner()).take();
        let handle = self.handle.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!("Mirror thread panicked");
            }
        }
    }
}

impl MirrorSink for BackgroundMirror {
    fn submit(&self, event: MirrorEvent) {
        let tx = self.tx.lock().unwrap_or_else(|e| e.into_inner());
        match tx.as_ref() {
            Some(tx) => {
                if tx.send(event).is_err() {
                    tracing::debug!("Mirror thread gone, event dropped");
                }
            }
            None => tracing::debug!("Mirror closed, event dropped"),
        }
    }
}

impl Drop for BackgroundMirror {
    fn drop(&mut self) {
        self.close();
    }
}

fn mirror_loop(
    remote: Box<dyn RemoteMirror>,
    identity: Arc<dyn IdentityProvider>,
    rx: Receiver<MirrorEvent>,
) {
    for event in rx {
        let Some(user_id) = identity.user_id() else {
            tracing::debug!("Not signed in, skipping {} write", event.table());
            continue;
        };

        match remote.apply(&user_id, &event) {
            Ok(()) => tracing::debug!("Mirrored {} for {}", event.table(), user_id),
            Err(e) => tracing::warn!("Remote mirror write failed: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::{MirrorError, StaticIdentity};

    struct Recorder {
        seen: Arc<Mutex<Vec<(String, &'static str)>>>,
        fail: bool,
    }

    impl RemoteMirror for Recorder {
        fn apply(&self, user_id: &str, event: &MirrorEvent) -> Result<(), MirrorError> {
            self.seen
                .lock()
                .unwrap()
                .push((user_id.to_string(), event.table()));
            if self.fail {
                return Err(MirrorError::Status {
                    table: event.table(),
                    status: 503,
                });
            }
            Ok(())
        }
    }

    fn event() -> MirrorEvent {
        MirrorEvent::SaveAchievement {
            achievement_id: "first_day".into(),
            day_unlocked: 1,
        }
    }

    #[test]
    fn test_events_reach_remote_after_close() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mirror = BackgroundMirror::spawn(
            Box::new(Recorder {
                seen: seen.clone(),
                fail: true,
            }),
            Arc::new(StaticIdentity::new(Some("u1".into()))),
        );

        mirror.submit(event());
        mirror.submit(event());
        mirror.close();

        // Failures don't stop the worker or reach the caller
        assert_eq!(seen.lock().unwrap().len(), 2);
        mirror.submit(event());
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_signed_out_events_are_skipped() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mirror = BackgroundMirror::spawn(
            Box::new(Recorder {
                seen: seen.clone(),
                fail: false,
            }),
            Arc::new(StaticIdentity::new(None)),
        );
        mirror.submit(event());
        mirror.close();
        assert!(seen.lock().unwrap().is_empty());
    }
}
