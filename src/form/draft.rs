use crate::models::answer::FormData;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Contract the form session consumes for draft persistence. The store is
/// an opaque blob sink: saving is best-effort (callers tolerate silent
/// failure), restoring anything unreadable yields `None`.
#[cfg_attr(test, mockall::automock)]
pub trait DraftStore: Send + Sync {
    fn save(&self, form: &FormData) -> std::io::Result<()>;
    fn restore(&self) -> Option<FormData>;
    fn clear(&self);
}

/// On-device draft storage: one JSON blob at a fixed path.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DraftStore for FileDraftStore {
    fn save(&self, form: &FormData) -> std::io::Result<()> {
        let bytes = serde_json::to_vec(form)?;
        std::fs::write(&self.path, bytes)
    }

    fn restore(&self) -> Option<FormData> {
        let bytes = std::fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Debounced draft writer. Mutations overwrite a pending snapshot; a
/// background task persists the latest snapshot once per debounce window,
/// so bursts of input produce one write. Save failures are logged and
/// swallowed.
pub struct AutoSaver {
    pending: Arc<Mutex<Option<FormData>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl AutoSaver {
    pub fn spawn(store: Arc<dyn DraftStore>, debounce: Duration) -> Self {
        let pending: Arc<Mutex<Option<FormData>>> = Arc::new(Mutex::new(None));
        let worker_pending = pending.clone();
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(debounce);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // first tick completes immediately; skip it so the debounce
            // window applies to the first mutation too
            tick.tick().await;
            loop {
                tick.tick().await;
                let snapshot = worker_pending
                    .lock()
                    .expect("auto-save mutex poisoned")
                    .take();
                if let Some(form) = snapshot {
                    if let Err(e) = store.save(&form) {
                        tracing::warn!(error = ?e, "draft auto-save failed");
                    }
                }
            }
        });
        Self { pending, handle }
    }

    pub fn schedule(&self, form: &FormData) {
        *self.pending.lock().expect("auto-save mutex poisoned") = Some(form.clone());
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::AnswerValue;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingStore {
        saves: AtomicUsize,
        last: Mutex<Option<FormData>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                saves: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }
    }

    impl DraftStore for RecordingStore {
        fn save(&self, form: &FormData) -> std::io::Result<()> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(form.clone());
            Ok(())
        }

        fn restore(&self) -> Option<FormData> {
            self.last.lock().unwrap().clone()
        }

        fn clear(&self) {
            *self.last.lock().unwrap() = None;
        }
    }

    #[test]
    fn file_store_round_trips() {
        let path = std::env::temp_dir().join(format!("draft-{}.json", uuid::Uuid::new_v4()));
        let store = FileDraftStore::new(&path);

        let mut form = FormData::new();
        form.set("s1", "q1", AnswerValue::Single("yes".into()));
        form.set("s1", "q2", AnswerValue::Multiple(vec!["a".into(), "b".into()]));

        tokio_test::assert_ok!(store.save(&form));
        assert_eq!(store.restore(), Some(form));

        store.clear();
        assert_eq!(store.restore(), None);
    }

    #[test]
    fn file_store_restores_none_on_garbage() {
        let path = std::env::temp_dir().join(format!("draft-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, b"not json").unwrap();
        let store = FileDraftStore::new(&path);
        assert_eq!(store.restore(), None);
        store.clear();
    }

    #[tokio::test(start_paused = true)]
    async fn auto_saver_coalesces_bursts() {
        let store = Arc::new(RecordingStore::new());
        let saver = AutoSaver::spawn(store.clone(), Duration::from_millis(100));

        let mut form = FormData::new();
        for i in 0..5 {
            form.set("s1", &format!("q{}", i), AnswerValue::Single("v".into()));
            saver.schedule(&form);
        }

        tokio::time::sleep(Duration::from_millis(250)).await;
        // one burst, one write
        assert_eq!(store.saves.load(Ordering::SeqCst), 1);
        let saved = store.restore().unwrap();
        assert!(saved.is_answered("s1", "q4"));
    }
}
