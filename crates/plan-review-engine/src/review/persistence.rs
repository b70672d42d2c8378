use std::time::{Duration, Instant};

use crate::models::Annotation;
use crate::store::AnnotationStore;

/// Quiet period after the last change before annotations are saved.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Saves a plan's annotations once changes settle, and once more on teardown.
///
/// Time is supplied by the caller so the debounce is deterministic. Store
/// failures are logged and otherwise ignored; the in-memory list stays the
/// source of truth for the session.
pub struct DebouncedSaver<S: AnnotationStore> {
    store: S,
    plan_id: String,
    delay: Duration,
    latest: Option<Vec<Annotation>>,
    deadline: Option<Instant>,
    flushed: bool,
}

impl<S: AnnotationStore> DebouncedSaver<S> {
    pub fn new(store: S, plan_id: impl Into<String>) -> Self {
        Self::with_delay(store, plan_id, SAVE_DEBOUNCE)
    }

    pub fn with_delay(store: S, plan_id: impl Into<String>, delay: Duration) -> Self {
        Self {
            store,
            plan_id: plan_id.into(),
            delay,
            latest: None,
            deadline: None,
            flushed: false,
        }
    }

    /// Records a new annotation list and restarts the quiet period.
    pub fn changed(&mut self, annotations: &[Annotation], now: Instant) {
        self.latest = Some(annotations.to_vec());
        self.deadline = Some(now + self.delay);
        self.flushed = false;
    }

    /// Saves if the quiet period has elapsed. Returns whether a save was attempted.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.save();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Saves the latest list now, whether or not a save is pending.
    pub fn flush(&mut self) {
        self.deadline = None;
        self.flushed = true;
        self.save();
    }

    fn save(&mut self) {
        let Some(annotations) = &self.latest else {
            return;
        };
        match self.store.save(&self.plan_id, annotations) {
            Ok(()) => log::debug!(
                "saved {} annotations for {}",
                annotations.len(),
                self.plan_id
            ),
            Err(e) => log::warn!("failed to save annotations for {}: {e}", self.plan_id),
        }
    }
}

impl<S: AnnotationStore> Drop for DebouncedSaver<S> {
    fn drop(&mut self) {
        if !self.flushed {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnnotationKind;
    use crate::store::{MemoryStore, StoreError};
    use std::cell::Cell;

    fn deletion(id: &str) -> Annotation {
        Annotation {
            id: id.to_string(),
            block_id: "block-0".to_string(),
            start_offset: 0,
            end_offset: 4,
            kind: AnnotationKind::Deletion,
            original_text: "text".to_string(),
            created_at: 0,
            author: None,
            start_meta: None,
            end_meta: None,
        }
    }

    /// Counts saves on top of an in-memory store.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        saves: Cell<usize>,
        fail: bool,
    }

    impl AnnotationStore for CountingStore {
        fn save(&self, plan_id: &str, annotations: &[Annotation]) -> Result<(), StoreError> {
            self.saves.set(self.saves.get() + 1);
            if self.fail {
                return Err(StoreError::Poisoned);
            }
            self.inner.save(plan_id, annotations)
        }

        fn load(&self, plan_id: &str) -> Result<Vec<Annotation>, StoreError> {
            self.inner.load(plan_id)
        }
    }

    #[test]
    fn saves_only_after_quiet_period() {
        let store = CountingStore::default();
        let mut saver = DebouncedSaver::new(&store, "plan");
        let t0 = Instant::now();

        saver.changed(&[deletion("a")], t0);
        assert!(!saver.poll(t0 + Duration::from_millis(300)));

        saver.changed(&[deletion("a"), deletion("b")], t0 + Duration::from_millis(300));
        assert!(!saver.poll(t0 + Duration::from_millis(600)));
        assert!(saver.poll(t0 + Duration::from_millis(800)));
        assert!(!saver.poll(t0 + Duration::from_millis(900)));

        assert_eq!(store.saves.get(), 1);
        assert_eq!(store.inner.load("plan").unwrap().len(), 2);
    }

    #[test]
    fn drop_saves_final_state_once() {
        let store = CountingStore::default();
        {
            let mut saver = DebouncedSaver::new(&store, "plan");
            saver.changed(&[deletion("a")], Instant::now());
        }
        assert_eq!(store.saves.get(), 1);
        assert_eq!(store.inner.load("plan").unwrap().len(), 1);
    }

    #[test]
    fn explicit_flush_is_not_repeated_on_drop() {
        let store = CountingStore::default();
        {
            let mut saver = DebouncedSaver::new(&store, "plan");
            saver.changed(&[deletion("a")], Instant::now());
            saver.flush();
            assert!(!saver.is_pending());
        }
        assert_eq!(store.saves.get(), 1);
    }

    #[test]
    fn untouched_saver_writes_nothing() {
        let store = CountingStore::default();
        drop(DebouncedSaver::new(&store, "plan"));
        assert_eq!(store.saves.get(), 0);
    }

    #[test]
    fn store_failures_are_swallowed() {
        let store = CountingStore {
            fail: true,
            ..Default::default()
        };
        let mut saver = DebouncedSaver::new(&store, "plan");
        let t0 = Instant::now();
        saver.changed(&[deletion("a")], t0);

        assert!(saver.poll(t0 + SAVE_DEBOUNCE));
        drop(saver);
        assert_eq!(store.saves.get(), 2);
    }
}
