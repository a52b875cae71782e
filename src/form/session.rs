use crate::catalog::Catalog;
use crate::error::Result;
use crate::form::draft::{AutoSaver, DraftStore};
use crate::form::state::{FormState, Progress, SectionProgress};
use crate::models::answer::AnswerValue;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// One user's assessment session: the form state plus its draft store.
/// The draft is restored at construction; every mutation schedules a
/// debounced persist; `clear_draft` is called after successful submission.
///
/// Must be created inside a tokio runtime (the auto-saver is a task).
pub struct FormSession<'a> {
    state: FormState<'a>,
    store: Arc<dyn DraftStore>,
    autosaver: AutoSaver,
}

impl<'a> FormSession<'a> {
    pub fn new(catalog: &'a Catalog, store: Arc<dyn DraftStore>) -> Self {
        Self::with_debounce(catalog, store, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(
        catalog: &'a Catalog,
        store: Arc<dyn DraftStore>,
        debounce: Duration,
    ) -> Self {
        let state = match store.restore() {
            Some(data) => FormState::from_data(catalog, data),
            None => FormState::new(catalog),
        };
        let autosaver = AutoSaver::spawn(store.clone(), debounce);
        Self {
            state,
            store,
            autosaver,
        }
    }

    pub fn update_answer(
        &mut self,
        section_id: &str,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<()> {
        self.state.update_answer(section_id, question_id, value)?;
        self.autosaver.schedule(self.state.data());
        Ok(())
    }

    pub fn toggle_option(
        &mut self,
        section_id: &str,
        question_id: &str,
        option: &str,
    ) -> Result<()> {
        self.state.toggle_option(section_id, question_id, option)?;
        self.autosaver.schedule(self.state.data());
        Ok(())
    }

    /// Persists the current state immediately, bypassing the debounce.
    /// Best-effort like the auto-saver.
    pub fn flush(&self) {
        if let Err(e) = self.store.save(self.state.data()) {
            tracing::warn!(error = ?e, "draft flush failed");
        }
    }

    /// Erases the persisted draft. Called after successful submission.
    pub fn clear_draft(&self) {
        self.store.clear();
    }

    pub fn validate_section(&mut self, index: usize) -> bool {
        self.state.validate_section(index)
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    pub fn progress(&self) -> Progress {
        self.state.progress()
    }

    pub fn section_progress(&self, index: usize) -> SectionProgress {
        self.state.section_progress(index)
    }

    pub fn first_unanswered_question(&self, index: usize) -> Option<&'a str> {
        self.state.first_unanswered_question(index)
    }

    pub fn error(&self, section_id: &str, question_id: &str) -> Option<&str> {
        self.state.error(section_id, question_id)
    }

    pub fn state(&self) -> &FormState<'a> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::draft::MockDraftStore;
    use crate::models::answer::FormData;

    fn load_catalog() -> Catalog {
        Catalog::from_embedded().unwrap().0
    }

    #[tokio::test]
    async fn session_restores_persisted_draft_at_construction() {
        let catalog = load_catalog();

        let mut saved = FormData::new();
        saved.set(
            "business-strategy",
            "identified-problems",
            AnswerValue::Single("Ideas discussed but not formalized".into()),
        );

        let mut store = MockDraftStore::new();
        store.expect_restore().times(1).return_const(Some(saved));

        let session = FormSession::new(&catalog, Arc::new(store));
        assert!(session
            .state()
            .data()
            .is_answered("business-strategy", "identified-problems"));
        assert_eq!(session.progress().answered, 1);
    }

    #[tokio::test]
    async fn session_starts_empty_without_a_draft() {
        let catalog = load_catalog();
        let mut store = MockDraftStore::new();
        store.expect_restore().times(1).returning(|| None);

        let session = FormSession::new(&catalog, Arc::new(store));
        assert_eq!(session.progress().answered, 0);
    }

    #[tokio::test]
    async fn clear_draft_reaches_the_store() {
        let catalog = load_catalog();
        let mut store = MockDraftStore::new();
        store.expect_restore().returning(|| None);
        store.expect_clear().times(1).return_const(());

        let session = FormSession::new(&catalog, Arc::new(store));
        session.clear_draft();
    }

    #[tokio::test(start_paused = true)]
    async fn mutations_persist_after_the_debounce_window() {
        let catalog = load_catalog();
        let mut store = MockDraftStore::new();
        store.expect_restore().returning(|| None);
        store
            .expect_save()
            .times(1)
            .withf(|form| form.is_answered("business-strategy", "identified-problems"))
            .returning(|_| Ok(()));

        let mut session =
            FormSession::with_debounce(&catalog, Arc::new(store), Duration::from_millis(100));
        session
            .update_answer(
                "business-strategy",
                "identified-problems",
                AnswerValue::Single("Still exploring – no clear ideas yet".into()),
            )
            .unwrap();

        // past the debounce window the pending snapshot is written once
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}
