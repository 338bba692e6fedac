//! List screen controller
//!
//! A `ListScreen` ties one backend resource to the query engine: it owns the
//! snapshot, the query state and the rows currently shown. Every user action
//! updates the state and re-runs the engine; backend mutations touch the
//! snapshot only once the backend confirmed them.

use crate::config::ScreenConfig;
use crate::core::error::{ConfigError, EntityError};
use crate::core::{AccessPolicy, Backend, ConsoleError, ConsoleResult, Record, Session, Toggleable};
use crate::forms::RecordForm;
use crate::query::{Prefilter, QueryEngine, QueryResult, QueryState, SortDirection};
use crate::screen::snapshot::Snapshot;
use std::sync::Arc;
use uuid::Uuid;

/// Controller of one list screen
pub struct ListScreen<T: Record> {
    backend: Arc<dyn Backend<T>>,
    session: Arc<Session>,
    policy: AccessPolicy,
    engine: QueryEngine<T>,
    state: QueryState,
    snapshot: Snapshot<T>,
    prefilter: Option<Prefilter>,
    view: QueryResult<T>,
    last_error: Option<String>,
}

impl<T: Record> ListScreen<T> {
    /// Screen with default settings: page size 10, no sort, signed-in users only
    pub fn new(backend: Arc<dyn Backend<T>>, session: Arc<Session>) -> Self {
        Self {
            backend,
            session,
            policy: AccessPolicy::Authenticated,
            engine: QueryEngine::new(),
            state: QueryState::default(),
            snapshot: Snapshot::new(),
            prefilter: None,
            view: QueryResult::default(),
            last_error: None,
        }
    }

    /// Screen built from its configuration entry
    pub fn from_config(
        backend: Arc<dyn Backend<T>>,
        session: Arc<Session>,
        config: &ScreenConfig,
    ) -> ConsoleResult<Self> {
        if config.resource != T::resource_name() {
            return Err(ConfigError::InvalidValue {
                field: "resource".to_string(),
                value: config.resource.clone(),
                message: format!("screen lists '{}'", T::resource_name()),
            }
            .into());
        }
        let mut screen = Self::new(backend, session).with_policy(config.access_policy());
        screen.state = config.initial_state()?;
        if let Some(fields) = &config.search_fields {
            screen.engine = QueryEngine::with_search_fields(fields.iter().cloned());
        }
        Ok(screen)
    }

    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.state = QueryState::new(page_size);
        self
    }

    pub fn with_engine(mut self, engine: QueryEngine<T>) -> Self {
        self.engine = engine;
        self
    }

    /// Rows of the current page with the filtered total
    pub fn view(&self) -> &QueryResult<T> {
        &self.view
    }

    pub fn rows(&self) -> &[T] {
        &self.view.data
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn snapshot(&self) -> &Snapshot<T> {
        &self.snapshot
    }

    pub fn prefilter(&self) -> Option<&Prefilter> {
        self.prefilter.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Message of the last failed action, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Footer text for the current page
    pub fn summary(&self) -> String {
        self.state.summary()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Fetch the full collection and replace the snapshot.
    ///
    /// On failure the previous snapshot and page stay as they were.
    pub async fn load(&mut self) -> ConsoleResult<()> {
        let action = format!("list {}", T::resource_name());
        self.authorize(&action)?;

        match self.backend.list(&self.session).await {
            Ok(records) => {
                tracing::info!(
                    resource = T::resource_name(),
                    count = records.len(),
                    "loaded records"
                );
                self.snapshot.replace_all(records);
                self.last_error = None;
                self.requery();
                Ok(())
            }
            Err(err) => Err(self.fail(&action, err)),
        }
    }

    /// Reload after an external change
    pub async fn refresh(&mut self) -> ConsoleResult<()> {
        self.load().await
    }

    // ------------------------------------------------------------------
    // Query actions
    // ------------------------------------------------------------------

    /// Search, going back to page 1
    pub fn search(&mut self, term: &str) {
        self.state.set_search_term(term);
        self.requery();
    }

    /// Column header click: `asc → desc → none`
    pub fn sort_by(&mut self, column: &str) {
        self.state.toggle_sort(column);
        self.requery();
    }

    pub fn set_sort(&mut self, column: &str, direction: Option<SortDirection>) {
        self.state.set_sort(column, direction);
        self.requery();
    }

    /// Go to a page; out-of-range pages are clamped by the engine
    pub fn go_to_page(&mut self, page: usize) {
        self.state.set_page(page);
        self.requery();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.state.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.state.page.saturating_sub(1));
    }

    /// Replace the entity filter applied before search, going back to page 1
    pub fn set_prefilter(&mut self, prefilter: Prefilter) {
        self.prefilter = Some(prefilter);
        self.state.reset_page();
        self.requery();
    }

    pub fn clear_prefilter(&mut self) {
        self.prefilter = None;
        self.state.reset_page();
        self.requery();
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create a record, appending it to the snapshot once the backend accepted it
    pub async fn create(&mut self, record: T) -> ConsoleResult<T> {
        let action = format!("create {}", T::resource_name_singular());
        self.authorize(&action)?;

        match self.backend.create(&self.session, record).await {
            Ok(created) => {
                tracing::info!(
                    resource = T::resource_name(),
                    id = %created.id(),
                    "created record"
                );
                self.snapshot.push(created.clone());
                self.last_error = None;
                self.requery();
                Ok(created)
            }
            Err(err) => Err(self.fail(&action, err)),
        }
    }

    /// Update a record in place once the backend accepted it
    pub async fn update(&mut self, record: T) -> ConsoleResult<T> {
        let action = format!("update {}", T::resource_name_singular());
        self.authorize(&action)?;

        let id = record.id();
        match self.backend.update(&self.session, &id, record).await {
            Ok(updated) => {
                tracing::info!(resource = T::resource_name(), id = %id, "updated record");
                if self.snapshot.replace(updated.clone()).is_none() {
                    self.snapshot.push(updated.clone());
                }
                self.last_error = None;
                self.requery();
                Ok(updated)
            }
            Err(err) => Err(self.fail(&action, err)),
        }
    }

    /// Delete a record; the page is pulled back when its last row went away
    pub async fn delete(&mut self, id: &Uuid) -> ConsoleResult<()> {
        let action = format!("delete {}", T::resource_name_singular());
        self.authorize(&action)?;

        match self.backend.delete(&self.session, id).await {
            Ok(()) => {
                tracing::info!(resource = T::resource_name(), id = %id, "deleted record");
                self.snapshot.remove(id);
                self.last_error = None;
                let page = self.state.page;
                self.requery();
                if self.state.page != page {
                    tracing::debug!(
                        resource = T::resource_name(),
                        from = page,
                        to = self.state.page,
                        "page emptied by delete"
                    );
                }
                Ok(())
            }
            Err(err) => Err(self.fail(&action, err)),
        }
    }

    /// Validate a form and create the record it describes
    pub async fn create_from<F>(&mut self, form: &F) -> ConsoleResult<T>
    where
        F: RecordForm<Record = T>,
    {
        let record = form.to_new_record().map_err(|err| self.reject(err))?;
        self.create(record).await
    }

    /// Validate a form and apply it to an existing record
    pub async fn update_from<F>(&mut self, id: &Uuid, form: &F) -> ConsoleResult<T>
    where
        F: RecordForm<Record = T>,
    {
        let existing = self
            .snapshot
            .get(id)
            .cloned()
            .ok_or_else(|| self.not_found(id))?;
        let record = form
            .to_updated_record(&existing)
            .map_err(|err| self.reject(err))?;
        self.update(record).await
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn requery(&mut self) {
        let prefilter = self.prefilter.as_ref();
        let keep = |record: &T| prefilter.is_none_or(|p| p.accepts(record));
        self.view = self
            .engine
            .run(self.snapshot.records(), &mut self.state, Some(&keep));
    }

    fn authorize(&mut self, action: &str) -> ConsoleResult<()> {
        let allowed = self.policy.authorize(&self.session, action);
        allowed.map_err(|err| self.fail(action, err))
    }

    fn fail(&mut self, action: &str, err: ConsoleError) -> ConsoleError {
        tracing::warn!(
            resource = T::resource_name(),
            action,
            code = err.error_code(),
            error = %err,
            "list screen action failed"
        );
        self.last_error = Some(err.user_message());
        err
    }

    fn reject(&mut self, err: ConsoleError) -> ConsoleError {
        self.last_error = Some(err.user_message());
        err
    }

    fn not_found(&self, id: &Uuid) -> ConsoleError {
        EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id: *id,
        }
        .into()
    }
}

impl<T: Toggleable> ListScreen<T> {
    /// Flip the `active` flag.
    ///
    /// The row flips immediately; when the backend refuses, the previous
    /// version is put back and the error is returned. No retry.
    pub async fn toggle_active(&mut self, id: &Uuid) -> ConsoleResult<T> {
        let action = format!("update {}", T::resource_name_singular());
        self.authorize(&action)?;

        let Some(previous) = self.snapshot.get(id).cloned() else {
            let err = self.not_found(id);
            return Err(self.fail(&action, err));
        };

        let page = self.state.page;
        let mut flipped = previous.clone();
        flipped.set_active(!previous.is_active());
        self.snapshot.replace(flipped.clone());
        self.requery();

        match self.backend.update(&self.session, id, flipped).await {
            Ok(saved) => {
                tracing::info!(
                    resource = T::resource_name(),
                    id = %id,
                    active = saved.is_active(),
                    "toggled record"
                );
                self.snapshot.replace(saved.clone());
                self.last_error = None;
                self.requery();
                Ok(saved)
            }
            Err(err) => {
                self.snapshot.replace(previous);
                self.state.page = page;
                self.requery();
                Err(self.fail(&action, err))
            }
        }
    }
}
