//! Session controller: the single owner of dataset, catalog, selections and results.
//!
//! Network round-trips are split into `begin_*` (validate, snapshot, mark busy) and
//! `finish_*` (apply or roll back) so a front end can run the call elsewhere and feed
//! the outcome back. At most one request is in flight per session; a second `begin_*`
//! while busy is rejected, not queued. There is no cancellation or timeout here: a
//! request that never completes leaves the session busy.

use crate::backend::ChartBackend;
use crate::catalog::{CatalogEntry, ChartSpec};
use crate::error::{SessionError, SessionResult, UserInputError};
use crate::request::{
    encode_catalog_request, encode_generate_request, CatalogRequest, CatalogResponse,
    DatasetHandle, GenerateRequest, GenerateResponse,
};
use crate::results::{render, DisplayUnit, GraphOutcome};
use crate::selection::SelectionList;
use chrono::{DateTime, Local};
use serde_json::Value;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    CatalogFetching,
    Composing,
    Generating,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::CatalogFetching => "Fetching graph options",
            Self::Composing => "Composing",
            Self::Generating => "Generating",
        }
    }

    pub fn is_busy(self) -> bool {
        matches!(self, Self::CatalogFetching | Self::Generating)
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    dataset: Option<DatasetHandle>,
    catalog: Vec<CatalogEntry>,
    /// Dataset column names reported with the catalog.
    columns: Vec<String>,
    /// Received with the catalog; generate resubmits the raw file instead.
    file_id: Option<String>,
    selections: SelectionList,
    results: Option<Vec<GraphOutcome>>,
    generated_at: Option<DateTime<Local>>,
    phase: Phase,
    /// Phase to return to if the in-flight catalog fetch fails.
    resume_phase: Phase,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_busy()
    }

    pub fn dataset(&self) -> Option<&DatasetHandle> {
        self.dataset.as_ref()
    }

    pub fn catalog(&self) -> &[CatalogEntry] {
        &self.catalog
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn file_id(&self) -> Option<&str> {
        self.file_id.as_deref()
    }

    pub fn selections(&self) -> &SelectionList {
        &self.selections
    }

    pub fn results(&self) -> Option<&[GraphOutcome]> {
        self.results.as_deref()
    }

    pub fn generated_at(&self) -> Option<DateTime<Local>> {
        self.generated_at
    }

    /// Choose the dataset used by both requests. Rejected while a request is in flight.
    ///
    /// A different file drops the session back to `Idle`: the catalog, column names,
    /// `file_id` and results all describe the old file. Selections are kept.
    pub fn set_dataset(&mut self, dataset: DatasetHandle) -> SessionResult<()> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        let changed = self
            .dataset
            .as_ref()
            .is_some_and(|current| current.path() != dataset.path());
        if changed {
            debug!(
                from = self.phase.as_str(),
                "dataset changed, discarding catalog and results"
            );
            self.catalog.clear();
            self.columns.clear();
            self.file_id = None;
            self.results = None;
            self.generated_at = None;
            self.phase = Phase::Idle;
            self.resume_phase = Phase::Idle;
        }
        info!(path = %dataset.path().display(), "dataset selected");
        self.dataset = Some(dataset);
        Ok(())
    }

    pub fn add_selection(&mut self) -> usize {
        self.selections.append_empty()
    }

    pub fn update_selection(&mut self, index: usize, label: &str) -> SessionResult<&ChartSpec> {
        Ok(self.selections.update(index, label)?)
    }

    pub fn remove_selection(&mut self, index: usize) -> SessionResult<ChartSpec> {
        Ok(self.selections.remove(index)?)
    }

    /// Validate and mark the catalog fetch as in flight.
    pub fn begin_catalog_fetch(&mut self) -> SessionResult<CatalogRequest> {
        if self.is_busy() {
            warn!(phase = self.phase.as_str(), "catalog fetch rejected while busy");
            return Err(SessionError::Busy);
        }
        let request = encode_catalog_request(self.dataset.as_ref())?;
        self.resume_phase = self.phase;
        self.phase = Phase::CatalogFetching;
        debug!(file = request.file.file_name(), "catalog fetch started");
        Ok(request)
    }

    /// Apply the outcome of the in-flight catalog fetch; returns the number of entries.
    ///
    /// On failure the prior catalog is kept and the phase returns to where the fetch began.
    pub fn finish_catalog_fetch(
        &mut self,
        outcome: SessionResult<CatalogResponse>,
    ) -> SessionResult<usize> {
        if self.phase != Phase::CatalogFetching {
            warn!(phase = self.phase.as_str(), "unexpected catalog response ignored");
            return Err(SessionError::Busy);
        }
        match outcome {
            Ok(response) => {
                self.catalog = response.entries;
                self.columns = response.columns;
                self.file_id = response.file_id;
                self.results = None;
                self.generated_at = None;
                self.phase = Phase::Composing;
                info!(entries = self.catalog.len(), "catalog loaded");
                Ok(self.catalog.len())
            }
            Err(err) => {
                self.phase = self.resume_phase;
                warn!(error = %err, "catalog fetch failed");
                Err(err)
            }
        }
    }

    /// Validate and snapshot the selections for generation.
    ///
    /// Later edits to the selection list do not change the returned request.
    pub fn begin_generate(&mut self) -> SessionResult<GenerateRequest> {
        if self.is_busy() {
            warn!(phase = self.phase.as_str(), "generate rejected while busy");
            return Err(SessionError::Busy);
        }
        if self.phase == Phase::Idle {
            return Err(UserInputError::CatalogNotLoaded.into());
        }
        let request = encode_generate_request(self.dataset.as_ref(), self.selections.as_slice())?;
        let empty = self.selections.empty_slots();
        if empty > 0 {
            warn!(empty, "submitting selections with nothing chosen");
        }
        self.phase = Phase::Generating;
        debug!(graphs = self.selections.len(), "generate started");
        Ok(request)
    }

    /// Apply the outcome of the in-flight generate request; returns the number of results.
    ///
    /// Failures leave the previous results untouched.
    pub fn finish_generate(
        &mut self,
        outcome: SessionResult<GenerateResponse>,
    ) -> SessionResult<usize> {
        if self.phase != Phase::Generating {
            warn!(phase = self.phase.as_str(), "unexpected generate response ignored");
            return Err(SessionError::Busy);
        }
        self.phase = Phase::Composing;
        match outcome {
            Ok(response) => {
                let count = response.graphs.len();
                self.results = Some(response.graphs);
                self.generated_at = Some(Local::now());
                info!(results = count, "graphs generated");
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "generate failed");
                Err(err)
            }
        }
    }

    /// Fetch the catalog through `backend`, blocking until it answers.
    pub fn fetch_catalog(&mut self, backend: &dyn ChartBackend) -> SessionResult<usize> {
        let request = self.begin_catalog_fetch()?;
        let outcome = decode_catalog(backend.fetch_catalog(&request).map_err(Into::into));
        self.finish_catalog_fetch(outcome)
    }

    /// Generate the current selections through `backend`, blocking until it answers.
    pub fn generate(&mut self, backend: &dyn ChartBackend) -> SessionResult<usize> {
        let request = self.begin_generate()?;
        let outcome = decode_generate(backend.generate(&request).map_err(Into::into));
        self.finish_generate(outcome)
    }

    /// Display units for the current results.
    pub fn display_units(&self) -> Vec<DisplayUnit> {
        render(self.results())
    }
}

/// Turn a raw catalog reply into a response or a semantic failure.
pub fn decode_catalog(body: SessionResult<Value>) -> SessionResult<CatalogResponse> {
    body.and_then(CatalogResponse::from_json)
}

/// Turn a raw generate reply into a response or a semantic failure.
pub fn decode_generate(body: SessionResult<Value>) -> SessionResult<GenerateResponse> {
    body.and_then(GenerateResponse::from_json)
}
