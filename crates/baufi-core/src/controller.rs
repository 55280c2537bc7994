//! Debounced calculation orchestration.
//!
//! The controller owns the current parameter set and the latest
//! validation/calculation state. Every mutation restarts a short
//! debounce window; the recomputation runs once the window elapses
//! without further edits. A superseded window is simply never started;
//! there is no mid-calculation cancellation because each calculation is
//! one synchronous pass.

use std::time::{Duration, Instant};

use log::debug;

use crate::calculator::{calculate, FinancingResult};
use crate::error::BaufiError;
use crate::scenario::{FinancingScenario, ScenarioStore};
use crate::types::{FinancingParameters, Money};
use crate::validation::{has_blocking_errors, validate, ValidationIssue};
use crate::BaufiResult;
use uuid::Uuid;

/// Default settle window between the last edit and recomputation.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Time source, injectable so debounce behavior is testable.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The wall clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Orchestrates validation, calculation and scenario operations around
/// one mutable parameter set.
pub struct CalculatorController<C: Clock = SystemClock> {
    clock: C,
    debounce: Duration,
    params: FinancingParameters,
    issues: Vec<ValidationIssue>,
    result: Option<FinancingResult>,
    pending_since: Option<Instant>,
    store: ScenarioStore,
}

impl CalculatorController<SystemClock> {
    /// A controller over the given parameters with an in-memory store.
    /// The initial state is computed eagerly.
    pub fn new(params: FinancingParameters) -> Self {
        Self::with_clock(params, ScenarioStore::in_memory(), SystemClock, DEFAULT_DEBOUNCE)
    }

    /// Same, but with scenario persistence backed by the given store.
    pub fn with_store(params: FinancingParameters, store: ScenarioStore) -> Self {
        Self::with_clock(params, store, SystemClock, DEFAULT_DEBOUNCE)
    }
}

impl<C: Clock> CalculatorController<C> {
    pub fn with_clock(
        params: FinancingParameters,
        store: ScenarioStore,
        clock: C,
        debounce: Duration,
    ) -> Self {
        let mut controller = Self {
            clock,
            debounce,
            params,
            issues: Vec::new(),
            result: None,
            pending_since: None,
            store,
        };
        controller.recompute();
        controller
    }

    pub fn parameters(&self) -> &FinancingParameters {
        &self.params
    }

    /// Issues from the most recent validation pass.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// The latest result; `None` while blocking errors exist or a
    /// recomputation is still pending.
    pub fn result(&self) -> Option<&FinancingResult> {
        self.result.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Mutate the parameters and restart the debounce window. The
    /// previous result is cleared immediately; consumers must not show
    /// stale output for edited inputs.
    pub fn update_parameters(&mut self, mutate: impl FnOnce(&mut FinancingParameters)) {
        mutate(&mut self.params);
        self.result = None;
        let restarted = self.pending_since.replace(self.clock.now()).is_some();
        debug!(
            "parameter mutation {} debounce window",
            if restarted { "restarted" } else { "opened" }
        );
    }

    /// Run the recomputation if the debounce window has elapsed.
    /// Returns true when a recomputation ran.
    pub fn poll(&mut self) -> bool {
        match self.pending_since {
            Some(since) if self.clock.now().duration_since(since) >= self.debounce => {
                self.pending_since = None;
                self.recompute();
                true
            }
            _ => false,
        }
    }

    /// Recompute immediately, discarding any pending debounce window.
    pub fn flush(&mut self) {
        self.pending_since = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.issues = validate(&self.params);
        if has_blocking_errors(&self.issues) {
            debug!("recompute blocked by {} validation issue(s)", self.issues.len());
            self.result = None;
        } else {
            self.result = Some(calculate(&self.params));
            debug!("recomputed financing result");
        }
    }

    /// Snapshot the current state as a scenario. Requires a settled,
    /// valid result.
    pub fn save_scenario(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        monthly_rent: Option<Money>,
    ) -> BaufiResult<FinancingScenario> {
        let result = self.result.clone().ok_or_else(|| BaufiError::InvalidInput {
            field: "parameters".into(),
            reason: "No valid calculation result to save (blocking errors or pending edits)"
                .into(),
        })?;
        self.store
            .save(name, description, self.params.clone(), result, monthly_rent)
    }

    pub fn list_scenarios(&self) -> Vec<&FinancingScenario> {
        self.store.list()
    }

    pub fn load_scenario(&self, id: Uuid) -> BaufiResult<&FinancingScenario> {
        self.store.load(id)
    }

    pub fn duplicate_scenario(
        &mut self,
        id: Uuid,
        new_name: Option<String>,
    ) -> BaufiResult<FinancingScenario> {
        self.store.duplicate(id, new_name)
    }

    pub fn delete_scenario(&mut self, id: Uuid) -> BaufiResult<()> {
        self.store.delete(id)
    }

    /// Restore a saved scenario's parameters as the current state.
    pub fn restore_scenario(&mut self, id: Uuid) -> BaufiResult<()> {
        let params = self.store.load(id)?.parameters.clone();
        self.params = params;
        self.pending_since = None;
        self.recompute();
        Ok(())
    }
}
