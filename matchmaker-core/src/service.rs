//! High-level service facade over the loaded schedule.

use std::sync::Arc;

use tracing::{debug, info};

use crate::engine::{self, DEFAULT_LOOK_AHEAD};
use crate::model::{Miles, RecommendationSet, Schedule, ScheduleMeta, Vehicle};
use crate::ports::{ScheduleError, SchedulePort};

/// Holder for the process-wide schedule, installed once at startup.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    schedule: Option<Arc<Schedule>>,
}

impl ScheduleStore {
    /// Store with nothing installed yet.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Store wrapping an already built schedule.
    #[must_use]
    pub fn from_schedule(schedule: Schedule) -> Self {
        Self {
            schedule: Some(Arc::new(schedule)),
        }
    }

    /// Load and validate the schedule produced by `port`.
    ///
    /// # Errors
    ///
    /// Returns the [`ScheduleError`] raised by the port or by validation.
    pub fn load(port: &dyn SchedulePort) -> Result<Self, ScheduleError> {
        let schedule = port.load()?;
        schedule.validate()?;
        info!(
            make = %port.meta().make,
            intervals = schedule.intervals.len(),
            models = schedule.model_specific.len(),
            "maintenance schedule loaded"
        );
        Ok(Self::from_schedule(schedule))
    }

    /// Replace the installed schedule.
    pub fn install(&mut self, schedule: Schedule) {
        self.schedule = Some(Arc::new(schedule));
    }

    /// Whether a schedule has been installed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.schedule.is_some()
    }

    /// The installed schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Missing`] when nothing was installed.
    pub fn schedule(&self) -> Result<&Schedule, ScheduleError> {
        self.schedule.as_deref().ok_or(ScheduleError::Missing)
    }
}

/// Public entry point for computing maintenance recommendations.
pub struct MatchmakerService {
    store: ScheduleStore,
    meta: ScheduleMeta,
    look_ahead: Miles,
}

impl MatchmakerService {
    /// Create a new service bound to `store`, using the default look-ahead window.
    #[must_use]
    pub fn new(store: ScheduleStore, meta: ScheduleMeta) -> Self {
        Self {
            store,
            meta,
            look_ahead: DEFAULT_LOOK_AHEAD,
        }
    }

    /// Load the schedule from `port` and build a service around it.
    ///
    /// Models with their own block in the loaded schedule are offered even
    /// when the port's metadata does not list them.
    ///
    /// # Errors
    ///
    /// Returns the [`ScheduleError`] raised while loading.
    pub fn from_port(port: &dyn SchedulePort) -> Result<Self, ScheduleError> {
        let store = ScheduleStore::load(port)?;
        let mut meta = port.meta().clone();
        meta.add_models_from(store.schedule()?);
        Ok(Self::new(store, meta))
    }

    /// Use `look_ahead` miles as the window for [`MatchmakerService::recommendations`].
    #[must_use]
    pub fn with_look_ahead(mut self, look_ahead: Miles) -> Self {
        self.look_ahead = look_ahead;
        self
    }

    /// Default look-ahead window in miles.
    #[must_use]
    pub fn look_ahead(&self) -> Miles {
        self.look_ahead
    }

    /// Manufacturer covered by the schedule.
    #[must_use]
    pub fn make(&self) -> &str {
        &self.meta.make
    }

    /// Model names offered for selection.
    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.meta.models
    }

    /// Mileage of the next service interval after `mileage`.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if no schedule is loaded or it has no intervals.
    pub fn next_interval(&self, mileage: Miles) -> Result<u64, ScheduleError> {
        let schedule = self.store.schedule()?;
        engine::find_next_interval(schedule, mileage)
    }

    /// Recommendations for a validated vehicle using the default window.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Missing`] if no schedule is loaded.
    pub fn recommendations(&self, vehicle: &Vehicle) -> Result<RecommendationSet, ScheduleError> {
        self.recommendations_with(&vehicle.model, vehicle.mileage, self.look_ahead)
    }

    /// Recommendations for an explicit model, mileage and window.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Missing`] if no schedule is loaded.
    pub fn recommendations_with(
        &self,
        model: &str,
        mileage: Miles,
        look_ahead: Miles,
    ) -> Result<RecommendationSet, ScheduleError> {
        let schedule = self.store.schedule()?;
        if schedule.model_block(model).is_none() {
            debug!(model, "no model-specific services, using base schedule only");
        }

        let recommendations =
            engine::calculate_recommendations(schedule, model, mileage, look_ahead);
        debug!(
            model,
            mileage,
            look_ahead,
            count = recommendations.len(),
            "recommendations calculated"
        );
        Ok(recommendations)
    }
}
