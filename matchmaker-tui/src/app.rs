use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use matchmaker_core::{
    export::build_export_text,
    model::{Recommendation, RecommendationSet, Vehicle},
    ports::ScheduleError,
    selection::Selection,
    service::MatchmakerService,
    validation::{RawVehicleInput, YearRange, validate_vehicle_inputs},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    VehicleForm,
    Recommendations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Year,
    Model,
    Mileage,
}

impl FormField {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::Year => Self::Model,
            Self::Model => Self::Mileage,
            Self::Mileage => Self::Year,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Self::Year => Self::Mileage,
            Self::Model => Self::Year,
            Self::Mileage => Self::Model,
        }
    }
}

pub(crate) struct App {
    pub service: Arc<MatchmakerService>,
    pub years: YearRange,
    pub export_path: PathBuf,

    pub screen: Screen,
    pub focus: FormField,
    pub year_input: String,
    pub model_index: usize,
    pub mileage_input: String,

    pub vehicle: Option<Vehicle>,
    pub next_interval: Option<u64>,
    pub recommendations: RecommendationSet,
    pub cursor: usize,
    pub selection: Selection,

    pub error_message: Option<String>,
    pub status_message: Option<String>,
}

impl App {
    pub(crate) fn new(
        service: Arc<MatchmakerService>,
        years: YearRange,
        export_path: PathBuf,
    ) -> Self {
        Self {
            service,
            years,
            export_path,
            screen: Screen::VehicleForm,
            focus: FormField::Year,
            year_input: String::new(),
            model_index: 0,
            mileage_input: String::new(),
            vehicle: None,
            next_interval: None,
            recommendations: RecommendationSet::default(),
            cursor: 0,
            selection: Selection::new(),
            error_message: None,
            status_message: None,
        }
    }

    pub(crate) fn selected_model(&self) -> &str {
        self.service
            .models()
            .get(self.model_index)
            .map_or("", String::as_str)
    }

    pub(crate) fn cycle_model(&mut self, forward: bool) {
        let count = self.service.models().len();
        if count == 0 {
            return;
        }
        self.model_index = if forward {
            (self.model_index + 1) % count
        } else {
            (self.model_index + count - 1) % count
        };
    }

    /// Validate the form and compute recommendations.
    ///
    /// Bad input ends up in `error_message`; only schedule problems are returned.
    pub(crate) fn generate(&mut self) -> Result<(), ScheduleError> {
        let raw = RawVehicleInput {
            year: &self.year_input,
            model: self.selected_model(),
            mileage: &self.mileage_input,
        };
        let vehicle = match validate_vehicle_inputs(raw, self.years) {
            Ok(vehicle) => vehicle,
            Err(err) => {
                self.error_message = Some(err.to_string());
                return Ok(());
            }
        };

        let next_interval = self.service.next_interval(vehicle.mileage)?;
        let recommendations = self.service.recommendations(&vehicle)?;

        self.vehicle = Some(vehicle);
        self.next_interval = Some(next_interval);
        self.recommendations = recommendations;
        self.cursor = 0;
        self.selection.clear();
        self.error_message = None;
        self.status_message = None;
        self.screen = Screen::Recommendations;
        Ok(())
    }

    pub(crate) fn current_recommendation(&self) -> Option<&Recommendation> {
        self.recommendations.recommendations().nth(self.cursor)
    }

    pub(crate) fn move_cursor(&mut self, down: bool) {
        let count = self.recommendations.len();
        if down {
            if self.cursor + 1 < count {
                self.cursor += 1;
            }
        } else {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    pub(crate) fn toggle_current(&mut self) {
        let Some(recommendation) = self.current_recommendation().cloned() else {
            return;
        };
        self.selection.toggle(&recommendation);
        self.status_message = None;
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.status_message = None;
    }

    /// Quote text for the current selection, or the reason there is none.
    pub(crate) fn export_text(&self, date: NaiveDate) -> Result<String, &'static str> {
        if self.selection.is_empty() {
            return Err("No services selected");
        }
        let Some(vehicle) = &self.vehicle else {
            return Err("Please generate recommendations first.");
        };
        Ok(build_export_text(
            &self.selection,
            vehicle,
            self.service.make(),
            date,
        ))
    }
}
