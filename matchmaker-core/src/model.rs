//! Domain data structures for schedules, services, vehicles, and recommendations.

use std::collections::BTreeMap;
use std::fmt;
use std::iter;

use serde::{Deserialize, Serialize};

use crate::ports::ScheduleError;

/// Odometer reading or interval threshold, in miles.
pub type Miles = u32;

/// Services due at each interval, ascending by mileage.
pub type IntervalTable = BTreeMap<Miles, Vec<ServiceDefinition>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Severity buckets used to group and order recommendations.
pub enum Priority {
    /// Must be done, skipping it risks damage.
    Critical,
    /// Strongly recommended.
    High,
    /// Recommended at the next visit.
    Medium,
    /// Optional.
    Low,
}

impl Priority {
    /// All priorities in display order.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Lowercase identifier as used in schedule files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Section heading shown above a priority bucket.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High Priority",
            Self::Medium => "Medium Priority",
            Self::Low => "Low Priority",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A maintenance service as listed in the schedule table.
pub struct ServiceDefinition {
    /// Service name, unique within a schedule.
    pub service: String,
    /// Bucket the service is reported under.
    pub priority: Priority,
    /// Price in dollars; zero means free.
    #[serde(default)]
    pub price: f64,
    /// Estimated shop labor.
    #[serde(default)]
    pub labor_hours: f64,
}

impl ServiceDefinition {
    /// Construct a new service definition.
    #[must_use]
    pub fn new<S: Into<String>>(
        service: S,
        priority: Priority,
        price: f64,
        labor_hours: f64,
    ) -> Self {
        Self {
            service: service.into(),
            priority,
            price,
            labor_hours,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Static maintenance table: base intervals plus per-model add-ons.
pub struct Schedule {
    /// Services that apply to every model.
    pub intervals: IntervalTable,
    /// Additional services keyed by exact model name.
    #[serde(
        default,
        rename = "modelSpecific",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub model_specific: BTreeMap<String, IntervalTable>,
}

impl Schedule {
    /// Parse and validate a schedule from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Parse`] for malformed JSON and the errors of
    /// [`Schedule::validate`] for well-formed but unusable tables.
    pub fn from_json_str(json: &str) -> Result<Self, ScheduleError> {
        let schedule: Self = serde_json::from_str(json)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check interval keys and service amounts.
    ///
    /// An empty base table passes; it only fails once a caller asks for the
    /// next interval.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidInterval`] for a zero interval key and
    /// [`ScheduleError::InvalidService`] for a negative or non-finite price or
    /// labor estimate.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let tables = iter::once(&self.intervals).chain(self.model_specific.values());

        for table in tables {
            for (interval, services) in table {
                if *interval == 0 {
                    return Err(ScheduleError::InvalidInterval {
                        interval: *interval,
                    });
                }
                for definition in services {
                    check_amount(definition, "price", definition.price)?;
                    check_amount(definition, "labor_hours", definition.labor_hours)?;
                }
            }
        }
        Ok(())
    }

    /// Base interval keys, ascending.
    pub fn base_intervals(&self) -> impl Iterator<Item = Miles> + '_ {
        self.intervals.keys().copied()
    }

    /// Model-specific add-ons for `model`, if any are configured.
    #[must_use]
    pub fn model_block(&self, model: &str) -> Option<&IntervalTable> {
        self.model_specific.get(model)
    }
}

fn check_amount(
    definition: &ServiceDefinition,
    field: &str,
    amount: f64,
) -> Result<(), ScheduleError> {
    if amount.is_finite() && amount >= 0.0 {
        return Ok(());
    }
    Err(ScheduleError::InvalidService {
        service: definition.service.clone(),
        reason: format!("{field} must be a non-negative number, got {amount}"),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A service instance due at a specific interval for a specific odometer reading.
pub struct Recommendation {
    /// Service name.
    pub service: String,
    /// Bucket the service belongs to.
    pub priority: Priority,
    /// Price in dollars; zero means free.
    pub price: f64,
    /// Estimated shop labor.
    pub labor_hours: f64,
    /// Interval this instance belongs to.
    pub interval: Miles,
    /// Mileage at which the service is due, always equal to `interval`.
    pub due: Miles,
    /// Miles left until due; negative when overdue.
    #[serde(rename = "milesUntil")]
    pub miles_until: i64,
    /// Current mileage has reached or passed the interval.
    pub overdue: bool,
}

impl Recommendation {
    /// Instantiate `definition` at `interval` for a vehicle at `current_mileage`.
    #[must_use]
    pub fn due_at(definition: &ServiceDefinition, interval: Miles, current_mileage: Miles) -> Self {
        Self {
            service: definition.service.clone(),
            priority: definition.priority,
            price: definition.price,
            labor_hours: definition.labor_hours,
            interval,
            due: interval,
            miles_until: i64::from(interval) - i64::from(current_mileage),
            overdue: current_mileage >= interval,
        }
    }

    /// Selection identity of this recommendation.
    #[must_use]
    pub fn key(&self) -> ServiceKey {
        crate::engine::make_service_key(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Recommendations bucketed by priority, each bucket ascending by interval.
pub struct RecommendationSet {
    /// Critical services.
    pub critical: Vec<Recommendation>,
    /// High priority services.
    pub high: Vec<Recommendation>,
    /// Medium priority services.
    pub medium: Vec<Recommendation>,
    /// Low priority services.
    pub low: Vec<Recommendation>,
}

impl RecommendationSet {
    /// Recommendations in one bucket.
    #[must_use]
    pub fn bucket(&self, priority: Priority) -> &[Recommendation] {
        match priority {
            Priority::Critical => &self.critical,
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    /// Mutable access to one bucket.
    pub fn bucket_mut(&mut self, priority: Priority) -> &mut Vec<Recommendation> {
        match priority {
            Priority::Critical => &mut self.critical,
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        }
    }

    /// Buckets in display order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (Priority, &[Recommendation])> {
        Priority::ALL
            .into_iter()
            .map(|priority| (priority, self.bucket(priority)))
    }

    /// All recommendations flattened in display order.
    pub fn recommendations(&self) -> impl Iterator<Item = &Recommendation> {
        self.iter().flat_map(|(_, bucket)| bucket.iter())
    }

    /// Look up a recommendation by service name within a bucket.
    #[must_use]
    pub fn find(&self, priority: Priority, service: &str) -> Option<&Recommendation> {
        self.bucket(priority)
            .iter()
            .find(|recommendation| recommendation.service == service)
    }

    /// Total number of recommendations across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().map(|(_, bucket)| bucket.len()).sum()
    }

    /// True when no bucket holds a recommendation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Stable identity of a (service name, interval) pair.
pub struct ServiceKey(pub String);

impl fmt::Display for ServiceKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Validated vehicle description entered by the user.
pub struct Vehicle {
    /// Model year.
    pub year: u16,
    /// Model name, matched exactly against model-specific schedules.
    pub model: String,
    /// Current odometer reading.
    pub mileage: Miles,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Metadata describing the vehicles a schedule provider covers.
pub struct ScheduleMeta {
    /// Manufacturer shown in the vehicle header, e.g. "Toyota".
    pub make: String,
    /// Model names offered in the model picker.
    pub models: Vec<String>,
}

impl ScheduleMeta {
    /// Offer every model that has its own block in `schedule`.
    ///
    /// Models already listed keep their position; new ones are appended.
    pub fn add_models_from(&mut self, schedule: &Schedule) {
        for model in schedule.model_specific.keys() {
            if !self.models.contains(model) {
                self.models.push(model.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE_JSON: &str = r#"{
        "intervals": {
            "5000": [
                { "service": "Oil & Filter Change", "priority": "high", "price": 79.95, "labor_hours": 0.5 },
                { "service": "Multi-Point Inspection", "priority": "high" }
            ]
        },
        "modelSpecific": {
            "RAV4": {
                "30000": [{ "service": "AWD System Inspection", "priority": "medium", "price": 0, "labor_hours": 0.3 }]
            }
        }
    }"#;

    #[test]
    fn parses_wire_shape_with_zero_defaults() {
        let schedule = Schedule::from_json_str(SCHEDULE_JSON).expect("fixture parses");

        let base = schedule.intervals.get(&5000).expect("5000 interval present");
        assert_eq!(base.len(), 2, "both base services parsed");
        let inspection = base.get(1).expect("second service present");
        assert_eq!(inspection.priority, Priority::High, "priority parsed lowercase");
        assert!(inspection.price.abs() < f64::EPSILON, "missing price defaults to zero");
        assert!(inspection.labor_hours.abs() < f64::EPSILON, "missing hours default to zero");

        let rav4 = schedule.model_block("RAV4").expect("RAV4 block present");
        assert!(rav4.contains_key(&30000), "model interval keyed by miles");
        assert!(schedule.model_block("Camry").is_none(), "unknown model has no block");
    }

    #[test]
    fn rejects_unknown_priority() {
        let json = r#"{ "intervals": { "5000": [{ "service": "Wash", "priority": "urgent" }] } }"#;
        let result = Schedule::from_json_str(json);
        assert!(
            matches!(result, Err(ScheduleError::Parse(_))),
            "unknown priority is a parse error"
        );
    }

    #[test]
    fn rejects_zero_interval_and_negative_price() {
        let zero = r#"{ "intervals": { "0": [] } }"#;
        assert!(
            matches!(
                Schedule::from_json_str(zero),
                Err(ScheduleError::InvalidInterval { interval: 0 })
            ),
            "zero interval rejected"
        );

        let negative =
            r#"{ "intervals": { "5000": [{ "service": "Wash", "priority": "low", "price": -1 }] } }"#;
        assert!(
            matches!(
                Schedule::from_json_str(negative),
                Err(ScheduleError::InvalidService { ref service, .. }) if service == "Wash"
            ),
            "negative price rejected"
        );
    }

    #[test]
    fn empty_interval_table_is_accepted() {
        let schedule =
            Schedule::from_json_str(r#"{ "intervals": {} }"#).expect("empty table parses");
        assert_eq!(schedule.base_intervals().count(), 0, "no base intervals");
    }

    #[test]
    fn recommendation_set_always_serializes_all_buckets() {
        let value = serde_json::to_value(RecommendationSet::default()).expect("serializes");
        for priority in Priority::ALL {
            assert!(
                value.get(priority.as_str()).is_some_and(serde_json::Value::is_array),
                "bucket {priority} present"
            );
        }
    }

    #[test]
    fn recommendation_uses_camel_case_miles_until() {
        let definition = ServiceDefinition::new("Tire Rotation", Priority::High, 29.95, 0.3);
        let recommendation = Recommendation::due_at(&definition, 5000, 16000);
        let value = serde_json::to_value(&recommendation).expect("serializes");

        assert_eq!(value.get("milesUntil"), Some(&serde_json::json!(-11000)), "signed distance");
        assert_eq!(value.get("due"), Some(&serde_json::json!(5000)), "due mirrors interval");
        assert_eq!(value.get("overdue"), Some(&serde_json::json!(true)), "past interval");
    }

    #[test]
    fn meta_picks_up_models_from_schedule() {
        let schedule = Schedule::from_json_str(SCHEDULE_JSON).expect("fixture parses");
        let mut meta = ScheduleMeta {
            make: "Toyota".to_owned(),
            models: vec!["Camry".to_owned(), "RAV4".to_owned()],
        };

        meta.add_models_from(&schedule);
        assert_eq!(meta.models, vec!["Camry", "RAV4"], "known model not duplicated");

        let mut bare = ScheduleMeta {
            make: "Toyota".to_owned(),
            models: Vec::new(),
        };
        bare.add_models_from(&schedule);
        assert_eq!(bare.models, vec!["RAV4"], "schedule model appended");
    }
}
