//! Built-in Toyota maintenance schedule.

use matchmaker_core::{
    model::{IntervalTable, Priority, Schedule, ScheduleMeta, ServiceDefinition},
    ports::{ScheduleError, SchedulePort},
};

/// Models offered in the model picker.
pub const MODELS: [&str; 9] = [
    "Camry",
    "Corolla",
    "RAV4",
    "Highlander",
    "Prius",
    "Tacoma",
    "Tundra",
    "4Runner",
    "Sienna",
];

/// Schedule port serving the compiled-in Toyota table.
pub struct ToyotaSchedulePort {
    meta: ScheduleMeta,
}

impl ToyotaSchedulePort {
    /// Create a new port for the built-in table.
    #[must_use]
    pub fn new() -> Self {
        Self { meta: meta() }
    }
}

impl Default for ToyotaSchedulePort {
    fn default() -> Self {
        Self::new()
    }
}

impl SchedulePort for ToyotaSchedulePort {
    fn meta(&self) -> &ScheduleMeta {
        &self.meta
    }

    fn load(&self) -> Result<Schedule, ScheduleError> {
        Ok(schedule())
    }
}

/// Metadata for the Toyota lineup.
#[must_use]
pub fn meta() -> ScheduleMeta {
    ScheduleMeta {
        make: String::from("Toyota"),
        models: MODELS.iter().map(|model| (*model).to_owned()).collect(),
    }
}

/// The base intervals and model-specific add-ons.
#[must_use]
pub fn schedule() -> Schedule {
    use Priority::{Critical, High, Medium};

    let intervals = table(vec![
        (
            5000,
            vec![
                service("Oil & Filter Change", High, 79.95, 0.5),
                service("Tire Rotation", High, 29.95, 0.3),
                service("Multi-Point Inspection", High, 0.0, 0.2),
            ],
        ),
        (
            15000,
            vec![
                service("Cabin Air Filter", Medium, 49.95, 0.2),
                service("Engine Air Filter Inspection", Medium, 0.0, 0.1),
            ],
        ),
        (
            30000,
            vec![
                service("Engine Air Filter Replacement", High, 59.95, 0.3),
                service("Brake Fluid Inspection", Medium, 0.0, 0.2),
                service("Coolant Level Check", Medium, 0.0, 0.1),
            ],
        ),
        (
            45000,
            vec![
                service("Brake Pad Inspection", High, 0.0, 0.3),
                service("Transmission Fluid Check", Medium, 0.0, 0.2),
            ],
        ),
        (
            60000,
            vec![
                service("Spark Plug Replacement (4-cyl)", High, 249.95, 1.5),
                service("Transmission Fluid Service", High, 199.95, 1.0),
                service("Coolant Flush", High, 149.95, 0.8),
                service("Brake Fluid Flush", Medium, 119.95, 0.6),
            ],
        ),
        (
            90000,
            vec![
                service("Differential Fluid Service (4WD/AWD)", High, 179.95, 0.8),
                service("Transfer Case Fluid (4WD)", Medium, 149.95, 0.7),
            ],
        ),
        (
            100_000,
            vec![
                service("Timing Belt Replacement (if equipped)", Critical, 899.95, 4.0),
                service("Water Pump Replacement", High, 449.95, 2.0),
                service("Drive Belt Replacement", Medium, 149.95, 0.8),
            ],
        ),
        (
            120_000,
            vec![service("Spark Plug Replacement (V6)", High, 349.95, 2.0)],
        ),
    ]);

    let four_wd_inspection = || service("4WD System Inspection", Medium, 0.0, 0.3);

    let model_specific = [
        (
            "RAV4",
            table(vec![
                (30000, vec![service("AWD System Inspection", Medium, 0.0, 0.3)]),
                (
                    60000,
                    vec![service("Rear Differential Service (AWD)", High, 179.95, 0.8)],
                ),
            ]),
        ),
        (
            "Prius",
            table(vec![
                (
                    30000,
                    vec![service("Hybrid Battery Cooling System Check", High, 89.95, 0.5)],
                ),
                (
                    60000,
                    vec![service("Hybrid Inverter Coolant Service", High, 249.95, 1.2)],
                ),
            ]),
        ),
        ("Tacoma", table(vec![(30000, vec![four_wd_inspection()])])),
        (
            "Tundra",
            table(vec![(
                60000,
                vec![service("Spark Plug Replacement (V8)", High, 449.95, 2.5)],
            )]),
        ),
        (
            "4Runner",
            table(vec![
                (30000, vec![four_wd_inspection()]),
                (
                    60000,
                    vec![service("Rear Differential Service", High, 179.95, 0.8)],
                ),
            ]),
        ),
    ]
    .into_iter()
    .map(|(model, block)| (model.to_owned(), block))
    .collect();

    Schedule {
        intervals,
        model_specific,
    }
}

fn table(entries: Vec<(u32, Vec<ServiceDefinition>)>) -> IntervalTable {
    entries.into_iter().collect()
}

fn service(name: &str, priority: Priority, price: f64, labor_hours: f64) -> ServiceDefinition {
    ServiceDefinition::new(name, priority, price, labor_hours)
}

#[cfg(test)]
mod tests {
    use matchmaker_core::engine::{
        DEFAULT_LOOK_AHEAD, calculate_recommendations, find_next_interval,
    };

    use super::*;

    #[test]
    fn built_in_table_is_valid() {
        let schedule = ToyotaSchedulePort::new().load().expect("built-in table loads");
        assert!(schedule.validate().is_ok(), "no zero intervals or negative prices");
        assert_eq!(
            schedule.base_intervals().collect::<Vec<_>>(),
            vec![5000, 15000, 30000, 45000, 60000, 90000, 100_000, 120_000],
            "base intervals ascending"
        );
    }

    #[test]
    fn next_interval_on_built_in_table() {
        let schedule = schedule();
        assert_eq!(
            find_next_interval(&schedule, 5000).ok(),
            Some(15000),
            "exact interval advances"
        );
        assert_eq!(
            find_next_interval(&schedule, 121_000).ok(),
            Some(125_000),
            "rolls over past 120k"
        );
        assert_eq!(
            find_next_interval(&schedule, 125_000).ok(),
            Some(125_000),
            "exact multiple kept"
        );
    }

    #[test]
    fn rav4_add_ons_merge_into_buckets() {
        let recommendations =
            calculate_recommendations(&schedule(), "RAV4", 58000, DEFAULT_LOOK_AHEAD);

        assert!(
            recommendations
                .find(Priority::High, "Rear Differential Service (AWD)")
                .is_some(),
            "60k add-on inside window"
        );
        assert!(
            recommendations
                .find(Priority::Medium, "AWD System Inspection")
                .is_some_and(|recommendation| recommendation.overdue),
            "30k add-on overdue"
        );
        assert!(
            recommendations
                .find(Priority::High, "Hybrid Inverter Coolant Service")
                .is_none(),
            "other models' add-ons excluded"
        );
    }

    #[test]
    fn rav4_add_on_follows_base_services_at_same_interval() {
        let recommendations = calculate_recommendations(&schedule(), "RAV4", 30000, 0);
        let at_30k: Vec<&str> = recommendations
            .medium
            .iter()
            .filter(|recommendation| recommendation.interval == 30000)
            .map(|recommendation| recommendation.service.as_str())
            .collect();
        assert_eq!(
            at_30k,
            vec!["Brake Fluid Inspection", "Coolant Level Check", "AWD System Inspection"],
            "base table order first, then the model block"
        );
    }

    #[test]
    fn timing_belt_is_critical_near_100k() {
        let recommendations =
            calculate_recommendations(&schedule(), "Camry", 97000, DEFAULT_LOOK_AHEAD);
        let belt = recommendations
            .find(Priority::Critical, "Timing Belt Replacement (if equipped)")
            .expect("timing belt included");
        assert_eq!(belt.miles_until, 3000, "due in 3000 miles");
    }

    #[test]
    fn every_model_with_add_ons_is_offered() {
        let meta = meta();
        for model in schedule().model_specific.keys() {
            assert!(meta.models.contains(model), "{model} offered in picker");
        }
    }
}
