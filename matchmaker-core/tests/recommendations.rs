//! End-to-end checks of the service facade against a JSON schedule fixture.

use std::path::PathBuf;

use matchmaker_core::{
    JsonSchedulePort, MatchmakerService, Priority, Schedule, ScheduleError, ScheduleMeta,
    ScheduleStore, Vehicle,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("maintenance_schedule.json")
}

fn meta() -> ScheduleMeta {
    ScheduleMeta {
        make: "Toyota".to_owned(),
        models: vec!["Camry".to_owned(), "RAV4".to_owned()],
    }
}

fn service() -> MatchmakerService {
    let port = JsonSchedulePort::new(fixture_path(), meta());
    MatchmakerService::from_port(&port).expect("fixture schedule loads")
}

fn vehicle(model: &str, mileage: u32) -> Vehicle {
    Vehicle {
        year: 2018,
        model: model.to_owned(),
        mileage,
    }
}

#[test]
fn next_interval_from_loaded_schedule() {
    let service = service();
    assert_eq!(service.next_interval(5000).ok(), Some(15000), "boundary advances to next entry");
    assert_eq!(service.next_interval(12000).ok(), Some(15000), "between entries");
    assert_eq!(service.next_interval(121_000).ok(), Some(125_000), "rollover rounds up");
    assert_eq!(service.next_interval(125_000).ok(), Some(125_000), "exact multiple stays put");
}

#[test]
fn next_interval_follows_custom_tables() {
    let schedule = Schedule::from_json_str(r#"{ "intervals": { "10000": [], "40000": [] } }"#)
        .expect("custom table parses");
    let service = MatchmakerService::new(ScheduleStore::from_schedule(schedule), meta());
    assert_eq!(service.next_interval(15000).ok(), Some(40000), "uneven spacing respected");
}

#[test]
fn overdue_services_are_flagged() {
    let recommendations = service()
        .recommendations(&vehicle("RAV4", 16000))
        .expect("schedule loaded");

    let oil = recommendations
        .find(Priority::High, "Oil & Filter Change")
        .expect("oil change due");
    assert!(oil.overdue, "interval already passed");
    assert_eq!(oil.miles_until, -11000, "negative distance when overdue");
    assert!(
        recommendations.find(Priority::High, "Engine Air Filter Replacement").is_none(),
        "30000 is outside the 5000 mile window"
    );

    for recommendation in recommendations.recommendations() {
        assert_eq!(recommendation.overdue, 16000 >= recommendation.interval, "overdue flag");
        assert_eq!(
            recommendation.miles_until,
            i64::from(recommendation.interval) - 16000,
            "distance"
        );
    }
}

#[test]
fn model_add_ons_and_de_duplication() {
    let service = service();

    let early = service
        .recommendations_with("RAV4", 28000, 5000)
        .expect("schedule loaded");
    assert!(
        early.find(Priority::Medium, "AWD System Inspection").is_some(),
        "add-on inside window"
    );

    let late = service
        .recommendations_with("RAV4", 58000, 5000)
        .expect("schedule loaded");
    let brakes: Vec<u32> = late
        .medium
        .iter()
        .filter(|recommendation| recommendation.service == "Brake Inspection")
        .map(|recommendation| recommendation.interval)
        .collect();
    assert_eq!(brakes, vec![5000], "one entry at the earliest interval");
}

#[test]
fn unknown_model_uses_base_schedule() {
    let service = service();
    let unknown = service
        .recommendations_with("Sienna", 58000, 5000)
        .expect("schedule loaded");
    assert!(
        unknown.find(Priority::Medium, "AWD System Inspection").is_none(),
        "no add-ons for unknown model"
    );
    assert_eq!(
        unknown.medium.len(),
        2,
        "brake inspection and cabin filter from the base table"
    );
}

#[test]
fn repeated_calls_are_identical() {
    let service = service();
    let first = service.recommendations(&vehicle("RAV4", 58000)).expect("loaded");
    let second = service.recommendations(&vehicle("RAV4", 58000)).expect("loaded");
    assert_eq!(first, second, "no hidden state between calls");
}

#[test]
fn empty_store_fails_fast() {
    let service = MatchmakerService::new(ScheduleStore::empty(), meta());
    assert!(
        matches!(service.next_interval(1000), Err(ScheduleError::Missing)),
        "next interval requires a schedule"
    );
    assert!(
        matches!(
            service.recommendations(&vehicle("RAV4", 1000)),
            Err(ScheduleError::Missing)
        ),
        "recommendations require a schedule"
    );
}

#[test]
fn installing_a_schedule_fills_the_store() {
    let mut store = ScheduleStore::empty();
    assert!(!store.is_loaded(), "starts empty");
    store.install(Schedule::default());
    assert!(store.is_loaded(), "installed");
    assert!(store.schedule().is_ok(), "schedule reachable");
}

#[test]
fn empty_base_table_is_a_configuration_error() {
    let service = MatchmakerService::new(ScheduleStore::from_schedule(Schedule::default()), meta());
    assert!(
        matches!(service.next_interval(1000), Err(ScheduleError::NoIntervals)),
        "no rollover step"
    );
}

#[test]
fn missing_schedule_file_reports_io_error() {
    let port = JsonSchedulePort::new(fixture_path().with_file_name("does_not_exist.json"), meta());
    assert!(
        matches!(MatchmakerService::from_port(&port), Err(ScheduleError::Io(_))),
        "unreadable file"
    );
}

#[test]
fn models_from_loaded_schedule_are_offered() {
    let port = JsonSchedulePort::new(
        fixture_path(),
        ScheduleMeta {
            make: "Toyota".to_owned(),
            models: vec!["Camry".to_owned()],
        },
    );
    let service = MatchmakerService::from_port(&port).expect("fixture schedule loads");
    assert_eq!(service.models(), ["Camry", "RAV4"], "RAV4 block added to the picker");
}
