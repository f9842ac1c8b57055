//! End-to-end: raw directory document through filtering, search,
//! clustering and the detail view helpers.

mod support;

use chrono::Weekday;
use relief_map::algorithms::cluster_entities;
use relief_map::models::{EntityId, EntityKind};
use relief_map::parsing::{parse_directory_file, parse_directory_str};
use relief_map::services::{
    date_range_label, filter_entities, resolve, search_first, status_label, suggestions,
    upcoming_schedule, DirectoryFilter,
};
use relief_map::ReliefError;

use support::{date, jan_2025, MONDAY, SUNDAY};

const DIRECTORY: &str = r#"{
    "resources": [
        {"id": 1, "name": "Westside Pantry", "organizationName": "Westside Mutual Aid",
         "lat": 34.0000, "lng": -118.0000, "types": ["Food & Water"],
         "hoursOfOperation": {"monday": "9:00 AM - 5:00 PM", "Tuesday": "Not Open"}},
        {"id": "r-2", "title": "Pet Shelter", "latitude": "34.0010", "longitude": "-118.0010",
         "categories": ["Animal Boarding"],
         "hours_of_operation": {"Monday": "7:00 AM - 11:00 AM"}},
        {"name": "No Coordinates Clinic", "types": ["Medical Aid & First Aid"],
         "hours_of_operation": {"Monday": "8:00 AM - 8:00 PM"}},
        "not a record"
    ],
    "donations": [
        {"id": 10, "name": "Blanket Drive", "latitude": 34.2, "longitude": -118.3,
         "types": ["Clothing & Bedding"], "startDate": "2025-01-20T00:00:00Z",
         "endDate": "2025-02-03", "hours_of_operation": {"Monday": "10:00 AM - 2:00 PM"}}
    ],
    "volunteering": null
}"#;

#[test]
fn test_grouped_document_normalizes_every_record() {
    let entities = parse_directory_str(DIRECTORY).unwrap();
    assert_eq!(entities.len(), 4);

    assert_eq!(entities[0].organization_name.as_deref(), Some("Westside Mutual Aid"));
    assert_eq!(entities[1].id, EntityId::Str("r-2".to_string()));
    assert_eq!(entities[1].name, "Pet Shelter");
    assert_eq!(entities[1].latitude, Some(34.001));
    // Missing id falls back to the record's position in its group.
    assert_eq!(entities[2].id, EntityId::Int(2));
    assert_eq!(entities[2].coordinates(), None);

    let drive = &entities[3];
    assert_eq!(drive.kind, EntityKind::Donation);
    assert_eq!(drive.start_date, Some(date(2025, 1, 20)));
    assert_eq!(drive.end_date, Some(date(2025, 2, 3)));
}

#[test]
fn test_filter_then_cluster() {
    let entities = parse_directory_str(DIRECTORY).unwrap();
    let monday_noon = jan_2025(MONDAY, 12, 0, 0);

    let open_now = DirectoryFilter {
        open_now: true,
        ..DirectoryFilter::default()
    };
    let open: Vec<_> = filter_entities(&entities, &open_now, monday_noon)
        .into_iter()
        .cloned()
        .collect();
    let names: Vec<&str> = open.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Westside Pantry", "No Coordinates Clinic", "Blanket Drive"]);

    // The clinic has no position and stays off the map.
    let clusters = cluster_entities(&open, 12);
    assert_eq!(clusters.len(), 2);
    assert!(clusters.iter().all(|c| !c.is_aggregate()));

    let everything = cluster_entities(&entities, 5);
    assert_eq!(everything.len(), 1);
    assert_eq!(everything[0].len(), 3);
    assert_eq!(everything[0].colors(), ["#015BC3", "#DB5D02"]);
}

#[test]
fn test_category_and_kind_filters() {
    let entities = parse_directory_str(DIRECTORY).unwrap();
    let at = jan_2025(SUNDAY, 12, 0, 0);

    let animals = DirectoryFilter {
        categories: vec!["Animal Boarding".to_string()],
        ..DirectoryFilter::default()
    };
    let kept = filter_entities(&entities, &animals, at);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "Pet Shelter");

    let donations = DirectoryFilter {
        kind: Some(EntityKind::Donation),
        ..DirectoryFilter::default()
    };
    assert_eq!(filter_entities(&entities, &donations, at).len(), 1);
}

#[test]
fn test_search_matches_organization_before_name() {
    let entities = parse_directory_str(DIRECTORY).unwrap();

    let hit = search_first(&entities, "  mutual AID ").unwrap();
    assert_eq!(hit.name, "Westside Pantry");
    assert!(search_first(&entities, "   ").is_none());

    let typed = suggestions(&entities, "e", 2);
    assert_eq!(typed.len(), 2);
}

#[test]
fn test_detail_view_for_a_record() {
    let entities = parse_directory_str(DIRECTORY).unwrap();
    let pantry = &entities[0];

    let week = upcoming_schedule(&pantry.hours_of_operation, date(2025, 1, 26));
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].weekday, "Sunday");
    assert!(week[0].window.is_none());
    assert_eq!(week[1].window.unwrap().to_string(), "9:00 AM - 5:00 PM");
    assert!(week[2].window.is_none());

    let sunday = resolve(&pantry.hours_of_operation, jan_2025(SUNDAY, 15, 0, 0));
    assert_eq!(status_label(&sunday, Weekday::Sun), "Opens at 9:00 AM on Monday");

    let drive = &entities[3];
    assert_eq!(
        date_range_label(drive.start_date, drive.end_date).as_deref(),
        Some("Jan 20 - Feb 03, 2025")
    );
}

#[test]
fn test_document_errors() {
    assert!(matches!(parse_directory_str("{"), Err(ReliefError::Json(_))));
    assert!(matches!(parse_directory_str("42"), Err(ReliefError::InvalidInput(_))));
    assert!(matches!(
        parse_directory_str(r#"{"resources": {}}"#),
        Err(ReliefError::InvalidInput(_))
    ));
    assert!(matches!(
        parse_directory_str(r#"{"shelters": []}"#),
        Err(ReliefError::InvalidInput(_))
    ));
}

#[test]
fn test_parse_directory_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("directory.json");
    std::fs::write(&path, DIRECTORY).unwrap();

    assert_eq!(parse_directory_file(&path).unwrap().len(), 4);
    assert!(matches!(
        parse_directory_file(dir.path().join("missing.json")),
        Err(ReliefError::Io { .. })
    ));
}
