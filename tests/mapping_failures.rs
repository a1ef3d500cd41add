//! Integration tests for the mapping-failure log.

use labdict::{FailureOutcome, MappingFailure, MemoryTableService, Settings};

const SHEET: &str = "failures-under-test";

fn setup() -> (MemoryTableService, labdict::Dictionary<MemoryTableService>) {
    let service = MemoryTableService::new();
    let settings = Settings {
        spreadsheet_id: SHEET.to_string(),
        ..Settings::default()
    };
    service.add_tab_with_headers(
        SHEET,
        &settings.dictionary.failure_tab,
        settings.sheet.header_row,
        &settings.dictionary.failure_headers(),
    );
    let dict = labdict::open(service.clone(), &settings).unwrap();
    (service, dict)
}

fn event(x: usize) -> MappingFailure {
    MappingFailure::default()
        .experiment_run(format!("experiment{}", x))
        .lab("Transcriptic")
        .item_name(format!("itemName{}", x))
        .item_id(format!("itemId{}", x))
        .item_type("Strain")
}

#[test]
fn test_each_event_logged_once() {
    let (service, mut dict) = setup();
    for _ in 0..2 {
        for x in 0..5 {
            dict.record_mapping_failure(&event(x)).unwrap();
        }
    }

    assert_eq!(service.data_row_count(SHEET, "Mapping Failures", 2), 5);
    for x in 0..5 {
        let row = x + 3;
        assert_eq!(
            service.value_at(SHEET, &format!("'Mapping Failures'!A{}", row)),
            Some(format!("experiment{}", x))
        );
        assert_eq!(
            service
                .value_at(SHEET, &format!("'Mapping Failures'!B{}", row))
                .as_deref(),
            Some("Transcriptic")
        );
        assert_eq!(
            service.value_at(SHEET, &format!("'Mapping Failures'!D{}", row)),
            Some(format!("itemId{}", x))
        );
    }
}

#[test]
fn test_omitted_field_is_a_distinct_event() {
    let (service, mut dict) = setup();
    assert_eq!(
        dict.record_mapping_failure(&event(0)).unwrap(),
        FailureOutcome::Recorded { row: 3 }
    );
    assert_eq!(
        dict.record_mapping_failure(&event(0)).unwrap(),
        FailureOutcome::AlreadyRecorded { row: 3 }
    );

    let mut without_type = event(0);
    without_type.item_type = None;
    assert_eq!(
        dict.record_mapping_failure(&without_type).unwrap(),
        FailureOutcome::Recorded { row: 4 }
    );
    assert_eq!(service.data_row_count(SHEET, "Mapping Failures", 2), 2);
}
