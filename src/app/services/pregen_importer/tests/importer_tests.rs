//! Tests for the pregen import orchestration

use std::sync::Arc;

use super::{create_test_part, store_with_indicator, MemoryResolver};
use crate::app::models::{CellValue, ImportOutcome};
use crate::app::services::pregen_importer::PregenImporter;
use crate::Error;

#[test]
fn test_empty_parts_is_no_parts_and_resolver_untouched() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(MemoryResolver::new());
    let importer = PregenImporter::new(resolver.clone(), store);

    let report = importer.import_for_indicator(&indicator, &[]).unwrap();

    assert_eq!(report.outcome, ImportOutcome::NoParts);
    assert_eq!(resolver.open_count(), 0);
    assert_eq!(report.stats.rows_read, 0);
}

#[test]
fn test_matched_column_builds_one_observation_per_row() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(
        MemoryResolver::new().with_file("rates.csv", "geo,rate\n001,12.5\n002,n/a\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());

    let parts = vec![create_test_part(indicator.id, "rate", "rates.csv")];
    let report = importer.import_for_indicator(&indicator, &parts).unwrap();

    assert_eq!(report.outcome, ImportOutcome::Replaced { count: 2 });
    assert_eq!(report.stats.parts_matched, 1);
    assert_eq!(report.stats.rows_read, 2);
    assert_eq!(report.stats.observations_built, 2);

    let stored = store.observations_for(indicator.id).unwrap();
    assert_eq!(stored.len(), 2);

    // The matched cell text is copied into both key_value and value
    assert_eq!(stored[0].key_value, "12.5");
    assert_eq!(stored[0].value, CellValue::Numeric(12.5));
    assert_eq!(stored[0].time_type, "year");
    assert_eq!(stored[0].time_key, "2019");
    assert_eq!(stored[0].key_unit_type, "county");

    assert_eq!(stored[1].key_value, "n/a");
    assert_eq!(stored[1].value, CellValue::Text("n/a".to_string()));
}

#[test]
fn test_absent_column_skips_part_silently() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(
        MemoryResolver::new().with_file("rates.csv", "geo,other\n001,12.5\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());

    let parts = vec![create_test_part(indicator.id, "rate", "rates.csv")];
    let report = importer.import_for_indicator(&indicator, &parts).unwrap();

    assert_eq!(report.outcome, ImportOutcome::NoMatchingColumns);
    assert_eq!(report.stats.parts_skipped, 1);
    assert_eq!(report.stats.parts_matched, 0);
    assert_eq!(store.count_observations(indicator.id).unwrap(), 0);
}

#[test]
fn test_no_matching_columns_leaves_prior_data_untouched() {
    let (store, indicator) = store_with_indicator("rate");

    // Seed prior observations through a successful run
    let resolver = Arc::new(
        MemoryResolver::new().with_file("rates.csv", "geo,rate\n001,1\n002,2\n003,3\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());
    let parts = vec![create_test_part(indicator.id, "rate", "rates.csv")];
    importer.import_for_indicator(&indicator, &parts).unwrap();
    assert_eq!(store.count_observations(indicator.id).unwrap(), 3);

    // A later run against a file without the column matches nothing
    let resolver = Arc::new(
        MemoryResolver::new().with_file("rates.csv", "geo,renamed\n001,9\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());
    let report = importer.import_for_indicator(&indicator, &parts).unwrap();

    assert_eq!(report.outcome, ImportOutcome::NoMatchingColumns);
    assert_eq!(store.count_observations(indicator.id).unwrap(), 3);
}

#[test]
fn test_unopenable_file_aborts_without_touching_store() {
    let (store, indicator) = store_with_indicator("rate");

    // Seed prior observations
    let resolver = Arc::new(
        MemoryResolver::new().with_file("rates.csv", "geo,rate\n001,1\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());
    let parts = vec![create_test_part(indicator.id, "rate", "rates.csv")];
    importer.import_for_indicator(&indicator, &parts).unwrap();

    // Import with a missing file fails fast and preserves prior data
    let resolver = Arc::new(MemoryResolver::new());
    let importer = PregenImporter::new(resolver, store.clone());
    let err = importer.import_for_indicator(&indicator, &parts).unwrap_err();

    assert!(matches!(err, Error::FileOpen { .. }));
    assert_eq!(store.count_observations(indicator.id).unwrap(), 1);
}

#[test]
fn test_open_failure_stops_before_later_parts() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(
        MemoryResolver::new().with_file("second.csv", "geo,rate\n001,1\n"),
    );
    let importer = PregenImporter::new(resolver.clone(), store.clone());

    let parts = vec![
        create_test_part(indicator.id, "rate", "missing.csv"),
        create_test_part(indicator.id, "rate", "second.csv"),
    ];
    let err = importer.import_for_indicator(&indicator, &parts).unwrap_err();

    assert!(matches!(err, Error::FileOpen { .. }));
    // Only the failing open happened; the second part was never read
    assert_eq!(resolver.open_count(), 1);
    assert_eq!(store.count_observations(indicator.id).unwrap(), 0);
}

#[test]
fn test_multiple_parts_accumulate_across_files() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(
        MemoryResolver::new()
            .with_file("a.csv", "geo,rate\n001,1\n002,2\n")
            .with_file("b.csv", "geo,rate\n003,3\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());

    let mut part_a = create_test_part(indicator.id, "rate", "a.csv");
    part_a.time_value = "2018".to_string();
    let mut part_b = create_test_part(indicator.id, "rate", "b.csv");
    part_b.time_value = "2019".to_string();
    part_b.position = 1;

    let report = importer
        .import_for_indicator(&indicator, &[part_a, part_b])
        .unwrap();

    assert_eq!(report.outcome, ImportOutcome::Replaced { count: 3 });
    assert_eq!(report.stats.parts_matched, 2);

    let stored = store.observations_for(indicator.id).unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].time_key, "2018");
    assert_eq!(stored[2].time_key, "2019");
}

#[test]
fn test_mixed_matched_and_skipped_parts() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(
        MemoryResolver::new()
            .with_file("a.csv", "geo,rate\n001,1\n")
            .with_file("b.csv", "geo,other\n002,2\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());

    let parts = vec![
        create_test_part(indicator.id, "rate", "a.csv"),
        create_test_part(indicator.id, "rate", "b.csv"),
    ];
    let report = importer.import_for_indicator(&indicator, &parts).unwrap();

    assert_eq!(report.outcome, ImportOutcome::Replaced { count: 1 });
    assert_eq!(report.stats.parts_matched, 1);
    assert_eq!(report.stats.parts_skipped, 1);
}

#[test]
fn test_import_is_idempotent() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(
        MemoryResolver::new().with_file("rates.csv", "geo,rate\n001,12.5\n002,n/a\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());
    let parts = vec![create_test_part(indicator.id, "rate", "rates.csv")];

    importer.import_for_indicator(&indicator, &parts).unwrap();
    let after_first = store.observations_for(indicator.id).unwrap();

    importer.import_for_indicator(&indicator, &parts).unwrap();
    let after_second = store.observations_for(indicator.id).unwrap();

    assert_eq!(after_first, after_second);
}

#[test]
fn test_matched_file_with_no_data_rows_is_no_matching_columns() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(MemoryResolver::new().with_file("rates.csv", "geo,rate\n"));
    let importer = PregenImporter::new(resolver, store.clone());

    let parts = vec![create_test_part(indicator.id, "rate", "rates.csv")];
    let report = importer.import_for_indicator(&indicator, &parts).unwrap();

    assert_eq!(report.outcome, ImportOutcome::NoMatchingColumns);
    assert_eq!(report.stats.parts_matched, 1);
    assert_eq!(report.stats.rows_read, 0);
}

#[test]
fn test_ragged_row_is_csv_parsing_error() {
    let (store, indicator) = store_with_indicator("rate");
    let resolver = Arc::new(
        MemoryResolver::new().with_file("rates.csv", "geo,rate\n001,1\n002\n"),
    );
    let importer = PregenImporter::new(resolver, store.clone());

    let parts = vec![create_test_part(indicator.id, "rate", "rates.csv")];
    let err = importer.import_for_indicator(&indicator, &parts).unwrap_err();

    match err {
        Error::CsvParsing { file, .. } => assert_eq!(file, "rates.csv"),
        other => panic!("expected CsvParsing, got {:?}", other),
    }
    assert_eq!(store.count_observations(indicator.id).unwrap(), 0);
}
