//! Tests for manifest parsing and loading

use super::write_manifest;
use crate::app::services::metadata_loader::MetadataManifest;
use crate::app::services::observation_store::SqliteObservationStore;
use crate::Error;

const SAMPLE: &str = r#"
{
  "indicators": [
    {
      "name": "population_density",
      "file_name": "density.csv",
      "parts": [
        { "time_type": "year", "time_value": "2018", "key_type": "county",
          "column_name": "density_2018", "file_name": "density.csv" },
        { "time_type": "year", "time_value": "2019", "key_type": "county",
          "column_name": "density_2019", "file_name": "density.csv" }
      ]
    },
    {
      "name": "derived_index",
      "parts": []
    }
  ]
}
"#;

#[test]
fn test_parse_sample_manifest() {
    let (_dir, path) = write_manifest(SAMPLE);
    let manifest = MetadataManifest::from_path(&path).unwrap();

    assert_eq!(manifest.indicators.len(), 2);
    assert_eq!(manifest.indicators[0].name, "population_density");
    assert_eq!(manifest.indicators[0].parts.len(), 2);
    assert_eq!(manifest.indicators[1].file_name, None);
    assert!(manifest.indicators[1].parts.is_empty());
}

#[test]
fn test_missing_file_is_file_open_error() {
    let err = MetadataManifest::from_path("/nonexistent/manifest.json").unwrap_err();
    assert!(matches!(err, Error::FileOpen { .. }));
}

#[test]
fn test_malformed_json_is_metadata_error() {
    let (_dir, path) = write_manifest("{ not json");
    let err = MetadataManifest::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Metadata { .. }));
}

#[test]
fn test_duplicate_indicator_names_rejected() {
    let (_dir, path) = write_manifest(
        r#"{ "indicators": [ { "name": "rate", "parts": [] },
                             { "name": "rate", "parts": [] } ] }"#,
    );
    let err = MetadataManifest::from_path(&path).unwrap_err();
    match err {
        Error::Metadata { message, .. } => assert!(message.contains("Duplicate")),
        other => panic!("expected Metadata, got {:?}", other),
    }
}

#[test]
fn test_empty_indicator_name_rejected() {
    let (_dir, path) = write_manifest(r#"{ "indicators": [ { "name": "  ", "parts": [] } ] }"#);
    let err = MetadataManifest::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Metadata { .. }));
}

#[test]
fn test_part_with_empty_column_rejected() {
    let (_dir, path) = write_manifest(
        r#"{ "indicators": [ { "name": "rate", "parts": [
              { "time_type": "year", "time_value": "2019", "key_type": "county",
                "column_name": "", "file_name": "rates.csv" } ] } ] }"#,
    );
    let err = MetadataManifest::from_path(&path).unwrap_err();
    assert!(matches!(err, Error::Metadata { .. }));
}

#[test]
fn test_load_into_writes_indicators_and_parts() {
    let (_dir, path) = write_manifest(SAMPLE);
    let manifest = MetadataManifest::from_path(&path).unwrap();
    let store = SqliteObservationStore::open_in_memory().unwrap();

    let summary = manifest.load_into(&store).unwrap();
    assert_eq!(summary.indicators_loaded, 2);
    assert_eq!(summary.parts_loaded, 2);

    let indicator = store.find_indicator("population_density").unwrap();
    assert_eq!(indicator.file_name.as_deref(), Some("density.csv"));

    let parts = store.parts_for(indicator.id).unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].column_name, "density_2018");
    assert_eq!(parts[0].position, 0);
    assert_eq!(parts[1].column_name, "density_2019");
    assert_eq!(parts[1].position, 1);
}

#[test]
fn test_reload_replaces_parts_wholesale() {
    let store = SqliteObservationStore::open_in_memory().unwrap();

    let (_dir, path) = write_manifest(SAMPLE);
    MetadataManifest::from_path(&path)
        .unwrap()
        .load_into(&store)
        .unwrap();

    let (_dir2, path2) = write_manifest(
        r#"{ "indicators": [ { "name": "population_density", "parts": [
              { "time_type": "year", "time_value": "2020", "key_type": "county",
                "column_name": "density_2020", "file_name": "density.csv" } ] } ] }"#,
    );
    let summary = MetadataManifest::from_path(&path2)
        .unwrap()
        .load_into(&store)
        .unwrap();
    assert_eq!(summary.parts_loaded, 1);

    let indicator = store.find_indicator("population_density").unwrap();
    // file_name cleared because the second manifest omits it
    assert_eq!(indicator.file_name, None);
    let parts = store.parts_for(indicator.id).unwrap();
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].column_name, "density_2020");
}
