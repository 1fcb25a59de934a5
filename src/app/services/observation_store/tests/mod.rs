//! Shared test fixtures for observation store tests

use crate::app::models::{CellValue, Observation};


/// Create a test observation with the given key and value
pub fn create_test_observation(indicator_id: i64, key_value: &str, value: CellValue) -> Observation {
    Observation {
        indicator_id,
        time_type: "year".to_string(),
        time_key: "2019".to_string(),
        key_unit_type: "county".to_string(),
        key_value: key_value.to_string(),
        value,
    }
}
