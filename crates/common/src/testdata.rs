//! Structured test-data generators and record helpers
//!
//! Records are plain JSON objects so callers can override any field with any
//! shape, including structurally new keys. No validation is performed.

use chrono::Utc;
use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::Result;

/// A flat test-data record: named fields mapped to arbitrary JSON values
pub type Record = Map<String, Value>;

/// Generate a user record with a timestamp-embedded username/email, then
/// shallow-merge `overrides` on top (override keys always win).
///
/// Identifiers are derived from the millisecond clock; two calls within the
/// same clock tick can collide. Callers must not rely on cross-call
/// uniqueness at sub-tick resolution.
pub fn generate_user_data(overrides: Record) -> Record {
    let timestamp = Utc::now().timestamp_millis();
    let base = json!({
        "username": format!("testuser_{timestamp}"),
        "email": format!("testuser_{timestamp}@example.com"),
        "password": "Test@1234",
        "firstName": "Test",
        "lastName": "User",
    });
    overlay(base, overrides)
}

/// Generate a product record with a timestamp-embedded name; same override
/// contract (and same sub-tick collision caveat) as [`generate_user_data`].
pub fn generate_product_data(overrides: Record) -> Record {
    let timestamp = Utc::now().timestamp_millis();
    let base = json!({
        "name": format!("Test Product {timestamp}"),
        "description": "This is a test product",
        "price": 99.99,
        "category": "Electronics",
        "inStock": true,
        "quantity": 100,
    });
    overlay(base, overrides)
}

fn overlay(base: Value, overrides: Record) -> Record {
    let mut record = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in overrides {
        record.insert(key, value);
    }
    record
}

/// Structural copy via a full serialize/deserialize round trip.
///
/// Anything not representable as plain data (non-finite floats, types with
/// skipped fields) is lost or rejected; restrict input to plain serializable
/// data.
pub fn deep_clone<T>(value: &T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let encoded = serde_json::to_value(value)?;
    Ok(serde_json::from_value(encoded)?)
}

/// Shallow merge of two records; `test_data` keys win on conflict.
pub fn merge_test_data(fixture_data: &Record, test_data: &Record) -> Record {
    let mut merged = fixture_data.clone();
    for (key, value) in test_data {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Uniformly selected element, or `None` for an empty slice.
pub fn get_random_item<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::thread_rng())
}

/// Return a new vector holding the same elements in a uniformly random
/// permutation (Fisher-Yates). The input is left unmodified.
pub fn shuffle_array<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    shuffled
}
