use super::collection::Record;
use super::numeric::{coerce_number, first_numeric, TENANT_COUNT_FIELDS};
use serde::Serialize;
use serde_json::Value;

/// Free-text status fields, checked in order; the first truthy one is used.
const STATUS_FIELDS: &[&str] = &["status", "occupancy_status", "occupancy", "availability"];
const VACANT_KEYWORDS: &[&str] = &["vacant", "available", "empty"];
const RENTED_KEYWORDS: &[&str] = &["occupied", "rented", "leased"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyClass {
    Rented,
    Vacant,
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupancy {
    pub rented: usize,
    pub vacant: usize,
    pub unknown: usize,
    pub total: usize,
    /// Percentage of `total` rented, rounded on its own.
    pub rate: u32,
    /// Percentage of `total` vacant, rounded on its own; need not add up with `rate`.
    pub vacancy_rate: u32,
    pub estimated: bool,
}

/// Classify one property from the strongest signal it carries.
pub fn classify_property(property: &Record) -> OccupancyClass {
    if first_numeric(property, TENANT_COUNT_FIELDS) != 0.0 {
        return OccupancyClass::Rented;
    }
    if property.has_field("tenant_count") && coerce_number(property.field("tenant_count")) == 0.0
    {
        return OccupancyClass::Vacant;
    }
    if is_true(property, "is_vacant") || is_true(property, "vacant") {
        return OccupancyClass::Vacant;
    }
    if is_false(property, "is_vacant") || is_true(property, "occupied") {
        return OccupancyClass::Rented;
    }

    let status = status_text(property);
    if contains_any(&status, VACANT_KEYWORDS) {
        OccupancyClass::Vacant
    } else if contains_any(&status, RENTED_KEYWORDS) {
        OccupancyClass::Rented
    } else {
        OccupancyClass::Unknown
    }
}

/// Count rented and vacant properties and derive the occupancy rates.
///
/// When no property can be classified at all, the tenant count stands in for the
/// number of rented properties and the result is flagged as estimated. A portfolio
/// where only some properties are ambiguous is reported as classified.
pub fn derive_occupancy(properties: &[Record], tenants: &[Record]) -> Occupancy {
    let mut occupancy = Occupancy::default();
    for property in properties {
        match classify_property(property) {
            OccupancyClass::Rented => occupancy.rented += 1,
            OccupancyClass::Vacant => occupancy.vacant += 1,
            OccupancyClass::Unknown => occupancy.unknown += 1,
        }
    }

    let property_count = properties.len();
    if occupancy.rented + occupancy.vacant == 0 && property_count > 0 {
        occupancy.rented = tenants.len().min(property_count);
        occupancy.vacant = property_count - occupancy.rented;
        occupancy.unknown = 0;
        occupancy.estimated = true;
    }

    occupancy.total = if property_count > 0 {
        property_count
    } else {
        occupancy.rented + occupancy.vacant
    };
    occupancy.rate = percentage(occupancy.rented, occupancy.total);
    occupancy.vacancy_rate = percentage(occupancy.vacant, occupancy.total);
    occupancy
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

fn is_true(record: &Record, field: &str) -> bool {
    matches!(record.field(field), Some(Value::Bool(true)))
}

fn is_false(record: &Record, field: &str) -> bool {
    matches!(record.field(field), Some(Value::Bool(false)))
}

fn status_text(record: &Record) -> String {
    let value = STATUS_FIELDS
        .iter()
        .filter_map(|field| record.field(field))
        .find(|value| is_truthy(value));

    value.map(display_text).unwrap_or_default().to_lowercase()
}

/// Plain-text rendering of a status value: arrays join their elements with commas
/// (nulls become empty), objects render as `[object Object]`.
fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_text)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
