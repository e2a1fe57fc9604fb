use super::collection::Record;
use serde_json::Value;

/// Property fields that may carry expected monthly revenue, in priority order.
pub const PROPERTY_REVENUE_FIELDS: &[&str] = &[
    "monthly_rent",
    "rent",
    "expected_rent",
    "monthlyRevenue",
    "revenue",
];

/// Tenant fields that may carry the monthly payment, in priority order.
pub const TENANT_REVENUE_FIELDS: &[&str] = &["monthly_rent", "rent", "payment_amount"];

/// Property fields that may carry monthly expenses, in priority order.
pub const PROPERTY_EXPENSE_FIELDS: &[&str] = &[
    "monthly_expenses",
    "expenses",
    "expense",
    "operating_cost",
    "maintenance_cost",
];

/// Property fields that count occupying tenants or units.
pub const TENANT_COUNT_FIELDS: &[&str] = &[
    "tenant_count",
    "tenants_count",
    "current_tenants",
    "occupied_units",
];

/// Best-effort numeric reading of an arbitrary JSON value.
///
/// Strings keep only digits, `.` and `-` before parsing, so `"$1,234.50"` reads as
/// `1234.5`. Anything unparseable, including booleans and containers, reads as zero.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(number)) => number.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Some(Value::String(raw)) => parse_leading_float(raw),
        _ => 0.0,
    }
}

/// Coerced value of the first candidate field that reads as non-zero, or zero.
pub fn first_numeric(record: &Record, candidates: &[&str]) -> f64 {
    candidates
        .iter()
        .map(|field| coerce_number(record.field(field)))
        .find(|value| *value != 0.0)
        .unwrap_or(0.0)
}

/// Parses the longest `-?digits[.digits]` prefix of the filtered string, the same
/// way a lenient float parser stops at the first character it cannot use.
fn parse_leading_float(raw: &str) -> f64 {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let mut prefix = String::with_capacity(filtered.len());
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (index, c) in filtered.chars().enumerate() {
        match c {
            '-' if index == 0 => prefix.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                prefix.push(c);
            }
            '0'..='9' => {
                seen_digit = true;
                prefix.push(c);
            }
            _ => break,
        }
    }

    if !seen_digit {
        return 0.0;
    }

    prefix
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}
