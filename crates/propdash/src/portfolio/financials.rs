use super::collection::Record;
use super::metrics::format_currency;
use super::numeric::{
    first_numeric, PROPERTY_EXPENSE_FIELDS, PROPERTY_REVENUE_FIELDS, TENANT_REVENUE_FIELDS,
};
use serde::Serialize;

/// Placeholder monthly rent per tenant when no real figures exist.
pub const DEFAULT_RENT_PER_TENANT: f64 = 1500.0;
/// Placeholder monthly rent per property when there are no tenants either.
pub const DEFAULT_RENT_PER_PROPERTY: f64 = 1800.0;
/// Placeholder monthly expenses per property.
pub const DEFAULT_EXPENSES_PER_PROPERTY: f64 = 550.0;

/// Baseline figures substituted when the portfolio reports no revenue or expenses at all.
///
/// These are fixed placeholders for demo-quality dashboards, not market data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimationPolicy {
    pub rent_per_tenant: f64,
    pub rent_per_property: f64,
    pub expenses_per_property: f64,
}

impl Default for EstimationPolicy {
    fn default() -> Self {
        Self {
            rent_per_tenant: DEFAULT_RENT_PER_TENANT,
            rent_per_property: DEFAULT_RENT_PER_PROPERTY,
            expenses_per_property: DEFAULT_EXPENSES_PER_PROPERTY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub revenue: f64,
    pub expenses: f64,
    pub net: f64,
    pub estimated: bool,
}

impl Financials {
    pub fn formatted(&self) -> FormattedFinancials {
        FormattedFinancials {
            revenue: format_currency(self.revenue),
            expenses: format_currency(self.expenses),
            net: format_currency(self.net),
        }
    }
}

/// Display strings for the three money figures, whole US dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedFinancials {
    pub revenue: String,
    pub expenses: String,
    pub net: String,
}

pub fn derive_financials(properties: &[Record], tenants: &[Record]) -> Financials {
    derive_financials_with(properties, tenants, &EstimationPolicy::default())
}

pub fn derive_financials_with(
    properties: &[Record],
    tenants: &[Record],
    policy: &EstimationPolicy,
) -> Financials {
    let property_revenue: f64 = properties
        .iter()
        .map(|property| first_numeric(property, PROPERTY_REVENUE_FIELDS))
        .sum();
    let tenant_revenue: f64 = tenants
        .iter()
        .map(|tenant| first_numeric(tenant, TENANT_REVENUE_FIELDS))
        .sum();
    let mut revenue = property_revenue + tenant_revenue;
    let mut expenses: f64 = properties
        .iter()
        .map(|property| first_numeric(property, PROPERTY_EXPENSE_FIELDS))
        .sum();
    let mut estimated = false;

    if revenue == 0.0 && expenses == 0.0 && (!tenants.is_empty() || !properties.is_empty()) {
        revenue = if tenants.is_empty() {
            properties.len() as f64 * policy.rent_per_property
        } else {
            tenants.len() as f64 * policy.rent_per_tenant
        };
        expenses = properties.len() as f64 * policy.expenses_per_property;
        estimated = true;
    }

    Financials {
        revenue,
        expenses,
        net: revenue - expenses,
        estimated,
    }
}
