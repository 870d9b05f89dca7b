//! Stateless compliance calculators
//!
//! All results are full-precision `f64`; no rounding is applied.

use chrono::{Duration, NaiveDate};

/// CSR spend rate on net profit
pub const CSR_RATE: f64 = 0.02;
/// Preferential tax rate for private limited companies
pub const PVT_LTD_TAX_RATE: f64 = 0.25;
/// Tax rate for every other company type
pub const DEFAULT_TAX_RATE: f64 = 0.30;
/// GST rate on turnover
pub const GST_RATE: f64 = 0.18;
/// Provident Fund contribution rate on salary
pub const PF_RATE: f64 = 0.12;
/// Employee State Insurance contribution rate on salary
pub const ESI_RATE: f64 = 0.0075;

/// Corporate Social Responsibility spend: 2% of net profit
pub fn csr(net_profit: f64) -> f64 {
    net_profit * CSR_RATE
}

/// Corporate tax
///
/// Only `"pvt_ltd"` (exact match) gets the 25% rate; every other value,
/// including `"public"` and `"partnership"`, is taxed at 30%.
pub fn tax(company_type: &str, profit: f64) -> f64 {
    let rate = if company_type == "pvt_ltd" {
        PVT_LTD_TAX_RATE
    } else {
        DEFAULT_TAX_RATE
    };
    profit * rate
}

/// Goods and Services Tax: 18% of turnover
pub fn gst(turnover: f64) -> f64 {
    turnover * GST_RATE
}

/// PF and ESI contributions for `num_employees` earning `salary` each
///
/// Returns `(pf, esi)`.
pub fn pf_esi(salary: f64, num_employees: f64) -> (f64, f64) {
    let pf = salary * PF_RATE * num_employees;
    let esi = salary * ESI_RATE * num_employees;
    (pf, esi)
}

/// Billing cycle length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingFrequency {
    /// Every 30 days
    Monthly,
    /// Every 90 days
    Quarterly,
    /// Every 365 days
    Annual,
}

impl BillingFrequency {
    /// Parse an exact frequency keyword
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "annual" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Cycle length in days
    pub fn days(self) -> i64 {
        match self {
            Self::Monthly => 30,
            Self::Quarterly => 90,
            Self::Annual => 365,
        }
    }

    /// Keyword for this frequency
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Annual => "annual",
        }
    }
}

/// Next billing date after `last_date`
///
/// Fixed-length cycles (30/90/365 days, not calendar months). An
/// unrecognised frequency returns `last_date` unchanged.
pub fn next_billing_date(last_date: NaiveDate, frequency: &str) -> NaiveDate {
    match BillingFrequency::parse(frequency) {
        Some(freq) => last_date + Duration::days(freq.days()),
        None => last_date,
    }
}
