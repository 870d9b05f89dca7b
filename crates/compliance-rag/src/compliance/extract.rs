//! Best-effort parsing of numbers, company types and billing details from
//! free-text questions

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid regex"));
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4}-[0-9]{2}-[0-9]{2})").expect("valid regex"));

/// Company type keywords, in match priority order
pub const COMPANY_TYPES: [&str; 3] = ["pvt_ltd", "public", "partnership"];

/// Billing details parsed from a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingDetails {
    /// First `YYYY-MM-DD` date in the question, if any
    pub last_date: Option<NaiveDate>,
    /// `"quarterly"`, `"annual"` or the default `"monthly"`
    pub frequency: &'static str,
}

/// First run of ASCII digits in the question, as a float
///
/// Only unsigned integer runs are recognised: `"12.5"` yields `12.0`,
/// `"-3"` yields `3.0` and `"1,000"` yields `1.0`.
pub fn extract_value_from_question(question: &str) -> Option<f64> {
    NUMBER_RE
        .find(question)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// First company type keyword in the lowercased question, with the first
/// number in the question as the profit
pub fn extract_company_type_and_profit(question: &str) -> Option<(&'static str, Option<f64>)> {
    let lowered = question.to_lowercase();
    COMPANY_TYPES
        .iter()
        .find(|company| lowered.contains(*company))
        .map(|company| (*company, extract_value_from_question(question)))
}

/// Salary and employee count
///
/// Both values come from the same first-number extraction, so they are
/// always equal.
pub fn extract_salary_and_employees(question: &str) -> (Option<f64>, Option<f64>) {
    let salary = extract_value_from_question(question);
    let num_employees = extract_value_from_question(question);
    (salary, num_employees)
}

/// Last billing date and billing frequency
///
/// `quarterly` wins over `annual`/`yearly`; without either keyword the
/// frequency is `monthly`. A date-shaped string that is not a real
/// calendar date yields `None`.
pub fn extract_billing_details(question: &str) -> BillingDetails {
    let frequency = if question.contains("quarterly") {
        "quarterly"
    } else if question.contains("annual") || question.contains("yearly") {
        "annual"
    } else {
        "monthly"
    };

    let last_date = DATE_RE
        .captures(question)
        .and_then(|c| c.get(1))
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok());

    BillingDetails {
        last_date,
        frequency,
    }
}
