//! Compliance-math formulas and question parsing helpers
//!
//! These are standalone utilities; the chat endpoint does not call them.

pub mod calculators;
pub mod extract;

pub use calculators::{csr, gst, next_billing_date, pf_esi, tax, BillingFrequency};
pub use extract::{
    extract_billing_details, extract_company_type_and_profit, extract_salary_and_employees,
    extract_value_from_question, BillingDetails,
};
