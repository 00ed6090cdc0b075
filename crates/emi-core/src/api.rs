//! JSON request/response envelope for the `calculate_emi` operation.
//!
//! Requests are loosely typed: each field may be a number or a numeric
//! string, and a missing field reads as zero. Responses never fail; errors
//! are reported in-band with `success: false`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::amortization::{amortize, LoanRequest, ScheduleResult, ScheduleRow};
use crate::error::EmiError;
use crate::types::Money;
use crate::EmiResult;

const NON_NUMERIC: &str = "Please enter valid numeric values";

// ---------------------------------------------------------------------------
// Wire Types
// ---------------------------------------------------------------------------

/// One schedule row as the client consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiScheduleRow {
    pub month: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub emi: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_balance: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_principal_paid: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest_paid: Money,
}

/// Response to a `calculate_emi` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiResponse {
    pub success: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub emi: Option<Money>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_amount: Option<Money>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub total_interest: Option<Money>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub principal: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi_schedule: Option<Vec<EmiScheduleRow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ScheduleRow> for EmiScheduleRow {
    fn from(row: &ScheduleRow) -> Self {
        EmiScheduleRow {
            month: row.month,
            emi: row.installment,
            principal: row.principal_component,
            interest: row.interest_component,
            remaining_balance: row.remaining_balance,
            total_principal_paid: row.cumulative_principal_paid,
            total_interest_paid: row.cumulative_interest_paid,
        }
    }
}

impl From<&ScheduleResult> for EmiResponse {
    fn from(result: &ScheduleResult) -> Self {
        EmiResponse {
            success: true,
            emi: Some(result.installment_amount),
            total_amount: Some(result.total_amount_payable),
            total_interest: Some(result.total_interest_payable),
            principal: Some(result.principal),
            tenure_months: Some(result.tenure_months),
            emi_schedule: Some(result.schedule.iter().map(EmiScheduleRow::from).collect()),
            error: None,
        }
    }
}

impl EmiResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        EmiResponse {
            success: false,
            emi: None,
            total_amount: None,
            total_interest: None,
            principal: None,
            tenure_months: None,
            emi_schedule: None,
            error: Some(message.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Read `principal`, `annual_rate` and `tenure_years` from a JSON object.
pub fn parse_request(body: &Value) -> EmiResult<LoanRequest> {
    let Value::Object(fields) = body else {
        return Err(EmiError::invalid("request", "Request body must be a JSON object"));
    };

    Ok(LoanRequest::new(
        parse_numeric("principal", fields.get("principal"))?,
        parse_numeric("annual_rate", fields.get("annual_rate"))?,
        parse_numeric("tenure_years", fields.get("tenure_years"))?,
    ))
}

/// Handle a `calculate_emi` request body end to end.
pub fn calculate_emi(body: &Value) -> EmiResponse {
    match parse_request(body).and_then(|req| amortize(&req.validate()?)) {
        Ok(result) => EmiResponse::from(&result),
        Err(e) => {
            log::debug!("calculate_emi rejected request: {e}");
            EmiResponse::failure(e.reason())
        }
    }
}

fn parse_numeric(field: &str, value: Option<&Value>) -> EmiResult<Decimal> {
    match value {
        None | Some(Value::Null) => Ok(Decimal::ZERO),
        Some(Value::Number(n)) => decimal_from_text(field, &n.to_string()),
        Some(Value::String(s)) => decimal_from_text(field, s.trim()),
        Some(_) => Err(EmiError::invalid(field, NON_NUMERIC)),
    }
}

fn decimal_from_text(field: &str, text: &str) -> EmiResult<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| EmiError::invalid(field, NON_NUMERIC))
}
