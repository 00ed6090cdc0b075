use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use emi_core::amortization::{amortize, LoanRequest, ScheduleResult};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse a request body and build the schedule, or fail with the engine's reason.
fn schedule_from_json(input_json: &str) -> NapiResult<ScheduleResult> {
    let body: serde_json::Value = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let request = emi_core::api::parse_request(&body).map_err(to_napi_error)?;
    let terms = request.validate().map_err(to_napi_error)?;
    amortize(&terms).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Request / response envelope
// ---------------------------------------------------------------------------

/// Same contract as the `/calculate_emi` endpoint: always resolves, with
/// `success: false` and `error` on bad input.
#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let response = match serde_json::from_str::<serde_json::Value>(&input_json) {
        Ok(body) => emi_core::api::calculate_emi(&body),
        Err(_) => emi_core::api::EmiResponse::failure("Please enter valid numeric values"),
    };
    serde_json::to_string(&response).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Schedule views
// ---------------------------------------------------------------------------

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let result = schedule_from_json(&input_json)?;
    serde_json::to_string(&result).map_err(to_napi_error)
}

/// Schedule from plain JS numbers; NaN and infinities are rejected.
#[napi]
pub fn loan_schedule(principal: f64, annual_rate: f64, tenure_years: f64) -> NapiResult<String> {
    let request = LoanRequest::from_f64(principal, annual_rate, tenure_years).map_err(to_napi_error)?;
    let terms = request.validate().map_err(to_napi_error)?;
    let result = amortize(&terms).map_err(to_napi_error)?;
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[napi]
pub fn yearly_schedule(input_json: String) -> NapiResult<String> {
    let result = schedule_from_json(&input_json)?;
    let years = emi_core::yearly::yearly_summary(&result.schedule);
    serde_json::to_string(&years).map_err(to_napi_error)
}

#[napi]
pub fn schedule_csv(input_json: String) -> NapiResult<String> {
    let result = schedule_from_json(&input_json)?;
    emi_core::export::schedule_csv(&result).map_err(to_napi_error)
}

#[napi]
pub fn schedule_csv_file_name(input_json: String) -> NapiResult<String> {
    let result = schedule_from_json(&input_json)?;
    Ok(emi_core::export::export_file_name(&result))
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Indian-grouped whole-unit amount, e.g. "4339.12" → "₹4,339".
#[napi]
pub fn format_inr(amount: String) -> NapiResult<String> {
    let value = Decimal::from_str(amount.trim()).map_err(to_napi_error)?;
    Ok(emi_core::format::format_inr_currency(value))
}
