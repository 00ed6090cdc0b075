//! Loan request validation.
//!
//! [`LoanTerms`] can only be built through bounds checks, either
//! [`LoanRequest::validate`] or [`LoanTerms::new`].

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EmiError;
use crate::types::{Money, Rate, Years};
use crate::EmiResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound on the annual rate, in percent.
pub const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(100);
/// Upper bound on the tenure, in years.
pub const MAX_TENURE_YEARS: Decimal = dec!(50);
/// Longest schedule the engine will produce (50 years of months).
pub const MAX_TENURE_MONTHS: u32 = 600;
/// Largest principal the engine accepts. Closed-form balances keep the
/// schedule exact to the minor unit up to here (28 significant digits).
pub const MAX_PRINCIPAL: Decimal = dec!(1_000_000_000_000_000);

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Loan parameters as a user supplies them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Amount borrowed.
    pub principal: Money,
    /// Nominal annual rate in percent (8.5 = 8.5% p.a.).
    pub annual_rate_percent: Decimal,
    /// Loan duration in years; fractional years are allowed.
    pub tenure_years: Years,
}

/// Normalised terms the schedule is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanTerms {
    principal: Money,
    monthly_rate: Rate,
    tenure_months: u32,
}

// ---------------------------------------------------------------------------
// LoanRequest
// ---------------------------------------------------------------------------

impl LoanRequest {
    pub fn new(principal: Money, annual_rate_percent: Decimal, tenure_years: Years) -> Self {
        LoanRequest {
            principal,
            annual_rate_percent,
            tenure_years,
        }
    }

    /// Build a request from binary floats, rejecting NaN and infinities.
    pub fn from_f64(principal: f64, annual_rate_percent: f64, tenure_years: f64) -> EmiResult<Self> {
        Ok(LoanRequest {
            principal: decimal_from_f64("principal", principal)?,
            annual_rate_percent: decimal_from_f64("annual_rate", annual_rate_percent)?,
            tenure_years: decimal_from_f64("tenure_years", tenure_years)?,
        })
    }

    /// Check every bound and derive the monthly terms.
    pub fn validate(&self) -> EmiResult<LoanTerms> {
        if self.principal <= Decimal::ZERO {
            return Err(EmiError::invalid(
                "principal",
                "Please enter a valid loan amount greater than 0",
            ));
        }
        if self.principal > MAX_PRINCIPAL {
            return Err(EmiError::invalid(
                "principal",
                format!("Loan amount cannot exceed {MAX_PRINCIPAL}"),
            ));
        }
        if self.annual_rate_percent <= Decimal::ZERO
            || self.annual_rate_percent > MAX_ANNUAL_RATE_PERCENT
        {
            return Err(EmiError::invalid(
                "annual_rate",
                "Please enter a valid interest rate greater than 0% and at most 100%",
            ));
        }
        if self.tenure_years <= Decimal::ZERO || self.tenure_years > MAX_TENURE_YEARS {
            return Err(EmiError::invalid(
                "tenure_years",
                "Please enter a valid loan tenure greater than 0 and at most 50 years",
            ));
        }

        let monthly_rate = self.annual_rate_percent / MONTHS_PER_YEAR / PERCENT;
        LoanTerms::new(self.principal, monthly_rate, self.tenure_months())
    }

    /// `round(tenure_years * 12)`, half away from zero, never below one month.
    pub fn tenure_months(&self) -> u32 {
        let Some(months) = self.tenure_years.checked_mul(MONTHS_PER_YEAR) else {
            return u32::MAX;
        };
        let months = months.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        if months.is_sign_negative() {
            return 1;
        }
        months.to_u32().unwrap_or(u32::MAX).max(1)
    }
}

fn decimal_from_f64(field: &str, value: f64) -> EmiResult<Decimal> {
    if !value.is_finite() {
        return Err(EmiError::invalid(field, "Please enter valid numeric values"));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| EmiError::invalid(field, "Value is outside the supported numeric range"))
}

// ---------------------------------------------------------------------------
// LoanTerms
// ---------------------------------------------------------------------------

impl LoanTerms {
    /// Terms expressed directly per month.
    ///
    /// Unlike [`LoanRequest::validate`] this accepts a zero rate, which
    /// amortizes straight-line.
    pub fn new(principal: Money, monthly_rate: Rate, tenure_months: u32) -> EmiResult<Self> {
        if principal <= Decimal::ZERO || principal > MAX_PRINCIPAL {
            return Err(EmiError::invalid(
                "principal",
                format!("Principal must be in (0, {MAX_PRINCIPAL}]"),
            ));
        }
        let max_monthly_rate = MAX_ANNUAL_RATE_PERCENT / MONTHS_PER_YEAR / PERCENT;
        if monthly_rate < Decimal::ZERO || monthly_rate > max_monthly_rate {
            return Err(EmiError::invalid(
                "monthly_rate",
                "Monthly rate must be between 0 and 100% / 12",
            ));
        }
        if tenure_months == 0 || tenure_months > MAX_TENURE_MONTHS {
            return Err(EmiError::invalid(
                "tenure_months",
                format!("Tenure must be between 1 and {MAX_TENURE_MONTHS} months"),
            ));
        }
        Ok(LoanTerms {
            principal,
            monthly_rate,
            tenure_months,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn monthly_rate(&self) -> Rate {
        self.monthly_rate
    }

    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }
}
