//! Installment and amortization schedule.
//!
//! Arithmetic runs at full Decimal precision; only emitted figures are
//! rounded to the currency's minor unit. Each month's balance comes from the
//! closed-form annuity balance, not from subtracting payments, so every row
//! pays the same installment to the minor unit even at 100% over 50 years.
//! Emitted principal components are
//! differences of consecutive rounded balances, so they always sum to the
//! rounded principal and the last balance is exactly zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::request::{LoanRequest, LoanTerms};
use crate::time_value::{compound_factor, level_payment};
use crate::types::{with_metadata, ComputationOutput, Money, Years};
use crate::EmiResult;

/// Decimal places of the currency's minor unit.
const MINOR_UNIT_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Output Types
// ---------------------------------------------------------------------------

/// One month of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    /// Amount paid this month (the EMI, or the clamped final payment).
    pub installment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub remaining_balance: Money,
    pub cumulative_principal_paid: Money,
    pub cumulative_interest_paid: Money,
}

/// Installment, totals and the full month-by-month breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub installment_amount: Money,
    pub total_amount_payable: Money,
    pub total_interest_payable: Money,
    pub principal: Money,
    pub tenure_months: u32,
    pub schedule: Vec<ScheduleRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate the loan parameters and build the full schedule.
pub fn compute(
    principal: Money,
    annual_rate_percent: Decimal,
    tenure_years: Years,
) -> EmiResult<ScheduleResult> {
    let request = LoanRequest::new(principal, annual_rate_percent, tenure_years);
    let terms = request.validate()?;
    amortize(&terms)
}

/// [`compute`] wrapped in the standard computation envelope.
pub fn calculate_schedule(
    input: &LoanRequest,
) -> EmiResult<ComputationOutput<ScheduleResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let terms = input.validate()?;

    let exact_months = input.tenure_years * Decimal::from(12);
    if exact_months != Decimal::from(terms.tenure_months()) {
        warnings.push(format!(
            "Tenure of {} years ({} months) rounded to {} months",
            input.tenure_years.normalize(),
            exact_months.normalize(),
            terms.tenure_months()
        ));
    }

    let result = amortize(&terms)?;

    if let Some(first) = result.schedule.first() {
        if first.principal_component.is_zero() && result.schedule.len() > 1 {
            warnings.push(
                "Opening installments are almost entirely interest; \
                 principal repaid in the first month rounds to zero"
                    .into(),
            );
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-installment amortization (EMI = P·r·(1+r)^n / ((1+r)^n − 1))",
        input,
        warnings,
        elapsed,
        result,
    ))
}

/// Amortize already-validated terms. A zero monthly rate repays straight-line.
pub fn amortize(terms: &LoanTerms) -> EmiResult<ScheduleResult> {
    let principal = terms.principal();
    let rate = terms.monthly_rate();
    let months = terms.tenure_months();

    let installment = level_payment(rate, months, principal)?;
    log::debug!(
        "amortizing {} over {} months at {} per month: installment {}",
        principal,
        months,
        rate,
        installment
    );

    let growth = Decimal::ONE + rate;
    let full_factor = compound_factor(rate, months);
    let rounded_principal = to_minor_unit(principal);
    let mut balance = principal;
    let mut growth_to_date = Decimal::ONE;
    let mut prev_rounded_balance = rounded_principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut schedule = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest = balance * rate;
        growth_to_date *= growth;
        // The last month closes whatever the closed form leaves behind.
        let next_balance = if month == months {
            Decimal::ZERO
        } else {
            balance_after(principal, month, months, growth_to_date, full_factor)
        };
        let principal_component = balance - next_balance;
        let payment = principal_component + interest;

        balance = next_balance;
        cumulative_interest += interest;
        total_paid += payment;

        let rounded_balance = to_minor_unit(balance);
        schedule.push(ScheduleRow {
            month,
            installment: to_minor_unit(payment),
            principal_component: prev_rounded_balance - rounded_balance,
            interest_component: to_minor_unit(interest),
            remaining_balance: rounded_balance,
            cumulative_principal_paid: rounded_principal - rounded_balance,
            cumulative_interest_paid: to_minor_unit(cumulative_interest),
        });
        prev_rounded_balance = rounded_balance;

        log::trace!("month {month}: balance {balance}");
    }

    Ok(ScheduleResult {
        installment_amount: to_minor_unit(installment),
        total_amount_payable: to_minor_unit(total_paid),
        total_interest_payable: to_minor_unit(total_paid - principal),
        principal,
        tenure_months: months,
        schedule,
    })
}

/// Outstanding balance after `month` level payments, `P·(F − Gₖ)/(F − 1)`
/// with `Gₖ = (1+r)^month` and `F = (1+r)^months`.
///
/// Evaluated per month rather than by subtracting payments, so truncation
/// in one month never compounds into the next.
fn balance_after(
    principal: Money,
    month: u32,
    months: u32,
    growth_to_date: Decimal,
    full_factor: Decimal,
) -> Money {
    let denominator = full_factor - Decimal::ONE;
    if denominator.is_zero() {
        // Zero rate: straight-line.
        return principal * Decimal::from(months - month) / Decimal::from(months);
    }
    principal * ((full_factor - growth_to_date) / denominator)
}

/// Round to the minor currency unit, half away from zero.
pub fn to_minor_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::MidpointAwayFromZero)
}
