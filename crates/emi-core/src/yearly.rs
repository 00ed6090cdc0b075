//! Year-by-year view of an amortization schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::ScheduleRow;
use crate::types::Money;

const MONTHS_PER_YEAR: u32 = 12;

/// Totals for one loan year (months `12(y-1)+1 ..= 12y`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: u32,
    /// Months of the schedule that fall in this year; the last year may be partial.
    pub months: u32,
    pub total_installment: Money,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub starting_balance: Money,
    pub ending_balance: Money,
}

/// Group schedule rows into loan years. Rows must be month-ascending.
pub fn yearly_summary(schedule: &[ScheduleRow]) -> Vec<YearlySummary> {
    let mut years: Vec<YearlySummary> = Vec::new();

    for row in schedule {
        let year = row.month.div_ceil(MONTHS_PER_YEAR);
        match years.last_mut() {
            Some(current) if current.year == year => {
                current.months += 1;
                current.total_installment += row.installment;
                current.principal_paid += row.principal_component;
                current.interest_paid += row.interest_component;
                current.ending_balance = row.remaining_balance;
            }
            _ => years.push(YearlySummary {
                year,
                months: 1,
                total_installment: row.installment,
                principal_paid: row.principal_component,
                interest_paid: row.interest_component,
                starting_balance: row.remaining_balance + row.principal_component,
                ending_balance: row.remaining_balance,
            }),
        }
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_years() {
        let result = compute(dec!(500_000), dec!(8.5), dec!(20)).unwrap();
        let years = yearly_summary(&result.schedule);
        assert_eq!(years.len(), 20);
        assert!(years.iter().all(|y| y.months == 12));
        assert_eq!(years[0].starting_balance, dec!(500_000));
        assert_eq!(years[19].ending_balance, Decimal::ZERO);
        let repaid: Decimal = years.iter().map(|y| y.principal_paid).sum();
        assert_eq!(repaid, dec!(500_000));
    }

    #[test]
    fn test_partial_last_year() {
        let result = compute(dec!(100_000), dec!(10), dec!(2.5)).unwrap();
        let years = yearly_summary(&result.schedule);
        assert_eq!(years.len(), 3);
        assert_eq!(years[2].months, 6);
        assert_eq!(years[2].year, 3);
    }

    #[test]
    fn test_years_chain_balances() {
        let result = compute(dec!(750_000), dec!(9), dec!(5)).unwrap();
        let years = yearly_summary(&result.schedule);
        for pair in years.windows(2) {
            assert_eq!(pair[0].ending_balance, pair[1].starting_balance);
        }
    }

    #[test]
    fn test_empty_schedule() {
        assert!(yearly_summary(&[]).is_empty());
    }
}
