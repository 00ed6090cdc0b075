use emi_core::amortization::{self, LoanRequest, LoanTerms, ScheduleResult};
use emi_core::api;
use emi_core::export;
use emi_core::yearly;
use emi_core::EmiError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn sample_loans() -> Vec<(Decimal, Decimal, Decimal)> {
    vec![
        (dec!(500_000), dec!(8.5), dec!(20)),
        (dec!(1_000), dec!(0.1), dec!(1)),
        (dec!(75_000.99), dec!(13.75), dec!(3.25)),
        (dec!(2_500_000), dec!(6.95), dec!(30)),
        (dec!(40_000), dec!(24), dec!(0.5)),
        (dec!(10_000_000), dec!(100), dec!(50)),
        (dec!(999.99), dec!(18), dec!(0.04)),
    ]
}

fn run(p: Decimal, r: Decimal, t: Decimal) -> ScheduleResult {
    amortization::compute(p, r, t)
        .unwrap_or_else(|e| panic!("compute({p}, {r}, {t}) failed: {e}"))
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_principal_components_sum_to_principal() {
    for (p, r, t) in sample_loans() {
        let result = run(p, r, t);
        let repaid: Decimal = result.schedule.iter().map(|row| row.principal_component).sum();
        assert!(
            (repaid - p).abs() <= dec!(0.01),
            "repaid {repaid} vs principal {p}"
        );
    }
}

#[test]
fn test_final_balance_is_exactly_zero() {
    for (p, r, t) in sample_loans() {
        let result = run(p, r, t);
        let last = result.schedule.last().expect("non-empty schedule");
        assert!(last.remaining_balance.is_zero(), "loan {p}/{r}/{t}");
    }
}

#[test]
fn test_totals_reconcile_with_principal() {
    for (p, r, t) in sample_loans() {
        let result = run(p, r, t);
        let diff = result.total_amount_payable - result.total_interest_payable - result.principal;
        assert!(diff.abs() <= dec!(0.01), "loan {p}/{r}/{t}: diff {diff}");

        let last = result.schedule.last().unwrap();
        assert_eq!(last.cumulative_interest_paid, result.total_interest_payable);
    }
}

#[test]
fn test_months_are_contiguous() {
    for (p, r, t) in sample_loans() {
        let result = run(p, r, t);
        assert_eq!(result.schedule.len() as u32, result.tenure_months);
        for (i, row) in result.schedule.iter().enumerate() {
            assert_eq!(row.month, i as u32 + 1);
        }
    }
}

#[test]
fn test_final_installment_matches_emi() {
    let mut loans = sample_loans();
    loans.push((dec!(10_000_000_000), dec!(100), dec!(50)));
    loans.push((dec!(1_000_000_000_000_000), dec!(100), dec!(50)));
    for (p, r, t) in loans {
        let result = run(p, r, t);
        let last = result.schedule.last().unwrap();
        let drift = (last.installment - result.installment_amount).abs();
        assert!(drift <= dec!(0.01), "loan {p}/{r}/{t}: final installment drifted by {drift}");
    }
}

#[test]
fn test_balance_never_increases() {
    for (p, r, t) in sample_loans() {
        let result = run(p, r, t);
        let mut prev = result.principal;
        for row in &result.schedule {
            assert!(row.remaining_balance <= prev);
            prev = row.remaining_balance;
        }
    }
}

#[test]
fn test_tiny_loan_balance_plateaus_without_rising() {
    // Monthly principal well under one paisa: rounded balances repeat.
    let result = run(dec!(1), dec!(100), dec!(50));
    let plateaus = result
        .schedule
        .windows(2)
        .filter(|pair| pair[1].remaining_balance == pair[0].remaining_balance)
        .count();
    assert!(plateaus > 0);
    for pair in result.schedule.windows(2) {
        assert!(pair[1].remaining_balance <= pair[0].remaining_balance);
    }
}

#[test]
fn test_balance_strictly_decreases_for_home_loan() {
    let result = run(dec!(2_500_000), dec!(6.95), dec!(30));
    for pair in result.schedule.windows(2) {
        assert!(pair[1].remaining_balance < pair[0].remaining_balance);
    }
}

// ===========================================================================
// Known answers and boundaries
// ===========================================================================

#[test]
fn test_reference_loan_500k_8_5pct_20y() {
    let result = run(dec!(500_000), dec!(8.5), dec!(20));
    assert_eq!(result.tenure_months, 240);
    assert_eq!(result.installment_amount, dec!(4339.12));
    assert_eq!(result.total_amount_payable, dec!(1_041_387.88));
    assert_eq!(result.total_interest_payable, dec!(541_387.88));
}

#[test]
fn test_one_percent_monthly_known_answer() {
    // 12% p.a. = 1% per month; 100,000 over 12 months → 8,884.88
    let result = run(dec!(100_000), dec!(12), dec!(1));
    assert_eq!(result.installment_amount, dec!(8884.88));
}

#[test]
fn test_zero_rate_terms_amortize_straight_line() {
    let terms = LoanTerms::new(dec!(36_000), Decimal::ZERO, 36).unwrap();
    let result = amortization::amortize(&terms).unwrap();
    assert_eq!(result.installment_amount, dec!(1000));
    for row in &result.schedule {
        assert!(row.interest_component.is_zero());
        assert_eq!(row.installment, dec!(1000));
    }
}

#[test]
fn test_tiny_tenure_is_single_payment() {
    let result = run(dec!(10_000), dec!(12), dec!(0.001));
    assert_eq!(result.schedule.len(), 1);
    let row = &result.schedule[0];
    assert_eq!(row.installment, dec!(10_100));
    assert_eq!(row.interest_component, dec!(100));
    assert!(row.remaining_balance.is_zero());
}

#[test]
fn test_invalid_inputs_rejected() {
    let cases = [
        (dec!(0), dec!(8.5), dec!(20)),
        (dec!(500_000), dec!(0), dec!(20)),
        (dec!(500_000), dec!(101), dec!(20)),
        (dec!(500_000), dec!(8.5), dec!(51)),
        (dec!(500_000), dec!(8.5), dec!(0)),
        (dec!(-1), dec!(8.5), dec!(20)),
    ];
    for (p, r, t) in cases {
        let err = amortization::compute(p, r, t).unwrap_err();
        assert!(matches!(err, EmiError::InvalidInput { .. }), "{p}/{r}/{t}");
    }
}

#[test]
fn test_request_from_non_finite_floats_rejected() {
    assert!(LoanRequest::from_f64(f64::NAN, 8.5, 20.0).is_err());
    assert!(LoanRequest::from_f64(500_000.0, 8.5, f64::INFINITY).is_err());
}

// ===========================================================================
// Projections
// ===========================================================================

#[test]
fn test_envelope_matches_engine() {
    let response = api::calculate_emi(&json!({
        "principal": "500000",
        "annual_rate": 8.5,
        "tenure_years": 20
    }));
    let result = run(dec!(500_000), dec!(8.5), dec!(20));

    assert!(response.success);
    assert_eq!(response.total_amount, Some(result.total_amount_payable));
    assert_eq!(response.total_interest, Some(result.total_interest_payable));

    let rows = response.emi_schedule.unwrap();
    assert_eq!(rows[239].total_principal_paid, dec!(500_000));
    assert_eq!(rows[0].principal, result.schedule[0].principal_component);
}

#[test]
fn test_yearly_view_partitions_schedule() {
    let result = run(dec!(75_000.99), dec!(13.75), dec!(3.25));
    let years = yearly::yearly_summary(&result.schedule);
    assert_eq!(years.len(), 4);
    assert_eq!(years.iter().map(|y| y.months).sum::<u32>(), 39);

    let interest: Decimal = years.iter().map(|y| y.interest_paid).sum();
    let row_interest: Decimal = result.schedule.iter().map(|r| r.interest_component).sum();
    assert_eq!(interest, row_interest);
}

#[test]
fn test_csv_export_line_count() {
    let result = run(dec!(40_000), dec!(24), dec!(0.5));
    let csv = export::schedule_csv(&result).unwrap();
    assert_eq!(csv.lines().count(), 7);
    assert_eq!(export::export_file_name(&result), "EMI_Schedule_40000_6months.csv");
}
