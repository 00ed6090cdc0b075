//! Fixed-installment (EMI) loan amortization.
//!
//! [`request`] turns user-facing loan parameters into validated
//! [`LoanTerms`](request::LoanTerms); [`schedule`] produces the installment
//! and the month-by-month breakdown from those terms.

pub mod request;
pub mod schedule;

pub use request::{LoanRequest, LoanTerms};
pub use schedule::{amortize, calculate_schedule, compute, ScheduleResult, ScheduleRow};
