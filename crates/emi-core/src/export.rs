//! CSV export of the monthly schedule.

use std::io::Write;

use crate::amortization::ScheduleResult;
use crate::error::EmiError;
use crate::EmiResult;

pub const CSV_HEADER: [&str; 6] = [
    "Month",
    "EMI Amount",
    "Principal",
    "Interest",
    "Remaining Balance",
    "Total Interest Paid",
];

/// Write the schedule as CSV: header line, then one line per month.
pub fn write_schedule_csv<W: Write>(result: &ScheduleResult, writer: W) -> EmiResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for row in &result.schedule {
        wtr.write_record([
            row.month.to_string(),
            format!("{:.2}", row.installment),
            format!("{:.2}", row.principal_component),
            format!("{:.2}", row.interest_component),
            format!("{:.2}", row.remaining_balance),
            format!("{:.2}", row.cumulative_interest_paid),
        ])?;
    }

    wtr.flush()
        .map_err(|e| EmiError::SerializationError(e.to_string()))?;
    Ok(())
}

/// The schedule as a CSV string.
pub fn schedule_csv(result: &ScheduleResult) -> EmiResult<String> {
    let mut buf = Vec::new();
    write_schedule_csv(result, &mut buf)?;
    String::from_utf8(buf).map_err(|e| EmiError::SerializationError(e.to_string()))
}

/// Download name, e.g. `EMI_Schedule_500000_240months.csv`.
pub fn export_file_name(result: &ScheduleResult) -> String {
    format!(
        "EMI_Schedule_{}_{}months.csv",
        result.principal.normalize(),
        result.tenure_months
    )
}
