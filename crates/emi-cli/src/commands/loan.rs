use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::fs::File;

use emi_core::amortization::{self, LoanRequest, ScheduleResult};
use emi_core::{api, export, yearly};

use crate::input;

/// Loan parameters shared by every schedule command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON or YAML request (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (8.5 = 8.5% p.a.)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan tenure in years (fractions allowed)
    #[arg(long, alias = "years")]
    pub tenure_years: Option<Decimal>,
}

/// Arguments for the summary calculation
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScheduleView {
    Monthly,
    Yearly,
}

/// Arguments for printing the schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Month-by-month rows or loan-year totals
    #[arg(long, value_enum, default_value = "monthly")]
    pub view: ScheduleView,
}

/// Arguments for CSV export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Destination file (defaults to EMI_Schedule_<principal>_<months>months.csv)
    #[arg(long)]
    pub out: Option<String>,
}

/// Arguments for the request/response envelope
#[derive(Args)]
pub struct CalculateEmiArgs {
    /// Path to a JSON or YAML request body
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request = resolve_request(&args.loan)?;
    let result = amortization::calculate_schedule(&request)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = compute(&args.loan)?;
    let rows = match args.view {
        ScheduleView::Monthly => serde_json::to_value(&result.schedule)?,
        ScheduleView::Yearly => serde_json::to_value(yearly::yearly_summary(&result.schedule))?,
    };
    Ok(rows)
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = compute(&args.loan)?;
    let path = args
        .out
        .unwrap_or_else(|| export::export_file_name(&result));

    let file = File::create(&path)
        .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
    export::write_schedule_csv(&result, file)?;
    log::info!("wrote {} schedule rows to {}", result.schedule.len(), path);

    Ok(json!({
        "file": path,
        "rows": result.schedule.len(),
        "installment_amount": result.installment_amount,
        "tenure_months": result.tenure_months,
    }))
}

pub fn run_calculate_emi(args: CalculateEmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let body = if let Some(ref path) = args.input {
        input::file::read_value(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for calculate-emi".into());
    };

    let response = api::calculate_emi(&body);
    if let Some(ref message) = response.error {
        log::warn!("request rejected: {}", message);
    }
    Ok(serde_json::to_value(response)?)
}

fn compute(args: &LoanArgs) -> Result<ScheduleResult, Box<dyn std::error::Error>> {
    let request = resolve_request(args)?;
    Ok(amortization::amortize(&request.validate()?)?)
}

/// Input file, then piped stdin, then individual flags.
fn resolve_request(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        let body = input::file::read_value(path)?;
        return Ok(api::parse_request(&body)?);
    }
    if let Some(body) = input::stdin::read_stdin()? {
        return Ok(api::parse_request(&body)?);
    }
    request_from_flags(args)
}

fn request_from_flags(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    Ok(LoanRequest::new(
        args.principal
            .ok_or("--principal is required (or provide --input)")?,
        args.annual_rate
            .ok_or("--annual-rate is required (or provide --input)")?,
        args.tenure_years
            .ok_or("--tenure-years is required (or provide --input)")?,
    ))
}
