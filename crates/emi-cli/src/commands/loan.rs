use clap::Args;
use serde_json::Value;

use emi_core::currency;
use emi_core::loan::{self, LoanInput};

use crate::input;

/// Arguments for the EMI calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct EmiArgs {
    /// Principal amount borrowed (e.g. 500000)
    #[arg(long, short = 'p')]
    pub principal: Option<f64>,

    /// Annual interest rate in percent (e.g. 8.5 for 8.5% p.a.)
    #[arg(long, short = 'r', alias = "annual-rate")]
    pub rate: Option<f64>,

    /// Loan tenure in months (e.g. 24)
    #[arg(long, short = 't', alias = "months")]
    pub tenure: Option<f64>,

    /// Render amounts as Indian-format currency (₹, no paise)
    #[arg(long)]
    pub formatted: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_loan_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        // Missing flags behave like empty form fields: they coerce to zero
        // and the calculation degrades to the zero result.
        LoanInput {
            principal: args.principal.unwrap_or(0.0),
            annual_rate_percent: args.rate.unwrap_or(0.0),
            tenure_months: args.tenure.unwrap_or(0.0),
        }
    };

    let output = loan::calculate_emi(&loan_input);
    let mut value = serde_json::to_value(&output)?;

    if args.formatted {
        value["result"] = serde_json::to_value(currency::format_result(&output.result))?;
    }

    Ok(value)
}
