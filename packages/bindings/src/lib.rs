use napi::Result as NapiResult;
use napi_derive::napi;

use emi_core::currency;
use emi_core::loan::{self, LoanInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Calculate an EMI from a JSON loan input, returning the serialized
/// output envelope.
#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input = LoanInput::from_json(&input_json).map_err(to_napi_error)?;
    let output = loan::calculate_emi(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Raw-string variant mirroring the calculator form fields: empty or
/// non-numeric strings coerce the way the form does, so invalid input
/// yields the zero result rather than an error.
#[napi]
pub fn calculate_emi_from_form(
    principal: String,
    annual_rate_percent: String,
    tenure_months: String,
) -> NapiResult<String> {
    let input = LoanInput::from_raw(&principal, &annual_rate_percent, &tenure_months);
    let result = loan::compute(
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
    );
    serde_json::to_string(&result).map_err(to_napi_error)
}

/// Render an amount as Indian-format currency with no fractional digits.
#[napi]
pub fn format_currency(amount: f64) -> String {
    currency::format_inr(amount)
}
