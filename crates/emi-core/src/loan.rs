use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Months, RatePercent};
use crate::EmiCoreResult;

/// Magnitudes beyond which f64 amortization visibly loses precision.
const PRECISION_WARN_PRINCIPAL: Money = 1e15;
const PRECISION_WARN_TENURE: Months = 1e4;

/// Input parameters for an EMI calculation.
///
/// All fields are plain f64 so that coerced form input (empty fields become
/// zero, unparseable text becomes NaN) travels through the computation
/// unchanged. There is deliberately no validation here: out-of-domain input
/// degrades to the zero result instead of erroring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LoanInput {
    /// Principal amount borrowed
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5% p.a.)
    pub annual_rate_percent: RatePercent,
    /// Repayment duration in months
    pub tenure_months: Months,
}

impl LoanInput {
    /// Build an input from raw form-field strings.
    ///
    /// Mirrors the numeric coercion of the calculator form: a trimmed empty
    /// string coerces to 0, unparseable text coerces to NaN. Both fail the
    /// `> 0` gates in [`compute`] and land in the zero-result branch, so
    /// this never needs to fail.
    pub fn from_raw(principal: &str, annual_rate_percent: &str, tenure_months: &str) -> Self {
        LoanInput {
            principal: coerce_numeric(principal),
            annual_rate_percent: coerce_numeric(annual_rate_percent),
            tenure_months: coerce_numeric(tenure_months),
        }
    }

    /// Decode an input from a JSON document.
    pub fn from_json(json: &str) -> EmiCoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of an EMI calculation. Derived deterministically from a
/// [`LoanInput`]; never mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    /// Fixed monthly payment
    pub monthly_payment: Money,
    /// Total paid over the full tenure
    pub total_payable: Money,
    /// Interest component of the total (total payable minus principal)
    pub total_interest: Money,
}

impl EmiResult {
    /// The degraded result for out-of-domain input.
    pub const ZERO: EmiResult = EmiResult {
        monthly_payment: 0.0,
        total_payable: 0.0,
        total_interest: 0.0,
    };
}

/// Equated Monthly Installment for a fixed-rate, reducing-balance loan.
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r the monthly rate
/// (annual percent / 1200) and n the tenure in months. A non-positive rate
/// degrades to straight-line division of the principal.
///
/// Non-positive or NaN principal/tenure yields [`EmiResult::ZERO`]; the
/// function never fails and applies no rounding — rounding belongs to the
/// display layer.
pub fn compute(
    principal: Money,
    annual_rate_percent: RatePercent,
    tenure_months: Months,
) -> EmiResult {
    if principal.is_nan() || tenure_months.is_nan() || principal <= 0.0 || tenure_months <= 0.0 {
        return EmiResult::ZERO;
    }

    let monthly_payment = if annual_rate_percent > 0.0 {
        let monthly_rate = annual_rate_percent / (12.0 * 100.0);
        // growth > 1 whenever rate and tenure are positive, so the
        // denominator cannot be zero.
        let growth = (1.0 + monthly_rate).powf(tenure_months);
        principal * monthly_rate * growth / (growth - 1.0)
    } else {
        // Zero, negative and NaN rates all take the interest-free branch.
        principal / tenure_months
    };

    let total_payable = monthly_payment * tenure_months;
    let total_interest = total_payable - principal;

    EmiResult {
        monthly_payment,
        total_payable,
        total_interest,
    }
}

/// Calculate an EMI and wrap it in the standard output envelope.
///
/// The envelope carries reasonableness warnings alongside the result;
/// warnings never alter the computed values and this function, like
/// [`compute`], cannot fail.
pub fn calculate_emi(input: &LoanInput) -> ComputationOutput<EmiResult> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute(
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
    );

    if input.annual_rate_percent < 0.0 {
        warnings.push(format!(
            "Negative annual rate ({}) treated as interest-free",
            input.annual_rate_percent
        ));
    }
    if input.principal > PRECISION_WARN_PRINCIPAL || input.tenure_months > PRECISION_WARN_TENURE {
        warnings.push(
            "Extreme principal or tenure magnitude: f64 amortization may lose precision"
                .to_string(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "EMI via fixed-rate amortization",
        input,
        warnings,
        elapsed,
        result,
    )
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Form-field numeric coercion: empty becomes 0, garbage becomes NaN.
fn coerce_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Typical retail loan: 5 lakh at 8.5% p.a. over two years.
    fn sample_input() -> LoanInput {
        LoanInput {
            principal: 500_000.0,
            annual_rate_percent: 8.5,
            tenure_months: 24.0,
        }
    }

    #[test]
    fn test_standard_amortization() {
        let input = sample_input();
        let result = compute(
            input.principal,
            input.annual_rate_percent,
            input.tenure_months,
        );

        // r = 8.5/1200, growth = (1 + r)^24 = 1.1845948
        // EMI = 500000 * r * growth / (growth - 1) = 22727.84
        assert!(
            (result.monthly_payment - 22_727.84).abs() < 0.5,
            "Monthly payment: expected ~22727.84, got {}",
            result.monthly_payment
        );
        assert!(
            (result.total_payable - 545_468.10).abs() < 15.0,
            "Total payable: expected ~545468, got {}",
            result.total_payable
        );
        assert!(
            (result.total_interest - 45_468.10).abs() < 15.0,
            "Total interest: expected ~45468, got {}",
            result.total_interest
        );
    }

    #[test]
    fn test_totals_are_exact_identities() {
        let result = compute(500_000.0, 8.5, 24.0);
        assert_eq!(result.monthly_payment * 24.0, result.total_payable);
        assert_eq!(result.total_payable - 500_000.0, result.total_interest);
    }

    #[test]
    fn test_zero_rate_straight_line() {
        let result = compute(100_000.0, 0.0, 10.0);
        assert_eq!(result.monthly_payment, 10_000.0);
        assert_eq!(result.total_payable, 100_000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_negative_rate_matches_zero_rate() {
        let zero = compute(100_000.0, 0.0, 10.0);
        let negative = compute(100_000.0, -3.0, 10.0);
        assert_eq!(zero, negative);
    }

    #[test]
    fn test_zero_principal_degrades_to_zero() {
        assert_eq!(compute(0.0, 8.5, 24.0), EmiResult::ZERO);
    }

    #[test]
    fn test_zero_tenure_degrades_to_zero() {
        assert_eq!(compute(500_000.0, 8.5, 0.0), EmiResult::ZERO);
    }

    #[test]
    fn test_negative_input_degrades_to_zero() {
        assert_eq!(compute(-500_000.0, 8.5, 24.0), EmiResult::ZERO);
        assert_eq!(compute(500_000.0, 8.5, -24.0), EmiResult::ZERO);
    }

    #[test]
    fn test_nan_input_degrades_to_zero() {
        assert_eq!(compute(f64::NAN, 8.5, 24.0), EmiResult::ZERO);
        assert_eq!(compute(500_000.0, 8.5, f64::NAN), EmiResult::ZERO);
    }

    #[test]
    fn test_nan_rate_takes_interest_free_branch() {
        let result = compute(100_000.0, f64::NAN, 10.0);
        assert_eq!(result.monthly_payment, 10_000.0);
    }

    #[test]
    fn test_rate_monotonicity() {
        let lower = compute(500_000.0, 8.5, 24.0);
        let higher = compute(500_000.0, 9.0, 24.0);
        assert!(
            higher.monthly_payment > lower.monthly_payment,
            "Payment at 9.0% ({}) should exceed payment at 8.5% ({})",
            higher.monthly_payment,
            lower.monthly_payment
        );
    }

    #[test]
    fn test_idempotent_bit_for_bit() {
        let a = compute(500_000.0, 8.5, 24.0);
        let b = compute(500_000.0, 8.5, 24.0);
        assert_eq!(a.monthly_payment.to_bits(), b.monthly_payment.to_bits());
        assert_eq!(a.total_payable.to_bits(), b.total_payable.to_bits());
        assert_eq!(a.total_interest.to_bits(), b.total_interest.to_bits());
    }

    #[test]
    fn test_from_raw_coercion() {
        let input = LoanInput::from_raw(" 500000 ", "8.5", "24");
        assert_eq!(input.principal, 500_000.0);
        assert_eq!(input.annual_rate_percent, 8.5);
        assert_eq!(input.tenure_months, 24.0);

        let empty = LoanInput::from_raw("", "8.5", "24");
        assert_eq!(empty.principal, 0.0);

        let garbage = LoanInput::from_raw("five lakh", "8.5", "24");
        assert!(garbage.principal.is_nan());
        let result = compute(
            garbage.principal,
            garbage.annual_rate_percent,
            garbage.tenure_months,
        );
        assert_eq!(result, EmiResult::ZERO);
    }

    #[test]
    fn test_from_json() {
        let input = LoanInput::from_json(
            r#"{"principal": 500000, "annual_rate_percent": 8.5, "tenure_months": 24}"#,
        )
        .unwrap();
        assert_eq!(input.principal, 500_000.0);

        assert!(LoanInput::from_json("not json").is_err());
    }

    #[test]
    fn test_envelope_methodology_and_warnings() {
        let output = calculate_emi(&sample_input());
        assert_eq!(output.methodology, "EMI via fixed-rate amortization");
        assert!(output.warnings.is_empty());

        let negative = calculate_emi(&LoanInput {
            principal: 100_000.0,
            annual_rate_percent: -2.0,
            tenure_months: 12.0,
        });
        assert!(negative
            .warnings
            .iter()
            .any(|w| w.contains("interest-free")));
        // Warnings never change the computed values.
        assert_eq!(negative.result, compute(100_000.0, -2.0, 12.0));
    }

    #[test]
    fn test_envelope_precision_warning() {
        let output = calculate_emi(&LoanInput {
            principal: 1e16,
            annual_rate_percent: 8.5,
            tenure_months: 24.0,
        });
        assert!(output.warnings.iter().any(|w| w.contains("precision")));
    }
}
