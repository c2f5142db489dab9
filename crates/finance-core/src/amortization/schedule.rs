//! Fixed-payment (French / annuity) debt amortization.
//!
//! Every installment carries the same total payment; the split between
//! interest and principal shifts towards principal as the balance falls.
//! Interest accrues monthly at `annual_rate_percent / 12 / 100` on the
//! outstanding balance.
//!
//! Reported row fields are rounded to cents independently. The running
//! balance is carried unrounded, so the rounded principal column does not
//! necessarily add up to the original principal. That drift is surfaced as
//! a warning by [`amortize_debt`] and never corrected.

use std::time::Instant;

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::types::{round_cents, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::FinanceResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT_DIVISOR: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single installment in the amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Installment number (1-indexed)
    pub installment_number: u32,
    /// Start date plus `installment_number` whole months
    pub due_date: NaiveDate,
    /// Principal repaid by this installment
    pub principal_portion: Money,
    /// Interest charged for the month
    pub interest_portion: Money,
    /// Level payment
    pub total_payment: Money,
    /// Outstanding balance after this installment
    pub remaining_balance: Money,
}

/// Level payment plus the ordered installment rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub rows: Vec<ScheduleRow>,
}

/// Debt as registered by the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtInput {
    /// Display name of the debt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate in percent (12.5 = 12.5%)
    #[serde(alias = "rateAnnual")]
    pub annual_rate_percent: Percent,
    /// Number of monthly installments
    #[serde(alias = "termMonths")]
    pub term_months: u32,
    /// Disbursement date; the first installment falls one month later
    #[serde(alias = "startDate")]
    pub start_date: NaiveDate,
}

/// Totals over the reported (rounded) schedule rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_payments: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub final_balance: Money,
    pub maturity_date: NaiveDate,
}

/// Full output of [`amortize_debt`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtScheduleOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub monthly_payment: Money,
    pub monthly_rate: Rate,
    pub summary: ScheduleSummary,
    pub rows: Vec<ScheduleRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the fixed-payment amortization schedule for a loan.
///
/// Payment: `P * r / (1 - (1 + r)^-n)`, or `P / n` when the rate is zero.
/// The loop accumulates with the unrounded payment; only the reported fields
/// are rounded.
pub fn build_schedule(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
    start_date: NaiveDate,
) -> FinanceResult<AmortizationSchedule> {
    validate_terms(principal, annual_rate_percent, term_months)?;

    let rate = monthly_rate(annual_rate_percent);
    let payment = level_payment(principal, rate, term_months)?;

    let mut rows = Vec::with_capacity(term_months as usize);
    let mut balance = principal;

    for n in 1..=term_months {
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| overflow("annual_rate_percent"))?;
        let principal_due = payment
            .checked_sub(interest)
            .ok_or_else(|| overflow("annual_rate_percent"))?;
        balance = balance
            .checked_sub(principal_due)
            .ok_or_else(|| overflow("principal"))?
            .max(Decimal::ZERO);

        rows.push(ScheduleRow {
            installment_number: n,
            due_date: due_date(start_date, n)?,
            principal_portion: round_cents(principal_due),
            interest_portion: round_cents(interest),
            total_payment: round_cents(payment),
            remaining_balance: round_cents(balance),
        });
    }

    Ok(AmortizationSchedule {
        monthly_payment: round_cents(payment),
        rows,
    })
}

/// Build the schedule for a registered debt and wrap it with a summary,
/// rounding-drift warnings and computation metadata.
pub fn amortize_debt(input: &DebtInput) -> FinanceResult<ComputationOutput<DebtScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = build_schedule(
        input.principal,
        input.annual_rate_percent,
        input.term_months,
        input.start_date,
    )?;

    let summary = summarize(&schedule.rows, input.start_date)?;

    if !summary.final_balance.is_zero() {
        warnings.push(format!(
            "Final installment leaves a balance of {} from cent rounding; no balloon adjustment applied",
            summary.final_balance
        ));
    }
    if summary.total_principal != input.principal {
        warnings.push(format!(
            "Rounded principal portions sum to {} against a principal of {}",
            summary.total_principal, input.principal
        ));
    }

    let output = DebtScheduleOutput {
        name: input.name.clone(),
        monthly_payment: schedule.monthly_payment,
        monthly_rate: monthly_rate(input.annual_rate_percent),
        summary,
        rows: schedule.rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "French (annuity) amortization, monthly compounding",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_terms(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> FinanceResult<()> {
    if principal <= Decimal::ZERO {
        return Err(FinanceError::InvalidLoanTerms {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if term_months == 0 {
        return Err(FinanceError::InvalidLoanTerms {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(FinanceError::InvalidLoanTerms {
            field: "annual_rate_percent".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    Ok(())
}

/// Terms that pass validation but push an intermediate past `Decimal::MAX`.
fn overflow(field: &str) -> FinanceError {
    FinanceError::InvalidLoanTerms {
        field: field.into(),
        reason: "Amount too large to amortize without overflow".into(),
    }
}

// ---------------------------------------------------------------------------
// Math helpers
// ---------------------------------------------------------------------------

/// Monthly decimal rate from an annual percentage.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT_DIVISOR
}

/// Unrounded level payment.
fn level_payment(principal: Money, rate: Rate, term_months: u32) -> FinanceResult<Money> {
    let straight_line = principal / Decimal::from(term_months);
    if rate.is_zero() {
        return Ok(straight_line);
    }

    // (1 + r)^-n by iterative multiplication of the one-period discount
    // factor; stays below one so it cannot overflow on long terms.
    let one_period = Decimal::ONE / (Decimal::ONE + rate);
    let mut discount = Decimal::ONE;
    for _ in 0..term_months {
        discount *= one_period;
    }

    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        // Rate too small to register at 28 decimal places
        return Ok(straight_line);
    }
    principal
        .checked_mul(rate / denominator)
        .ok_or_else(|| overflow("principal"))
}

/// `start + n` months, clamped to the last day of the target month.
fn due_date(start: NaiveDate, n: u32) -> FinanceResult<NaiveDate> {
    start
        .checked_add_months(Months::new(n))
        .ok_or_else(|| FinanceError::DateError(format!("{start} + {n} months is out of range")))
}

fn summarize(rows: &[ScheduleRow], start_date: NaiveDate) -> FinanceResult<ScheduleSummary> {
    let total = |column: fn(&ScheduleRow) -> Money| {
        rows.iter()
            .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(column(r)))
            .ok_or_else(|| overflow("principal"))
    };
    let total_payments = total(|r| r.total_payment)?;
    let total_interest = total(|r| r.interest_portion)?;
    let total_principal = total(|r| r.principal_portion)?;
    let (final_balance, maturity_date) = rows
        .last()
        .map(|r| (r.remaining_balance, r.due_date))
        .unwrap_or((Decimal::ZERO, start_date));

    Ok(ScheduleSummary {
        total_payments,
        total_interest,
        total_principal,
        final_balance,
        maturity_date,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn car_loan() -> DebtInput {
        DebtInput {
            name: Some("Car loan".to_string()),
            principal: dec!(250000),
            annual_rate_percent: dec!(12),
            term_months: 48,
            start_date: date(2024, 1, 1),
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let s = build_schedule(dec!(1200), dec!(0), 12, date(2024, 1, 1)).unwrap();
        assert_eq!(s.monthly_payment, dec!(100.00));
        assert_eq!(s.rows.len(), 12);
        for row in &s.rows {
            assert_eq!(row.principal_portion, dec!(100.00));
            assert_eq!(row.interest_portion, dec!(0.00));
            assert_eq!(row.total_payment, dec!(100.00));
        }
        assert_eq!(s.rows[11].remaining_balance, dec!(0.00));
    }

    #[test]
    fn test_standard_annuity_payment() {
        let s = build_schedule(dec!(250000), dec!(12), 48, date(2024, 1, 1)).unwrap();
        // 250000 * 0.01 / (1 - 1.01^-48) = 6583.4588...
        assert_eq!(s.monthly_payment, dec!(6583.46));
        assert_eq!(s.rows[0].interest_portion, dec!(2500.00));
        assert_eq!(s.rows[0].principal_portion, dec!(4083.46));
        assert_eq!(s.rows[0].remaining_balance, dec!(245916.54));
        assert_eq!(s.rows[1].interest_portion, dec!(2459.17));
        assert_eq!(s.rows[47].remaining_balance, dec!(0.00));
    }

    #[test]
    fn test_row_count_and_order() {
        let s = build_schedule(dec!(5000), dec!(18.5), 7, date(2024, 3, 15)).unwrap();
        assert_eq!(s.rows.len(), 7);
        for (i, row) in s.rows.iter().enumerate() {
            assert_eq!(row.installment_number, i as u32 + 1);
        }
        assert!(s.rows.windows(2).all(|w| w[0].due_date < w[1].due_date));
    }

    #[test]
    fn test_balance_monotonic_and_non_negative() {
        for (p, rate, n) in [
            (dec!(1000), dec!(0), 1),
            (dec!(99999.99), dec!(35), 36),
            (dec!(12.34), dec!(7.25), 360),
            (dec!(800000), dec!(9.9), 240),
        ] {
            let s = build_schedule(p, rate, n, date(2024, 1, 1)).unwrap();
            assert!(s
                .rows
                .windows(2)
                .all(|w| w[1].remaining_balance <= w[0].remaining_balance));
            assert!(s.rows.last().unwrap().remaining_balance >= Decimal::ZERO);
        }
    }

    #[test]
    fn test_payment_equals_principal_plus_interest() {
        let s = build_schedule(dec!(73500), dec!(14.75), 60, date(2024, 1, 1)).unwrap();
        for row in &s.rows {
            let diff = (row.total_payment - (row.principal_portion + row.interest_portion)).abs();
            assert!(diff <= dec!(0.01), "row {} off by {diff}", row.installment_number);
        }
    }

    #[test]
    fn test_single_installment_repays_principal_plus_interest() {
        let s = build_schedule(dec!(1000), dec!(12), 1, date(2024, 1, 1)).unwrap();
        assert_eq!(s.monthly_payment, dec!(1010.00));
        assert_eq!(s.rows[0].interest_portion, dec!(10.00));
        assert_eq!(s.rows[0].principal_portion, dec!(1000.00));
        assert_eq!(s.rows[0].remaining_balance, dec!(0.00));
    }

    #[test]
    fn test_due_dates_clamp_to_month_end() {
        let s = build_schedule(dec!(300), dec!(0), 4, date(2024, 1, 31)).unwrap();
        let dates: Vec<NaiveDate> = s.rows.iter().map(|r| r.due_date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
                date(2024, 5, 31),
            ]
        );
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = build_schedule(dec!(-100), dec!(10), 12, date(2024, 6, 1)).unwrap_err();
        match err {
            FinanceError::InvalidLoanTerms { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidLoanTerms, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_principal_rejected() {
        let result = build_schedule(dec!(0), dec!(10), 12, date(2024, 6, 1));
        assert!(matches!(result, Err(FinanceError::InvalidLoanTerms { .. })));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = build_schedule(dec!(1000), dec!(10), 0, date(2024, 6, 1)).unwrap_err();
        match err {
            FinanceError::InvalidLoanTerms { field, .. } => assert_eq!(field, "term_months"),
            other => panic!("Expected InvalidLoanTerms, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = build_schedule(dec!(1000), dec!(-1), 12, date(2024, 6, 1));
        assert!(matches!(result, Err(FinanceError::InvalidLoanTerms { .. })));
    }

    #[test]
    fn test_near_max_principal_is_an_error_not_a_panic() {
        let principal = Decimal::MAX - dec!(1);
        let err = build_schedule(principal, dec!(12), 1, date(2024, 1, 1)).unwrap_err();
        match err {
            FinanceError::InvalidLoanTerms { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidLoanTerms, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_overflow_is_an_error_not_a_panic() {
        // Each row fits; twelve payments of ~1e28 do not.
        let input = DebtInput {
            name: None,
            principal: dec!(10000000000000000000000000000),
            annual_rate_percent: dec!(1200),
            term_months: 12,
            start_date: date(2024, 1, 1),
        };
        assert!(build_schedule(
            input.principal,
            input.annual_rate_percent,
            input.term_months,
            input.start_date
        )
        .is_ok());
        assert!(matches!(
            amortize_debt(&input),
            Err(FinanceError::InvalidLoanTerms { .. })
        ));
    }

    #[test]
    fn test_paid_off_balance_reports_two_places() {
        let s = build_schedule(dec!(1000), dec!(12), 1, date(2024, 1, 1)).unwrap();
        assert_eq!(s.rows[0].remaining_balance.to_string(), "0.00");
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_amortize_debt_summary() {
        let out = amortize_debt(&car_loan()).unwrap();
        let r = &out.result;
        assert_eq!(r.name.as_deref(), Some("Car loan"));
        assert_eq!(r.monthly_payment, dec!(6583.46));
        assert_eq!(r.monthly_rate, dec!(0.01));
        assert_eq!(r.summary.maturity_date, date(2028, 1, 1));
        assert_eq!(r.summary.total_payments, dec!(6583.46) * dec!(48));
        assert_eq!(
            r.summary.total_interest,
            r.rows.iter().map(|row| row.interest_portion).sum::<Decimal>()
        );
        assert_eq!(out.assumptions["term_months"], 48);
    }

    #[test]
    fn test_amortize_debt_warns_on_rounding_drift() {
        let input = DebtInput {
            name: None,
            principal: dec!(1000),
            annual_rate_percent: dec!(0),
            term_months: 3,
            start_date: date(2024, 1, 1),
        };
        let out = amortize_debt(&input).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(333.33));
        assert_eq!(out.result.summary.total_principal, dec!(999.99));
        assert_eq!(out.result.summary.final_balance, dec!(0.00));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("999.99"));
    }

    #[test]
    fn test_amortize_debt_exact_division_has_no_warnings() {
        let input = DebtInput {
            name: None,
            principal: dec!(1200),
            annual_rate_percent: dec!(0),
            term_months: 12,
            start_date: date(2024, 1, 1),
        };
        let out = amortize_debt(&input).unwrap();
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_debt_input_accepts_camel_case_aliases() {
        let json = r#"{
            "principal": "50000",
            "rateAnnual": "10",
            "termMonths": 24,
            "startDate": "2024-05-10"
        }"#;
        let input: DebtInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.principal, dec!(50000));
        assert_eq!(input.annual_rate_percent, dec!(10));
        assert_eq!(input.term_months, 24);
        assert_eq!(input.start_date, date(2024, 5, 10));
        assert!(input.name.is_none());
    }
}
