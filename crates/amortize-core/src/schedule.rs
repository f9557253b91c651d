//! Month-by-month amortization schedule.
//!
//! Rows are computed lazily from the closed-form interest split; the running
//! balance and cumulative interest are carried by the iterator.

use std::fmt;
use std::iter::FusedIterator;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{LoanError, LoanResult};
use crate::loan::LoanParameters;

/// Label of a schedule period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodLabel {
    /// 1-based payment number.
    Index(u32),
    /// Calendar month, formatted as `%b %Y` (e.g. `Mar 2025`).
    Calendar(String),
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(month) => write!(f, "{month}"),
            Self::Calendar(label) => f.write_str(label),
        }
    }
}

/// One period of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Payment number or calendar month.
    pub period: PeriodLabel,
    /// Fixed monthly payment.
    pub payment: f64,
    /// Principal repaid this period.
    pub principal: f64,
    /// Interest paid this period.
    pub interest: f64,
    /// Balance outstanding after this payment.
    pub balance: f64,
    /// Interest paid to date.
    pub cumulative_interest: f64,
    /// Percentage of the principal repaid to date.
    pub ownership_pct: f64,
}

/// Lazy iterator over the rows of a loan's schedule.
#[derive(Debug, Clone)]
pub struct Schedule<'a> {
    loan: &'a LoanParameters,
    // Months since year 0 of the first period, when calendar labels are on.
    start: Option<i64>,
    next_month: u64,
    balance: f64,
    cumulative_interest: f64,
}

impl LoanParameters {
    /// Returns the amortization schedule, one row per month of the term.
    ///
    /// Without a start, rows are labelled `1..=term_months`. With both
    /// `start_year` and `start_month`, the first row is labelled with that
    /// month and each later row with the following calendar month.
    ///
    /// # Errors
    ///
    /// Returns [`LoanError::InvalidCalendarInput`] when only one of the two is
    /// given, the month is outside 1..=12, or the final month of the term is
    /// not a representable date.
    ///
    /// # Example
    ///
    /// ```rust
    /// use amortize_core::prelude::*;
    ///
    /// let loan = LoanParameters::construct(
    ///     LoanInputs::new()
    ///         .with_principal(12_000.0)
    ///         .with_annual_rate(0.05)
    ///         .with_term_months(12),
    /// )
    /// .unwrap();
    ///
    /// let rows: Vec<_> = loan.schedule(Some(2025), Some(11)).unwrap().collect();
    /// assert_eq!(rows.len(), 12);
    /// assert_eq!(rows[0].period.to_string(), "Nov 2025");
    /// assert_eq!(rows[2].period.to_string(), "Jan 2026");
    /// assert!(rows[11].balance.abs() < 1e-6);
    /// ```
    pub fn schedule(
        &self,
        start_year: Option<i32>,
        start_month: Option<u32>,
    ) -> LoanResult<Schedule<'_>> {
        let start = match (start_year, start_month) {
            (None, None) => None,
            (Some(year), Some(month)) => {
                if !(1..=12).contains(&month) {
                    return Err(LoanError::invalid_calendar(format!(
                        "start month {month} is outside 1..=12"
                    )));
                }
                let start = i64::from(year) * 12 + i64::from(month) - 1;
                let last = i64::from(self.term_months()) - 1;
                if month_start(start).is_none() || month_start(start + last).is_none() {
                    return Err(LoanError::invalid_calendar(format!(
                        "a {}-month schedule starting {year}-{month:02} leaves the supported date range",
                        self.term_months()
                    )));
                }
                Some(start)
            }
            (Some(_), None) => {
                return Err(LoanError::invalid_calendar(
                    "start year given without a start month",
                ))
            }
            (None, Some(_)) => {
                return Err(LoanError::invalid_calendar(
                    "start month given without a start year",
                ))
            }
        };

        Ok(Schedule {
            loan: self,
            start,
            next_month: 1,
            balance: self.principal(),
            cumulative_interest: 0.0,
        })
    }
}

fn month_start(total_months: i64) -> Option<NaiveDate> {
    let year = i32::try_from(total_months.div_euclid(12)).ok()?;
    let month = u32::try_from(total_months.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

impl Schedule<'_> {
    fn label(&self, month: u32) -> PeriodLabel {
        self.start
            .and_then(|start| month_start(start + i64::from(month) - 1))
            .map_or(PeriodLabel::Index(month), |date| {
                PeriodLabel::Calendar(date.format("%b %Y").to_string())
            })
    }
}

impl Iterator for Schedule<'_> {
    type Item = ScheduleRow;

    fn next(&mut self) -> Option<ScheduleRow> {
        let month = u32::try_from(self.next_month)
            .ok()
            .filter(|&month| month <= self.loan.term_months())?;

        let interest = self.loan.interest_for_month(month).ok()?;
        let principal = self.loan.monthly_payment() - interest;
        self.balance -= principal;
        self.cumulative_interest += interest;
        self.next_month += 1;

        Some(ScheduleRow {
            period: self.label(month),
            payment: self.loan.monthly_payment(),
            principal,
            interest,
            balance: self.balance,
            cumulative_interest: self.cumulative_interest,
            ownership_pct: 100.0 * (1.0 - self.balance / self.loan.principal()),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (u64::from(self.loan.term_months()) + 1).saturating_sub(self.next_month);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Schedule<'_> {}

impl FusedIterator for Schedule<'_> {}
