//! Loan model, status derivation and related types

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan period applied at issuance, in calendar days. Not configurable.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Compute the due date for a loan issued on `loan_date`
pub fn due_date_for(loan_date: NaiveDate) -> NaiveDate {
    loan_date + Duration::days(LOAN_PERIOD_DAYS)
}

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

/// Loan status derived from the record and a reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Overdue,
    Returned,
}

impl Loan {
    /// A loan is active while no return has been recorded
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// Derive the status as of `today`. Pure function of the record and the
    /// reference date; advancing `today` alone moves Active to Overdue.
    pub fn status(&self, today: NaiveDate) -> LoanStatus {
        if self.return_date.is_some() {
            LoanStatus::Returned
        } else if self.due_date < today {
            LoanStatus::Overdue
        } else {
            LoanStatus::Active
        }
    }

    /// Whole days past the due date as of `today`; zero unless overdue
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        match self.status(today) {
            LoanStatus::Overdue => (today - self.due_date).num_days(),
            _ => 0,
        }
    }
}

/// Loan with resolved book and member labels for display.
///
/// The referenced book or member may have been deleted after the loan was
/// created; resolution then falls back to a placeholder label instead of
/// failing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub book_title: String,
    pub book_category: String,
    pub member_name: String,
    pub loan_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
    pub days_overdue: i64,
}

/// Create loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub book_id: i64,
    pub member_id: i64,
    /// Defaults to today when omitted
    pub loan_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(loan_date: NaiveDate, return_date: Option<NaiveDate>) -> Loan {
        Loan {
            id: 1,
            book_id: 1,
            member_id: 1,
            loan_date,
            due_date: due_date_for(loan_date),
            return_date,
        }
    }

    #[test]
    fn due_date_is_exactly_fourteen_days_out() {
        assert_eq!(due_date_for(date(2024, 1, 10)), date(2024, 1, 24));
    }

    #[test]
    fn due_date_rolls_over_month_boundary() {
        assert_eq!(due_date_for(date(2024, 1, 25)), date(2024, 2, 8));
    }

    #[test]
    fn due_date_rolls_over_year_boundary() {
        assert_eq!(due_date_for(date(2023, 12, 28)), date(2024, 1, 11));
    }

    #[test]
    fn due_date_crosses_leap_day() {
        assert_eq!(due_date_for(date(2024, 2, 20)), date(2024, 3, 5));
    }

    #[test]
    fn active_until_due_date_has_passed() {
        let loan = loan(date(2024, 1, 10), None);
        assert_eq!(loan.status(date(2024, 1, 10)), LoanStatus::Active);
        // Due date itself is not overdue yet
        assert_eq!(loan.status(date(2024, 1, 24)), LoanStatus::Active);
    }

    #[test]
    fn overdue_once_reference_date_passes_due_date() {
        let loan = loan(date(2024, 1, 10), None);
        assert_eq!(loan.status(date(2024, 1, 25)), LoanStatus::Overdue);
        assert_eq!(loan.days_overdue(date(2024, 1, 25)), 1);
    }

    #[test]
    fn returned_regardless_of_reference_date() {
        let loan = loan(date(2024, 1, 10), Some(date(2024, 1, 20)));
        assert_eq!(loan.status(date(2024, 3, 1)), LoanStatus::Returned);
        assert_eq!(loan.days_overdue(date(2024, 3, 1)), 0);
    }

    #[test]
    fn days_overdue_is_zero_while_active() {
        let loan = loan(date(2024, 1, 10), None);
        assert_eq!(loan.days_overdue(date(2024, 1, 20)), 0);
    }

    #[test]
    fn status_derivation_is_idempotent() {
        let loan = loan(date(2024, 1, 10), None);
        let today = date(2024, 2, 1);
        assert_eq!(loan.status(today), loan.status(today));
        assert_eq!(loan.days_overdue(today), loan.days_overdue(today));
    }
}
