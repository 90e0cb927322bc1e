//! Loans repository for database operations

use chrono::NaiveDate;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::loan::Loan,
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Issue a new loan.
    ///
    /// The availability check and the insert run in one transaction scoped by
    /// book id, so two concurrent issuances cannot both take the last copy.
    pub async fn issue(
        &self,
        book_id: i64,
        member_id: i64,
        loan_date: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let copy_count: i64 = sqlx::query_scalar("SELECT copy_count FROM books WHERE id = ?")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let active_loans: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE book_id = ? AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if copy_count - active_loans <= 0 {
            return Err(AppError::BusinessRule(
                "No available copies: all copies of this book are on loan".to_string(),
            ));
        }

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO loans (book_id, member_id, loan_date, due_date, return_date)
            VALUES (?, ?, ?, ?, NULL)
            RETURNING id
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(loan_date)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Loan {
            id,
            book_id,
            member_id,
            loan_date,
            due_date,
            return_date: None,
        })
    }

    /// Record a return. Setting the return date is one-way and one-time.
    pub async fn mark_returned(&self, loan_id: i64, return_date: NaiveDate) -> AppResult<Loan> {
        let loan = self.get_by_id(loan_id).await?;

        if loan.return_date.is_some() {
            return Err(AppError::Conflict("Loan already returned".to_string()));
        }

        sqlx::query(
            r#"
            UPDATE loans
               SET return_date = ?
             WHERE id = ? AND return_date IS NULL
            "#,
        )
        .bind(return_date)
        .bind(loan_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(loan_id).await
    }

    /// All loans
    pub async fn list_all(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans")
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    /// Loans with no recorded return
    pub async fn list_active(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE return_date IS NULL")
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    /// Full loan history for a member, newest first
    pub async fn list_by_member(&self, member_id: i64) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
             WHERE member_id = ?
             ORDER BY loan_date DESC
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Active loans past their due date as of `today`
    pub async fn list_overdue(&self, today: NaiveDate) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
             WHERE due_date < ?
               AND return_date IS NULL
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE return_date IS NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count active loans past their due date as of `today`
    pub async fn count_overdue(&self, today: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE return_date IS NULL AND due_date < ?",
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count distinct members holding at least one active loan
    pub async fn count_members_with_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(DISTINCT member_id) FROM loans WHERE return_date IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count active loans for one book
    pub async fn count_active_for_book(&self, book_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE book_id = ? AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::models::loan::due_date_for;
    use crate::test_support::{seed_book, seed_member, test_repository};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn issue_persists_loan_with_computed_due_date() {
        let repo = test_repository().await;
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 2).await;
        let member = seed_member(&repo, "ada").await;

        let loan_date = date(2024, 1, 10);
        let loan = repo
            .loans
            .issue(book.id, member.id, loan_date, due_date_for(loan_date))
            .await
            .unwrap();

        assert_eq!(loan.due_date, date(2024, 1, 24));
        assert_eq!(loan.return_date, None);
        assert_eq!(repo.loans.count_active_for_book(book.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn issue_fails_once_all_copies_are_out() {
        let repo = test_repository().await;
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        let loan_date = date(2024, 1, 10);
        repo.loans
            .issue(book.id, member.id, loan_date, due_date_for(loan_date))
            .await
            .unwrap();

        let err = repo
            .loans
            .issue(book.id, member.id, loan_date, due_date_for(loan_date))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn returning_frees_a_copy_for_the_next_issue() {
        let repo = test_repository().await;
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        let loan_date = date(2024, 1, 10);
        let loan = repo
            .loans
            .issue(book.id, member.id, loan_date, due_date_for(loan_date))
            .await
            .unwrap();

        let returned = repo
            .loans
            .mark_returned(loan.id, date(2024, 1, 20))
            .await
            .unwrap();
        assert_eq!(returned.return_date, Some(date(2024, 1, 20)));
        assert_eq!(repo.loans.count_active_for_book(book.id).await.unwrap(), 0);

        // A copy is free again
        repo.loans
            .issue(book.id, member.id, loan_date, due_date_for(loan_date))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn returning_twice_is_a_conflict() {
        let repo = test_repository().await;
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        let loan_date = date(2024, 1, 10);
        let loan = repo
            .loans
            .issue(book.id, member.id, loan_date, due_date_for(loan_date))
            .await
            .unwrap();

        repo.loans
            .mark_returned(loan.id, date(2024, 1, 20))
            .await
            .unwrap();
        let err = repo
            .loans
            .mark_returned(loan.id, date(2024, 1, 21))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn overdue_queries_use_the_reference_date() {
        let repo = test_repository().await;
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        let loan_date = date(2024, 1, 10);
        repo.loans
            .issue(book.id, member.id, loan_date, due_date_for(loan_date))
            .await
            .unwrap();

        // Not overdue on the due date itself
        assert_eq!(repo.loans.count_overdue(date(2024, 1, 24)).await.unwrap(), 0);
        // Overdue the day after, with no data mutation in between
        assert_eq!(repo.loans.count_overdue(date(2024, 1, 25)).await.unwrap(), 1);
        assert_eq!(repo.loans.list_overdue(date(2024, 1, 25)).await.unwrap().len(), 1);
    }
}
