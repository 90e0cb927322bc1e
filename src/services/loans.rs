//! Loan ledger service

use chrono::{NaiveDate, Utc};

use crate::{
    error::AppResult,
    models::loan::{due_date_for, CreateLoan, Loan, LoanDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Issue a new loan. The due date is the loan date plus the fixed loan
    /// period; the availability check runs atomically with the insert.
    pub async fn issue_loan(&self, request: CreateLoan) -> AppResult<Loan> {
        // Both references must exist at issuance
        self.repository.members.get_by_id(request.member_id).await?;
        self.repository.books.get_by_id(request.book_id).await?;

        let loan_date = request.loan_date.unwrap_or_else(Self::today);
        let due_date = due_date_for(loan_date);

        let loan = self
            .repository
            .loans
            .issue(request.book_id, request.member_id, loan_date, due_date)
            .await?;

        tracing::info!(
            "Loan issued: id={} book={} member={} due={}",
            loan.id,
            loan.book_id,
            loan.member_id,
            loan.due_date
        );

        Ok(loan)
    }

    /// Record a return; defaults to today when no date is given
    pub async fn return_loan(
        &self,
        loan_id: i64,
        return_date: Option<NaiveDate>,
    ) -> AppResult<LoanDetails> {
        let return_date = return_date.unwrap_or_else(Self::today);
        let loan = self.repository.loans.mark_returned(loan_id, return_date).await?;

        tracing::info!("Loan returned: id={} on {}", loan.id, return_date);

        self.to_details(loan, Self::today()).await
    }

    /// Get one loan with resolved labels
    pub async fn get_loan(&self, loan_id: i64) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(loan_id).await?;
        self.to_details(loan, Self::today()).await
    }

    /// All loans, or only the active ones
    pub async fn list_loans(&self, active_only: bool) -> AppResult<Vec<LoanDetails>> {
        let loans = if active_only {
            self.repository.loans.list_active().await?
        } else {
            self.repository.loans.list_all().await?
        };
        self.resolve_all(loans, Self::today()).await
    }

    /// Active loans past their due date as of today
    pub async fn list_overdue(&self) -> AppResult<Vec<LoanDetails>> {
        let today = Self::today();
        let loans = self.repository.loans.list_overdue(today).await?;
        self.resolve_all(loans, today).await
    }

    /// Full loan history for a member, newest first
    pub async fn member_loan_history(&self, member_id: i64) -> AppResult<Vec<LoanDetails>> {
        // The member itself must exist; its books may not anymore
        self.repository.members.get_by_id(member_id).await?;
        let loans = self.repository.loans.list_by_member(member_id).await?;
        self.resolve_all(loans, Self::today()).await
    }

    async fn resolve_all(
        &self,
        loans: Vec<Loan>,
        today: NaiveDate,
    ) -> AppResult<Vec<LoanDetails>> {
        let mut details = Vec::with_capacity(loans.len());
        for loan in loans {
            details.push(self.to_details(loan, today).await?);
        }
        Ok(details)
    }

    /// Resolve book and member labels for a loan. A deleted referent degrades
    /// to a placeholder label rather than failing the whole view.
    async fn to_details(&self, loan: Loan, today: NaiveDate) -> AppResult<LoanDetails> {
        let book = self.repository.books.get_opt(loan.book_id).await?;
        let member = self.repository.members.get_opt(loan.member_id).await?;

        let (book_title, book_category) = match book {
            Some(book) => {
                let category = match book.category {
                    Some(c) if !c.trim().is_empty() => c,
                    _ => "Unknown".to_string(),
                };
                (book.title, category)
            }
            None => (format!("Book #{}", loan.book_id), "Unknown".to_string()),
        };

        let member_name = match member {
            Some(member) => format!("{} {}", member.name, member.surname),
            None => format!("Member #{}", loan.member_id),
        };

        let status = loan.status(today);
        let days_overdue = loan.days_overdue(today);

        Ok(LoanDetails {
            id: loan.id,
            book_id: loan.book_id,
            member_id: loan.member_id,
            book_title,
            book_category,
            member_name,
            loan_date: loan.loan_date,
            due_date: loan.due_date,
            return_date: loan.return_date,
            status,
            days_overdue,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use crate::error::AppError;
    use crate::models::loan::{CreateLoan, LoanStatus, LOAN_PERIOD_DAYS};
    use crate::services::loans::LoansService;
    use crate::test_support::{seed_book, seed_member, test_repository};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn issuing_computes_the_due_date_from_the_loan_date() {
        let repo = test_repository().await;
        let service = LoansService::new(repo.clone());
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        let loan = service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(date(2024, 1, 10)),
            })
            .await
            .unwrap();

        assert_eq!(loan.due_date, date(2024, 1, 24));
        assert_eq!(loan.due_date - loan.loan_date, Duration::days(LOAN_PERIOD_DAYS));
    }

    #[tokio::test]
    async fn issuing_against_missing_references_is_not_found() {
        let repo = test_repository().await;
        let service = LoansService::new(repo.clone());
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;

        let err = service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: 999,
                loan_date: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleted_book_resolves_to_placeholder_label() {
        let repo = test_repository().await;
        let service = LoansService::new(repo.clone());
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        let loan = service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(date(2024, 1, 10)),
            })
            .await
            .unwrap();

        repo.books.delete(book.id).await.unwrap();

        let details = service.get_loan(loan.id).await.unwrap();
        assert_eq!(details.book_title, format!("Book #{}", book.id));
        assert_eq!(details.book_category, "Unknown");
        assert_eq!(details.member_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn deleted_member_resolves_to_placeholder_label() {
        let repo = test_repository().await;
        let service = LoansService::new(repo.clone());
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        let loan = service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(date(2024, 1, 10)),
            })
            .await
            .unwrap();

        repo.members.delete(member.id).await.unwrap();

        let details = service.get_loan(loan.id).await.unwrap();
        assert_eq!(details.member_name, format!("Member #{}", member.id));
        assert_eq!(details.book_title, "Dune");
    }

    #[tokio::test]
    async fn old_unreturned_loan_reads_overdue() {
        let repo = test_repository().await;
        let service = LoansService::new(repo.clone());
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 1).await;
        let member = seed_member(&repo, "ada").await;

        // Issued long enough ago that the due date has passed
        let loan_date = Utc::now().date_naive() - Duration::days(LOAN_PERIOD_DAYS + 3);
        let loan = service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(loan_date),
            })
            .await
            .unwrap();

        let overdue = service.list_overdue().await.unwrap();
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, loan.id);
        assert_eq!(overdue[0].status, LoanStatus::Overdue);
        assert_eq!(overdue[0].days_overdue, 3);
    }

    #[tokio::test]
    async fn active_filter_excludes_returned_loans() {
        let repo = test_repository().await;
        let service = LoansService::new(repo.clone());
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 2).await;
        let member = seed_member(&repo, "ada").await;

        let first = service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(date(2024, 1, 10)),
            })
            .await
            .unwrap();
        service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(date(2024, 1, 12)),
            })
            .await
            .unwrap();

        service.return_loan(first.id, Some(date(2024, 1, 15))).await.unwrap();

        assert_eq!(service.list_loans(false).await.unwrap().len(), 2);
        assert_eq!(service.list_loans(true).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn member_history_is_newest_first() {
        let repo = test_repository().await;
        let service = LoansService::new(repo.clone());
        let book = seed_book(&repo, "Dune", "Frank Herbert", "9780441172719", 2).await;
        let member = seed_member(&repo, "ada").await;

        service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(date(2024, 1, 10)),
            })
            .await
            .unwrap();
        service
            .issue_loan(CreateLoan {
                book_id: book.id,
                member_id: member.id,
                loan_date: Some(date(2024, 2, 1)),
            })
            .await
            .unwrap();

        let history = service.member_loan_history(member.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].loan_date, date(2024, 2, 1));
        assert_eq!(history[1].loan_date, date(2024, 1, 10));
    }
}
