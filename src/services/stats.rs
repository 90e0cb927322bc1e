//! Reporting service: dashboard counters and loan-frequency aggregations

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};

use crate::{
    api::stats::{StatEntry, StatsResponse, TopStatsResponse},
    error::AppResult,
    models::loan::Loan,
    repository::Repository,
};

/// Aggregations keep the top ten entries
const TOP_LIMIT: usize = 10;

/// Count label frequencies and keep the `limit` most frequent. Counts sort
/// descending; equal counts break lexicographically on the label so the
/// result is deterministic.
pub fn top_counts(labels: impl IntoIterator<Item = String>, limit: usize) -> Vec<StatEntry> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut entries: Vec<StatEntry> = counts
        .into_iter()
        .map(|(label, count)| StatEntry { label, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries.truncate(limit);
    entries
}

/// The most frequent label, if any; ties resolve like [`top_counts`]
pub fn favorite_category(labels: impl IntoIterator<Item = String>) -> Option<String> {
    top_counts(labels, 1).into_iter().next().map(|entry| entry.label)
}

fn label_or_unknown(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "Unknown".to_string(),
    }
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Dashboard counters
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        Ok(StatsResponse {
            total_books: self.repository.books.count().await?,
            total_members: self.repository.members.count().await?,
            active_loans: self.repository.loans.count_active().await?,
            members_with_active_loans: self.repository.loans.count_members_with_active().await?,
            overdue_loans: self.repository.loans.count_overdue(Self::today()).await?,
        })
    }

    /// Top authors and categories over the full loan ledger
    pub async fn get_top_stats(&self) -> AppResult<TopStatsResponse> {
        let loans = self.repository.loans.list_all().await?;
        let books = self.book_labels().await?;

        let authors = top_counts(
            loans.iter().map(|loan| {
                label_or_unknown(books.get(&loan.book_id).map(|(author, _)| author.as_str()))
            }),
            TOP_LIMIT,
        );
        let categories = top_counts(
            loans.iter().map(|loan| category_label(&books, loan)),
            TOP_LIMIT,
        );

        Ok(TopStatsResponse { authors, categories })
    }

    /// The most borrowed category of one member's loan history
    pub async fn member_favorite_category(&self, member_id: i64) -> AppResult<Option<String>> {
        self.repository.members.get_by_id(member_id).await?;

        let loans = self.repository.loans.list_by_member(member_id).await?;
        let books = self.book_labels().await?;

        Ok(favorite_category(
            loans.iter().map(|loan| category_label(&books, loan)),
        ))
    }

    /// Author and category per book id, for label resolution
    async fn book_labels(&self) -> AppResult<HashMap<i64, (String, Option<String>)>> {
        let rows = self.repository.books.list_summaries().await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.id, (row.author, row.category)))
            .collect())
    }
}

fn category_label(books: &HashMap<i64, (String, Option<String>)>, loan: &Loan) -> String {
    label_or_unknown(
        books
            .get(&loan.book_id)
            .and_then(|(_, category)| category.as_deref()),
    )
}
