//! Data models for Bibliotheca

pub mod book;
pub mod librarian;
pub mod loan;
pub mod member;

pub use book::{Book, BookSummary};
pub use librarian::Librarian;
pub use loan::{Loan, LoanDetails, LoanStatus};
pub use member::Member;
