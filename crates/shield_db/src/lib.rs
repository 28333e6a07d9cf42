//! Document-style persistence for the Shield Support backend
//!
//! This crate provides a database client built on SQLx's `Any` driver
//! (SQLite by default, PostgreSQL and MySQL through feature flags) plus one
//! repository per collection. Records keep the shape of the documents the
//! site works with: nested values are stored as JSON TEXT, ids are UUID v4
//! TEXT, timestamps are RFC 3339 TEXT.
//!
//! # Example
//!
//! ```rust,no_run
//! use shield_db::{DbClient, SqlBlogRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = DbClient::from_url("sqlite:data/shield.db").await?;
//!     let blogs = SqlBlogRepository::new(db);
//!     blogs.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

// Register the SQLite driver when the crate is loaded
#[cfg(feature = "sqlite")]
mod sqlite_driver {
    // This import ensures the SQLite driver is linked and registered
    #[allow(unused_imports)]
    use sqlx::sqlite::SqlitePoolOptions as _;
}

pub use client::DbClient;
pub use error::DbError;

// Re-export the repository components for ease of use
pub use repositories::{
    Blog, BlogPage, BlogSection, Career, ContactMessage, JobLocation, Meeting, MeetingRepository,
    NewMeeting, SalaryRange,
    Payment, PaymentWithUser, SqlBlogRepository, SqlCareerRepository, SqlMeetingRepository,
    SqlMessageRepository, SqlPaymentRepository, SqlSubscriberRepository, SqlTicketRepository,
    SqlUserRepository, Subscriber, Ticket, TicketWithUser, User, UserStats,
};
