//! Repository modules for database access
//!
//! One module per collection. Each module holds the entity model and its SQL
//! repository; the meeting repository additionally defines a dyn-safe trait
//! because the booking workflow injects it as a trait object.

pub mod blog;
pub mod career;
pub mod meeting;
pub mod meeting_sql;
pub mod message;
pub mod payment;
pub mod subscriber;
pub mod ticket;
pub mod user;

pub use blog::{Blog, BlogPage, BlogSection, SqlBlogRepository};
pub use career::{Career, JobLocation, SalaryRange, SqlCareerRepository};
pub use meeting::{Meeting, MeetingRepository, NewMeeting};
pub use meeting_sql::SqlMeetingRepository;
pub use message::{ContactMessage, SqlMessageRepository};
pub use payment::{Payment, PaymentWithUser, SqlPaymentRepository};
pub use subscriber::{SqlSubscriberRepository, Subscriber};
pub use ticket::{SqlTicketRepository, Ticket, TicketWithUser};
pub use user::{SqlUserRepository, User, UserStats};

use chrono::{SecondsFormat, Utc};

/// Current instant as the canonical stored timestamp format.
///
/// All timestamps are stored as UTC RFC 3339 TEXT with a trailing `Z` so
/// lexicographic ordering matches chronological ordering.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
