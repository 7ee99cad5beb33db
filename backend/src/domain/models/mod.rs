pub mod transaction;
pub mod user;

use chrono::{DateTime, SecondsFormat, Utc};

pub use transaction::Transaction;
pub use user::User;

/// Canonical text form of a timestamp, used in the store and on the wire
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
