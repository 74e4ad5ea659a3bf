//! Record types stored in the "products", "sales" and "operators" collections.

pub mod operator;
pub mod product;
pub mod sale;

pub use operator::*;
pub use product::*;
pub use sale::*;

use chrono::{SecondsFormat, Utc};

/// Client-side write time, RFC 3339 in UTC with millisecond precision
/// (`2024-05-01T09:30:00.000Z`).
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
