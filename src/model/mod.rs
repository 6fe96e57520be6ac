//! Types that represent the core data model, such as `CoreTransaction` and `Category`.
mod amount;
mod category;
mod period;
mod transaction;

pub use amount::{Amount, AmountFormat};
pub use category::Category;
pub use period::YearMonth;
pub use transaction::CoreTransaction;

/// Identifies a user (parent or child) in the Core banking service.
pub type UserId = i64;
