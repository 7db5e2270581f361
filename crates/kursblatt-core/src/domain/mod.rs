//! # Domain Models
//!
//! Strongly-typed domain types for the report pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Identifier`] | Validated WKN or ISIN input |
//! | [`IdScheme`] | Lookup scheme derived from an identifier |
//! | [`Ticker`] | Validated exchange ticker |
//! | [`DailyRecord`] | One trading day with optional news fields |
//! | [`NewsItem`] | One entry from the provider news feed |
//!
//! All types validate their invariants at construction time; provider
//! price strings are carried verbatim and never parsed to floating
//! point.

mod identifier;
mod record;
mod ticker;

pub use identifier::{IdScheme, Identifier};
pub use record::{DailyRecord, NewsItem, DAY_FORMAT};
pub use ticker::Ticker;
