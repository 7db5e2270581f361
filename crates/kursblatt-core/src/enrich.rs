//! News-to-price-day joining.
//!
//! Feed items are bucketed by publication day into joined
//! `"title - summary"` strings, then the first entry per day is split
//! back apart and attached to the matching record. The join and split
//! share one delimiter, so a title containing `" - "` truncates at its
//! first occurrence when re-split. That round-trip is part of the
//! output contract, not an accident.

use std::collections::HashMap;

use time::Date;

use crate::domain::{DailyRecord, NewsItem};

/// Delimiter between title and summary inside a bucketed entry.
const TITLE_SUMMARY_DELIMITER: &str = " - ";

/// Group feed items by publication day, preserving feed order within
/// each day. Items whose timestamp does not parse are skipped.
pub fn bucket_news(items: &[NewsItem]) -> HashMap<Date, Vec<String>> {
    let mut buckets: HashMap<Date, Vec<String>> = HashMap::new();

    for item in items {
        let date = match item.published_date() {
            Some(date) => date,
            None => continue,
        };

        buckets.entry(date).or_default().push(format!(
            "{}{}{}",
            item.title, TITLE_SUMMARY_DELIMITER, item.summary
        ));
    }

    buckets
}

/// Attach the first bucketed entry for each record's day. Records with
/// no matching day are left untouched; dates and prices are never
/// mutated.
pub fn attach_news(records: &mut [DailyRecord], buckets: &HashMap<Date, Vec<String>>) {
    for record in records.iter_mut() {
        let first = match buckets.get(&record.date).and_then(|entries| entries.first()) {
            Some(first) => first,
            None => continue,
        };

        match first.split_once(TITLE_SUMMARY_DELIMITER) {
            Some((title, summary)) => {
                record.news_title = Some(title.to_owned());
                record.news_summary = Some(summary.to_owned());
            }
            None => {
                record.news_title = Some(first.clone());
            }
        }
    }
}
