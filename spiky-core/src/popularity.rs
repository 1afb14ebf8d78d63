//! Popularity normalisation.
//!
//! Turns raw mention counts into a comparable index in `0.0..=1.0` by
//! dividing each count by the maximum of the whole set.

use thiserror::Error;

use crate::{CityRecord, Point};

/// The input set was empty, so no maximum exists to normalise against.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot normalise popularity of an empty city set")]
pub struct EmptyDatasetError;

/// Attach a popularity index to every record.
///
/// The index is `mentions / max_mentions` over the full input, so the most
/// mentioned cities (ties included) score exactly `1.0`. Output order matches
/// input order. When every record has zero mentions all indices are `0.0`.
///
/// # Errors
///
/// Returns [`EmptyDatasetError`] when `records` is empty.
///
/// # Examples
///
/// ```
/// use spiky_core::{CityRecord, normalise_popularity};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let records = vec![
///     CityRecord::new("a", "Lagos", "Nigeria", 6.5, 3.4, 10)?,
///     CityRecord::new("b", "Accra", "Ghana", 5.6, -0.2, 5)?,
/// ];
/// let points = normalise_popularity(records)?;
/// assert_eq!(points[0].popularity_index, 1.0);
/// assert_eq!(points[1].popularity_index, 0.5);
/// # Ok(())
/// # }
/// ```
pub fn normalise_popularity(records: Vec<CityRecord>) -> Result<Vec<Point>, EmptyDatasetError> {
    let max_mentions = records
        .iter()
        .map(|record| record.mentions)
        .max()
        .ok_or(EmptyDatasetError)?;

    Ok(records
        .into_iter()
        .map(|record| {
            let popularity_index = popularity_index(record.mentions, max_mentions);
            Point {
                record,
                popularity_index,
            }
        })
        .collect())
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "popularity is a ratio of counts bounded by the maximum"
)]
fn popularity_index(mentions: u64, max_mentions: u64) -> f64 {
    if max_mentions == 0 {
        return 0.0;
    }
    if mentions >= max_mentions {
        return 1.0;
    }
    // Counts beyond 2^53 can round to the same f64; only the maximum reaches 1.0.
    (mentions as f64 / max_mentions as f64).clamp(0.0, 1.0_f64.next_down())
}
