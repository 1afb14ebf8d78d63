//! "Top Cities" ranking table.

use spiky_core::Point;

use crate::ramp::{Rgb, warm_ramp};

/// Maximum number of rows shown in the ranking.
pub const TOP_CITIES_LIMIT: usize = 100;

/// Title shown above the ranking.
pub const RANKING_TITLE: &str = "Top Cities";

/// Column headers, left to right.
pub const RANKING_HEADERS: [&str; 4] = ["Rank", "City", "Country", "Mentions"];

/// One row of the ranking table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    /// One-based display rank.
    pub rank: usize,
    /// City display name.
    pub city: String,
    /// Country display name.
    pub country_name: String,
    /// Raw mention count.
    pub mentions: u64,
    /// Row tint taken from the warm ramp.
    pub colour: Rgb,
}

/// Ranked, coloured rows ready for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingTable {
    /// Rows in display order, hottest first.
    pub rows: Vec<RankingRow>,
}

impl RankingTable {
    /// Column headers.
    #[must_use]
    pub const fn headers(&self) -> [&'static str; 4] {
        RANKING_HEADERS
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rank points by popularity and keep the top [`TOP_CITIES_LIMIT`].
///
/// Sorting is stable, so equally popular cities keep retrieval order. The
/// first row takes the hot end of the ramp and the last the cold end.
#[must_use]
pub fn rank_points(points: Option<&[Point]>) -> RankingTable {
    let mut ranked: Vec<&Point> = points.unwrap_or_default().iter().collect();
    ranked.sort_by(|a, b| b.popularity_index.total_cmp(&a.popularity_index));
    ranked.truncate(TOP_CITIES_LIMIT);

    let shown = ranked.len();
    let rows = ranked
        .into_iter()
        .enumerate()
        .map(|(index, point)| RankingRow {
            rank: index + 1,
            city: point.record.city.clone(),
            country_name: point.record.country_name.clone(),
            mentions: point.record.mentions,
            colour: warm_ramp(ramp_position(index, shown)),
        })
        .collect();
    RankingTable { rows }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "row positions are small counts mapped onto the unit interval"
)]
fn ramp_position(index: usize, shown: usize) -> f64 {
    if shown <= 1 {
        return 1.0;
    }
    1.0 - index as f64 / (shown - 1) as f64
}
