use thiserror::Error;

use super::model::{MonthPoint, RescueDataset, YearMonth};

// ---------------------------------------------------------------------------
// Forecast configuration
// ---------------------------------------------------------------------------

/// Where the recorded line stops and how far into the future the user may
/// sketch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    /// The year whose first active month becomes the forecast pivot.
    pub pivot_year: i32,
    /// Last month the user may place a point in.
    pub horizon_end: YearMonth,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        ForecastConfig {
            pivot_year: 2023,
            horizon_end: YearMonth {
                year: 2024,
                month: 12,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Series split
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("no data for animal class '{0}'")]
    UnknownClass(String),
    #[error("'{class}' has no incidents recorded in {year}; nothing to forecast against")]
    NoPivot { class: String, year: i32 },
}

/// The month range in which sketched points are accepted: strictly after the
/// pivot month's start, up to and including the horizon month's start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchWindow {
    pub opens_after: YearMonth,
    pub closes: YearMonth,
}

/// One animal class partitioned for the guessing game.
///
/// `recorded` is drawn immediately; `hidden` is what the user tries to
/// anticipate and is only drawn after the reveal. The two overlap on the
/// pivot-year months up to the pivot itself, so the revealed line starts at
/// the beginning of the pivot year exactly like the line it is compared
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSplit {
    pub class: String,
    pub recorded: Vec<MonthPoint>,
    pub hidden: Vec<MonthPoint>,
    /// Last recorded point; the sketched line grows from here.
    pub anchor: MonthPoint,
    pub window: SketchWindow,
    /// X extent over the whole series, hidden months included, so the chart
    /// leaves room to draw into the future region.
    pub x_range: (f64, f64),
    /// Largest count of the whole series, hidden months included.
    pub y_max: f64,
}

/// Partition one class around its pivot: the earliest month of
/// `config.pivot_year` with a non-zero count.
pub fn split_series(
    dataset: &RescueDataset,
    class: &str,
    config: &ForecastConfig,
) -> Result<SeriesSplit, SplitError> {
    let points = dataset.class_points(class);
    let (first, last) = match (points.first(), points.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Err(SplitError::UnknownClass(class.to_string())),
    };

    let pivot = points
        .iter()
        .find(|p| p.when.year == config.pivot_year && p.count > 0.0)
        .copied()
        .ok_or_else(|| SplitError::NoPivot {
            class: class.to_string(),
            year: config.pivot_year,
        })?;

    let recorded: Vec<MonthPoint> = points
        .iter()
        .filter(|p| p.when <= pivot.when)
        .copied()
        .collect();
    let hidden: Vec<MonthPoint> = points
        .iter()
        .filter(|p| p.when.year >= config.pivot_year)
        .copied()
        .collect();

    // The pivot itself is always in `recorded`.
    let anchor = recorded.last().copied().unwrap_or(pivot);

    let y_max = points.iter().map(|p| p.count).fold(0.0, f64::max);

    Ok(SeriesSplit {
        class: class.to_string(),
        recorded,
        hidden,
        anchor,
        window: SketchWindow {
            opens_after: pivot.when,
            closes: config.horizon_end,
        },
        x_range: (first.when.index(), last.when.index()),
        y_max,
    })
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RescueRecord;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn dataset() -> RescueDataset {
        let rows = [
            ("Birds", 2022, 11, 10.0),
            ("Birds", 2022, 12, 8.0),
            ("Birds", 2023, 1, 0.0),
            ("Birds", 2023, 2, 5.0),
            ("Birds", 2023, 3, 7.0),
            ("Birds", 2024, 1, 30.0),
            ("Cats", 2022, 6, 12.0),
        ];
        RescueDataset::from_records(
            rows.iter()
                .map(|&(class, year, month, count)| RescueRecord {
                    animal_class: class.to_string(),
                    when: ym(year, month),
                    count,
                })
                .collect(),
        )
    }

    #[test]
    fn pivot_skips_zero_count_months() {
        let split = split_series(&dataset(), "Birds", &ForecastConfig::default()).unwrap();
        assert_eq!(split.window.opens_after, ym(2023, 2));
    }

    #[test]
    fn partitions_around_the_pivot() {
        let split = split_series(&dataset(), "Birds", &ForecastConfig::default()).unwrap();

        let recorded: Vec<YearMonth> = split.recorded.iter().map(|p| p.when).collect();
        assert_eq!(
            recorded,
            vec![ym(2022, 11), ym(2022, 12), ym(2023, 1), ym(2023, 2)]
        );

        // The hidden line covers the whole pivot year onwards, zero-count
        // January included.
        let hidden: Vec<YearMonth> = split.hidden.iter().map(|p| p.when).collect();
        assert_eq!(
            hidden,
            vec![ym(2023, 1), ym(2023, 2), ym(2023, 3), ym(2024, 1)]
        );
    }

    #[test]
    fn anchor_is_the_last_recorded_point() {
        let split = split_series(&dataset(), "Birds", &ForecastConfig::default()).unwrap();
        assert_eq!(split.anchor.when, ym(2023, 2));
        assert_eq!(split.anchor.count, 5.0);
    }

    #[test]
    fn extents_cover_the_hidden_region() {
        let split = split_series(&dataset(), "Birds", &ForecastConfig::default()).unwrap();
        assert_eq!(split.x_range.0, ym(2022, 11).index());
        assert_eq!(split.x_range.1, ym(2024, 1).index());
        assert_eq!(split.y_max, 30.0);
    }

    #[test]
    fn window_closes_at_the_horizon() {
        let config = ForecastConfig::default();
        let split = split_series(&dataset(), "Birds", &config).unwrap();
        assert_eq!(split.window.closes, ym(2024, 12));
    }

    #[test]
    fn unknown_class_is_an_error() {
        let err = split_series(&dataset(), "Ferrets", &ForecastConfig::default()).unwrap_err();
        assert_eq!(err, SplitError::UnknownClass("Ferrets".to_string()));
    }

    #[test]
    fn class_without_pivot_year_data_is_an_error() {
        let err = split_series(&dataset(), "Cats", &ForecastConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SplitError::NoPivot {
                class: "Cats".to_string(),
                year: 2023
            }
        );
    }
}
