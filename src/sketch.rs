use crate::data::model::{MonthPoint, YearMonth};
use crate::data::split::SketchWindow;

// ---------------------------------------------------------------------------
// Sketch – the user-drawn forecast polyline
// ---------------------------------------------------------------------------

/// Why a click was not turned into a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// At or before the start of the pivot month.
    BeforeWindow,
    /// After the start of the horizon month.
    AfterWindow,
}

/// What happened to a click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Appended at the month the click landed in.
    Added(MonthPoint),
    /// The click did not advance past the previous point; the new point was
    /// moved to the following month instead.
    AdjustedForward(MonthPoint),
    Rejected(RejectReason),
}

/// The sketched line. Empty until the first accepted click, which seeds the
/// polyline with the anchor (the last recorded point) so the drawn line
/// continues the recorded one without a gap.
#[derive(Debug, Clone, Default)]
pub struct Sketch {
    points: Vec<MonthPoint>,
}

impl Sketch {
    pub fn new() -> Self {
        Sketch::default()
    }

    /// All vertices, anchor included once drawing has started.
    pub fn points(&self) -> &[MonthPoint] {
        &self.points
    }

    /// True until the first accepted click.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<MonthPoint> {
        self.points.last().copied()
    }

    /// Drop the whole sketch (series switch or explicit clear).
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Feed a click in plot coordinates: `x` a continuous month index, `y` a
    /// count. Clicks outside the window are rejected; accepted clicks snap to
    /// the month they landed in and are forced to advance at least one month
    /// past the previous point.
    pub fn try_add(
        &mut self,
        window: SketchWindow,
        anchor: MonthPoint,
        x: f64,
        y: f64,
    ) -> ClickOutcome {
        if x <= window.opens_after.index() {
            return ClickOutcome::Rejected(RejectReason::BeforeWindow);
        }
        if x > window.closes.index() {
            return ClickOutcome::Rejected(RejectReason::AfterWindow);
        }

        if self.points.is_empty() {
            self.points.push(anchor);
        }
        let previous = self.last().unwrap_or(anchor);

        let clicked = YearMonth::from_index(x);
        let (when, adjusted) = if clicked <= previous.when {
            (previous.when.succ(), true)
        } else {
            (clicked, false)
        };

        let point = MonthPoint { when, count: y };
        self.points.push(point);
        if adjusted {
            ClickOutcome::AdjustedForward(point)
        } else {
            ClickOutcome::Added(point)
        }
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn window() -> SketchWindow {
        SketchWindow {
            opens_after: ym(2023, 2),
            closes: ym(2024, 12),
        }
    }

    fn anchor() -> MonthPoint {
        MonthPoint {
            when: ym(2023, 2),
            count: 5.0,
        }
    }

    #[test]
    fn rejects_clicks_at_or_before_the_window_start() {
        let mut sketch = Sketch::new();
        let start = window().opens_after.index();

        let outcome = sketch.try_add(window(), anchor(), start, 3.0);
        assert_eq!(outcome, ClickOutcome::Rejected(RejectReason::BeforeWindow));
        let outcome = sketch.try_add(window(), anchor(), start - 5.0, 3.0);
        assert_eq!(outcome, ClickOutcome::Rejected(RejectReason::BeforeWindow));
        assert!(sketch.is_empty());
    }

    #[test]
    fn rejects_clicks_past_the_horizon() {
        let mut sketch = Sketch::new();
        let end = window().closes.index();

        let outcome = sketch.try_add(window(), anchor(), end + 0.5, 3.0);
        assert_eq!(outcome, ClickOutcome::Rejected(RejectReason::AfterWindow));
        assert!(sketch.is_empty());

        // The horizon month's start itself is still in range.
        let outcome = sketch.try_add(window(), anchor(), end, 3.0);
        assert!(matches!(outcome, ClickOutcome::Added(_)));
    }

    #[test]
    fn first_accepted_click_seeds_the_anchor() {
        let mut sketch = Sketch::new();
        let x = ym(2023, 6).index() + 0.3;

        let outcome = sketch.try_add(window(), anchor(), x, 9.0);
        assert_eq!(
            outcome,
            ClickOutcome::Added(MonthPoint {
                when: ym(2023, 6),
                count: 9.0
            })
        );
        assert_eq!(sketch.points().len(), 2);
        assert_eq!(sketch.points()[0], anchor());
    }

    #[test]
    fn click_inside_the_pivot_month_is_pushed_to_the_next_month() {
        let mut sketch = Sketch::new();
        // Inside the pivot month, past its start: accepted, floored back to
        // the anchor's month, then bumped forward.
        let x = window().opens_after.index() + 0.6;

        let outcome = sketch.try_add(window(), anchor(), x, 4.0);
        assert_eq!(
            outcome,
            ClickOutcome::AdjustedForward(MonthPoint {
                when: ym(2023, 3),
                count: 4.0
            })
        );
    }

    #[test]
    fn non_advancing_clicks_are_bumped_one_month() {
        let mut sketch = Sketch::new();
        sketch.try_add(window(), anchor(), ym(2023, 8).index() + 0.1, 6.0);

        // Clicking back in June must not move the line backwards.
        let outcome = sketch.try_add(window(), anchor(), ym(2023, 6).index() + 0.1, 2.0);
        assert_eq!(
            outcome,
            ClickOutcome::AdjustedForward(MonthPoint {
                when: ym(2023, 9),
                count: 2.0
            })
        );
        assert_eq!(sketch.last().unwrap().when, ym(2023, 9));
    }

    #[test]
    fn advancing_clicks_keep_their_month() {
        let mut sketch = Sketch::new();
        sketch.try_add(window(), anchor(), ym(2023, 5).index() + 0.9, 6.0);
        let outcome = sketch.try_add(window(), anchor(), ym(2024, 2).index() + 0.2, 7.5);
        assert_eq!(
            outcome,
            ClickOutcome::Added(MonthPoint {
                when: ym(2024, 2),
                count: 7.5
            })
        );
        assert_eq!(sketch.points().len(), 3);
    }

    #[test]
    fn clear_resets_the_polyline() {
        let mut sketch = Sketch::new();
        sketch.try_add(window(), anchor(), ym(2023, 6).index(), 9.0);
        assert!(!sketch.is_empty());

        sketch.clear();
        assert!(sketch.is_empty());
        assert_eq!(sketch.last(), None);
    }
}
