use crate::color::ClassColors;
use crate::data::model::RescueDataset;
use crate::data::split::{split_series, ForecastConfig, SeriesSplit};
use crate::sketch::{ClickOutcome, RejectReason, Sketch};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The dataset the original chart was published against.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/Miki273/NYCAnimalRescue/main/d3plot_data.csv";

/// Series shown first when the dataset has it.
pub const DEFAULT_CLASS: &str = "Birds";

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until the user loads a file or URL).
    pub dataset: Option<RescueDataset>,

    /// Animal class currently charted.
    pub selected_class: Option<String>,

    /// Recorded/hidden partition of the selected class (cached; rebuilt on
    /// load and on class change).
    pub split: Option<SeriesSplit>,

    /// The user-drawn forecast line.
    pub sketch: Sketch,

    /// Whether the hidden line has been revealed.
    pub revealed: bool,

    /// Stable per-class line colours.
    pub colors: ClassColors,

    /// Pivot year and sketch horizon.
    pub forecast: ForecastConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// "Open URL" dialog state.
    pub url_dialog_open: bool,
    pub url_input: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selected_class: None,
            split: None,
            sketch: Sketch::new(),
            revealed: false,
            colors: ClassColors::default(),
            forecast: ForecastConfig::default(),
            status_message: None,
            url_dialog_open: false,
            url_input: DEFAULT_DATA_URL.to_string(),
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table, pick the starting class, build colours
    /// and the series split.
    pub fn set_dataset(&mut self, dataset: RescueDataset) {
        self.colors = ClassColors::new(&dataset.classes);
        self.selected_class = if dataset.classes.iter().any(|c| c == DEFAULT_CLASS) {
            Some(DEFAULT_CLASS.to_string())
        } else {
            dataset.classes.first().cloned()
        };
        self.dataset = Some(dataset);
        self.status_message = None;
        self.reset_sketch();
        self.rebuild_split();
    }

    /// Switch the charted series. Drops the sketch and hides the actual line
    /// again.
    pub fn select_class(&mut self, class: String) {
        if self.selected_class.as_deref() == Some(class.as_str()) {
            return;
        }
        self.selected_class = Some(class);
        self.status_message = None;
        self.reset_sketch();
        self.rebuild_split();
    }

    fn reset_sketch(&mut self) {
        self.sketch.clear();
        self.revealed = false;
    }

    /// Recompute the recorded/hidden partition for the selected class.
    pub fn rebuild_split(&mut self) {
        self.split = None;
        let (Some(dataset), Some(class)) = (&self.dataset, &self.selected_class) else {
            return;
        };
        match split_series(dataset, class, &self.forecast) {
            Ok(split) => self.split = Some(split),
            Err(e) => {
                log::error!("cannot chart '{class}': {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Feed a plot-space click into the sketch.
    pub fn handle_click(&mut self, x: f64, y: f64) {
        let Some(split) = &self.split else {
            return;
        };
        let window = split.window;
        let anchor = split.anchor;

        match self.sketch.try_add(window, anchor, x, y) {
            ClickOutcome::Added(p) => {
                log::debug!("sketch point at {}: {:.1}", p.when, p.count);
                self.status_message = None;
            }
            ClickOutcome::AdjustedForward(p) => {
                log::debug!("click did not advance the line; moved to {}", p.when);
                self.status_message = None;
            }
            ClickOutcome::Rejected(reason) => {
                let msg = match reason {
                    RejectReason::BeforeWindow => {
                        format!("Click to the right of {} to sketch", window.opens_after)
                    }
                    RejectReason::AfterWindow => {
                        format!("The sketch area ends at {}", window.closes)
                    }
                };
                log::debug!("rejected click at x = {x:.2}: {msg}");
                self.status_message = Some(msg);
            }
        }
    }

    /// Whether the reveal button should be offered.
    pub fn can_reveal(&self) -> bool {
        self.split.is_some() && !self.sketch.is_empty() && !self.revealed
    }

    /// Show the actual line. A latch; sketching may continue afterwards.
    pub fn reveal(&mut self) {
        if self.can_reveal() {
            self.revealed = true;
        }
    }

    /// Throw the sketch away without switching series.
    pub fn clear_sketch(&mut self) {
        self.reset_sketch();
        self.status_message = None;
    }
}

// ---------------------------------------------------------------------------
