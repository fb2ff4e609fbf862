use crate::data::aggregate::{
    aggregate_by_rating, aggregate_by_season, aggregate_by_type, AggregatedSeries, ChartDomains,
};
use crate::data::model::{DataStore, Record, YearRange};

// ---------------------------------------------------------------------------
// SceneKind – the three fixed views
// ---------------------------------------------------------------------------

/// Which aggregation a scene shows. Ordered as the user steps through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneKind {
    /// Movies vs. TV shows per release year
    Type,
    /// Titles per rating per release year
    Rating,
    /// Shows per season count per release year
    Season,
}

/// Static text shown alongside a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneMeta {
    pub title: &'static str,
    pub description: &'static str,
    pub y_axis_label: &'static str,
    /// Prefix for a line name in hover text, e.g. `Rating: TV-MA`.
    pub key_label: Option<&'static str>,
}

impl SceneKind {
    pub const ALL: [SceneKind; 3] = [SceneKind::Type, SceneKind::Rating, SceneKind::Season];

    pub fn index(self) -> usize {
        match self {
            SceneKind::Type => 0,
            SceneKind::Rating => 1,
            SceneKind::Season => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Run this scene's aggregation. Always a full recompute.
    pub fn aggregate(self, records: &[Record], threshold: i32) -> AggregatedSeries {
        match self {
            SceneKind::Type => AggregatedSeries::ByType(aggregate_by_type(records, threshold)),
            SceneKind::Rating => {
                AggregatedSeries::ByRating(aggregate_by_rating(records, threshold))
            }
            SceneKind::Season => {
                AggregatedSeries::BySeason(aggregate_by_season(records, threshold))
            }
        }
    }

    pub fn meta(self) -> SceneMeta {
        match self {
            SceneKind::Type => SceneMeta {
                title: "Count of Movies and Shows per Release Year",
                description: "Drag the slider to show data for the selected range of release years!\n\
                              Hover the points to see the exact release year and count of movies/shows.",
                y_axis_label: "Count of Type",
                key_label: None,
            },
            SceneKind::Rating => SceneMeta {
                title: "Count of Movies/Shows with each Rating per Release Year",
                description: "Drag the slider to show data for the selected range of release years!\n\
                              Hover the points to see the release year, rating, and count of titles with that rating.",
                y_axis_label: "Count of Movies/Shows with Rating",
                key_label: Some("Rating"),
            },
            SceneKind::Season => SceneMeta {
                title: "Count of Movies/Shows with Particular Duration per Release Year",
                description: "Drag the slider to show data for the selected range of release years!\n\
                              Hover the points to see the release year, season count, and count of shows with that duration.",
                y_axis_label: "Count of Movies/Shows with Duration",
                key_label: Some("Season"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// SceneState – pure transitions
// ---------------------------------------------------------------------------

/// Current scene plus the inclusive year threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneState {
    pub scene: SceneKind,
    pub year_threshold: i32,
}

impl SceneState {
    /// First scene, threshold at the latest year.
    pub fn initial(range: YearRange) -> Self {
        SceneState {
            scene: SceneKind::Type,
            year_threshold: range.max,
        }
    }

    /// Step forward; unchanged on the last scene.
    pub fn next(self) -> Self {
        match SceneKind::from_index(self.scene.index() + 1) {
            Some(scene) => SceneState { scene, ..self },
            None => self,
        }
    }

    /// Step back; unchanged on the first scene.
    pub fn prev(self) -> Self {
        match self.scene.index().checked_sub(1).and_then(SceneKind::from_index) {
            Some(scene) => SceneState { scene, ..self },
            None => self,
        }
    }

    /// Replace the threshold, clamped into `range`.
    pub fn with_year(self, year: i32, range: YearRange) -> Self {
        SceneState {
            year_threshold: range.clamp(year),
            ..self
        }
    }

    pub fn has_next(self) -> bool {
        self.scene.index() + 1 < SceneKind::ALL.len()
    }

    pub fn has_prev(self) -> bool {
        self.scene.index() > 0
    }
}

// ---------------------------------------------------------------------------
// SceneView / Renderer
// ---------------------------------------------------------------------------

/// Everything a renderer needs for one frame of the current scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneView {
    pub scene: SceneKind,
    pub year_threshold: i32,
    pub series: AggregatedSeries,
    /// `None` when the series is empty; the renderer draws a blank chart.
    pub domains: Option<ChartDomains>,
    pub meta: SceneMeta,
    pub next_enabled: bool,
    pub prev_enabled: bool,
}

impl SceneView {
    fn compute(records: &[Record], state: SceneState) -> Self {
        let series = state.scene.aggregate(records, state.year_threshold);
        let domains = series.domains();

        log::debug!(
            "scene {:?} @ {}: {} year rows",
            state.scene,
            state.year_threshold,
            series.len()
        );
        if series.is_empty() {
            log::warn!(
                "scene {:?} has no data up to {}",
                state.scene,
                state.year_threshold
            );
        }

        SceneView {
            scene: state.scene,
            year_threshold: state.year_threshold,
            series,
            domains,
            meta: state.scene.meta(),
            next_enabled: state.has_next(),
            prev_enabled: state.has_prev(),
        }
    }
}

/// Draws a [`SceneView`]. Implemented by the presentation layer.
pub trait Renderer {
    fn render(&mut self, view: &SceneView);
}

// ---------------------------------------------------------------------------
// SceneController
// ---------------------------------------------------------------------------

/// Owns the dataset and the scene state; recomputes the view on every change.
#[derive(Debug, Clone)]
pub struct SceneController {
    store: DataStore,
    state: SceneState,
    view: SceneView,
}

impl SceneController {
    /// Start on `scene` and `year`, defaulting to the first scene and the
    /// latest release year. The year is clamped.
    pub fn with_initial(store: DataStore, scene: Option<SceneKind>, year: Option<i32>) -> Self {
        let range = store.year_range();
        let mut state = SceneState::initial(range);
        if let Some(scene) = scene {
            state.scene = scene;
        }
        if let Some(year) = year {
            state = state.with_year(year, range);
        }
        let view = SceneView::compute(store.records(), state);
        SceneController { store, state, view }
    }

    /// Slider moved.
    pub fn on_year_change(&mut self, year: i32) -> &SceneView {
        let next = self.state.with_year(year, self.store.year_range());
        self.apply(next)
    }

    /// "Next" pressed. No-op on the last scene.
    pub fn on_next(&mut self) -> &SceneView {
        if self.state.has_next() {
            self.apply(self.state.next());
        }
        &self.view
    }

    /// "Previous" pressed. No-op on the first scene.
    pub fn on_prev(&mut self) -> &SceneView {
        if self.state.has_prev() {
            self.apply(self.state.prev());
        }
        &self.view
    }

    /// Hand the current view to a renderer.
    pub fn present<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.render(&self.view);
    }

    fn apply(&mut self, state: SceneState) -> &SceneView {
        self.state = state;
        self.view = SceneView::compute(self.store.records(), state);
        &self.view
    }

    pub fn view(&self) -> &SceneView {
        &self.view
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn year_range(&self) -> YearRange {
        self.store.year_range()
    }

    pub fn is_next_enabled(&self) -> bool {
        self.state.has_next()
    }

    pub fn is_prev_enabled(&self) -> bool {
        self.state.has_prev()
    }

    pub fn current_year_threshold(&self) -> i32 {
        self.state.year_threshold
    }

    pub fn current_scene_index(&self) -> usize {
        self.state.scene.index()
    }
}
