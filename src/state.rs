use std::path::Path;

use crate::data::loader::load_file;
use crate::data::model::DataStore;
use crate::scene::{SceneController, SceneKind};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Scene controller over the loaded dataset (None until a file is loaded).
    pub controller: Option<SceneController>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    /// Ingest a newly loaded dataset, optionally starting on a given scene/year.
    pub fn set_dataset(
        &mut self,
        store: DataStore,
        scene: Option<SceneKind>,
        year: Option<i32>,
    ) {
        self.controller = Some(SceneController::with_initial(store, scene, year));
        self.status_message = None;
        self.loading = false;
    }

    /// Load `path`, replacing the current dataset on success.
    ///
    /// On failure the previous dataset stays in place and the error is shown.
    pub fn open_path(&mut self, path: &Path, scene: Option<SceneKind>, year: Option<i32>) {
        self.loading = true;
        match load_file(path) {
            Ok(store) => self.set_dataset(store, scene, year),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                self.loading = false;
            }
        }
    }

    pub fn year_changed(&mut self, year: i32) {
        if let Some(c) = &mut self.controller {
            c.on_year_change(year);
        }
    }

    pub fn next_scene(&mut self) {
        if let Some(c) = &mut self.controller {
            c.on_next();
        }
    }

    pub fn prev_scene(&mut self) {
        if let Some(c) = &mut self.controller {
            c.on_prev();
        }
    }
}
