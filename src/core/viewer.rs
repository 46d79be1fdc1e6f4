//! Viewer UI state store. In-memory only.

use crate::core::store::{Store, Subscription};
use crate::models::{EnvironmentPreset, ViewerState};

#[derive(Clone, Default)]
pub struct ViewerStore {
    state: Store<ViewerState>,
}

impl ViewerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update loading flag and progress together.
    pub fn set_model_loading(&self, loading: bool, progress: f64) {
        self.state.update(|s| {
            s.model_loading = loading;
            s.model_progress = progress;
        });
    }

    pub fn set_light_rotation(&self, rotation: f64) {
        self.state.update(|s| s.light_rotation = rotation);
    }

    pub fn toggle_auto_rotate(&self) {
        self.state.update(|s| s.auto_rotate = !s.auto_rotate);
    }

    pub fn toggle_grid(&self) {
        self.state.update(|s| s.show_grid = !s.show_grid);
    }

    pub fn toggle_stats(&self) {
        self.state.update(|s| s.show_stats = !s.show_stats);
    }

    pub fn set_environment(&self, preset: EnvironmentPreset) {
        self.state.update(|s| s.environment_preset = preset);
    }

    pub fn reset(&self) {
        self.state.set(ViewerState::default());
    }

    pub fn get(&self) -> ViewerState {
        self.state.get()
    }

    pub fn store(&self) -> &Store<ViewerState> {
        &self.state
    }

    #[must_use = "dropping the subscription unsubscribes"]
    pub fn subscribe(&self, f: impl Fn(&ViewerState) + Send + Sync + 'static) -> Subscription {
        self.state.subscribe(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_touch_only_their_field() {
        let viewer = ViewerStore::new();
        viewer.set_model_loading(true, 42.5);
        viewer.set_light_rotation(90.0);
        viewer.set_environment(EnvironmentPreset::Night);

        let state = viewer.get();
        assert!(state.model_loading);
        assert_eq!(state.model_progress, 42.5);
        assert_eq!(state.light_rotation, 90.0);
        assert_eq!(state.environment_preset, EnvironmentPreset::Night);
        assert!(state.auto_rotate);
        assert!(state.show_grid);
        assert!(!state.show_stats);
    }

    #[test]
    fn test_toggles() {
        let viewer = ViewerStore::new();
        viewer.toggle_auto_rotate();
        viewer.toggle_grid();
        viewer.toggle_stats();
        let state = viewer.get();
        assert!(!state.auto_rotate);
        assert!(!state.show_grid);
        assert!(state.show_stats);

        viewer.toggle_stats();
        assert!(!viewer.get().show_stats);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let viewer = ViewerStore::new();
        viewer.set_model_loading(true, 80.0);
        viewer.set_light_rotation(-1.5);
        viewer.toggle_auto_rotate();
        viewer.toggle_grid();
        viewer.toggle_stats();
        viewer.set_environment(EnvironmentPreset::Warehouse);

        viewer.reset();
        assert_eq!(
            viewer.get(),
            ViewerState {
                model_loading: false,
                model_progress: 0.0,
                light_rotation: 0.0,
                auto_rotate: true,
                show_grid: true,
                show_stats: false,
                environment_preset: EnvironmentPreset::Studio,
            }
        );

        // Idempotent from the default state too.
        viewer.reset();
        assert_eq!(viewer.get(), ViewerState::default());
    }
}
