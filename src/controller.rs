use crate::errors::FetchError;
use crate::models::{RenderedView, Selection, UiSnapshot, ViewState};
use tracing::debug;

/// Visual state of the widget plus the selected category.
///
/// Each fetch gets a generation number from [`UiController::begin_fetch`];
/// only the newest generation may settle the view, so a slow response can
/// never overwrite a newer one.
#[derive(Debug)]
pub struct UiController {
    view: ViewState,
    current_category: Option<String>,
    generation: u64,
}

impl Default for UiController {
    fn default() -> Self {
        Self::new()
    }
}

impl UiController {
    pub fn new() -> Self {
        Self {
            view: ViewState::Idle,
            current_category: None,
            generation: 0,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn current_category(&self) -> Option<&str> {
        self.current_category.as_deref()
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.current_category.as_deref() == Some(category)
    }

    pub fn begin_fetch(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.view = ViewState::Loading;
        self.generation
    }

    /// Returns `false` when the completion was stale and got dropped.
    pub fn finish(&mut self, generation: u64, outcome: Result<RenderedView, FetchError>) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale fetch result");
            return false;
        }

        self.view = match outcome {
            Ok(view) => ViewState::Success { view },
            Err(err) => ViewState::Error {
                message: err.to_string(),
            },
        };
        true
    }

    pub fn toggle_category(&mut self, category: &str) -> Selection {
        if self.is_selected(category) {
            self.current_category = None;
            return Selection::Cleared;
        }

        self.current_category = Some(category.to_string());
        Selection::Selected(category.to_string())
    }

    pub fn clear_category(&mut self) {
        self.current_category = None;
    }

    /// Back to a fresh widget. The generation keeps counting so requests
    /// started before the reset cannot land afterwards.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.view = ViewState::Idle;
        self.current_category = None;
    }

    pub fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            view: self.view.clone(),
            current_category: self.current_category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;
    use crate::render::render_single;

    fn sample_view() -> RenderedView {
        render_single(&Activity {
            activity: "Learn a chord".to_string(),
            kind: "education".to_string(),
            participants: Some(1),
            price: Some(0.1),
            accessibility: Some(0.4),
        })
    }

    #[test]
    fn toggling_same_category_twice_clears_selection() {
        let mut ui = UiController::new();
        assert_eq!(ui.toggle_category("social"), Selection::Selected("social".into()));
        assert!(ui.is_selected("social"));
        assert_eq!(ui.toggle_category("social"), Selection::Cleared);
        assert_eq!(ui.current_category(), None);
        assert!(!ui.is_selected("social"));
    }

    #[test]
    fn selecting_another_category_is_exclusive() {
        let mut ui = UiController::new();
        ui.toggle_category("charity");
        ui.toggle_category("cooking");
        assert_eq!(ui.current_category(), Some("cooking"));
        assert!(!ui.is_selected("charity"));
    }

    #[test]
    fn fetch_lifecycle_moves_through_states() {
        let mut ui = UiController::new();
        assert_eq!(ui.view(), &ViewState::Idle);

        let generation = ui.begin_fetch();
        assert_eq!(ui.view(), &ViewState::Loading);
        assert!(ui.finish(generation, Ok(sample_view())));
        assert!(matches!(ui.view(), ViewState::Success { .. }));

        let generation = ui.begin_fetch();
        assert!(ui.finish(generation, Err(FetchError::Network("offline".into()))));
        assert!(matches!(ui.view(), ViewState::Error { .. }));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut ui = UiController::new();
        let first = ui.begin_fetch();
        let second = ui.begin_fetch();

        assert!(ui.finish(second, Ok(sample_view())));
        assert!(!ui.finish(first, Err(FetchError::Upstream("late".into()))));
        assert!(matches!(ui.view(), ViewState::Success { .. }));
    }

    #[test]
    fn reset_returns_to_idle_and_drops_in_flight() {
        let mut ui = UiController::new();
        ui.toggle_category("relaxation");
        let generation = ui.begin_fetch();
        ui.reset();

        assert_eq!(ui.view(), &ViewState::Idle);
        assert_eq!(ui.current_category(), None);
        assert!(!ui.finish(generation, Ok(sample_view())));
        assert_eq!(ui.view(), &ViewState::Idle);
    }

    #[test]
    fn clear_category_always_deselects() {
        let mut ui = UiController::new();
        ui.clear_category();
        assert_eq!(ui.current_category(), None);
        ui.toggle_category("busywork");
        ui.clear_category();
        assert_eq!(ui.current_category(), None);
        assert_eq!(ui.snapshot().current_category, None);
    }
}
