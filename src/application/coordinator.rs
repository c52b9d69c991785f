use chrono::{DateTime, FixedOffset};

use super::view_model::{DashboardViewModel, TooltipView, ViewContext};
use crate::domain::chart::MetricVisibility;
use crate::domain::config::DashboardConfig;
use crate::domain::errors::DomainError;
use crate::domain::forecast::{Location, LocationDataset, MetricKey};
use crate::domain::logging::LogComponent;
use crate::gesture::{GestureController, GestureResponse, GestureSettings, InputEvent, Surface};
use crate::infrastructure::RenderScheduler;
use crate::view_state::WindowState;
use crate::{log_debug, log_info};

/// Owns every piece of mutable dashboard state. Mutations update state
/// first and then ask the scheduler for a frame.
pub struct DashboardController {
    config: DashboardConfig,
    datasets: Vec<LocationDataset>,
    selected: usize,
    preferred_location: Option<String>,
    window: WindowState,
    gestures: GestureController,
    visibility: MetricVisibility,
    scheduler: RenderScheduler,
    surface: Surface,
    last_checked: Option<DateTime<FixedOffset>>,
}

impl DashboardController {
    pub fn new(config: DashboardConfig, scheduler: RenderScheduler) -> Self {
        log_info!(
            LogComponent::Application("DashboardController"),
            "Creating dashboard for {} locations",
            config.locations.len()
        );
        Self {
            window: WindowState::from_config(0, &config),
            gestures: GestureController::new(GestureSettings::from(&config)),
            config,
            datasets: Vec::new(),
            selected: 0,
            preferred_location: None,
            visibility: MetricVisibility::default(),
            scheduler,
            surface: Surface { canvas_width: 0.0, track_width: 0.0 },
            last_checked: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn locations(&self) -> &[Location] {
        &self.config.locations
    }

    pub fn datasets(&self) -> &[LocationDataset] {
        &self.datasets
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_dataset(&self) -> Option<&LocationDataset> {
        self.datasets.get(self.selected)
    }

    pub fn selected_location_name(&self) -> Option<String> {
        self.selected_dataset()
            .map(|d| d.location.name.clone())
            .or_else(|| self.preferred_location.clone())
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn visibility(&self) -> &MetricVisibility {
        &self.visibility
    }

    pub fn is_interacting(&self) -> bool {
        self.gestures.is_interacting()
    }

    pub fn last_checked(&self) -> Option<DateTime<FixedOffset>> {
        self.last_checked
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Name to select once data arrives (e.g. restored from storage).
    pub fn prefer_location(&mut self, name: &str) {
        self.preferred_location = Some(name.to_string());
        if let Some(index) = self.datasets.iter().position(|d| d.location.name == name) {
            if index != self.selected {
                self.select_dataset(index);
            }
        }
    }

    /// Swap in freshly loaded datasets, keeping the selected location by name.
    pub fn replace_datasets(&mut self, datasets: Vec<LocationDataset>, checked_at: DateTime<FixedOffset>) {
        let previous = self.selected_location_name();
        self.datasets = datasets;
        self.selected = previous
            .as_deref()
            .and_then(|name| self.datasets.iter().position(|d| d.location.name == name))
            .unwrap_or(0);
        self.last_checked = Some(checked_at);

        let (len, metrics) = match self.datasets.get(self.selected) {
            Some(dataset) => (dataset.len(), dataset.metrics.as_slice()),
            None => (0, &[][..]),
        };
        let kept_selection = previous.is_some() && previous == selected_name(&self.datasets, self.selected);
        let had_rows = self.window.series_len() > 0;
        self.window.normalize(len);
        if !(kept_selection && had_rows) {
            self.window.reset(self.config.default_window_hours);
        }
        self.visibility = MetricVisibility::rebuild(metrics, &self.visibility, &self.config);

        log_info!(
            LogComponent::Application("DashboardController"),
            "🔄 Loaded {} locations, showing {:?} ({} hours)",
            self.datasets.len(),
            self.selected_location_name(),
            len
        );
        self.scheduler.schedule_render();
    }

    pub fn select_location(&mut self, index: usize) -> Result<(), DomainError> {
        if index >= self.datasets.len() {
            return Err(DomainError::InvalidLocation(format!(
                "index {} out of {} loaded locations",
                index,
                self.datasets.len()
            )));
        }
        if index != self.selected {
            self.select_dataset(index);
        }
        Ok(())
    }

    pub fn select_location_by_name(&mut self, name: &str) -> Result<(), DomainError> {
        let index = self
            .datasets
            .iter()
            .position(|d| d.location.name == name)
            .ok_or_else(|| DomainError::InvalidLocation(format!("{} is not loaded", name)))?;
        self.select_location(index)
    }

    fn select_dataset(&mut self, index: usize) {
        self.selected = index;
        self.gestures.reset();
        let (len, metrics) = match self.datasets.get(index) {
            Some(dataset) => {
                self.preferred_location = Some(dataset.location.name.clone());
                (dataset.len(), dataset.metrics.as_slice())
            }
            None => (0, &[][..]),
        };
        self.window.normalize(len);
        self.window.reset(self.config.default_window_hours);
        self.visibility = MetricVisibility::rebuild(metrics, &self.visibility, &self.config);
        log_debug!(
            LogComponent::Application("DashboardController"),
            "Selected location {} with {} hours, window reset",
            index,
            len
        );
        self.scheduler.schedule_render();
    }

    pub fn toggle_metric(&mut self, key: &str) -> Option<bool> {
        let visible = self.visibility.toggle(&MetricKey::from(key))?;
        self.scheduler.schedule_render();
        Some(visible)
    }

    pub fn resize(&mut self, canvas_width: f64, track_width: f64) {
        let next = Surface { canvas_width: canvas_width.max(0.0), track_width: track_width.max(0.0) };
        if next != self.surface {
            self.surface = next;
            self.scheduler.schedule_render();
        }
    }

    /// Route one input event through the gesture state machine.
    pub fn handle_input(&mut self, event: InputEvent) -> GestureResponse {
        let starts_motion = matches!(
            event,
            InputEvent::PointerDown(_)
                | InputEvent::PointerMove(_)
                | InputEvent::Wheel { .. }
                | InputEvent::HandleDown { .. }
                | InputEvent::HandleMove { .. }
        );
        if starts_motion && self.window.series_len() <= 1 {
            return GestureResponse { ignored: true, ..Default::default() };
        }
        let was_interacting = self.gestures.is_interacting();
        let response = self.gestures.handle(event, &self.surface, &mut self.window);
        if response.window_changed || was_interacting != self.gestures.is_interacting() {
            self.scheduler.schedule_render();
        }
        response
    }

    /// Wheel idle timeout elapsed.
    pub fn finish_wheel(&mut self) -> GestureResponse {
        self.handle_input(InputEvent::WheelIdle)
    }

    fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            dataset: self.selected_dataset(),
            window: &self.window,
            visibility: &self.visibility,
            surface: &self.surface,
            padding: &self.config.chart_padding,
            tick_label_width: self.config.tick_label_width,
            is_interacting: self.gestures.is_interacting(),
            last_checked: self.last_checked.map(|t| t.to_rfc3339()),
        }
    }

    pub fn view_model(&self) -> DashboardViewModel {
        self.view_context().view_model()
    }

    pub fn tooltip_at(&self, group_key: &str, local_x: f64) -> Option<TooltipView> {
        self.view_context().tooltip_at(group_key, local_x)
    }
}

fn selected_name(datasets: &[LocationDataset], index: usize) -> Option<String> {
    datasets.get(index).map(|d| d.location.name.clone())
}
