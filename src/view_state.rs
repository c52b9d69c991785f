use crate::domain::config::DashboardConfig;
use crate::domain::errors::DomainError;

/// Visible slice of the hourly series: first index plus length in hours.
///
/// At rest `0 <= start` and `start + window <= len`. With overscroll
/// enabled an elastic pan may push `start` up to one window past either
/// edge until [`WindowState::settle`] pulls it back.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowState {
    start_index: i64,
    window_size: usize,
    series_len: usize,
    min_window: usize,
    allow_overscroll: bool,
}

/// Rows actually present for the current window, plus how many leading
/// slots of the window are empty because it starts before the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleSlice {
    pub start: usize,
    pub end: usize,
    pub offset: usize,
}

impl WindowState {
    pub fn new(series_len: usize, window_size: usize, min_window: usize, allow_overscroll: bool) -> Self {
        let mut state = Self {
            start_index: 0,
            window_size,
            series_len,
            min_window: min_window.max(1),
            allow_overscroll,
        };
        state.settle();
        state
    }

    pub fn from_config(series_len: usize, config: &DashboardConfig) -> Self {
        Self::new(series_len, config.default_window_hours, config.min_window_hours, config.allow_overscroll)
    }

    pub fn start_index(&self) -> i64 {
        self.start_index
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Last index covered by the window (inclusive).
    pub fn end_index(&self) -> i64 {
        self.start_index + self.window_size as i64 - 1
    }

    pub fn series_len(&self) -> usize {
        self.series_len
    }

    pub fn min_window(&self) -> usize {
        self.min_window
    }

    pub fn allows_overscroll(&self) -> bool {
        self.allow_overscroll
    }

    pub fn max_window(&self) -> usize {
        self.series_len.max(1)
    }

    /// Smallest reachable window; shorter series lower the floor.
    pub fn floor_window(&self) -> usize {
        self.min_window.min(self.max_window())
    }

    pub fn max_start(&self, window_size: usize) -> i64 {
        self.series_len.saturating_sub(window_size) as i64
    }

    pub fn clamp_window_size(&self, target: f64) -> usize {
        if !target.is_finite() {
            return self.floor_window();
        }
        (target.round().max(0.0) as usize).clamp(self.floor_window(), self.max_window())
    }

    pub fn clamp_start(&self, value: f64, window_size: usize) -> i64 {
        if !value.is_finite() {
            return 0;
        }
        (value.round() as i64).clamp(0, self.max_start(window_size))
    }

    fn apply(&mut self, start_index: i64, window_size: usize) -> bool {
        if start_index == self.start_index && window_size == self.window_size {
            return false;
        }
        self.start_index = start_index;
        self.window_size = window_size;
        true
    }

    /// Resize to `target` hours keeping the hour at `anchor_ratio` (0 = left
    /// edge, 1 = right edge) fixed. Returns whether anything changed.
    pub fn zoom(&mut self, target: f64, anchor_ratio: f64) -> bool {
        let ratio = if anchor_ratio.is_finite() { anchor_ratio.clamp(0.0, 1.0) } else { 0.5 };
        let next_window = self.clamp_window_size(target);
        let next_start = if next_window >= self.max_window() {
            0
        } else {
            let anchor_index = self.start_index as f64 + ratio * self.window_size as f64;
            self.clamp_start(anchor_index - ratio * next_window as f64, next_window)
        };
        self.apply(next_start, next_window)
    }

    /// Multiplicative zoom around an anchor.
    pub fn zoom_by(&mut self, factor: f64, anchor_ratio: f64) -> bool {
        self.zoom(self.window_size as f64 * factor, anchor_ratio)
    }

    /// Move to `origin + delta_index`. `elastic` lets an active drag run past
    /// the data edge when overscroll is enabled.
    pub fn pan_from(&mut self, origin: i64, delta_index: f64, elastic: bool) -> bool {
        let target = origin as f64 + delta_index;
        let next = if elastic && self.allow_overscroll && target.is_finite() {
            let limit = self.window_size as i64;
            (target.round() as i64).clamp(-limit, self.max_start(self.window_size) + limit)
        } else {
            self.clamp_start(target, self.window_size)
        };
        self.apply(next, self.window_size)
    }

    /// Move the first visible hour, keeping the last one fixed.
    pub fn drag_start_handle(&mut self, index: i64) -> bool {
        let end = self.end_index();
        let floor = self.floor_window() as i64;
        let start = index.min(end - floor + 1).max(0);
        let window = (end - start + 1).max(1) as usize;
        self.apply(start, window)
    }

    /// Move the last visible hour, keeping the first one fixed.
    pub fn drag_end_handle(&mut self, index: i64) -> bool {
        let max_index = self.series_len as i64 - 1;
        let floor = self.floor_window() as i64;
        let end = index.max(self.start_index + floor - 1).min(max_index);
        let window = (end - self.start_index + 1).max(1) as usize;
        self.apply(self.start_index, window)
    }

    /// Translate the whole selection, preserving its length.
    pub fn drag_selection(&mut self, next_start: i64) -> bool {
        let max_index = self.series_len as i64 - 1;
        let span = self.window_size as i64 - 1;
        let start = next_start.min(max_index - span).max(0);
        self.apply(start, self.window_size)
    }

    /// Pull the window back inside the series bounds.
    pub fn settle(&mut self) -> bool {
        let window = self.clamp_window_size(self.window_size as f64);
        let start = self.clamp_start(self.start_index as f64, window);
        self.apply(start, window)
    }

    pub fn is_settled(&self) -> bool {
        self.validate().is_ok()
    }

    /// Adopt a new series length (after a refresh) and re-clamp.
    pub fn normalize(&mut self, series_len: usize) -> bool {
        let len_changed = self.series_len != series_len;
        self.series_len = series_len;
        self.settle() || len_changed
    }

    /// Back to the leading `default_window` hours.
    pub fn reset(&mut self, default_window: usize) {
        self.start_index = 0;
        self.window_size = default_window;
        self.settle();
    }

    pub fn visible_slice(&self) -> VisibleSlice {
        let start = self.start_index.max(0) as usize;
        let requested_end = (self.start_index + self.window_size as i64).max(0) as usize;
        let end = requested_end.min(self.series_len).max(start.min(self.series_len));
        let start = start.min(end);
        let offset = (-self.start_index).clamp(0, self.window_size as i64) as usize;
        VisibleSlice { start, end, offset }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.start_index < 0 {
            return Err(DomainError::InvalidWindow(format!("start {} before series", self.start_index)));
        }
        if self.series_len > 0 && self.start_index as usize + self.window_size > self.series_len {
            return Err(DomainError::InvalidWindow(format!(
                "window {}+{} exceeds {} rows",
                self.start_index, self.window_size, self.series_len
            )));
        }
        if self.window_size < self.floor_window() {
            return Err(DomainError::InvalidWindow(format!(
                "window {} below minimum {}",
                self.window_size,
                self.floor_window()
            )));
        }
        Ok(())
    }
}
