//! Pointer, wheel and timeline-handle input as explicit state transitions
//! over a [`WindowState`].

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::domain::chart::layout::{anchor_ratio_from_x, timeline_index_from_x};
use crate::domain::config::{ChartPadding, DashboardConfig, WheelZoomSign};
use crate::domain::logging::LogComponent;
use crate::log_debug;
use crate::view_state::WindowState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

/// DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl WheelDeltaMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => WheelDeltaMode::Line,
            2 => WheelDeltaMode::Page,
            _ => WheelDeltaMode::Pixel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Handle {
    Start,
    End,
    Selection,
}

/// One pointer sample in canvas-local (or track-local) CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub id: i32,
    pub kind: PointerKind,
    pub button: i16,
    pub x: f64,
    pub y: f64,
}

impl PointerInput {
    pub fn new(id: i32, kind: PointerKind, x: f64, y: f64) -> Self {
        Self { id, kind, button: 0, x, y }
    }

    fn is_secondary_mouse_button(&self) -> bool {
        self.kind == PointerKind::Mouse && self.button != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(PointerInput),
    PointerMove(PointerInput),
    PointerUp(i32),
    PointerCancel(i32),
    PointerLeave(i32),
    Wheel { delta_y: f64, mode: WheelDeltaMode, x: f64 },
    WheelIdle,
    HandleDown { handle: Handle, pointer: PointerInput },
    HandleMove { x: f64 },
    HandleUp,
}

/// How a single-pointer drag has been interpreted so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    #[default]
    Undecided,
    Pan,
    Scroll,
}

/// What the host should do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureResponse {
    pub window_changed: bool,
    pub capture_pointer: Option<i32>,
    pub release_pointer: Option<i32>,
    pub prevent_default: bool,
    pub hide_tooltip: bool,
    pub arm_wheel_idle: bool,
    pub ignored: bool,
}

impl GestureResponse {
    fn ignored() -> Self {
        Self { ignored: true, ..Self::default() }
    }
}

/// Widths the gesture math needs, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub canvas_width: f64,
    pub track_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureSettings {
    pub threshold_px: f64,
    pub vertical_scroll_ratio: f64,
    pub wheel_zoom_k: f64,
    pub wheel_zoom_sign: WheelZoomSign,
    pub line_delta_px: f64,
    pub page_delta_px: f64,
    pub padding: ChartPadding,
}

impl From<&DashboardConfig> for GestureSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            threshold_px: config.gesture_threshold_px,
            vertical_scroll_ratio: config.vertical_scroll_ratio,
            wheel_zoom_k: config.wheel_zoom_k,
            wheel_zoom_sign: config.wheel_zoom_sign,
            line_delta_px: config.line_delta_px,
            page_delta_px: config.page_delta_px,
            padding: config.chart_padding,
        }
    }
}

impl GestureSettings {
    /// Wheel delta in pixels regardless of the reported delta mode.
    pub fn wheel_delta_px(&self, delta_y: f64, mode: WheelDeltaMode) -> f64 {
        match mode {
            WheelDeltaMode::Pixel => delta_y,
            WheelDeltaMode::Line => delta_y * self.line_delta_px,
            WheelDeltaMode::Page => delta_y * self.page_delta_px,
        }
    }

    /// `exp(sign * delta * k)`; always positive, 1 for a zero delta.
    pub fn wheel_zoom_factor(&self, delta_y: f64, mode: WheelDeltaMode) -> f64 {
        (self.wheel_zoom_sign.factor() * self.wheel_delta_px(delta_y, mode) * self.wheel_zoom_k).exp()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePointer {
    id: i32,
    kind: PointerKind,
    x: f64,
    y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HandleDrag {
    handle: Handle,
    pointer_id: i32,
    offset_x: f64,
}

pub struct GestureController {
    settings: GestureSettings,
    pointers: Vec<ActivePointer>,
    mode: DragMode,
    is_panning: bool,
    is_interacting: bool,
    pan_start_x: f64,
    pan_start_y: f64,
    pan_start_index: i64,
    pinch_start_distance: f64,
    pinch_start_window: usize,
    handle_drag: Option<HandleDrag>,
}

impl GestureController {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            pointers: Vec::new(),
            mode: DragMode::Undecided,
            is_panning: false,
            is_interacting: false,
            pan_start_x: 0.0,
            pan_start_y: 0.0,
            pan_start_index: 0,
            pinch_start_distance: 0.0,
            pinch_start_window: 0,
            handle_drag: None,
        }
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn is_interacting(&self) -> bool {
        self.is_interacting
    }

    pub fn is_panning(&self) -> bool {
        self.is_panning
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Forget every in-flight gesture (location switch, data replacement).
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.mode = DragMode::Undecided;
        self.is_panning = false;
        self.is_interacting = false;
        self.pinch_start_distance = 0.0;
        self.handle_drag = None;
    }

    pub fn handle(&mut self, event: InputEvent, surface: &Surface, window: &mut WindowState) -> GestureResponse {
        match event {
            InputEvent::PointerDown(p) => self.on_pointer_down(p, surface, window),
            InputEvent::PointerMove(p) => self.on_pointer_move(p, surface, window),
            InputEvent::PointerUp(id) | InputEvent::PointerCancel(id) | InputEvent::PointerLeave(id) => {
                self.on_pointer_end(id, window)
            }
            InputEvent::Wheel { delta_y, mode, x } => self.on_wheel(delta_y, mode, x, surface, window),
            InputEvent::WheelIdle => self.on_wheel_idle(),
            InputEvent::HandleDown { handle, pointer } => self.on_handle_down(handle, pointer, surface, window),
            InputEvent::HandleMove { x } => self.on_handle_move(x, surface, window),
            InputEvent::HandleUp => self.on_handle_up(window),
        }
    }

    fn anchor_ratio(&self, x: f64, surface: &Surface) -> f64 {
        anchor_ratio_from_x(x, surface.canvas_width, &self.settings.padding)
    }

    pub fn on_wheel(
        &mut self,
        delta_y: f64,
        mode: WheelDeltaMode,
        x: f64,
        surface: &Surface,
        window: &mut WindowState,
    ) -> GestureResponse {
        self.is_interacting = true;
        let factor = self.settings.wheel_zoom_factor(delta_y, mode);
        let changed = window.zoom_by(factor, self.anchor_ratio(x, surface));
        GestureResponse { window_changed: changed, prevent_default: true, arm_wheel_idle: true, ..Default::default() }
    }

    pub fn on_wheel_idle(&mut self) -> GestureResponse {
        if self.pointers.is_empty() && self.handle_drag.is_none() {
            self.is_interacting = false;
        }
        GestureResponse::default()
    }

    pub fn on_pointer_down(&mut self, p: PointerInput, surface: &Surface, window: &mut WindowState) -> GestureResponse {
        if p.is_secondary_mouse_button() {
            return GestureResponse::ignored();
        }
        let sample = ActivePointer { id: p.id, kind: p.kind, x: p.x, y: p.y };
        match self.pointers.iter_mut().find(|a| a.id == p.id) {
            Some(existing) => *existing = sample,
            None => self.pointers.push(sample),
        }
        self.is_interacting = true;

        match self.pointers.len() {
            1 => {
                let is_mouse = p.kind == PointerKind::Mouse;
                self.mode = if is_mouse { DragMode::Pan } else { DragMode::Undecided };
                self.is_panning = is_mouse;
                self.pan_start_x = p.x;
                self.pan_start_y = p.y;
                self.pan_start_index = window.start_index();
            }
            2 => {
                self.is_panning = false;
                let (a, b) = (self.pointers[0], self.pointers[1]);
                self.pinch_start_distance = (a.x - b.x).hypot(a.y - b.y);
                self.pinch_start_window = window.window_size();
                log_debug!(
                    LogComponent::Application("GestureController"),
                    "Pinch started at {:.1}px, anchor {:.2}",
                    self.pinch_start_distance,
                    self.anchor_ratio((a.x + b.x) / 2.0, surface)
                );
            }
            _ => {}
        }

        GestureResponse { capture_pointer: Some(p.id), hide_tooltip: true, ..Default::default() }
    }

    pub fn on_pointer_move(&mut self, p: PointerInput, surface: &Surface, window: &mut WindowState) -> GestureResponse {
        let Some(tracked) = self.pointers.iter_mut().find(|a| a.id == p.id) else {
            return GestureResponse::ignored();
        };
        tracked.x = p.x;
        tracked.y = p.y;

        if self.pointers.len() == 1 && self.mode == DragMode::Undecided && p.kind != PointerKind::Mouse {
            let dx = p.x - self.pan_start_x;
            let dy = p.y - self.pan_start_y;
            if dx.hypot(dy) < self.settings.threshold_px {
                return GestureResponse::default();
            }
            if dy.abs() > dx.abs() * self.settings.vertical_scroll_ratio {
                self.mode = DragMode::Scroll;
                self.is_panning = false;
                self.is_interacting = false;
                log_debug!(LogComponent::Application("GestureController"), "Vertical drag, yielding to page scroll");
                return GestureResponse { release_pointer: Some(p.id), ..Default::default() };
            }
            self.mode = DragMode::Pan;
            self.is_panning = true;
            log_debug!(LogComponent::Application("GestureController"), "Horizontal drag, panning");
        }

        if self.pointers.len() == 1 && self.is_panning {
            let chart_width = self.settings.padding.chart_width(surface.canvas_width);
            if chart_width <= 0.0 {
                return GestureResponse::default();
            }
            let dx = p.x - self.pan_start_x;
            let delta_index = (-dx / chart_width) * window.window_size() as f64;
            let changed = window.pan_from(self.pan_start_index, delta_index, true);
            return GestureResponse { window_changed: changed, prevent_default: true, ..Default::default() };
        }

        if self.pointers.len() == 2 {
            let (a, b) = (self.pointers[0], self.pointers[1]);
            let distance = (a.x - b.x).hypot(a.y - b.y);
            let anchor = self.anchor_ratio((a.x + b.x) / 2.0, surface);
            let mut changed = false;
            if self.pinch_start_distance > 0.0 {
                let scale = distance / self.pinch_start_distance;
                changed = window.zoom(self.pinch_start_window as f64 / scale, anchor);
            }
            return GestureResponse { window_changed: changed, prevent_default: true, ..Default::default() };
        }

        GestureResponse::default()
    }

    /// Shared by pointer up, cancel and leave.
    pub fn on_pointer_end(&mut self, id: i32, window: &mut WindowState) -> GestureResponse {
        self.pointers.retain(|a| a.id != id);

        match self.pointers.as_slice() {
            [remaining] => {
                self.mode = DragMode::Pan;
                self.is_panning = true;
                self.pan_start_x = remaining.x;
                self.pan_start_y = remaining.y;
                self.pan_start_index = window.start_index();
                GestureResponse::default()
            }
            [] => {
                self.is_panning = false;
                self.mode = DragMode::Undecided;
                self.is_interacting = false;
                GestureResponse { window_changed: window.settle(), ..Default::default() }
            }
            _ => GestureResponse::default(),
        }
    }

    pub fn on_handle_down(
        &mut self,
        handle: Handle,
        p: PointerInput,
        surface: &Surface,
        window: &WindowState,
    ) -> GestureResponse {
        if p.is_secondary_mouse_button() {
            return GestureResponse::ignored();
        }
        let max_index = window.series_len().saturating_sub(1);
        let width = if surface.track_width > 0.0 { surface.track_width } else { 1.0 };
        let offset_x = match handle {
            Handle::Selection if max_index > 0 => {
                let start_x = window.start_index() as f64 / max_index as f64 * width;
                (p.x - start_x).clamp(0.0, width)
            }
            _ => 0.0,
        };
        self.handle_drag = Some(HandleDrag { handle, pointer_id: p.id, offset_x });
        self.is_interacting = true;
        GestureResponse { capture_pointer: Some(p.id), prevent_default: true, hide_tooltip: true, ..Default::default() }
    }

    pub fn on_handle_move(&mut self, x: f64, surface: &Surface, window: &mut WindowState) -> GestureResponse {
        let Some(drag) = self.handle_drag else {
            return GestureResponse::ignored();
        };
        if window.series_len() <= 1 {
            return GestureResponse { prevent_default: true, ..Default::default() };
        }
        let max_index = window.series_len() - 1;
        let changed = match drag.handle {
            Handle::Start => window.drag_start_handle(timeline_index_from_x(x, surface.track_width, max_index)),
            Handle::End => window.drag_end_handle(timeline_index_from_x(x, surface.track_width, max_index)),
            Handle::Selection => {
                window.drag_selection(timeline_index_from_x(x - drag.offset_x, surface.track_width, max_index))
            }
        };
        GestureResponse { window_changed: changed, prevent_default: true, ..Default::default() }
    }

    pub fn on_handle_up(&mut self, window: &mut WindowState) -> GestureResponse {
        let Some(drag) = self.handle_drag.take() else {
            return GestureResponse::ignored();
        };
        if self.pointers.is_empty() {
            self.is_interacting = false;
        }
        GestureResponse { window_changed: window.settle(), release_pointer: Some(drag.pointer_id), ..Default::default() }
    }
}
