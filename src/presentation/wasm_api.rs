//! JS-facing bridge. Thin: every method forwards to the application layer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use gloo::timers::callback::Timeout;
use gloo::utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{refresh_dashboard, DashboardController, LoadForecastsUseCase};
use crate::domain::config::DashboardConfig;
use crate::domain::errors::{AppError, DomainError, PresentationError};
use crate::domain::logging::LogComponent;
use crate::gesture::{GestureResponse, Handle, InputEvent, PointerInput, PointerKind, WheelDeltaMode};
use crate::infrastructure::{NwsHttpClient, RenderScheduler};
use crate::{log_error, log_info, log_warn};

impl From<AppError> for JsValue {
    fn from(error: AppError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value)
        .map_err(|e| AppError::from(PresentationError::Serialization(e.to_string())).into())
}

fn local_now() -> chrono::DateTime<chrono::FixedOffset> {
    chrono::Local::now().fixed_offset()
}

fn pointer(id: i32, pointer_type: &str, button: i16, x: f64, y: f64) -> PointerInput {
    PointerInput { id, kind: pointer_type.parse().unwrap_or(PointerKind::Mouse), button, x, y }
}

#[wasm_bindgen]
pub struct WeatherDashboardApi {
    controller: Rc<RefCell<DashboardController>>,
    use_case: Rc<LoadForecastsUseCase<NwsHttpClient>>,
    wheel_idle: Rc<RefCell<Option<Timeout>>>,
    auto_refresh: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl WeatherDashboardApi {
    /// `config_json` is an optional JSON object; missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Self {
        let config = match config_json.as_deref() {
            Some(json) if !json.trim().is_empty() => DashboardConfig::from_json(json),
            _ => DashboardConfig::default(),
        };
        let client = NwsHttpClient::from_config(&config);
        let use_case = LoadForecastsUseCase::new(client, config.clone());
        let controller = DashboardController::new(config, RenderScheduler::for_browser());

        Self {
            controller: Rc::new(RefCell::new(controller)),
            use_case: Rc::new(use_case),
            wheel_idle: Rc::new(RefCell::new(None)),
            auto_refresh: Rc::new(Cell::new(false)),
        }
    }

    /// `callback(viewModel)` runs at most once per animation frame.
    #[wasm_bindgen(js_name = setRedrawCallback)]
    pub fn set_redraw_callback(&self, callback: Function) {
        let weak = Rc::downgrade(&self.controller);
        self.controller.borrow().scheduler().set_redraw(move || {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let view_model = match controller.try_borrow() {
                Ok(controller) => controller.view_model(),
                Err(_) => return,
            };
            let result = to_js(&view_model).and_then(|value| callback.call1(&JsValue::NULL, &value));
            if let Err(e) = result {
                log_error!(
                    LogComponent::Presentation("WeatherDashboardApi"),
                    "{}",
                    PresentationError::Callback(format!("{:?}", e))
                );
            }
        });
    }

    /// Resolves with the number of locations loaded.
    #[wasm_bindgen(js_name = refresh)]
    pub fn refresh(&self) -> Promise {
        let controller = Rc::clone(&self.controller);
        let use_case = Rc::clone(&self.use_case);
        future_to_promise(async move {
            let count = refresh_dashboard(&controller, &*use_case, local_now()).await?;
            Ok(JsValue::from(count as u32))
        })
    }

    #[wasm_bindgen(js_name = startAutoRefresh)]
    pub fn start_auto_refresh(&self) {
        if self.auto_refresh.replace(true) {
            return;
        }
        let controller = Rc::clone(&self.controller);
        let use_case = Rc::clone(&self.use_case);
        let running = Rc::clone(&self.auto_refresh);
        let minutes = controller.borrow().config().refresh_interval_minutes.max(1);
        log_info!(
            LogComponent::Presentation("WeatherDashboardApi"),
            "⏰ Auto refresh every {} minutes",
            minutes
        );

        leptos::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(Duration::from_secs(u64::from(minutes) * 60)).await;
                if !running.get() {
                    break;
                }
                // Errors are logged inside; the previous data stays on screen.
                let _ = refresh_dashboard(&controller, &*use_case, local_now()).await;
            }
        });
    }

    #[wasm_bindgen(js_name = stopAutoRefresh)]
    pub fn stop_auto_refresh(&self) {
        self.auto_refresh.set(false);
    }

    #[wasm_bindgen(js_name = locations)]
    pub fn locations(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.borrow().locations())
    }

    #[wasm_bindgen(js_name = selectedLocationName)]
    pub fn selected_location_name(&self) -> Option<String> {
        self.controller.borrow().selected_location_name()
    }

    /// Restore a stored choice; applied now or once data arrives.
    #[wasm_bindgen(js_name = preferLocation)]
    pub fn prefer_location(&self, name: String) {
        self.controller.borrow_mut().prefer_location(&name);
    }

    #[wasm_bindgen(js_name = selectLocation)]
    pub fn select_location(&self, index: usize) -> Result<(), JsValue> {
        self.controller.borrow_mut().select_location(index).map_err(|e| AppError::from(e).into())
    }

    #[wasm_bindgen(js_name = selectLocationByName)]
    pub fn select_location_by_name(&self, name: String) -> Result<(), JsValue> {
        self.controller
            .borrow_mut()
            .select_location_by_name(&name)
            .map_err(|e| AppError::from(e).into())
    }

    /// Returns the new visibility, or `undefined` for an unknown key.
    #[wasm_bindgen(js_name = toggleMetric)]
    pub fn toggle_metric(&self, key: String) -> Option<bool> {
        self.controller.borrow_mut().toggle_metric(&key)
    }

    #[wasm_bindgen(js_name = resize)]
    pub fn resize(&self, canvas_width: f64, track_width: f64) {
        self.controller.borrow_mut().resize(canvas_width, track_width);
    }

    #[wasm_bindgen(js_name = isInteracting)]
    pub fn is_interacting(&self) -> bool {
        self.controller.borrow().is_interacting()
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, id: i32, pointer_type: String, button: i16, x: f64, y: f64) -> Result<JsValue, JsValue> {
        self.dispatch(InputEvent::PointerDown(pointer(id, &pointer_type, button, x, y)))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, id: i32, pointer_type: String, x: f64, y: f64) -> Result<JsValue, JsValue> {
        self.dispatch(InputEvent::PointerMove(pointer(id, &pointer_type, 0, x, y)))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self, id: i32) -> Result<JsValue, JsValue> {
        self.dispatch(InputEvent::PointerUp(id))
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&self, id: i32) -> Result<JsValue, JsValue> {
        self.dispatch(InputEvent::PointerCancel(id))
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self, id: i32) -> Result<JsValue, JsValue> {
        self.dispatch(InputEvent::PointerLeave(id))
    }

    /// `delta_mode` is `WheelEvent.deltaMode`; the host must call
    /// `preventDefault` when the response says so.
    #[wasm_bindgen(js_name = wheel)]
    pub fn wheel(&self, delta_y: f64, delta_mode: u32, x: f64) -> Result<JsValue, JsValue> {
        let response = self.controller.borrow_mut().handle_input(InputEvent::Wheel {
            delta_y,
            mode: WheelDeltaMode::from_dom(delta_mode),
            x,
        });
        if response.arm_wheel_idle {
            self.arm_wheel_idle();
        }
        to_js(&response)
    }

    #[wasm_bindgen(js_name = handleDragStart)]
    pub fn handle_drag_start(
        &self,
        handle: String,
        id: i32,
        pointer_type: String,
        button: i16,
        x: f64,
    ) -> Result<JsValue, JsValue> {
        let handle: Handle = handle
            .parse()
            .map_err(|_| AppError::from(DomainError::InvalidWindow(format!("unknown handle {}", handle))))?;
        self.dispatch(InputEvent::HandleDown { handle, pointer: pointer(id, &pointer_type, button, x, 0.0) })
    }

    #[wasm_bindgen(js_name = handleDragMove)]
    pub fn handle_drag_move(&self, x: f64) -> Result<JsValue, JsValue> {
        self.dispatch(InputEvent::HandleMove { x })
    }

    #[wasm_bindgen(js_name = handleDragEnd)]
    pub fn handle_drag_end(&self) -> Result<JsValue, JsValue> {
        self.dispatch(InputEvent::HandleUp)
    }

    #[wasm_bindgen(js_name = viewModel)]
    pub fn view_model(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.borrow().view_model())
    }

    /// Tooltip for the chart `group_key` (a group's `key` in the view
    /// model). `null` while interacting, before data has loaded, or when
    /// the hour has no visible values.
    #[wasm_bindgen(js_name = tooltipAt)]
    pub fn tooltip_at(&self, group_key: String, x: f64) -> Result<JsValue, JsValue> {
        match self.controller.borrow().tooltip_at(&group_key, x) {
            Some(tooltip) => to_js(&tooltip),
            None => Ok(JsValue::NULL),
        }
    }
}

impl WeatherDashboardApi {
    fn dispatch(&self, event: InputEvent) -> Result<JsValue, JsValue> {
        let response: GestureResponse = self.controller.borrow_mut().handle_input(event);
        to_js(&response)
    }

    /// Restart the idle timer; replacing the handle cancels the old one.
    fn arm_wheel_idle(&self) {
        let controller = Rc::downgrade(&self.controller);
        let delay = self.controller.borrow().config().wheel_idle_ms;
        let timeout = Timeout::new(delay, move || {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            match controller.try_borrow_mut() {
                Ok(mut controller) => {
                    controller.finish_wheel();
                }
                Err(_) => {
                    log_warn!(LogComponent::Presentation("WeatherDashboardApi"), "Wheel idle fired while busy");
                }
            };
        });
        *self.wheel_idle.borrow_mut() = Some(timeout);
    }
}
