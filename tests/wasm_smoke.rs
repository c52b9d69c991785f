#![cfg(target_arch = "wasm32")]

use nws_forecast_dashboard::WeatherDashboardApi;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn api_constructs_with_default_locations() {
    let api = WeatherDashboardApi::new(None);
    let locations = js_sys::Array::from(&api.locations().unwrap());
    assert_eq!(locations.length(), 5);
    assert_eq!(api.selected_location_name(), None);
}

#[wasm_bindgen_test]
fn partial_config_is_accepted() {
    let api = WeatherDashboardApi::new(Some(r#"{"locations":[{"name":"Boulder, CO","lat":40.015,"lon":-105.2705}]}"#.into()));
    let locations = js_sys::Array::from(&api.locations().unwrap());
    assert_eq!(locations.length(), 1);
}

#[wasm_bindgen_test]
fn empty_dashboard_answers_queries() {
    let api = WeatherDashboardApi::new(None);
    assert!(api.view_model().unwrap().is_object());
    assert_eq!(api.tooltip_at("temperature|°F".into(), 100.0).unwrap(), JsValue::NULL);
    assert!(api.select_location(3).is_err());
    assert!(api.handle_drag_start("middle".into(), 1, "mouse".into(), 0, 10.0).is_err());

    let response = api.pointer_down(1, "touch".into(), 0, 10.0, 10.0).unwrap();
    let ignored = js_sys::Reflect::get(&response, &"ignored".into()).unwrap();
    assert_eq!(ignored.as_bool(), Some(true));
}
