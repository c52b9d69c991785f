use nws_forecast_dashboard::domain::forecast::{normalize_uom, strip_namespace, UnitCode};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn celsius_becomes_fahrenheit() {
    let conv = normalize_uom(Some("wmoUnit:degC"));
    assert_eq!(conv.display_unit, "°F");
    assert!(close(conv.convert(0.0), 32.0));
    assert!(close(conv.convert(100.0), 212.0));
    assert!(close(conv.convert(-40.0), -40.0));
}

#[test]
fn speeds_become_mph() {
    let ms = normalize_uom(Some("wmoUnit:m_s-1"));
    assert_eq!(ms.display_unit, "mph");
    assert!(close(ms.convert(10.0), 22.3694));

    let kmh = normalize_uom(Some("wmoUnit:km_h-1"));
    assert_eq!(kmh.display_unit, "mph");
    assert!(close(kmh.convert(100.0), 62.1371));
}

#[test]
fn amounts_become_inches() {
    for (code, raw) in [("mm", 25.4), ("kg_m-2", 25.4), ("cm", 2.54)] {
        let conv = normalize_uom(Some(&format!("wmoUnit:{}", code)));
        assert_eq!(conv.display_unit, "in", "{}", code);
        assert!(close(conv.convert(raw), 1.0), "{}", code);
    }
}

#[test]
fn distance_and_pressure() {
    let miles = normalize_uom(Some("wmoUnit:m"));
    assert_eq!(miles.display_unit, "mi");
    assert!(close(miles.convert(1609.34), 1.0));

    let pressure = normalize_uom(Some("wmoUnit:Pa"));
    assert_eq!(pressure.display_unit, "hPa");
    assert!(close(pressure.convert(101_325.0), 1013.25));
}

#[test]
fn percent_is_identity() {
    let conv = normalize_uom(Some("wmoUnit:percent"));
    assert_eq!(conv.display_unit, "%");
    assert_eq!(conv.code(), Some(UnitCode::Percent));
    assert!(close(conv.convert(42.0), 42.0));
}

#[test]
fn missing_unit_is_identity_except_for_probabilities() {
    let plain = normalize_uom(None).for_metric("hainesIndex");
    assert_eq!(plain.display_unit, "");
    assert!(close(plain.convert(5.0), 5.0));

    let probability = normalize_uom(None).for_metric("probabilityOfThunder");
    assert_eq!(probability.display_unit, "%");
}

#[test]
fn namespace_prefixes_are_removed() {
    assert_eq!(strip_namespace("wmoUnit:degC"), "degC");
    assert_eq!(strip_namespace("unit:percent"), "percent");
    assert_eq!(strip_namespace("degC"), "degC");
}
