use nws_forecast_dashboard::domain::chart::{
    group_metrics, group_of, Color, ExtentTable, GroupKind, MetricVisibility,
};
use nws_forecast_dashboard::domain::config::DashboardConfig;
use nws_forecast_dashboard::domain::forecast::{MetricDescriptor, MetricKey};

fn metric(key: &str, label: &str, unit: &str) -> MetricDescriptor {
    MetricDescriptor {
        key: MetricKey::from(key),
        label: label.to_string(),
        unit: unit.to_string(),
        color: Color::from_hex(0x000000),
    }
}

fn dashboard_metrics() -> Vec<MetricDescriptor> {
    vec![
        metric("dewpoint", "Dewpoint", "°F"),
        metric("hainesIndex", "Haines Index", ""),
        metric("temperature", "Temperature", "°F"),
        metric("pressure", "Pressure", "hPa"),
        metric("windGust", "Wind Gust", "mph"),
        metric("relativeHumidity", "Relative Humidity", "%"),
        metric("probabilityOfPrecipitation", "Probability of Precipitation", "%"),
        metric("quantitativePrecipitation", "Precipitation Amount", "in"),
        metric("apparentTemperature", "Feels Like", "°F"),
        metric("skyCover", "Sky Cover", "%"),
        metric("windSpeed", "Wind Speed", "mph"),
        metric("probabilityOfThunder", "Probability Of Thunder", "%"),
    ]
}

fn summarize(metrics: &[MetricDescriptor]) -> Vec<String> {
    group_metrics(metrics, &ExtentTable::default())
        .iter()
        .map(|group| {
            let keys: Vec<&str> = group.metrics.iter().map(|m| m.key.as_str()).collect();
            format!("{}: {}", group.title(), keys.join(", "))
        })
        .collect()
}

#[test]
fn charts_stack_in_display_order() {
    insta::assert_json_snapshot!(summarize(&dashboard_metrics()), @r###"
    [
      "Temperature (°F): apparentTemperature, temperature, dewpoint",
      "Precipitation (%): probabilityOfPrecipitation, probabilityOfThunder",
      "Precipitation (in): quantitativePrecipitation",
      "Wind (mph): windGust, windSpeed",
      "Cloud Cover (%): skyCover",
      "Humidity (%): relativeHumidity",
      "Pressure (hPa): pressure",
      "Other: hainesIndex"
    ]
    "###);
}

#[test]
fn grouping_is_stable_under_input_order() {
    let metrics = dashboard_metrics();
    let mut reversed = metrics.clone();
    reversed.reverse();

    let titles = |m: &[MetricDescriptor]| -> Vec<String> {
        group_metrics(m, &ExtentTable::default()).iter().map(|g| g.title()).collect()
    };
    assert_eq!(titles(&metrics), titles(&reversed));
    assert_eq!(summarize(&metrics), summarize(&metrics));
}

#[test]
fn probabilities_are_not_amounts() {
    assert_eq!(group_of("probabilityOfPrecipitation", "%").kind, GroupKind::PrecipitationChance);
    assert_eq!(group_of("snowfallAmount", "in").kind, GroupKind::Precipitation);
    assert_eq!(group_of("windChill", "°F").kind, GroupKind::Temperature);
    assert_eq!(group_of("transportWindSpeed", "mph").kind, GroupKind::Wind);
}

#[test]
fn other_groups_split_by_unit() {
    let metrics = vec![metric("hainesIndex", "Haines Index", ""), metric("grasslandFireDangerIndex", "Grassland", "idx")];
    let groups = group_metrics(&metrics, &ExtentTable::default());
    let titles: Vec<String> = groups.iter().map(|g| g.title()).collect();
    assert_eq!(titles, vec!["Other", "Other (idx)"]);
    assert!(groups.iter().all(|g| g.kind == GroupKind::Other));
}

#[test]
fn hidden_by_default_metrics_start_off() {
    let config = DashboardConfig::default();
    let visibility = MetricVisibility::rebuild(&dashboard_metrics(), &MetricVisibility::default(), &config);
    assert!(!visibility.is_visible(&MetricKey::from("dewpoint")));
    assert!(visibility.is_visible(&MetricKey::from("temperature")));
    assert!(visibility.is_visible(&MetricKey::from("notAMetric")));
}

#[test]
fn visibility_choices_survive_rebuild() {
    let config = DashboardConfig::default();
    let metrics = dashboard_metrics();
    let mut visibility = MetricVisibility::rebuild(&metrics, &MetricVisibility::default(), &config);
    assert_eq!(visibility.toggle(&MetricKey::from("dewpoint")), Some(true));
    assert_eq!(visibility.toggle(&MetricKey::from("temperature")), Some(false));
    assert_eq!(visibility.toggle(&MetricKey::from("missing")), None);

    let rebuilt = MetricVisibility::rebuild(&metrics[..4], &visibility, &config);
    assert_eq!(rebuilt.len(), 4);
    assert!(rebuilt.is_visible(&MetricKey::from("dewpoint")));
    assert!(!rebuilt.is_visible(&MetricKey::from("temperature")));
}
