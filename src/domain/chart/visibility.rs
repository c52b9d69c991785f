use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::config::DashboardConfig;
use crate::domain::forecast::{MetricDescriptor, MetricKey};

/// Per-metric on/off flags for the current location.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricVisibility {
    flags: BTreeMap<MetricKey, bool>,
}

impl MetricVisibility {
    /// Flags for `metrics`, keeping any choice already made in `previous`
    /// for keys that still exist.
    pub fn rebuild(metrics: &[MetricDescriptor], previous: &MetricVisibility, config: &DashboardConfig) -> Self {
        let flags = metrics
            .iter()
            .map(|metric| {
                let visible = previous
                    .flags
                    .get(&metric.key)
                    .copied()
                    .unwrap_or_else(|| !config.is_hidden_by_default(metric.key.as_str()));
                (metric.key.clone(), visible)
            })
            .collect();
        Self { flags }
    }

    /// Unknown keys count as visible.
    pub fn is_visible(&self, key: &MetricKey) -> bool {
        self.flags.get(key).copied().unwrap_or(true)
    }

    /// Flip one flag; returns the new state, `None` for an unknown key.
    pub fn toggle(&mut self, key: &MetricKey) -> Option<bool> {
        let flag = self.flags.get_mut(key)?;
        *flag = !*flag;
        Some(*flag)
    }

    pub fn set(&mut self, key: &MetricKey, visible: bool) -> bool {
        match self.flags.get_mut(key) {
            Some(flag) => {
                *flag = visible;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
