//! Metric factories.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::common::Api;
use crate::construct::Stack;
use crate::errors::{Error, Result};

const NAMESPACE: &str = "AWS/ApiGateway";
const DEFAULT_PERIOD: Duration = Duration::from_secs(300);

/// An opaque metric handle over all stages of one api.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub namespace: String,
    pub metric_name: String,
    pub statistic: String,
    pub period: Duration,
    /// Dimension values may embed deferred-token placeholders
    pub dimensions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct MetricOptions {
    /// Overrides the metric's default statistic
    pub statistic: Option<String>,
    /// Defaults to five minutes
    pub period: Option<Duration>,
}

/// Build a metric scoped to every stage of the api. An api without stages
/// has no "all stages" semantics, so the factory refuses it.
pub(crate) fn api_metric(
    stack: &Stack,
    api: &dyn Api,
    metric_name: &str,
    default_statistic: &str,
    options: MetricOptions,
) -> Result<Metric> {
    let state = &stack.apis[api.state_index()];
    if state.stage_names.is_empty() {
        return Err(Error::invariant_at(
            api.construct_path(),
            "api has no stages; metrics over all stages are undefined",
        ));
    }
    let mut dimensions = BTreeMap::new();
    dimensions.insert("ApiId".to_string(), api.api_id().to_string());
    Ok(Metric {
        namespace: NAMESPACE.to_string(),
        metric_name: metric_name.to_string(),
        statistic: options.statistic.unwrap_or_else(|| default_statistic.to_string()),
        period: options.period.unwrap_or(DEFAULT_PERIOD),
        dimensions,
    })
}
