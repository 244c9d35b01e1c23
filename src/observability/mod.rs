//! # Observability
//!
//! Typed metric factories over the api-gateway CloudWatch namespace. The
//! layer never talks to the monitoring service; a [`Metric`] is an opaque
//! value the surrounding tooling turns into alarms or dashboards.

mod metrics;

pub use metrics::{Metric, MetricOptions};
pub(crate) use metrics::api_metric;
