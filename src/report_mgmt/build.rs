use chrono::DateTime;
use chrono_tz::Tz;

use crate::constants::queries::{self, FieldKind, MetricField};
use crate::interfaces::prometheus::MetricsError;

use super::record::{FieldValue, OutputRecord};
use super::schedule::ReportingWindow;
use super::ReportMode;

const DATE_FORMAT: &str = "%Y%m%d";
const TIME_FORMAT: &str = "%H:%M";

/// Seam to the metrics store: evaluates one expression at one instant and
/// returns the value of the first result series.
pub trait MetricsSource {
    fn query_at(&self, expression: &str, at: DateTime<Tz>) -> Result<f64, MetricsError>;
}

/// Runs the mode's query set at the window's processing instant and collects
/// the results into a submission record. Any failed query aborts the whole
/// record; partial records are never returned.
pub fn assemble(
    metrics: &impl MetricsSource,
    mode: ReportMode,
    window: &ReportingWindow,
) -> Result<OutputRecord, MetricsError> {
    match mode {
        ReportMode::Daily => daily_record(metrics, window),
        ReportMode::Live => live_record(metrics, window),
    }
}

fn daily_record(
    metrics: &impl MetricsSource,
    window: &ReportingWindow,
) -> Result<OutputRecord, MetricsError> {
    let mut record = OutputRecord::new();
    record.push(
        "d",
        FieldValue::Text(window.reporting_date.format(DATE_FORMAT).to_string()),
    );
    append_metric_fields(&mut record, metrics, queries::DAILY_FIELDS, window)?;
    Ok(record)
}

fn live_record(
    metrics: &impl MetricsSource,
    window: &ReportingWindow,
) -> Result<OutputRecord, MetricsError> {
    let mut record = OutputRecord::new();
    record.push(
        "d",
        FieldValue::Text(window.reporting_date.format(DATE_FORMAT).to_string()),
    );
    record.push(
        "t",
        FieldValue::Text(window.processing_instant.format(TIME_FORMAT).to_string()),
    );
    append_metric_fields(&mut record, metrics, queries::LIVE_FIELDS, window)?;
    // Cumulative and net flags the status endpoint expects.
    record.push("c1", FieldValue::Int(1));
    record.push("n", FieldValue::Int(0));
    Ok(record)
}

fn append_metric_fields(
    record: &mut OutputRecord,
    metrics: &impl MetricsSource,
    fields: &[MetricField],
    window: &ReportingWindow,
) -> Result<(), MetricsError> {
    for field in fields {
        let value = metrics.query_at(field.expression, window.processing_instant)?;
        log::debug!("Field '{}' ({}): {}", field.code, field.label, value);
        let field_value = match field.kind {
            FieldKind::Integer => FieldValue::truncated(value),
            FieldKind::Float => FieldValue::Float(value),
        };
        record.push(field.code, field_value);
    }
    Ok(())
}
