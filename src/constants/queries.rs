//! Prometheus expressions behind each submitted field.
//!
//! The tables are ordered; fields are queried and emitted exactly in the
//! order listed here. The `d`, `t`, `c1` and `n` fields carry no query and
//! are filled in during record assembly.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Converted by truncating toward zero.
    Integer,
    /// Submitted with native floating-point precision.
    Float,
}

#[derive(Debug)]
pub struct MetricField {
    pub code: &'static str,
    pub label: &'static str,
    pub expression: &'static str,
    pub kind: FieldKind,
}

pub const DAILY_FIELDS: &[MetricField] = &[
    MetricField {
        code: "g",
        label: "generated energy",
        expression: "sum(delta(rctmon_energy_solar_generator_sum[1d]))",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "e",
        label: "exported energy",
        expression: "abs(sum(delta(rctmon_energy_grid_feed_sum[1d])))",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "pp",
        label: "peak power",
        expression: "max_over_time(sum(rctmon_generator_power_watt)[1d])",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "c",
        label: "consumed energy",
        expression: "sum(delta(rctmon_energy_household_sum[1d]))",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "tm",
        label: "min outdoor temperature",
        expression: "min_over_time(homematic_actual_temperature{device_type=\"WEATHER_TRANSMIT\"}[1d])",
        kind: FieldKind::Float,
    },
    MetricField {
        code: "tx",
        label: "max outdoor temperature",
        expression: "max_over_time(homematic_actual_temperature{device_type=\"WEATHER_TRANSMIT\"}[1d])",
        kind: FieldKind::Float,
    },
];

pub const LIVE_FIELDS: &[MetricField] = &[
    MetricField {
        code: "v1",
        label: "cumulative generated energy",
        expression: "sum(rctmon_energy_solar_generator_sum)",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "v2",
        label: "generator power",
        expression: "sum(rctmon_generator_power_watt)",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "v3",
        label: "cumulative consumed energy",
        expression: "sum(rctmon_energy_household_sum)",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "v4",
        label: "household load",
        expression: "abs(sum(rctmon_household_load_watt))",
        kind: FieldKind::Integer,
    },
    MetricField {
        code: "v5",
        label: "outdoor temperature",
        expression: "homematic_actual_temperature{device_type=\"WEATHER_TRANSMIT\"}",
        kind: FieldKind::Float,
    },
    MetricField {
        code: "v6",
        label: "grid voltage",
        expression: "avg(rctmon_grid_voltage_volt)",
        kind: FieldKind::Float,
    },
];
