use std::fmt;
use std::str::FromStr;

use crate::constants::paths;

/// Which kind of record a run produces: an end-of-day aggregate or an
/// instantaneous snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportMode {
    Daily,
    Live,
}

impl ReportMode {
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            ReportMode::Daily => paths::PVOUTPUT_ADD_OUTPUT,
            ReportMode::Live => paths::PVOUTPUT_ADD_STATUS,
        }
    }
}

impl FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ReportMode::Daily),
            "live" => Ok(ReportMode::Live),
            other => Err(format!("mode must be 'daily' or 'live', got '{other}'")),
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMode::Daily => f.write_str("daily"),
            ReportMode::Live => f.write_str("live"),
        }
    }
}
