use std::path::PathBuf;

use chrono_tz::Tz;

use crate::report_mgmt::ReportMode;

#[derive(Debug)]
pub struct ReportArgs {
    pub mode: ReportMode,
    pub api_key: String,
    pub system_id: String,
    pub prometheus_url: String,
    pub pvoutput_url: String,
    pub ca_path: Option<PathBuf>,
    pub iso_timestamp: Option<String>,
    pub timezone: Tz,
    pub dry_run: bool,
}
