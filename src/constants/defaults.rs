use std::time::Duration;

pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub const PVOUTPUT_URL: &str = "https://pvoutput.org";
pub const TIMEZONE: &str = "Europe/Berlin";
