mod argsets;
mod command;
mod constants;
mod interfaces;
mod report_mgmt;

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use dotenv::dotenv;
use env_logger::Env;

use crate::constants::defaults;
use crate::report_mgmt::ReportMode;

const LOG_LEVEL_ENV_VAR: &str = "LOGGING_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "INFO";
const DEBUG_LOG_LEVEL: &str = "DEBUG";

fn main() -> Result<()> {
    let _ = dotenv();

    let mut args = pico_args::Arguments::from_env();
    let debug = args.contains("--debug");
    env_logger::Builder::from_env(Env::default().filter_or(
        LOG_LEVEL_ENV_VAR,
        if debug { DEBUG_LOG_LEVEL } else { DEFAULT_LOG_LEVEL },
    ))
    .init();

    let argset = parse_report_args(&mut args)?;
    command::report(argset)
}

fn parse_report_args(args: &mut pico_args::Arguments) -> Result<argsets::ReportArgs> {
    let dry_run = args.contains("--dry-run");
    let mode: ReportMode = args.value_from_str("--mode")?;
    let api_key: String = args.value_from_str("--api-key")?;
    let system_id: String = args.value_from_str("--system-id")?;
    let prometheus_url: String = args.value_from_str("--prometheus-url")?;
    let pvoutput_url: String = args
        .opt_value_from_str("--pvoutput-url")?
        .unwrap_or_else(|| defaults::PVOUTPUT_URL.to_string());
    let ca_path: Option<std::path::PathBuf> = args.opt_value_from_str("--ca-path")?;
    let iso_timestamp: Option<String> = args.opt_value_from_str("--iso-timestamp")?;
    let timezone_str: String = args
        .opt_value_from_str("--timezone")?
        .unwrap_or_else(|| defaults::TIMEZONE.to_string());

    let timezone = timezone_str
        .parse::<Tz>()
        .map_err(|e| anyhow!("invalid timezone '{timezone_str}': {e}"))?;
    url::Url::parse(&prometheus_url)
        .with_context(|| format!("invalid prometheus URL '{prometheus_url}'"))?;
    url::Url::parse(&pvoutput_url)
        .with_context(|| format!("invalid pvoutput URL '{pvoutput_url}'"))?;

    Ok(argsets::ReportArgs {
        mode,
        api_key,
        system_id,
        prometheus_url,
        pvoutput_url,
        ca_path,
        iso_timestamp,
        timezone,
        dry_run,
    })
}
