use anyhow::Result;
use chrono::Utc;

use crate::argsets::ReportArgs;
use crate::interfaces::prometheus::PrometheusClient;
use crate::interfaces::pvoutput::PvOutputClient;
use crate::report_mgmt::schedule::{self, ReportingWindow};
use crate::report_mgmt::{build, ReportMode};

pub fn report(args: ReportArgs) -> Result<()> {
    let window = resolve_window(&args)?;
    log::debug!(
        "Processing instant: {}; reporting date: {}",
        window.processing_instant.to_rfc3339(),
        window.reporting_date
    );

    let prometheus = PrometheusClient::new(&args.prometheus_url, args.ca_path.as_deref())?;
    let record = build::assemble(&prometheus, args.mode, &window)?;
    log::debug!("Assembled fields: {:?}", record.codes());

    let pvoutput = PvOutputClient::new(args.pvoutput_url, args.api_key, args.system_id, args.dry_run)?;
    pvoutput.submit(args.mode.endpoint_path(), &record)?;

    Ok(())
}

fn resolve_window(args: &ReportArgs) -> Result<ReportingWindow> {
    let window = match args.iso_timestamp.as_deref() {
        None => match args.mode {
            ReportMode::Daily => schedule::for_daily(Utc::now().with_timezone(&args.timezone))?,
            ReportMode::Live => schedule::for_live(Utc::now().with_timezone(&args.timezone)),
        },
        Some(input) => {
            let reporting_date = schedule::parse_reporting_date(input)?;
            match args.mode {
                ReportMode::Daily => schedule::override_for_daily(reporting_date, args.timezone)?,
                ReportMode::Live => schedule::override_for_live(reporting_date, args.timezone)?,
            }
        }
    };
    Ok(window)
}
