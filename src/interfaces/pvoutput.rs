use std::sync::Arc;

use thiserror::Error;

use crate::constants::defaults;
use crate::report_mgmt::record::OutputRecord;

pub const API_KEY_HEADER: &str = "X-Pvoutput-Apikey";
pub const SYSTEM_ID_HEADER: &str = "X-Pvoutput-SystemId";

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("pvoutput rejected submission with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("pvoutput request failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("TLS initialization failed: {0}")]
    Tls(#[from] native_tls::Error),
}

pub struct PvOutputClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    system_id: String,
    dry_run: bool,
}

impl PvOutputClient {
    pub fn new(
        base_url: String,
        api_key: String,
        system_id: String,
        dry_run: bool,
    ) -> Result<Self, SubmissionError> {
        let agent = ureq::AgentBuilder::new()
            .tls_connector(Arc::new(native_tls::TlsConnector::new()?))
            .timeout(defaults::API_REQUEST_TIMEOUT)
            .build();
        Ok(PvOutputClient {
            agent,
            base_url,
            api_key,
            system_id,
            dry_run,
        })
    }

    /// Posts the record as an urlencoded form. In dry-run mode the call is
    /// journaled instead of sent and counts as success.
    pub fn submit(&self, path: &str, record: &OutputRecord) -> Result<(), SubmissionError> {
        if self.dry_run {
            let rendered =
                serde_json::to_string(record).unwrap_or_else(|_| format!("{record:?}"));
            log::info!("Would send {rendered}");
            return Ok(());
        }

        let form_fields = record.to_form_fields();
        let form: Vec<(&str, &str)> = form_fields
            .iter()
            .map(|(code, value)| (*code, value.as_str()))
            .collect();

        let result = self
            .agent
            .post(&format!("{}{path}", self.base_url))
            .set(API_KEY_HEADER, &self.api_key)
            .set(SYSTEM_ID_HEADER, &self.system_id)
            .send_form(&form);

        match result {
            Ok(response) => {
                if let Ok(body) = response.into_string() {
                    log::debug!("{body}");
                }
                if let Some(date) = record.get("d") {
                    log::info!("Successfully submitted data for {date}");
                }
                Ok(())
            }
            Err(ureq::Error::Status(status, response)) => Err(SubmissionError::Rejected {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(err) => Err(SubmissionError::Transport(err)),
        }
    }
}
