use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{defaults, paths};
use crate::report_mgmt::build::MetricsSource;

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("no data received from prometheus for query: {0}")]
    NoData(String),
    #[error("prometheus request failed: {0}")]
    Request(#[from] ureq::Error),
    #[error("unreadable prometheus response: {0}")]
    Response(#[from] std::io::Error),
    #[error("unexpected prometheus response: {0}")]
    Payload(String),
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    status: String,
    data: QueryData,
}

#[derive(Debug, Deserialize)]
struct QueryData {
    result: Vec<ResultEntry>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    value: (f64, String),
}

pub struct PrometheusClient {
    agent: ureq::Agent,
    query_url: String,
}

impl PrometheusClient {
    pub fn new(base_url: &str, ca_path: Option<&Path>) -> Result<Self> {
        let tls = match ca_path {
            Some(path) => {
                let pem = fs::read(path)
                    .with_context(|| format!("cannot read CA certificate {}", path.display()))?;
                let cert = native_tls::Certificate::from_pem(&pem)
                    .with_context(|| format!("cannot parse CA certificate {}", path.display()))?;
                native_tls::TlsConnector::builder()
                    .add_root_certificate(cert)
                    .build()?
            }
            None => native_tls::TlsConnector::new()?,
        };
        let agent = ureq::AgentBuilder::new()
            .tls_connector(Arc::new(tls))
            .timeout(defaults::API_REQUEST_TIMEOUT)
            .build();
        Ok(PrometheusClient {
            agent,
            query_url: format!("{base_url}{}", paths::PROMETHEUS_QUERY),
        })
    }
}

impl MetricsSource for PrometheusClient {
    fn query_at(&self, expression: &str, at: DateTime<Tz>) -> Result<f64, MetricsError> {
        log::debug!("Prom-Query: {expression}");
        let response = self
            .agent
            .get(&self.query_url)
            .query("query", expression)
            .query("time", &at.timestamp().to_string())
            .call()?;

        let body: QueryResponse = response.into_json()?;
        if body.status != "success" {
            return Err(MetricsError::Payload(format!(
                "query status '{}'",
                body.status
            )));
        }

        let entry = body
            .data
            .result
            .first()
            .ok_or_else(|| MetricsError::NoData(expression.to_string()))?;
        let value = entry.value.1.parse::<f64>().map_err(|e| {
            MetricsError::Payload(format!("non-numeric sample '{}': {e}", entry.value.1))
        })?;
        log::debug!("Retrieved {value}");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;
    use mockito::Matcher;

    const SAMPLE_INSTANT: i64 = 1710460800;

    fn sample_instant() -> DateTime<Tz> {
        chrono::Utc
            .timestamp_opt(SAMPLE_INSTANT, 0)
            .unwrap()
            .with_timezone(&Berlin)
    }

    fn vector_body(value: &str) -> String {
        format!(
            r#"{{"status":"success","data":{{"resultType":"vector","result":[{{"metric":{{}},"value":[{SAMPLE_INSTANT}, "{value}"]}}]}}}}"#
        )
    }

    #[test]
    fn queries_at_given_instant() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("GET", "/api/v1/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "up".into()),
                Matcher::UrlEncoded("time".into(), SAMPLE_INSTANT.to_string()),
            ]))
            .with_body(vector_body("42.5"))
            .expect(1)
            .create();

        let client = PrometheusClient::new(&server.url(), None).unwrap();
        let value = client.query_at("up", sample_instant()).unwrap();

        assert_eq!(value, 42.5);
        m.assert();
    }

    #[test]
    fn empty_result_set_is_no_data() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/v1/query")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"success","data":{"resultType":"vector","result":[]}}"#)
            .create();

        let client = PrometheusClient::new(&server.url(), None).unwrap();
        let err = client.query_at("sum(up)", sample_instant()).unwrap_err();

        assert!(matches!(err, MetricsError::NoData(_)));
    }

    #[test]
    fn server_error_is_request_failure() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/v1/query")
            .match_query(Matcher::Any)
            .with_status(500)
            .create();

        let client = PrometheusClient::new(&server.url(), None).unwrap();
        let err = client.query_at("sum(up)", sample_instant()).unwrap_err();

        assert!(matches!(err, MetricsError::Request(_)));
    }

    #[test]
    fn non_numeric_sample_is_payload_error() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/api/v1/query")
            .match_query(Matcher::Any)
            .with_body(vector_body("not-a-number"))
            .create();

        let client = PrometheusClient::new(&server.url(), None).unwrap();
        let err = client.query_at("sum(up)", sample_instant()).unwrap_err();

        assert!(matches!(err, MetricsError::Payload(_)));
    }

    #[test]
    fn garbage_ca_file_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let ca_path = dir.path().join("ca.pem");
        fs::write(&ca_path, "not a certificate").unwrap();

        assert!(PrometheusClient::new("http://localhost:9090", Some(&ca_path)).is_err());
    }

    #[test]
    fn missing_ca_file_fails_construction() {
        assert!(
            PrometheusClient::new("http://localhost:9090", Some(Path::new("/nonexistent.pem")))
                .is_err()
        );
    }
}
