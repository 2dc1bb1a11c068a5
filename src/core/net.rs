// src/core/net.rs
// Blocking JSON POST to the crawl endpoint.
// HTTP error statuses are read like any other: the crawl service answers a
// failed crawl with 500 and a JSON body that still has to be shown.

use std::time::Duration;

use ureq::Agent;

use crate::config::consts::USER_AGENT;
use crate::model::CrawlResponse;
use crate::trigger::{Transport, TriggerError};

pub struct HttpTransport {
    agent: Agent,
    endpoint: String,
}

impl HttpTransport {
    /// `timeout` of `None` leaves the request unbounded; a crawl can run for minutes.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Self {
        let agent = Agent::new_with_config(
            ureq::config::Config::builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build(),
        );
        Self { agent, endpoint: s!(endpoint) }
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post_crawl(&self) -> Result<CrawlResponse, TriggerError> {
        let mut resp = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("User-Agent", USER_AGENT)
            .send_empty()
            .map_err(|e| TriggerError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        logd!("crawl endpoint answered HTTP {status}");
        resp.body_mut()
            .read_json::<CrawlResponse>()
            .map_err(|e| TriggerError::Decode { status, reason: e.to_string() })
    }
}
