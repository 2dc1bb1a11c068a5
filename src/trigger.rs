// src/trigger.rs
//! One crawl request, one stored batch.
//!
//! `trigger_crawl` issues exactly one request. A `success`/`warning` answer
//! overwrites the stored batch; any other status leaves the store alone and
//! hands back the per-record details for inline display. No retry.

use thiserror::Error;

use crate::core::sanitize::normalize_ws;
use crate::model::{display_value, CrawlBatch, CrawlRecord, CrawlResponse};
use crate::progress::{FinishGuard, Progress};
use crate::ranking::NOT_AVAILABLE;
use crate::store::{save_batch, Store, StoreError};

pub const REQUEST_SENT: &str =
    "크롤링 요청을 보냈습니다. 서버에서 데이터를 가져오는 중... (시간이 오래 걸릴 수 있습니다.)";

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unreadable response (HTTP {status}): {reason}")]
    Decode { status: u16, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Whatever carries the request to the crawl service.
pub trait Transport {
    fn endpoint(&self) -> &str;
    fn post_crawl(&self) -> Result<CrawlResponse, TriggerError>;
}

/// Inline error block entry for a rejected crawl.
#[derive(Clone, Debug, PartialEq)]
pub struct FailureDetail {
    pub owner: String,
    pub wins: String,
    pub draws: String,
    pub losses: String,
    pub error: Option<String>,
}

impl From<&CrawlRecord> for FailureDetail {
    fn from(rec: &CrawlRecord) -> Self {
        Self {
            owner: s!(rec.owner().unwrap_or(NOT_AVAILABLE)),
            wins: display_value(rec.wins.as_ref()),
            draws: display_value(rec.draws.as_ref()),
            losses: display_value(rec.losses.as_ref()),
            error: rec.error_message().map(normalize_ws),
        }
    }
}

impl FailureDetail {
    pub fn lines(&self) -> Vec<String> {
        let mut out = vec![
            format!("구단주명: {}", self.owner),
            format!("승: {}", self.wins),
            format!("무: {}", self.draws),
            format!("패: {}", self.losses),
        ];
        if let Some(e) = &self.error {
            out.push(format!("오류: {e}"));
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TriggerOutcome {
    /// Batch persisted; the results view can be produced.
    Stored {
        message: String,
        total: usize,
        succeeded: usize,
        failed: usize,
        last_updated: Option<String>,
    },
    /// Service reported a failure; nothing persisted.
    Rejected {
        message: String,
        details: Vec<FailureDetail>,
    },
}

pub fn trigger_crawl(
    transport: &dyn Transport,
    store: &mut dyn Store,
    progress: &mut dyn Progress,
) -> Result<TriggerOutcome, TriggerError> {
    let mut progress = FinishGuard::new(progress);
    progress.get().begin(1);
    progress.get().log(REQUEST_SENT);
    logf!("POST {}", transport.endpoint());

    let response = match transport.post_crawl() {
        Ok(r) => r,
        Err(e) => {
            loge!("crawl request failed: {e}");
            progress.get().log(&format!("네트워크 오류 또는 서버 응답 실패: {e}"));
            return Err(e);
        }
    };

    if !response.status.is_accepted() {
        loge!("crawl rejected: {}", response.message);
        progress.get().log(&format!("오류: {}", response.message));
        let details = response
            .results
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(FailureDetail::from)
            .collect();
        return Ok(TriggerOutcome::Rejected { message: response.message, details });
    }

    let batch = CrawlBatch {
        results: response.results.unwrap_or_default(),
        last_updated: response.last_updated,
    };
    save_batch(store, &batch)?;
    logf!("crawl stored: {} record(s), {} failed", batch.results.len(), batch.failed());
    progress.get().log(&format!("{} 결과 페이지를 생성합니다.", response.message));

    Ok(TriggerOutcome::Stored {
        message: response.message,
        total: batch.results.len(),
        succeeded: batch.succeeded(),
        failed: batch.failed(),
        last_updated: batch.last_updated,
    })
}
