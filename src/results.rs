// src/results.rs
//! What the results page shows, decided from the store contents.

use crate::model::League;
use crate::ranking::{rank_batch, LeagueTable};
use crate::store::{load_batch, Loaded, Store, StoreError};

pub const NO_DATA_ROW: &str = "표시할 데이터가 없습니다. 메인 페이지에서 크롤링을 시작해주세요.";
pub const NO_DATA_INFO: &str =
    "저장된 크롤링 데이터가 없습니다. 먼저 `fc_ranking crawl`로 크롤링을 시작해주세요.";

#[derive(Clone, Debug, PartialEq)]
pub enum ResultsView {
    Ready {
        leagues: [LeagueTable; 2],
        last_updated_line: String,
    },
    /// No usable batch: missing, or present but unreadable.
    Missing,
}

impl ResultsView {
    /// Missing or malformed data is a `Missing` view, never an error.
    /// Only a store that cannot be read at all fails.
    pub fn load(store: &dyn Store) -> Result<Self, StoreError> {
        Ok(match load_batch(store)? {
            Loaded::Batch(batch) => Self::ready(&batch.results, batch.last_updated.as_deref()),
            Loaded::Missing => Self::Missing,
            Loaded::Malformed(reason) => {
                loge!("stored results unreadable, showing empty view: {reason}");
                Self::Missing
            }
        })
    }

    pub fn ready(results: &[crate::model::CrawlRecord], last_updated: Option<&str>) -> Self {
        Self::Ready {
            leagues: rank_batch(results),
            last_updated_line: format!("데이터 마지막 최신화: {}", last_updated.unwrap_or("정보 없음")),
        }
    }

    /// Tables to draw, one per league, in display order.
    pub fn tables(&self) -> [LeagueTable; 2] {
        match self {
            Self::Ready { leagues, .. } => leagues.clone(),
            Self::Missing => League::ALL.map(|l| LeagueTable::placeholder(l.label(), NO_DATA_ROW, s!())),
        }
    }

    pub fn info_line(&self) -> &str {
        match self {
            Self::Ready { last_updated_line, .. } => last_updated_line,
            Self::Missing => NO_DATA_INFO,
        }
    }

    pub fn summaries(&self) -> Vec<String> {
        self.tables().iter().map(|t| t.summary.clone()).filter(|s| !s.is_empty()).collect()
    }
}
