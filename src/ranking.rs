// src/ranking.rs
//! Ranking-table construction.
//!
//! Takes one league's records and turns them into display rows: sorted by
//! efficiency score (descending, non-numeric last, stable), ranked by
//! position, remark styled through [`REMARK_RULES`], plus a summary line.
//! Pure; the HTML/CSV adapters consume [`LeagueTable`].

use std::cmp::Ordering;

use crate::model::{display_value, CrawlRecord, League};

pub const RANK_UP_MARKER: char = '↑';
pub const RANK_DOWN_MARKER: char = '↓';
pub const NO_CHANGE_MARKER: &str = "-";
pub const NEW_MARKER: &str = "New";
pub const ERROR_MARKERS: [&str; 2] = ["오류", "error"];

pub const STATUS_OK: &str = "성공";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_RESULTS: &str = "표시할 결과가 없습니다.";

/// Column headers, in display order.
pub const COLUMNS: [&str; 11] = [
    "순위", "비고", "구단주명", "판수", "승", "무", "패", "채굴 효율", "승률", "URL", "상태",
];

/* ---------------- Style tags ---------------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleTag {
    RankUp,
    RankDown,
    Neutral,
    Error,
    None,
}

impl StyleTag {
    /// CSS class on the results page.
    pub fn class(self) -> &'static str {
        match self {
            StyleTag::RankUp => "rank-up",
            StyleTag::RankDown => "rank-down",
            StyleTag::Neutral => "rank-no-change",
            StyleTag::Error => FAILED_ROW_CLASS,
            StyleTag::None => "",
        }
    }
}

pub const FAILED_ROW_CLASS: &str = "error-row";

pub struct RemarkRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub tag: StyleTag,
}

fn starts_rank_up(r: &str) -> bool { r.starts_with(RANK_UP_MARKER) }
fn starts_rank_down(r: &str) -> bool { r.starts_with(RANK_DOWN_MARKER) }
fn is_no_change(r: &str) -> bool { r == NO_CHANGE_MARKER }
fn is_new(r: &str) -> bool { r.eq_ignore_ascii_case(NEW_MARKER) }
fn is_error(r: &str) -> bool { ERROR_MARKERS.iter().any(|m| r.eq_ignore_ascii_case(m)) }

/// Remark → style, first match wins. Input is the display text, so an
/// absent remark arrives here as the no-change marker.
pub const REMARK_RULES: &[RemarkRule] = &[
    RemarkRule { name: "rank up",   matches: starts_rank_up,   tag: StyleTag::RankUp },
    RemarkRule { name: "rank down", matches: starts_rank_down, tag: StyleTag::RankDown },
    RemarkRule { name: "no change", matches: is_no_change,     tag: StyleTag::Neutral },
    RemarkRule { name: "new",       matches: is_new,           tag: StyleTag::RankUp },
    RemarkRule { name: "error",     matches: is_error,         tag: StyleTag::Error },
];

pub fn classify_remark(remark_text: &str) -> StyleTag {
    REMARK_RULES
        .iter()
        .find(|rule| (rule.matches)(remark_text))
        .map_or(StyleTag::None, |rule| rule.tag)
}

/* ---------------- Rows ---------------- */

/// One ranked, display-ready row. Cells are already stringified.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedRow {
    pub rank: usize,
    pub remark: String,
    pub remark_tag: StyleTag,
    pub failed: bool,
    pub owner: String,
    pub games: String,
    pub wins: String,
    pub draws: String,
    pub losses: String,
    pub efficiency: String,
    pub win_rate: String,
    pub url: Option<String>,
    pub status: String,
}

impl RankedRow {
    fn build(rank: usize, rec: &CrawlRecord) -> Self {
        let remark = rec.remark_text();
        Self {
            rank,
            remark: s!(remark),
            remark_tag: classify_remark(remark),
            failed: rec.is_failed(),
            owner: s!(rec.owner().unwrap_or(NOT_AVAILABLE)),
            games: display_value(rec.games_played.as_ref()),
            wins: display_value(rec.wins.as_ref()),
            draws: display_value(rec.draws.as_ref()),
            losses: display_value(rec.losses.as_ref()),
            efficiency: display_value(rec.efficiency_score.as_ref()),
            win_rate: display_value(rec.win_rate.as_ref()),
            url: rec.url().map(String::from),
            status: s!(rec.error_message().unwrap_or(STATUS_OK)),
        }
    }

    /// Class of the `<tr>`: failed rows are flagged whatever their remark says.
    pub fn row_class(&self) -> &'static str {
        if self.failed { FAILED_ROW_CLASS } else { "" }
    }

    /// Cells in [`COLUMNS`] order, for flat exports.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.rank.to_string(),
            self.remark.clone(),
            self.owner.clone(),
            self.games.clone(),
            self.wins.clone(),
            self.draws.clone(),
            self.losses.clone(),
            self.efficiency.clone(),
            self.win_rate.clone(),
            self.url.clone().unwrap_or_else(|| s!(NOT_AVAILABLE)),
            self.status.clone(),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TableBody {
    Rows(Vec<RankedRow>),
    /// Single row spanning every column.
    Placeholder(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct LeagueTable {
    pub league_name: String,
    pub body: TableBody,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub summary: String,
}

impl LeagueTable {
    pub fn rows(&self) -> &[RankedRow] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder(_) => &[],
        }
    }

    /// Table with no data at all, e.g. before the first crawl.
    pub fn placeholder(league_name: &str, message: &str, summary: String) -> Self {
        Self {
            league_name: s!(league_name),
            body: TableBody::Placeholder(s!(message)),
            total: 0,
            succeeded: 0,
            failed: 0,
            summary,
        }
    }
}

/* ---------------- Ranking ---------------- */

/// Descending by efficiency; non-numeric scores are `-inf`. Stable.
pub fn sort_by_efficiency(records: &mut [&CrawlRecord]) {
    let key = |r: &CrawlRecord| r.efficiency().unwrap_or(f64::NEG_INFINITY);
    // Keys are never NaN; -0.0 and 0.0 must tie.
    records.sort_by(|a, b| key(*b).partial_cmp(&key(*a)).unwrap_or(Ordering::Equal));
}

/// Rank one league's records. Callers filter by league first.
pub fn rank_league(records: &[CrawlRecord], league_name: &str) -> LeagueTable {
    if records.is_empty() {
        return LeagueTable::placeholder(
            league_name,
            NO_RESULTS,
            format!("{league_name} : 크롤링된 데이터가 없습니다."),
        );
    }

    let mut sorted: Vec<&CrawlRecord> = records.iter().collect();
    sort_by_efficiency(&mut sorted);

    let rows: Vec<RankedRow> = sorted
        .into_iter()
        .enumerate()
        .map(|(i, rec)| RankedRow::build(i + 1, rec))
        .collect();

    let total = rows.len();
    let failed = rows.iter().filter(|r| r.failed).count();
    let succeeded = total - failed;

    LeagueTable {
        league_name: s!(league_name),
        body: TableBody::Rows(rows),
        total,
        succeeded,
        failed,
        summary: format!("{league_name} : 총 {total}개 중 {succeeded}개 성공, {failed}개 실패."),
    }
}

/// The batch split into the two league cohorts, input order kept.
#[derive(Debug, Default)]
pub struct Cohorts {
    pub first: Vec<CrawlRecord>,
    pub second: Vec<CrawlRecord>,
    /// Records whose league label matched neither league.
    pub unassigned: usize,
}

impl Cohorts {
    pub fn get(&self, league: League) -> &[CrawlRecord] {
        match league {
            League::First => &self.first,
            League::Second => &self.second,
        }
    }
}

pub fn split_cohorts(records: &[CrawlRecord]) -> Cohorts {
    let mut out = Cohorts::default();
    for rec in records {
        match rec.league() {
            Some(League::First) => out.first.push(rec.clone()),
            Some(League::Second) => out.second.push(rec.clone()),
            None => out.unassigned += 1,
        }
    }
    out
}

/// Filter, then rank each cohort on its own.
pub fn rank_batch(records: &[CrawlRecord]) -> [LeagueTable; 2] {
    let cohorts = split_cohorts(records);
    if cohorts.unassigned > 0 {
        logf!("{} record(s) without a known league were skipped", cohorts.unassigned);
    }
    League::ALL.map(|league| rank_league(cohorts.get(league), league.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> CrawlRecord {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn three_record_example() {
        let records = vec![
            rec(json!({ "채굴 효율": 10 })),
            rec(json!({ "채굴 효율": 30, "비고": "↑5" })),
            rec(json!({ "채굴 효율": null, "error": "timeout" })),
        ];
        let table = rank_league(&records, "1부리그");
        let rows = table.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].rank, rows[0].efficiency.as_str()), (1, "30"));
        assert_eq!(rows[0].remark_tag, StyleTag::RankUp);
        assert_eq!((rows[1].rank, rows[1].efficiency.as_str()), (2, "10"));
        assert_eq!(rows[1].remark_tag, StyleTag::Neutral);
        assert_eq!(rows[2].rank, 3);
        assert!(rows[2].failed);
        assert_eq!(rows[2].row_class(), FAILED_ROW_CLASS);
        assert_eq!(rows[2].status, "timeout");
        assert_eq!(table.summary, "1부리그 : 총 3개 중 2개 성공, 1개 실패.");
    }

    #[test]
    fn empty_cohort_is_one_placeholder() {
        let table = rank_league(&[], "2부리그");
        assert_eq!(table.body, TableBody::Placeholder(s!(NO_RESULTS)));
        assert!(table.summary.ends_with("데이터가 없습니다."));
        assert_eq!(table.summary, "2부리그 : 크롤링된 데이터가 없습니다.");
    }

    #[test]
    fn equal_scores_get_distinct_ranks_in_input_order() {
        let records = vec![
            rec(json!({ "구단주명": "a", "채굴 효율": 5 })),
            rec(json!({ "구단주명": "b", "채굴 효율": "N/A" })),
            rec(json!({ "구단주명": "c", "채굴 효율": 5 })),
            rec(json!({ "구단주명": "d" })),
        ];
        let table = rank_league(&records, "1부리그");
        let order: Vec<(usize, &str)> = table.rows().iter().map(|r| (r.rank, r.owner.as_str())).collect();
        assert_eq!(order, vec![(1, "a"), (2, "c"), (3, "b"), (4, "d")]);
    }

    #[test]
    fn signed_zero_scores_tie() {
        let records = vec![
            rec(json!({ "구단주명": "first", "채굴 효율": -0.0 })),
            rec(json!({ "구단주명": "second", "채굴 효율": 0.0 })),
            rec(json!({ "구단주명": "third", "채굴 효율": 0 })),
        ];
        let table = rank_league(&records, "1부리그");
        let order: Vec<&str> = table.rows().iter().map(|r| r.owner.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn remark_rules_in_priority_order() {
        assert_eq!(classify_remark("↑3"), StyleTag::RankUp);
        assert_eq!(classify_remark("↓12"), StyleTag::RankDown);
        assert_eq!(classify_remark("-"), StyleTag::Neutral);
        assert_eq!(classify_remark("New"), StyleTag::RankUp);
        assert_eq!(classify_remark("new"), StyleTag::RankUp);
        assert_eq!(classify_remark("오류"), StyleTag::Error);
        assert_eq!(classify_remark("error"), StyleTag::Error);
        assert_eq!(classify_remark("?"), StyleTag::None);
        assert_eq!(classify_remark("Newcomer"), StyleTag::None);
    }

    #[test]
    fn absent_or_empty_remark_is_neutral() {
        let rows = rank_league(&[rec(json!({})), rec(json!({ "비고": "" }))], "1부리그");
        for r in rows.rows() {
            assert_eq!(r.remark, "-");
            assert_eq!(r.remark_tag, StyleTag::Neutral);
        }
    }

    #[test]
    fn failed_row_keeps_its_remark_tag() {
        let rows = rank_league(&[rec(json!({ "비고": "↓2", "error": "boom" }))], "1부리그");
        let r = &rows.rows()[0];
        assert_eq!(r.remark_tag, StyleTag::RankDown);
        assert_eq!(r.row_class(), FAILED_ROW_CLASS);
    }

    #[test]
    fn missing_owner_and_url_fall_back() {
        let rows = rank_league(&[rec(json!({ "URL": "" }))], "1부리그");
        let r = &rows.rows()[0];
        assert_eq!(r.owner, NOT_AVAILABLE);
        assert_eq!(r.url, None);
        assert_eq!(r.cells()[9], NOT_AVAILABLE);
        assert_eq!(r.cells().len(), COLUMNS.len());
    }

    #[test]
    fn cohorts_rank_independently() {
        let records = vec![
            rec(json!({ "리그명": "2부리그", "구단주명": "x", "채굴 효율": 100 })),
            rec(json!({ "리그명": "1부리그", "구단주명": "y", "채굴 효율": 1 })),
            rec(json!({ "리그명": "3부리그", "구단주명": "z", "채굴 효율": 50 })),
        ];
        let [first, second] = rank_batch(&records);
        assert_eq!(first.rows()[0].owner, "y");
        assert_eq!(first.rows()[0].rank, 1);
        assert_eq!(second.rows()[0].owner, "x");
        assert_eq!(second.rows()[0].rank, 1);
        assert_eq!(split_cohorts(&records).unassigned, 1);
    }
}
