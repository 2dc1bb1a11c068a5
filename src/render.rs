// src/render.rs
//! Results page as a standalone HTML document.
//!
//! One table per league with its summary line underneath, and the
//! last-updated line at the top. Element ids (`league1Table`,
//! `league1_summary_message`, `lastUpdatedInfo`) are stable so external
//! stylesheets and scripts can hook into them.

use std::{io, path::Path};

use crate::core::html::{close_tag, element, link, open_tag};
use crate::core::sanitize::escape_html;
use crate::file::write_text;
use crate::model::League;
use crate::ranking::{LeagueTable, RankedRow, TableBody, COLUMNS, NOT_AVAILABLE};
use crate::results::ResultsView;

const TITLE: &str = "FC Online 감독 모드 순위";
const LINK_LABEL: &str = "링크";

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; margin-bottom: 0.5em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: center; }
.rank-up { color: #d32f2f; font-weight: bold; }
.rank-down { color: #1976d2; font-weight: bold; }
.rank-no-change { color: #757575; }
.error-row { background: #fdecea; color: #b71c1c; }
";

pub fn render_page(view: &ResultsView) -> String {
    let mut out = s!("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&element("title", "", TITLE));
    out.push_str("\n<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str(&element("h1", "", TITLE));
    out.push('\n');
    out.push_str(&open_tag("p", &[("id", "lastUpdatedInfo")]));
    out.push_str(&escape_html(view.info_line()));
    out.push_str("</p>\n");

    for (league, table) in League::ALL.iter().zip(view.tables().iter()) {
        out.push_str(&render_league(*league, table));
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_league(league: League, table: &LeagueTable) -> String {
    let slug = league.slug();
    let mut out = element("h2", "", &table.league_name);
    out.push('\n');

    let table_id = join!(slug, "Table");
    out.push_str(&open_tag("table", &[("id", table_id.as_str())]));
    out.push_str("\n<thead><tr>");
    for col in COLUMNS {
        out.push_str(&element("th", "", col));
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    out.push_str(&render_body(&table.body));
    out.push_str("</tbody>\n</table>\n");

    let summary_id = join!(slug, "_summary_message");
    out.push_str(&open_tag("p", &[("id", summary_id.as_str())]));
    out.push_str(&escape_html(&table.summary));
    out.push_str("</p>\n");
    out
}

/// `<tbody>` content only; exposed for tests and embedding.
pub fn render_body(body: &TableBody) -> String {
    match body {
        TableBody::Placeholder(msg) => {
            let span = COLUMNS.len().to_string();
            let mut out = s!("<tr>");
            out.push_str(&open_tag("td", &[("colspan", span.as_str())]));
            out.push_str(&escape_html(msg));
            out.push_str("</td></tr>\n");
            out
        }
        TableBody::Rows(rows) => rows.iter().map(render_row).collect(),
    }
}

fn render_row(row: &RankedRow) -> String {
    let mut out = open_tag("tr", &[("class", row.row_class())]);
    out.push_str(&element("td", "", &row.rank.to_string()));
    out.push_str(&element("td", row.remark_tag.class(), &row.remark));
    for cell in [
        &row.owner, &row.games, &row.wins, &row.draws, &row.losses, &row.efficiency, &row.win_rate,
    ] {
        out.push_str(&element("td", "", cell));
    }
    out.push_str("<td>");
    match &row.url {
        Some(url) => out.push_str(&link(url, LINK_LABEL)),
        None => out.push_str(NOT_AVAILABLE),
    }
    out.push_str("</td>");
    out.push_str(&element("td", "", &row.status));
    out.push_str(&close_tag("tr"));
    out.push('\n');
    out
}

pub fn write_page(view: &ResultsView, path: &Path) -> io::Result<()> {
    write_text(path, &render_page(view))?;
    logf!("results page written to {}", path.display());
    Ok(())
}
