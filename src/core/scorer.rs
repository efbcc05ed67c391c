use std::cmp::Ordering;

use crate::core::resolver;
use crate::domain::model::{RawAttributes, ScoreRecord, ScreenOutcome};

pub const MIN_ROE: f64 = 0.15;
pub const MIN_MARGIN: f64 = 0.10;
pub const MIN_REV_GROWTH: f64 = 0.05;
// Upstream reports debt/equity as a percentage-like figure, so 50 means a
// 0.5 ratio. The literal threshold is kept as-is.
pub const MAX_DEBT_TO_EQUITY: f64 = 50.0;
pub const MAX_PEG: f64 = 2.0;

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "N/A".to_string(),
    }
}

fn fmt_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "N/A".to_string(),
    }
}

/// Scores one ticker against the five QGARP criteria.
///
/// Pure and total: a partially missing attribute bag never fails, each
/// unknown metric simply fails its criterion and says so in the rationale.
/// Only a completely empty bag short-circuits to [`ScreenOutcome::NoData`].
pub fn score_stock(ticker: &str, attrs: &RawAttributes) -> ScreenOutcome {
    if attrs.is_empty() {
        return ScreenOutcome::NoData {
            ticker: ticker.to_string(),
        };
    }

    let metrics = resolver::resolve(attrs);
    let mut score = 0u8;
    let mut details = Vec::with_capacity(5);

    // 1. ROE > 15%
    let pass = metrics.roe.is_some_and(|v| v > MIN_ROE);
    score += pass as u8;
    details.push(format!(
        "ROE: {} ({}15%)",
        fmt_pct(metrics.roe),
        if pass { ">" } else { "<=" }
    ));

    // 2. Profit margin > 10%
    let pass = metrics.margin.is_some_and(|v| v > MIN_MARGIN);
    score += pass as u8;
    details.push(format!(
        "Margin: {} ({}10%)",
        fmt_pct(metrics.margin),
        if pass { ">" } else { "<=" }
    ));

    // 3. Revenue growth > 5%
    let pass = metrics.rev_growth.is_some_and(|v| v > MIN_REV_GROWTH);
    score += pass as u8;
    details.push(format!(
        "Rev Growth: {} ({}5%)",
        fmt_pct(metrics.rev_growth),
        if pass { ">" } else { "<=" }
    ));

    // 4. Debt/equity < 50 (raw upstream units)
    let pass = metrics.debt_to_equity.is_some_and(|v| v < MAX_DEBT_TO_EQUITY);
    score += pass as u8;
    details.push(format!(
        "D/E: {} ({}50%)",
        fmt_num(metrics.debt_to_equity),
        if pass { "<" } else { ">=" }
    ));

    // 5. Usable PEG < 2.0. The rationale shows the raw value so a negative
    // upstream PEG is still visible even though it can never pass.
    let pass = metrics.peg.is_some_and(|v| v < MAX_PEG);
    score += pass as u8;
    details.push(format!(
        "PEG: {} ({})",
        fmt_num(metrics.peg_raw),
        if pass { "<2.0" } else { ">=2.0 or invalid" }
    ));

    ScreenOutcome::Scored(ScoreRecord {
        ticker: ticker.to_string(),
        score,
        details,
        metrics,
    })
}

/// Total order over optional PEG values used as the ranking tie-break:
/// an unknown or unusable PEG sorts after every known one.
pub fn cmp_peg(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Scores every ticker and returns the ranked shortlist: score descending,
/// ties broken by ascending usable PEG, remaining ties keeping input order
/// (the sort is stable). Tickers with no data are dropped.
pub fn rank_stocks(universe: Vec<(String, RawAttributes)>) -> Vec<ScoreRecord> {
    let mut ranked: Vec<ScoreRecord> = universe
        .iter()
        .filter_map(|(ticker, attrs)| match score_stock(ticker, attrs) {
            ScreenOutcome::Scored(record) => Some(record),
            ScreenOutcome::NoData { .. } => None,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| cmp_peg(a.metrics.peg, b.metrics.peg))
    });

    ranked
}
