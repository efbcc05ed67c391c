use serde::{Deserialize, Serialize};

/// Financial attributes for one ticker, exactly as reported by the quote
/// source. Field names mirror the upstream JSON keys; any field may be
/// missing or null, and for several fields a reported zero is upstream's
/// way of saying "not reported" (see `core::resolver`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAttributes {
    #[serde(rename = "returnOnEquity")]
    pub return_on_equity: Option<f64>,

    #[serde(rename = "profitMargins")]
    pub profit_margins: Option<f64>,

    #[serde(rename = "revenueGrowth")]
    pub revenue_growth: Option<f64>,

    #[serde(rename = "debtToEquity")]
    pub debt_to_equity: Option<f64>,

    #[serde(rename = "pegRatio")]
    pub peg_ratio: Option<f64>,

    #[serde(rename = "trailingPE")]
    pub trailing_pe: Option<f64>,

    #[serde(rename = "earningsGrowth")]
    pub earnings_growth: Option<f64>,
}

impl RawAttributes {
    /// True when the fetch produced nothing usable at all (failed request,
    /// empty body). Such tickers are excluded from ranking rather than
    /// scored as zero.
    pub fn is_empty(&self) -> bool {
        self.return_on_equity.is_none()
            && self.profit_margins.is_none()
            && self.revenue_growth.is_none()
            && self.debt_to_equity.is_none()
            && self.peg_ratio.is_none()
            && self.trailing_pe.is_none()
            && self.earnings_growth.is_none()
    }
}

/// The five rubric inputs after fallback derivation. `None` means the value
/// could not be honestly derived from what the source reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedMetrics {
    pub roe: Option<f64>,
    pub margin: Option<f64>,
    pub rev_growth: Option<f64>,
    pub debt_to_equity: Option<f64>,
    /// PEG usable for scoring and ranking: primary or derived, filtered to
    /// strictly positive values.
    pub peg: Option<f64>,
    /// PEG as resolved, before the positivity filter. Kept for display so a
    /// negative upstream PEG still shows up in the rationale.
    pub peg_raw: Option<f64>,
    pub pe: Option<f64>,
}

/// Scored rubric result for one ticker. `details` holds one rationale line
/// per criterion, always in rubric order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub ticker: String,
    pub score: u8,
    pub details: Vec<String>,
    pub metrics: ResolvedMetrics,
}

/// Outcome of scoring one ticker. A ticker whose attribute bag is entirely
/// empty is never scored; it surfaces here so the ranker can drop it and
/// the report can list it as excluded.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    Scored(ScoreRecord),
    NoData { ticker: String },
}

/// Output of the transform stage: the ranked shortlist plus the rendered
/// report artifacts handed to the load stage.
#[derive(Debug, Clone)]
pub struct ScreenResult {
    pub ranked: Vec<ScoreRecord>,
    /// Tickers dropped because their fetch produced no data.
    pub excluded: Vec<String>,
    pub csv_output: String,
    pub summary_output: String,
}
