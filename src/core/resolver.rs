use crate::domain::model::{RawAttributes, ResolvedMetrics};

// Upstream reports 0 for fields it did not actually measure, so a reported
// zero and a missing key are treated the same for ROE, margin and revenue
// growth. Debt/equity is exempt: a reported zero there is a real reading.
fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

pub fn resolve_roe(attrs: &RawAttributes) -> Option<f64> {
    nonzero(attrs.return_on_equity)
}

pub fn resolve_margin(attrs: &RawAttributes) -> Option<f64> {
    nonzero(attrs.profit_margins)
}

/// Revenue growth is read directly. `earningsGrowth` is deliberately not
/// used as a proxy here; it only feeds the PEG derivation.
pub fn resolve_rev_growth(attrs: &RawAttributes) -> Option<f64> {
    nonzero(attrs.revenue_growth)
}

/// Unknown leverage is disqualifying, not neutral: a `None` here always
/// fails the leverage criterion. A reported zero is a genuine reading and
/// may pass.
pub fn resolve_debt_to_equity(attrs: &RawAttributes) -> Option<f64> {
    attrs.debt_to_equity
}

/// Raw PEG: the reported `pegRatio` when present, otherwise derived as
/// `trailingPE / (earningsGrowth * 100)` when both inputs are present and
/// growth is positive. The result may still be non-positive; positivity
/// filtering happens in [`usable_peg`].
pub fn resolve_peg(attrs: &RawAttributes) -> Option<f64> {
    attrs.peg_ratio.or_else(|| derive_peg(attrs))
}

fn derive_peg(attrs: &RawAttributes) -> Option<f64> {
    match (nonzero(attrs.trailing_pe), attrs.earnings_growth) {
        (Some(pe), Some(growth)) if growth > 0.0 => Some(pe / (growth * 100.0)),
        _ => None,
    }
}

/// A PEG is usable for scoring and ranking only when strictly positive.
pub fn usable_peg(raw: Option<f64>) -> Option<f64> {
    raw.filter(|p| *p > 0.0)
}

/// Resolves all five rubric inputs for one ticker. Pure and total: never
/// fails, degrades to `None` per field instead.
pub fn resolve(attrs: &RawAttributes) -> ResolvedMetrics {
    let peg_raw = resolve_peg(attrs);
    ResolvedMetrics {
        roe: resolve_roe(attrs),
        margin: resolve_margin(attrs),
        rev_growth: resolve_rev_growth(attrs),
        debt_to_equity: resolve_debt_to_equity(attrs),
        peg: usable_peg(peg_raw),
        peg_raw,
        pe: attrs.trailing_pe,
    }
}
