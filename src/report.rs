//! Plain-text reports.

use std::fmt;
use std::time::Duration;

use crate::sieve::Generation;
use crate::stats::StatSummary;

/// Text report of a generation and, when available, its statistics.
///
/// Without a summary (fewer than two pairs) only the counts and the
/// extreme pairs are listed.
#[must_use]
pub fn render_report(generation: &Generation, summary: Option<&StatSummary>) -> String {
    Report {
        generation,
        summary,
    }
    .to_string()
}

/// Numbered pair listing, as printed by `twinviz generate`.
///
/// Shows at most `max_rows` pairs; `None` shows all of them.
#[must_use]
pub fn render_listing(
    generation: &Generation,
    method: &str,
    elapsed: Duration,
    max_rows: Option<usize>,
) -> String {
    Listing {
        generation,
        method,
        elapsed,
        max_rows,
    }
    .to_string()
}

struct Report<'a> {
    generation: &'a Generation,
    summary: Option<&'a StatSummary>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.generation;
        writeln!(f, "TWIN PRIME STATISTICS")?;
        writeln!(f, "=====================")?;
        writeln!(f)?;
        writeln!(f, "Twin pairs found: {}", g.pair_count())?;
        writeln!(f, "Search limit:     {}", g.limit())?;

        let (Some(first), Some(last)) = (g.pairs().first(), g.pairs().last()) else {
            writeln!(f)?;
            return writeln!(f, "No twin pairs below {}.", g.limit());
        };
        writeln!(f, "First pair:       {first}")?;
        writeln!(f, "Last pair:        {last}")?;

        let Some(summary) = self.summary else {
            writeln!(f)?;
            return writeln!(f, "At least two pairs are needed for gap statistics.");
        };

        let s = &summary.gaps;
        writeln!(f)?;
        writeln!(f, "Gaps between consecutive pairs ({})", s.count)?;
        writeln!(f, "  Mean:                     {:.2}", s.mean)?;
        writeln!(f, "  Median:                   {:.2}", s.median)?;
        writeln!(f, "  Mode:                     {} ({} times)", s.mode, s.mode_frequency)?;
        writeln!(f, "  Standard deviation:       {:.2}", s.std_dev)?;
        writeln!(f, "  Coefficient of variation: {:.2}%", s.cv_percent())?;
        writeln!(f)?;
        writeln!(f, "  Min:  {}", s.min)?;
        writeln!(f, "  Q1:   {:.2}", s.q1)?;
        writeln!(f, "  Q3:   {:.2}", s.q3)?;
        writeln!(f, "  IQR:  {:.2}", s.iqr)?;
        writeln!(f, "  P90:  {:.2}", s.p90)?;
        writeln!(f, "  P99:  {:.2}", s.p99)?;
        writeln!(f, "  Max:  {}", s.max)?;

        let r = &s.regression;
        writeln!(f)?;
        writeln!(f, "Trend (gap against pair index)")?;
        writeln!(f, "  Slope:       {:.4}", r.slope)?;
        writeln!(f, "  Intercept:   {:.4}", r.intercept)?;
        writeln!(f, "  Correlation: {:.4}", r.correlation)?;
        let reading = if r.is_widening() {
            "gaps tend to widen"
        } else {
            "no clear widening"
        };
        writeln!(f, "  Reading:     {reading}")?;

        let d = &summary.density;
        writeln!(f)?;
        writeln!(f, "Density")?;
        writeln!(f, "  Observed:    {:.4} pairs per 100 integers", d.observed)?;
        writeln!(f, "  Theoretical: {:.4} pairs per 100 integers", d.theoretical)?;
        writeln!(f, "  Difference:  {:.2}%", d.relative_difference * 100.0)?;
        writeln!(f, "  Estimated 2·C₂: {:.4}", d.estimated_constant)?;
        writeln!(f)?;
        writeln!(f, "Proportion")?;
        writeln!(f, "  Primes <= limit:    {}", d.prime_count)?;
        writeln!(f, "  Twin members:       {:.4}", d.twin_proportion)?;
        Ok(())
    }
}

struct Listing<'a> {
    generation: &'a Generation,
    method: &'a str,
    elapsed: Duration,
    max_rows: Option<usize>,
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self.generation.pairs();
        writeln!(f, "Twin primes up to {}", self.generation.limit())?;
        writeln!(f, "Method: {}", self.method)?;
        writeln!(f, "Generation time: {:.4} s", self.elapsed.as_secs_f64())?;
        writeln!(f, "Pairs found: {}", pairs.len())?;
        writeln!(f)?;

        let shown = self.max_rows.map_or(pairs.len(), |n| n.min(pairs.len()));
        for (i, pair) in pairs.iter().take(shown).enumerate() {
            writeln!(f, "{}. {pair}", i + 1)?;
        }
        if shown < pairs.len() {
            writeln!(f, "... {} more", pairs.len() - shown)?;
        }
        Ok(())
    }
}
