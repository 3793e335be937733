//! From a generation to finished plots.
//!
//! [`Analysis`] bundles one generation with its (optional) summary;
//! [`render`] turns it into a framebuffer for any [`PlotKind`] and
//! [`write_plot`] stores the result as `twin_primes_<kind>.<ext>`.
//!
//! Small limits leave some plots with nothing to draw. Those fail with
//! [`Error::InsufficientData`]; [`try_render`] turns that into `None`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::color::palette;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::output::{PngEncoder, SvgEncoder, TerminalEncoder, TerminalMode};
use crate::plots::{
    BinStrategy, BoxPlot, Histogram, LineChart, LineSeries, NumberLine, PairScatter, SpiralPlot,
    TrendPlot,
};
use crate::sieve::{generate_with_max, Generation};
use crate::stats::density::{
    default_proportion_windows, default_window, density_windows, proportion_windows,
    theory_comparison, HARDY_LITTLEWOOD_FACTOR,
};
use crate::stats::{gaps, StatSummary, MIN_PAIRS};

/// Every plot the crate can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PlotKind {
    /// Pairs on a number line.
    NumberLine,
    /// First member against the pair difference.
    Scatter,
    /// Gap against pair index with the trend line.
    Trend,
    /// Ulam-style spiral with pair members highlighted.
    Spiral,
    /// Gap histogram with mean, median and mode markers.
    Histogram,
    /// Gap box plot.
    BoxPlot,
    /// Windowed pair density.
    Density,
    /// Windowed share of primes in a pair.
    Proportion,
    /// Actual counts against the Hardy–Littlewood estimate, log-log.
    Theory,
}

impl PlotKind {
    /// All kinds, in drawing order.
    pub const ALL: [Self; 9] = [
        Self::NumberLine,
        Self::Scatter,
        Self::Trend,
        Self::Spiral,
        Self::Histogram,
        Self::BoxPlot,
        Self::Density,
        Self::Proportion,
        Self::Theory,
    ];

    /// Short snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NumberLine => "number_line",
            Self::Scatter => "scatter",
            Self::Trend => "trend",
            Self::Spiral => "spiral",
            Self::Histogram => "histogram",
            Self::BoxPlot => "boxplot",
            Self::Density => "density",
            Self::Proportion => "proportion",
            Self::Theory => "theory",
        }
    }

    /// Human readable title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NumberLine => "Twin primes on the number line",
            Self::Scatter => "Difference within each twin pair",
            Self::Trend => "Gap between consecutive twin pairs",
            Self::Spiral => "Twin primes on the integer spiral",
            Self::Histogram => "Distribution of gaps",
            Self::BoxPlot => "Gap box plot",
            Self::Density => "Local density of twin pairs",
            Self::Proportion => "Share of primes in a twin pair",
            Self::Theory => "Twin pair count against Hardy-Littlewood",
        }
    }

    /// File name without extension.
    #[must_use]
    pub fn file_stem(self) -> String {
        format!("twin_primes_{}", self.name())
    }

    /// Whether the plot needs the gap statistics (two or more pairs).
    #[must_use]
    pub const fn needs_statistics(self) -> bool {
        matches!(self, Self::Trend | Self::Histogram | Self::BoxPlot)
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.name() == wanted || (wanted == "box_plot" && *kind == Self::BoxPlot)
            })
            .ok_or_else(|| Error::InvalidInput(format!("unknown plot kind '{s}'")))
    }
}

/// Where a rendered plot goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// PNG file.
    #[default]
    Png,
    /// SVG file with the PNG embedded.
    Svg,
    /// Text, for printing to a terminal.
    Terminal,
}

impl OutputFormat {
    /// File extension, if the format produces a file.
    #[must_use]
    pub const fn extension(self) -> Option<&'static str> {
        match self {
            Self::Png => Some("png"),
            Self::Svg => Some("svg"),
            Self::Terminal => None,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "terminal" | "term" | "text" => Ok(Self::Terminal),
            other => Err(Error::InvalidInput(format!("unknown output format '{other}'"))),
        }
    }
}

/// Image size and analysis parameters for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSettings {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background dot cap for the spiral.
    pub spiral_max_points: usize,
    /// Density window width; `None` picks [`default_window`].
    pub window: Option<u64>,
    /// Proportion window count; `None` picks [`default_proportion_windows`].
    pub proportion_windows: Option<usize>,
    /// Points on the theory comparison curve.
    pub theory_points: usize,
}

impl PlotSettings {
    /// Settings taken from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.plot.width,
            height: config.plot.height,
            spiral_max_points: config.plot.spiral_max_points,
            window: config.analysis.window,
            proportion_windows: config.analysis.proportion_windows,
            theory_points: config.analysis.theory_points,
        }
    }

    /// Override the image size.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A generation together with its gap sequence and summary.
#[derive(Debug, Clone)]
pub struct Analysis {
    generation: Generation,
    gaps: Vec<u64>,
    summary: Option<StatSummary>,
}

impl Analysis {
    /// Analyze an existing generation. The summary is absent when fewer than
    /// two pairs were found.
    ///
    /// # Errors
    ///
    /// Propagates statistics errors other than too few pairs.
    pub fn new(generation: Generation) -> Result<Self> {
        let summary = match StatSummary::from_generation(&generation) {
            Ok(summary) => Some(summary),
            Err(Error::InsufficientData { .. }) => None,
            Err(e) => return Err(e),
        };
        let gaps = gaps(generation.pairs());
        Ok(Self {
            generation,
            gaps,
            summary,
        })
    }

    /// Generate up to `limit` and analyze the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhausted`] if `limit` exceeds `max_limit`.
    pub fn run(limit: u64, max_limit: u64) -> Result<Self> {
        Self::new(generate_with_max(limit, max_limit)?)
    }

    /// The underlying generation.
    #[must_use]
    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Gaps between consecutive pairs.
    #[must_use]
    pub fn gaps(&self) -> &[u64] {
        &self.gaps
    }

    /// Summary, if at least two pairs were found.
    #[must_use]
    pub fn summary(&self) -> Option<&StatSummary> {
        self.summary.as_ref()
    }

    /// The summary, or [`Error::InsufficientData`].
    ///
    /// # Errors
    ///
    /// Fails when fewer than two pairs were found.
    pub fn require_summary(&self) -> Result<&StatSummary> {
        self.summary.as_ref().ok_or(Error::InsufficientData {
            required: MIN_PAIRS,
            actual: self.generation.pair_count(),
        })
    }
}

/// Draw `kind` for `analysis`.
///
/// # Errors
///
/// Returns [`Error::InsufficientData`] when the plot has nothing to show:
/// the trend, histogram and box plot below two pairs, the scatter and theory
/// plots without a pair, and the density and proportion curves without a
/// complete window. Rendering errors such as [`Error::InvalidDimensions`]
/// pass through.
pub fn render(kind: PlotKind, analysis: &Analysis, settings: &PlotSettings) -> Result<Framebuffer> {
    let generation = analysis.generation();
    let limit = generation.limit();
    let (w, h) = (settings.width, settings.height);
    if kind.needs_statistics() {
        analysis.require_summary()?;
    }

    let fb = match kind {
        PlotKind::NumberLine => NumberLine::new()
            .pairs(generation.pairs())
            .limit(limit.max(1))
            .dimensions(w, h)
            .build()?
            .to_framebuffer()?,
        PlotKind::Scatter => {
            require_pairs(generation)?;
            PairScatter::new()
                .pairs(generation.pairs())
                .dimensions(w, h)
                .build()?
                .to_framebuffer()?
        }
        PlotKind::Trend => TrendPlot::new()
            .gaps(analysis.gaps())
            .dimensions(w, h)
            .build()?
            .to_framebuffer()?,
        PlotKind::Spiral => SpiralPlot::new()
            .limit(limit.max(1))
            .members(&generation.twin_members())
            .max_points(settings.spiral_max_points)
            .dimensions(w, h)
            .build()?
            .to_framebuffer()?,
        PlotKind::Histogram => {
            let gap_stats = analysis.require_summary()?.gaps;
            let data: Vec<f32> = analysis.gaps().iter().map(|&g| g as f32).collect();
            Histogram::new()
                .data(&data)
                .bins(BinStrategy::GAPS)
                .marker(gap_stats.mean as f32, palette::ACCENT)
                .marker(gap_stats.median as f32, palette::SECONDARY)
                .marker(gap_stats.mode as f32, palette::TERTIARY)
                .dimensions(w, h)
                .build()?
                .to_framebuffer()?
        }
        PlotKind::BoxPlot => BoxPlot::new()
            .gaps(analysis.gaps())
            .dimensions(w, h)
            .build()?
            .to_framebuffer()?,
        PlotKind::Density => density_chart(generation, settings)?
            .dimensions(w, h)
            .build()?
            .to_framebuffer()?,
        PlotKind::Proportion => proportion_chart(generation, settings)?
            .dimensions(w, h)
            .build()?
            .to_framebuffer()?,
        PlotKind::Theory => theory_chart(generation, settings)?
            .dimensions(w, h)
            .build()?
            .to_framebuffer()?,
    };

    tracing::debug!(%kind, limit, width = w, height = h, "rendered plot");
    Ok(fb)
}

/// [`render`], with `None` (and a warning) when the plot has nothing to show.
///
/// # Errors
///
/// Any [`render`] error other than [`Error::InsufficientData`].
pub fn try_render(
    kind: PlotKind,
    analysis: &Analysis,
    settings: &PlotSettings,
) -> Result<Option<Framebuffer>> {
    match render(kind, analysis, settings) {
        Ok(fb) => Ok(Some(fb)),
        Err(Error::InsufficientData { required, actual }) => {
            tracing::warn!(
                %kind,
                limit = analysis.generation().limit(),
                required,
                actual,
                "skipped: not enough data to plot"
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn require_pairs(generation: &Generation) -> Result<()> {
    if generation.is_empty() {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    Ok(())
}

/// One complete window is the least a curve can show.
fn require_windows(count: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    Ok(())
}

fn density_chart(generation: &Generation, settings: &PlotSettings) -> Result<LineChart> {
    let limit = generation.limit();
    let window = settings.window.unwrap_or_else(|| default_window(limit));
    let rows = density_windows(generation.pairs(), limit, window)?;
    require_windows(rows.len())?;

    let x: Vec<f32> = rows.iter().map(|r| r.center() as f32).collect();
    let y: Vec<f32> = rows.iter().map(|r| r.density as f32).collect();
    // Expected pairs per integer near x: 2·C₂ / ln²x.
    let expected: Vec<f32> = rows
        .iter()
        .map(|r| {
            let c = r.center().max(3.0);
            (HARDY_LITTLEWOOD_FACTOR / c.ln().powi(2)) as f32
        })
        .collect();

    let overall = if limit == 0 {
        0.0
    } else {
        generation.pair_count() as f32 / limit as f32
    };
    Ok(LineChart::new()
        .add_series(LineSeries::new("density").data(&x, &y).color(palette::PAIR))
        .add_series(
            LineSeries::new("hardy-littlewood")
                .data(&x, &expected)
                .color(palette::ACCENT)
                .dashed(true),
        )
        .reference_line(overall, palette::SECONDARY))
}

fn proportion_chart(generation: &Generation, settings: &PlotSettings) -> Result<LineChart> {
    let limit = generation.limit();
    let windows = settings
        .proportion_windows
        .unwrap_or_else(|| default_proportion_windows(limit));
    let rows = proportion_windows(generation, windows);
    require_windows(rows.len())?;

    let x: Vec<f32> = rows.iter().map(|r| r.center() as f32).collect();
    let y: Vec<f32> = rows.iter().map(|r| r.proportion as f32).collect();
    let chart = LineChart::new().add_series(
        LineSeries::new("proportion")
            .data(&x, &y)
            .color(palette::SECONDARY)
            .markers(rows.len() <= 30),
    );

    let members = generation.twin_members().len();
    Ok(match generation.prime_count() {
        0 => chart,
        primes => chart.reference_line(members as f32 / primes as f32, palette::ACCENT),
    })
}

fn theory_chart(generation: &Generation, settings: &PlotSettings) -> Result<LineChart> {
    require_pairs(generation)?;
    let points = theory_comparison(generation, settings.theory_points);
    let x: Vec<f32> = points.iter().map(|p| p.limit as f32).collect();
    let actual: Vec<f32> = points.iter().map(|p| p.actual as f32).collect();
    let estimate: Vec<f32> = points.iter().map(|p| p.estimate as f32).collect();

    Ok(LineChart::new()
        .add_series(
            LineSeries::new("actual")
                .data(&x, &actual)
                .color(palette::PAIR)
                .markers(true),
        )
        .add_series(
            LineSeries::new("hardy-littlewood")
                .data(&x, &estimate)
                .color(palette::ACCENT)
                .dashed(true),
        )
        .log_log(true))
}

/// Store a rendered plot as `<dir>/twin_primes_<kind>.<ext>`.
///
/// Returns the written path, or `None` for [`OutputFormat::Terminal`],
/// which has no file; use [`terminal_text`] for it.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or encoding fails.
pub fn write_plot(
    kind: PlotKind,
    fb: &Framebuffer,
    format: OutputFormat,
    dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(ext) = format.extension() else {
        return Ok(None);
    };
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{ext}", kind.file_stem()));

    match format {
        OutputFormat::Png => PngEncoder::new().write_to_file(fb, &path)?,
        OutputFormat::Svg => {
            SvgEncoder::from_framebuffer(fb, Some(kind.title()))?.write_to_file(&path)?;
        }
        OutputFormat::Terminal => {}
    }
    tracing::info!(%kind, path = %path.display(), "saved plot");
    Ok(Some(path))
}

/// `fb` as colored terminal text, `columns` wide.
#[must_use]
pub fn terminal_text(fb: &Framebuffer, columns: u32) -> String {
    TerminalEncoder::new()
        .mode(TerminalMode::HalfBlock)
        .columns(columns)
        .render(fb)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> PlotSettings {
        PlotSettings::default().dimensions(240, 160)
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(PlotKind::NumberLine.file_stem(), "twin_primes_number_line");
        assert_eq!("box-plot".parse::<PlotKind>().unwrap(), PlotKind::BoxPlot);
        assert_eq!("Theory".parse::<PlotKind>().unwrap(), PlotKind::Theory);
        assert!("pie".parse::<PlotKind>().is_err());
        for kind in PlotKind::ALL {
            assert_eq!(kind.name().parse::<PlotKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_output_format() {
        assert_eq!("SVG".parse::<OutputFormat>().unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::Terminal.extension(), None);
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_analysis_summary() {
        let analysis = Analysis::run(100, 1_000).unwrap();
        assert_eq!(analysis.gaps(), &[2, 6, 6, 12, 12, 18, 12]);
        assert!(analysis.summary().is_some());

        let tiny = Analysis::run(5, 1_000).unwrap();
        assert!(tiny.summary().is_none());
        assert!(matches!(
            tiny.require_summary(),
            Err(Error::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_render_every_kind() {
        let analysis = Analysis::run(1_000, 10_000).unwrap();
        for kind in PlotKind::ALL {
            let fb = render(kind, &analysis, &small()).unwrap();
            assert_eq!((fb.width(), fb.height()), (240, 160), "{kind}");
            assert!(!fb.is_blank(), "{kind}");
        }
    }

    #[test]
    fn test_statistics_kinds_need_two_pairs() {
        let analysis = Analysis::run(6, 1_000).unwrap();
        for kind in PlotKind::ALL.into_iter().filter(|k| k.needs_statistics()) {
            assert!(matches!(
                render(kind, &analysis, &small()),
                Err(Error::InsufficientData { .. })
            ));
        }
        assert!(render(PlotKind::NumberLine, &analysis, &small()).is_ok());
        assert!(render(PlotKind::Spiral, &analysis, &small()).is_ok());
        assert!(render(PlotKind::Scatter, &analysis, &small()).is_ok());
    }

    #[test]
    fn test_curves_without_a_window() {
        // Two pairs, but no complete density window and no proportion window.
        let analysis = Analysis::run(8, 1_000).unwrap();
        for kind in [PlotKind::Density, PlotKind::Proportion] {
            assert!(matches!(
                render(kind, &analysis, &small()),
                Err(Error::InsufficientData { required: 1, actual: 0 })
            ));
            assert!(try_render(kind, &analysis, &small()).unwrap().is_none());
        }
        assert!(try_render(PlotKind::Trend, &analysis, &small()).unwrap().is_some());
    }

    #[test]
    fn test_try_render_passes_other_errors() {
        let analysis = Analysis::run(100, 1_000).unwrap();
        let zero = small().dimensions(0, 0);
        assert!(matches!(
            try_render(PlotKind::NumberLine, &analysis, &zero),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_write_plot_formats() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = Analysis::run(100, 1_000).unwrap();
        let fb = render(PlotKind::Trend, &analysis, &small()).unwrap();

        let png = write_plot(PlotKind::Trend, &fb, OutputFormat::Png, dir.path())
            .unwrap()
            .unwrap();
        assert!(png.ends_with("twin_primes_trend.png"));
        let svg = write_plot(PlotKind::Trend, &fb, OutputFormat::Svg, dir.path())
            .unwrap()
            .unwrap();
        assert!(std::fs::read_to_string(svg).unwrap().contains("Gap between"));
        let text = write_plot(PlotKind::Trend, &fb, OutputFormat::Terminal, dir.path()).unwrap();
        assert!(text.is_none());
        assert!(!terminal_text(&fb, 40).is_empty());
    }
}
