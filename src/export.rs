//! Multi-format export of a composed chart.
//!
//! Every artifact comes from the chart's single SVG scene:
//!
//! ```text
//!  Chart (plotters SVG, transparent canvas)
//!        │ parse, tight content box + pad
//!        ▼
//!  cropped SVG (white background) ──────────────► <base>.svg
//!        │ parse once
//!        ▼
//!  usvg::Tree ──┬── svg2pdf ─────────────────────► <base>.pdf
//!               ├── resvg @ dpi_high ────────────► <base>.png
//!               └── resvg @ dpi_thumb ───────────► <base>_thumb.png
//! ```
//!
//! The chart is taken by value; the scene, the tree and the pixmaps are all
//! dropped before `export_chart` returns, whatever the outcome.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::fontdb::{Database, Family, Query};
use resvg::usvg::{Options, Tree};

use crate::chart::Chart;
use crate::config::ExportConfig;
use crate::error::PlotError;
use crate::POINTS_PER_INCH;

/// The four files written for one (case, group).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub pdf: PathBuf,
    pub svg: PathBuf,
    pub png: PathBuf,
    pub thumbnail: PathBuf,
}

impl ArtifactSet {
    /// Paths derived from `base` (a path without extension).
    pub fn for_base(base: &Path, thumb_suffix: &str) -> ArtifactSet {
        ArtifactSet {
            pdf: with_suffix(base, ".pdf"),
            svg: with_suffix(base, ".svg"),
            png: with_suffix(base, ".png"),
            thumbnail: with_suffix(base, &format!("{}.png", thumb_suffix)),
        }
    }

    pub fn paths(&self) -> [&Path; 4] {
        [&self.pdf, &self.svg, &self.png, &self.thumbnail]
    }
}

/// `case<id>_<group>`, the base file name of a chart's artifacts.
pub fn artifact_base(case_id: &str, group: &str) -> String {
    format!("case{}_{}", case_id, group)
}

// appends instead of Path::with_extension, case ids may contain dots
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = base.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// Writes charts as PDF, SVG, PNG and PNG thumbnail.
///
/// Holds the font database used to lay out text, loaded once per exporter.
pub struct Exporter {
    config: ExportConfig,
    options: Options<'static>,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Exporter {
        let mut options = Options::default();
        let fontdb = options.fontdb_mut();
        fontdb.load_system_fonts();
        resolve_generic_families(fontdb);
        debug!("loaded {} font faces", options.fontdb.len());
        Exporter { config, options }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Exports `chart` next to `base` (a path without extension), see [`ArtifactSet::for_base`].
    ///
    /// The parent directory must exist; a missing or unwritable directory is
    /// `ExportFailed`. Files written before a failure are left in place.
    pub fn export_chart(&self, chart: Chart, base: &Path) -> Result<ArtifactSet, PlotError> {
        let artifacts = ArtifactSet::for_base(base, &self.config.thumb_suffix);
        let dir = match base.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            return Err(PlotError::ExportFailed {
                path: dir.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let cropped = self.crop(&chart)?;
        drop(chart);
        write_file(&artifacts.svg, cropped.as_bytes())?;

        let tree = self.parse(&cropped)?;
        let pdf = svg2pdf::to_pdf(
            &tree,
            svg2pdf::ConversionOptions::default(),
            svg2pdf::PageOptions::default(),
        )
        .map_err(|e| PlotError::Render(format!("pdf conversion: {:?}", e)))?;
        write_file(&artifacts.pdf, &pdf)?;

        write_file(&artifacts.png, &rasterize(&tree, self.config.dpi_high)?)?;
        write_file(&artifacts.thumbnail, &rasterize(&tree, self.config.dpi_thumb)?)?;
        Ok(artifacts)
    }

    fn parse(&self, svg: &str) -> Result<Tree, PlotError> {
        Tree::from_str(svg, &self.options)
            .map_err(|e| PlotError::Render(format!("svg parse: {:?}", e)))
    }

    /// The chart's scene cut to its drawn content plus the configured pad,
    /// on a white background.
    fn crop(&self, chart: &Chart) -> Result<String, PlotError> {
        let (width, height) = chart.size();
        let tree = self.parse(chart.svg())?;
        let bbox = tree.root().abs_stroke_bounding_box();
        let (x, y, w, h) = if bbox.width() > 0. && bbox.height() > 0. {
            let pad = self.config.pad;
            (
                bbox.x() - pad,
                bbox.y() - pad,
                bbox.width() + 2. * pad,
                bbox.height() + 2. * pad,
            )
        } else {
            (0., 0., width as f32, height as f32)
        };
        debug!(
            "case {} group {}: content box {} {} {} {}",
            chart.case_id, chart.group, x, y, w, h
        );
        Ok(cropped_svg(chart.svg(), x, y, w, h))
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Exporter::new(ExportConfig::default())
    }
}

/// Points the generic `serif` and `sans-serif` families at installed faces.
///
/// fontdb maps them to Times New Roman and Arial by default; when those are
/// missing, usvg drops every text node that asks for the generic family.
fn resolve_generic_families(db: &mut Database) {
    if !resolves(db, Family::Serif) {
        match fallback_family(db, |name| name.contains("Serif") && !name.contains("Sans")) {
            Some(name) => {
                debug!("serif family mapped to {}", name);
                db.set_serif_family(name);
            }
            None => warn!("no font face found, chart text will not be rendered"),
        }
    }
    if !resolves(db, Family::SansSerif) {
        if let Some(name) = fallback_family(db, |name| name.contains("Sans")) {
            debug!("sans-serif family mapped to {}", name);
            db.set_sans_serif_family(name);
        }
    }
}

fn resolves(db: &Database, family: Family) -> bool {
    db.query(&Query {
        families: &[family],
        ..Query::default()
    })
    .is_some()
}

/// First family whose name satisfies `prefer`, else the first loaded family.
fn fallback_family<F: Fn(&str) -> bool>(db: &Database, prefer: F) -> Option<String> {
    let mut names = db
        .faces()
        .filter_map(|face| face.families.first().map(|(name, _)| name.clone()));
    let first = names.next()?;
    if prefer(&first) {
        return Some(first);
    }
    names.find(|name| prefer(name)).or(Some(first))
}

/// Wraps the scene as a nested document inside a viewport on (x, y, w, h).
fn cropped_svg(svg: &str, x: f32, y: f32, w: f32, h: f32) -> String {
    let body = strip_prolog(svg).trim();
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"{x} {y} {w} {h}\">\n\
         <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"white\"/>\n\
         {body}\n\
         </svg>\n",
        x = x,
        y = y,
        w = w,
        h = h,
        body = body
    )
}

fn strip_prolog(svg: &str) -> &str {
    let trimmed = svg.trim_start();
    if trimmed.starts_with("<?xml") {
        if let Some(end) = trimmed.find("?>") {
            return &trimmed[end + 2..];
        }
    }
    trimmed
}

/// PNG of the tree at `dpi`, one tree unit being one point.
fn rasterize(tree: &Tree, dpi: f32) -> Result<Vec<u8>, PlotError> {
    let scale = dpi / POINTS_PER_INCH;
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        PlotError::Render(format!("cannot allocate a {}x{} pixmap", width, height))
    })?;
    pixmap.fill(Color::WHITE);
    resvg::render(tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| PlotError::Render(format!("png encoding: {}", e)))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), PlotError> {
    fs::write(path, bytes).map_err(|e| PlotError::ExportFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
