// ── Scene rendering and PNG export ──
//
// A `Layout` is drawn as an SVG scene (boundary rectangle + one circle per
// fixture), then rasterized with resvg into a fixed 900×600 pixmap and
// encoded as PNG. Exports are serialized: a second request while one is
// pending fails fast instead of queueing.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use resvg::{tiny_skia, usvg};
use tracing::{debug, info};

use crate::error::CoreError;
use crate::layout::{Layout, MARKER_RADIUS, MAX_FIXTURES};

/// Default download name for exported layouts.
pub const DEFAULT_EXPORT_FILE: &str = "denah_lampu.png";

/// Export raster size in pixels.
pub const EXPORT_WIDTH_PX: u32 = 900;
pub const EXPORT_HEIGHT_PX: u32 = 600;

const BOUNDARY_STROKE: &str = "#333333";
const MARKER_FILL: &str = "#ffc107";
const MARKER_STROKE: &str = "#b8860b";

// ── Rendering ────────────────────────────────────────────────────────

/// Render a layout as a standalone SVG document in canvas coordinates.
pub fn render_svg(layout: &Layout) -> String {
    let (w, h) = (layout.canvas.width, layout.canvas.height);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let b = layout.boundary;
    let _ = writeln!(
        svg,
        r##"  <rect x="{}" y="{}" width="{}" height="{}" fill="#ffffff" stroke="{BOUNDARY_STROKE}" stroke-width="4"/>"##,
        b.x, b.y, b.width, b.height
    );
    for p in &layout.positions {
        let _ = writeln!(
            svg,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{MARKER_RADIUS}" fill="{MARKER_FILL}" stroke="{MARKER_STROKE}" stroke-width="2"/>"#,
            p.x, p.y
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Rasterize an SVG document to a 900×600 PNG.
///
/// Documents declaring another size are scaled to fill the raster.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn rasterize(svg: &str) -> Result<Vec<u8>, CoreError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default()).map_err(|e| {
        CoreError::Export {
            reason: format!("invalid vector scene: {e}"),
        }
    })?;

    let mut pixmap =
        tiny_skia::Pixmap::new(EXPORT_WIDTH_PX, EXPORT_HEIGHT_PX).ok_or_else(|| {
            CoreError::Export {
                reason: "failed to allocate pixmap".into(),
            }
        })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        EXPORT_WIDTH_PX as f32 / size.width(),
        EXPORT_HEIGHT_PX as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| CoreError::Export {
        reason: format!("PNG encoding failed: {e}"),
    })
}

// ── Exporter ─────────────────────────────────────────────────────────

/// Serializes export requests. At most one is in flight at a time.
#[derive(Debug, Default)]
pub struct Exporter {
    busy: AtomicBool,
}

/// Clears the busy flag when the export finishes, however it finishes.
struct Pending<'a>(&'a AtomicBool);

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an export is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<Pending<'_>, CoreError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::ExportInProgress)?;
        Ok(Pending(&self.busy))
    }

    /// Render a layout and write it as PNG to `path`.
    ///
    /// The image is written to a sibling `.part` file first and renamed
    /// into place, so a failure never leaves a truncated file at `path`.
    /// Layouts with more than [`MAX_FIXTURES`] markers are refused.
    pub fn export_png(&self, layout: &Layout, path: &Path) -> Result<PathBuf, CoreError> {
        let count = u64::try_from(layout.positions.len()).unwrap_or(u64::MAX);
        if count > MAX_FIXTURES {
            return Err(CoreError::TooManyFixtures {
                count,
                max: MAX_FIXTURES,
            });
        }
        let _pending = self.begin()?;
        let bytes = rasterize(&render_svg(layout))?;
        write_atomic(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "layout exported");
        Ok(path.to_path_buf())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CoreError> {
    let io_err = |source| CoreError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);
    debug!(part = %part.display(), "writing export");

    if let Err(e) = std::fs::write(&part, bytes) {
        let _ = std::fs::remove_file(&part);
        return Err(io_err(e));
    }
    std::fs::rename(&part, path).map_err(|e| {
        let _ = std::fs::remove_file(&part);
        io_err(e)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::{Point, layout};

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn png_size(bytes: &[u8]) -> (u32, u32) {
        // IHDR follows the signature: length(4) "IHDR"(4) width(4) height(4)
        let w = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let h = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        (w, h)
    }

    #[test]
    fn svg_has_boundary_and_one_marker_per_fixture() {
        let svg = render_svg(&layout(4.0, 3.0, 6).unwrap());
        assert_eq!(svg.matches("<rect").count(), 1);
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains(r#"r="10""#));
        assert!(svg.contains(r#"cx="225.00" cy="200.00""#));
    }

    #[test]
    fn rasterizes_to_fixed_size_png() {
        let png = rasterize(&render_svg(&layout(4.0, 3.0, 6).unwrap())).unwrap();
        assert_eq!(png[..8], PNG_SIGNATURE);
        assert_eq!(png_size(&png), (900, 600));
    }

    #[test]
    fn other_declared_sizes_are_scaled_to_fit() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="450" height="300"><rect width="450" height="300" fill="red"/></svg>"#;
        let png = rasterize(svg).unwrap();
        assert_eq!(png_size(&png), (900, 600));
    }

    #[test]
    fn markers_are_painted() {
        let png = rasterize(&render_svg(&layout(5.0, 5.0, 1).unwrap())).unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();

        let center = pixmap.pixel(450, 300).unwrap();
        assert_eq!((center.red(), center.green(), center.blue()), (0xff, 0xc1, 0x07));

        let background = pixmap.pixel(100, 100).unwrap();
        assert_eq!(
            (background.red(), background.green(), background.blue()),
            (0xff, 0xff, 0xff)
        );
    }

    #[test]
    fn malformed_svg_is_reported() {
        let err = rasterize("<svg><circle").unwrap_err();
        assert!(matches!(err, CoreError::Export { .. }));
    }

    #[test]
    fn export_writes_file_and_releases_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let exporter = Exporter::new();

        exporter.export_png(&layout(4.0, 3.0, 6).unwrap(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(png_size(&bytes), (900, 600));
        assert!(!exporter.is_busy());
        assert!(!dir.path().join("denah_lampu.png.part").exists());
    }

    #[test]
    fn failed_export_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("denah.png");
        let exporter = Exporter::new();

        let err = exporter.export_png(&layout(4.0, 3.0, 2).unwrap(), &path).unwrap_err();

        assert!(matches!(err, CoreError::Io { .. }));
        assert!(!path.exists());
        assert!(!exporter.is_busy());
    }

    #[test]
    fn svg_header_uses_layout_canvas() {
        let svg = render_svg(&layout(4.0, 3.0, 1).unwrap());
        assert!(svg.starts_with(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="900" height="600" viewBox="0 0 900 600">"#
        ));
    }

    #[test]
    fn concurrent_export_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let exporter = Exporter::new();
        let _held = exporter.begin().unwrap();
        assert!(exporter.is_busy());
        assert!(matches!(
            exporter.export_png(&layout(1.0, 1.0, 1).unwrap(), &path),
            Err(CoreError::ExportInProgress)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn oversized_layout_is_not_exported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let mut plan = layout(4.0, 3.0, 1).unwrap();
        let extra = usize::try_from(MAX_FIXTURES).unwrap();
        plan.positions
            .extend(std::iter::repeat_n(Point { x: 1.0, y: 1.0 }, extra));

        let exporter = Exporter::new();
        let err = exporter.export_png(&plan, &path).unwrap_err();

        assert!(matches!(err, CoreError::TooManyFixtures { max: MAX_FIXTURES, .. }));
        assert!(!path.exists());
        assert!(!exporter.is_busy());
    }
}
