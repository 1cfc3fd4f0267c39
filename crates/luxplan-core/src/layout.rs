// ── Fixture layout ──
//
// Places fixtures on an evenly spaced grid over a fixed canvas. The column
// count follows the room's aspect ratio so long rooms get long rows.

use serde::Serialize;

use crate::error::CoreError;

/// Canvas width in canvas units (also the export width in pixels).
pub const CANVAS_WIDTH: f64 = 900.0;

/// Canvas height in canvas units (also the export height in pixels).
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Radius of a fixture marker.
pub const MARKER_RADIUS: f64 = 10.0;

/// Largest fixture count that can be laid out or exported.
pub const MAX_FIXTURES: u64 = 10_000;

/// Width and height of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// A computed layout: the room boundary plus fixture positions in
/// row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub canvas: Size,
    pub boundary: Rect,
    pub columns: u64,
    pub rows: u64,
    pub positions: Vec<Point>,
}

/// Lay out `fixture_count` fixtures for a `length_m` × `width_m` room.
///
/// `columns = max(1, ceil(sqrt(n × length / width)))`,
/// `rows = max(1, ceil(n / columns))`. Cells are filled left to right, top
/// to bottom, stopping after `n`; position `(c, r)` (1-based) sits at
/// `(c × W / (columns + 1), r × H / (rows + 1))`. A count of 0 yields only
/// the boundary. A ratio that is not finite and positive counts as 1.
///
/// Counts above [`MAX_FIXTURES`] are refused with
/// [`CoreError::TooManyFixtures`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::as_conversions
)]
pub fn layout(length_m: f64, width_m: f64, fixture_count: u64) -> Result<Layout, CoreError> {
    if fixture_count > MAX_FIXTURES {
        return Err(CoreError::TooManyFixtures {
            count: fixture_count,
            max: MAX_FIXTURES,
        });
    }
    let canvas = Size {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    };
    let boundary = Rect {
        x: 0.0,
        y: 0.0,
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    };
    if fixture_count == 0 {
        return Ok(Layout {
            canvas,
            boundary,
            columns: 0,
            rows: 0,
            positions: Vec::new(),
        });
    }

    let ratio = length_m / width_m;
    let ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };

    let n = fixture_count as f64;
    let columns = ((n * ratio).sqrt().ceil() as u64).max(1);
    let rows = fixture_count.div_ceil(columns).max(1);

    let dx = CANVAS_WIDTH / (columns as f64 + 1.0);
    let dy = CANVAS_HEIGHT / (rows as f64 + 1.0);

    let positions = (1..=rows)
        .flat_map(|r| (1..=columns).map(move |c| (c, r)))
        .take(usize::try_from(fixture_count).unwrap_or(usize::MAX))
        .map(|(c, r)| Point {
            x: c as f64 * dx,
            y: r as f64 * dy,
        })
        .collect();

    Ok(Layout {
        canvas,
        boundary,
        columns,
        rows,
        positions,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_fixtures_is_boundary_only() {
        let l = layout(4.0, 3.0, 0).unwrap();
        assert!(l.positions.is_empty());
        assert_eq!(l.boundary.width, CANVAS_WIDTH);
        assert_eq!(l.boundary.height, CANVAS_HEIGHT);
    }

    #[test]
    fn canvas_is_fixed_size() {
        let l = layout(12.0, 2.0, 3).unwrap();
        assert_eq!(
            l.canvas,
            Size {
                width: 900.0,
                height: 600.0
            }
        );
    }

    #[test]
    fn fixture_count_is_bounded() {
        assert_eq!(
            layout(4.0, 3.0, MAX_FIXTURES).unwrap().positions.len(),
            usize::try_from(MAX_FIXTURES).unwrap()
        );
        let err = layout(4.0, 3.0, 10_000_000_000).unwrap_err();
        assert!(matches!(
            err,
            CoreError::TooManyFixtures {
                count: 10_000_000_000,
                max: MAX_FIXTURES
            }
        ));
    }

    #[test]
    fn six_fixtures_in_a_four_by_three_room() {
        // ceil(sqrt(6 × 4/3)) = ceil(sqrt(8)) = 3 columns, ceil(6/3) = 2 rows
        let l = layout(4.0, 3.0, 6).unwrap();
        assert_eq!(l.columns, 3);
        assert_eq!(l.rows, 2);
        assert_eq!(l.positions.len(), 6);
        assert!(l.positions.iter().all(|p| l.boundary.contains(*p)));

        let ys: Vec<f64> = l.positions.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![200.0, 200.0, 200.0, 400.0, 400.0, 400.0]);
        let xs: Vec<f64> = l.positions.iter().take(3).map(|p| p.x).collect();
        assert_eq!(xs, vec![225.0, 450.0, 675.0]);
    }

    #[test]
    fn partial_last_row_is_left_aligned() {
        // ceil(sqrt(5)) = 3 columns, 2 rows, last row holds 2
        let l = layout(3.0, 3.0, 5).unwrap();
        assert_eq!((l.columns, l.rows), (3, 2));
        assert_eq!(l.positions.len(), 5);
        assert_eq!(l.positions[3], Point { x: 225.0, y: 400.0 });
        assert_eq!(l.positions[4], Point { x: 450.0, y: 400.0 });
    }

    #[test]
    fn single_fixture_is_centered_in_square_room() {
        let l = layout(5.0, 5.0, 1).unwrap();
        assert_eq!(l.positions, vec![Point { x: 450.0, y: 300.0 }]);
    }

    #[test]
    fn narrow_room_gets_fewer_columns() {
        // ratio 0.25: ceil(sqrt(8 × 0.25)) = 2 columns, 4 rows
        let l = layout(2.0, 8.0, 8).unwrap();
        assert_eq!((l.columns, l.rows), (2, 4));
    }

    #[test]
    fn degenerate_ratio_falls_back_to_square() {
        let l = layout(4.0, 0.0, 4).unwrap();
        assert_eq!((l.columns, l.rows), (2, 2));
        assert_eq!(l.positions.len(), 4);
    }
}
