use serde::{Deserialize, Serialize};

use crate::motion::MotionConfig;
use crate::viewport::ViewportClass;

pub const MAX_SPAN_COLS: u8 = 3;
pub const MAX_SPAN_ROWS: u8 = 2;
pub const HOVER_SCALE: f64 = 1.02;

/// Requested footprint of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpan {
    pub cols: u8,
    pub rows: u8,
}

impl Default for GridSpan {
    fn default() -> Self {
        Self { cols: 1, rows: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BentoLayout {
    pub columns: u8,
    pub gap_px: u8,
}

impl BentoLayout {
    pub fn for_class(class: ViewportClass) -> Self {
        match class {
            ViewportClass::Mobile => Self { columns: 1, gap_px: 16 },
            ViewportClass::Tablet => Self { columns: 2, gap_px: 24 },
            ViewportClass::Desktop => Self { columns: 3, gap_px: 24 },
        }
    }

    /// Span actually used: forced to 1x1 on a single column, otherwise
    /// clipped so a card never overflows the grid.
    pub fn effective_span(&self, requested: Option<GridSpan>) -> GridSpan {
        let span = requested.unwrap_or_default();
        if self.columns <= 1 {
            return GridSpan::default();
        }
        GridSpan {
            cols: span.cols.clamp(1, self.columns),
            rows: span.rows.clamp(1, MAX_SPAN_ROWS),
        }
    }

    /// Row-major auto placement: each card takes the first free slot, scanning
    /// forward from the previous card, where its whole span fits.
    pub fn place(&self, spans: &[Option<GridSpan>]) -> Vec<Placement> {
        let columns = self.columns.max(1) as usize;
        let mut occupied: Vec<Vec<bool>> = Vec::new();
        let mut cursor = (0usize, 0usize);
        let mut placements = Vec::with_capacity(spans.len());

        for requested in spans {
            let span = self.effective_span(*requested);
            let (w, h) = (span.cols as usize, span.rows as usize);
            let (mut row, mut col) = cursor;
            loop {
                if col + w > columns {
                    row += 1;
                    col = 0;
                    continue;
                }
                if fits(&occupied, row, col, w, h) {
                    break;
                }
                col += 1;
            }
            for r in row..row + h {
                if occupied.len() <= r {
                    occupied.resize_with(r + 1, || vec![false; columns]);
                }
                for c in col..col + w {
                    occupied[r][c] = true;
                }
            }
            cursor = (row, col + w);
            placements.push(Placement {
                row: row as u16 + 1,
                column: col as u8 + 1,
                span,
            });
        }
        placements
    }

    pub fn template_columns(&self) -> String {
        format!("repeat({}, minmax(0, 1fr))", self.columns)
    }

    pub fn gap(&self) -> String {
        format!("{}px", self.gap_px)
    }
}

fn fits(occupied: &[Vec<bool>], row: usize, col: usize, w: usize, h: usize) -> bool {
    (row..row + h).all(|r| {
        occupied
            .get(r)
            .map_or(true, |cells| (col..col + w).all(|c| !cells[c]))
    })
}

/// One-based grid line position of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: u16,
    pub column: u8,
    pub span: GridSpan,
}

impl Placement {
    pub fn grid_column(&self) -> String {
        format!("{} / span {}", self.column, self.span.cols)
    }

    pub fn grid_row(&self) -> String {
        format!("{} / span {}", self.row, self.span.rows)
    }
}

/// Transform applied while hovering a card. Scaling is transform-only so the
/// neighbours never reflow; disabled on mobile and under reduced motion.
pub fn hover_transform(class: ViewportClass, motion: MotionConfig) -> Option<String> {
    (!class.is_mobile() && motion.animates()).then(|| format!("scale({HOVER_SCALE})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(cols: u8, rows: u8) -> Option<GridSpan> {
        Some(GridSpan { cols, rows })
    }

    #[test]
    fn columns_and_gaps_per_class() {
        assert_eq!(BentoLayout::for_class(ViewportClass::Mobile), BentoLayout { columns: 1, gap_px: 16 });
        assert_eq!(BentoLayout::for_class(ViewportClass::Tablet), BentoLayout { columns: 2, gap_px: 24 });
        assert_eq!(BentoLayout::for_class(ViewportClass::Desktop), BentoLayout { columns: 3, gap_px: 24 });
    }

    #[test]
    fn four_projects_on_a_wide_screen() {
        let layout = BentoLayout::for_class(ViewportClass::classify(1280.0, &Default::default()));
        let placed = layout.place(&[span(2, 1), span(1, 1), span(1, 1), span(2, 1)]);
        assert_eq!(layout.columns, 3);
        assert_eq!(placed.len(), 4);
        assert_eq!((placed[0].row, placed[0].column, placed[0].span.cols), (1, 1, 2));
        assert_eq!((placed[1].row, placed[1].column), (1, 3));
        assert_eq!((placed[2].row, placed[2].column), (2, 1));
        assert_eq!((placed[3].row, placed[3].column, placed[3].span.cols), (2, 2, 2));
        assert_eq!(placed[0].grid_column(), "1 / span 2");
        assert_eq!(placed[3].grid_row(), "2 / span 1");
        assert_eq!(layout.template_columns(), "repeat(3, minmax(0, 1fr))");
        assert_eq!(layout.gap(), "24px");
    }

    #[test]
    fn mobile_ignores_spans() {
        let layout = BentoLayout::for_class(ViewportClass::Mobile);
        let placed = layout.place(&[span(3, 2), span(2, 1), None]);
        for (i, p) in placed.iter().enumerate() {
            assert_eq!(p.span, GridSpan::default());
            assert_eq!((p.row as usize, p.column), (i + 1, 1));
        }
    }

    #[test]
    fn spans_are_clipped_to_the_column_count() {
        let layout = BentoLayout::for_class(ViewportClass::Tablet);
        let placed = layout.place(&[span(3, 1), span(1, 1)]);
        assert_eq!(placed[0].span.cols, 2);
        assert_eq!((placed[1].row, placed[1].column), (2, 1));
    }

    #[test]
    fn tall_cards_reserve_the_row_below() {
        let layout = BentoLayout::for_class(ViewportClass::Desktop);
        let placed = layout.place(&[span(1, 2), span(2, 1), span(2, 1), None]);
        assert_eq!((placed[0].row, placed[0].column), (1, 1));
        assert_eq!((placed[1].row, placed[1].column), (1, 2));
        assert_eq!((placed[2].row, placed[2].column), (2, 2));
        assert_eq!((placed[3].row, placed[3].column), (3, 1));
    }

    #[test]
    fn no_two_cards_overlap() {
        let layout = BentoLayout::for_class(ViewportClass::Desktop);
        let spans = [span(2, 2), None, span(3, 1), span(1, 2), span(2, 1), None, span(1, 1)];
        let placed = layout.place(&spans);
        let mut cells = std::collections::HashSet::new();
        for p in &placed {
            for r in 0..p.span.rows as u16 {
                for c in 0..p.span.cols {
                    assert!(cells.insert((p.row + r, p.column + c)), "overlap at {p:?}");
                    assert!(p.column + c <= layout.columns);
                }
            }
        }
    }

    #[test]
    fn hover_scale_only_where_it_cannot_misfire() {
        assert_eq!(
            hover_transform(ViewportClass::Desktop, MotionConfig::FULL).as_deref(),
            Some("scale(1.02)")
        );
        assert!(hover_transform(ViewportClass::Mobile, MotionConfig::FULL).is_none());
        assert!(hover_transform(ViewportClass::Tablet, MotionConfig::REDUCED).is_none());
    }
}
