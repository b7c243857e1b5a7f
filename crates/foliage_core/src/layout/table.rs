//! Table layout with AutoSize, Absolute and Percent tracks.

use std::collections::HashSet;

use super::{BoundsSpecified, LayoutElement};
use crate::error::{LayoutError, LayoutResult};
use crate::geometry::{Rect, Size};

/// How a row or column is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeType {
    /// Fit the largest preferred size in the track.
    #[default]
    AutoSize,
    /// Fixed size in pixels.
    Absolute,
    /// Share of the space left after Absolute and AutoSize tracks.
    Percent,
}

/// Sizing of one row or column.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackStyle {
    size_type: SizeType,
    size: f32,
}

/// Sizing of one row.
pub type RowStyle = TrackStyle;
/// Sizing of one column.
pub type ColumnStyle = TrackStyle;

impl TrackStyle {
    /// Creates a track style.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeTrackSize`] for a negative or NaN size.
    pub fn new(size_type: SizeType, size: f32) -> LayoutResult<Self> {
        check_size(size)?;
        Ok(Self { size_type, size })
    }

    /// A track sized to its content.
    #[must_use]
    pub const fn auto() -> Self {
        Self {
            size_type: SizeType::AutoSize,
            size: 0.0,
        }
    }

    /// A fixed-size track.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeTrackSize`] for a negative size.
    pub fn absolute(size: f32) -> LayoutResult<Self> {
        Self::new(SizeType::Absolute, size)
    }

    /// A proportional track with the given weight.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeTrackSize`] for a negative weight.
    pub fn percent(weight: f32) -> LayoutResult<Self> {
        Self::new(SizeType::Percent, weight)
    }

    /// Sizing mode.
    #[must_use]
    pub const fn size_type(&self) -> SizeType {
        self.size_type
    }

    /// Pixel size (Absolute) or weight (Percent). Ignored for AutoSize.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Changes the sizing mode.
    pub fn set_size_type(&mut self, size_type: SizeType) {
        self.size_type = size_type;
    }

    /// Changes the size. The old value is kept on error.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NegativeTrackSize`] for a negative or NaN size.
    pub fn set_size(&mut self, size: f32) -> LayoutResult<()> {
        check_size(size)?;
        self.size = size;
        Ok(())
    }
}

fn check_size(size: f32) -> LayoutResult<()> {
    if size >= 0.0 {
        Ok(())
    } else {
        tracing::warn!(size, "rejecting negative track size");
        Err(LayoutError::NegativeTrackSize { size })
    }
}

/// Zero-based table cell address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    /// Column index.
    pub column: usize,
    /// Row index.
    pub row: usize,
}

impl CellPosition {
    /// Creates a cell address.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }
}

/// Grid engine used by table panels.
///
/// The column count is the number of column styles (at least one). Rows
/// grow as needed; rows and columns without a style are AutoSize.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableLayout {
    columns: Vec<ColumnStyle>,
    rows: Vec<RowStyle>,
}

impl TableLayout {
    /// Creates a table with the given track styles.
    #[must_use]
    pub fn new(columns: Vec<ColumnStyle>, rows: Vec<RowStyle>) -> Self {
        Self { columns, rows }
    }

    /// Column styles.
    #[must_use]
    pub fn columns(&self) -> &[ColumnStyle] {
        &self.columns
    }

    /// Row styles.
    #[must_use]
    pub fn rows(&self) -> &[RowStyle] {
        &self.rows
    }

    /// Number of columns cells are placed into.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len().max(1)
    }

    /// Appends a column.
    pub fn add_column(&mut self, style: ColumnStyle) {
        self.columns.push(style);
    }

    /// Appends a row.
    pub fn add_row(&mut self, style: RowStyle) {
        self.rows.push(style);
    }

    /// Replaces a column style.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TrackOutOfRange`] if `index` has no style.
    pub fn set_column_style(&mut self, index: usize, style: ColumnStyle) -> LayoutResult<()> {
        let count = self.columns.len();
        let slot = self
            .columns
            .get_mut(index)
            .ok_or(LayoutError::TrackOutOfRange { index, count })?;
        *slot = style;
        Ok(())
    }

    /// Replaces a row style.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TrackOutOfRange`] if `index` has no style.
    pub fn set_row_style(&mut self, index: usize, style: RowStyle) -> LayoutResult<()> {
        let count = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or(LayoutError::TrackOutOfRange { index, count })?;
        *slot = style;
        Ok(())
    }

    /// Cell of every element (None for hidden ones).
    ///
    /// Explicit cells are reserved first, in collection order; an explicit
    /// cell outside the columns, beyond the addressable rows or already
    /// taken falls back to automatic placement. Remaining elements take the
    /// next free cell in reading order.
    #[must_use]
    pub fn assign_cells<E: LayoutElement>(&self, elements: &[E]) -> Vec<Option<CellPosition>> {
        let columns = self.column_count();
        let mut taken: HashSet<usize> = HashSet::with_capacity(elements.len());
        let mut cells = vec![None; elements.len()];
        let index_of = |cell: CellPosition| {
            cell.row
                .checked_mul(columns)
                .and_then(|start| start.checked_add(cell.column))
        };

        for (i, element) in elements.iter().enumerate() {
            if !element.is_visible() {
                continue;
            }
            let Some(cell) = element.cell() else { continue };
            if cell.column >= columns {
                continue;
            }
            let Some(index) = index_of(cell) else {
                tracing::debug!(row = cell.row, "table cell out of range, placing automatically");
                continue;
            };
            if taken.insert(index) {
                cells[i] = Some(cell);
            }
        }

        let mut next = 0;
        for (i, element) in elements.iter().enumerate() {
            if !element.is_visible() || cells[i].is_some() {
                continue;
            }
            while taken.contains(&next) {
                next += 1;
            }
            taken.insert(next);
            cells[i] = Some(CellPosition::new(next % columns, next / columns));
            next += 1;
        }

        cells
    }

    /// Arranges `elements` inside `container`. Each element fills its cell,
    /// less its margin.
    pub fn layout<E: LayoutElement>(&self, container: Rect, elements: &mut [E]) {
        let cells = self.assign_cells(elements);
        let preferred: Vec<Size> = elements
            .iter()
            .map(|e| if e.is_visible() { e.preferred_size(container.size()) } else { Size::ZERO })
            .collect();

        let (widths, heights) = self.measure(elements, &cells, &preferred, container.size());
        let xs = offsets(container.x, &widths);
        let ys = offsets(container.y, &heights);

        for (element, cell) in elements.iter_mut().zip(&cells) {
            let Some(cell) = cell else { continue };
            let margin = element.margin();
            let bounds = Rect::new(
                xs[cell.column],
                ys[cell.row],
                widths[cell.column],
                heights[cell.row],
            )
            .deflate(margin);
            element.set_bounds(bounds, BoundsSpecified::NONE);
        }
    }

    /// Sum of Absolute and AutoSize tracks; Percent tracks contribute
    /// nothing.
    #[must_use]
    pub fn preferred_size<E: LayoutElement>(&self, elements: &[E], proposed: Size) -> Size {
        let cells = self.assign_cells(elements);
        let preferred: Vec<Size> = elements
            .iter()
            .map(|e| if e.is_visible() { e.preferred_size(proposed) } else { Size::ZERO })
            .collect();

        let (widths, heights) = self.measure(elements, &cells, &preferred, Size::ZERO);
        Size::new(widths.iter().sum(), heights.iter().sum())
    }

    fn measure<E: LayoutElement>(
        &self,
        elements: &[E],
        cells: &[Option<CellPosition>],
        preferred: &[Size],
        available: Size,
    ) -> (Vec<i32>, Vec<i32>) {
        let columns = self.column_count();
        let rows = cells
            .iter()
            .flatten()
            .map(|cell| cell.row + 1)
            .max()
            .unwrap_or(0)
            .max(self.rows.len());

        let mut content_widths = vec![0; columns];
        let mut content_heights = vec![0; rows];
        for ((element, cell), size) in elements.iter().zip(cells).zip(preferred) {
            let Some(cell) = cell else { continue };
            let margin = element.margin();
            content_widths[cell.column] = content_widths[cell.column].max(size.width + margin.horizontal());
            content_heights[cell.row] = content_heights[cell.row].max(size.height + margin.vertical());
        }

        (
            distribute(&self.columns, &content_widths, available.width),
            distribute(&self.rows, &content_heights, available.height),
        )
    }
}

/// Sizes one axis. `content` has one entry per track; tracks past the end
/// of `styles` are AutoSize.
///
/// Percent tracks split what is left after the fixed tracks in proportion
/// to their weight over the sum of all weights. When nothing is left they
/// get zero, never a negative size. Rounding leftovers go to the last
/// Percent track.
fn distribute(styles: &[TrackStyle], content: &[i32], available: i32) -> Vec<i32> {
    let style_of = |i: usize| styles.get(i).copied().unwrap_or_default();

    let mut sizes: Vec<i32> = (0..content.len())
        .map(|i| {
            let style = style_of(i);
            match style.size_type() {
                SizeType::AutoSize => content[i],
                SizeType::Absolute => style.size().round() as i32,
                SizeType::Percent => 0,
            }
        })
        .collect();

    let percent: Vec<usize> = (0..content.len())
        .filter(|&i| style_of(i).size_type() == SizeType::Percent)
        .collect();
    let total_weight: f32 = percent.iter().map(|&i| style_of(i).size()).sum();
    let remaining = available - sizes.iter().sum::<i32>();

    if percent.is_empty() || remaining <= 0 || total_weight <= 0.0 {
        return sizes;
    }

    let mut assigned = 0;
    for &i in &percent {
        let share = (remaining as f32 * style_of(i).size() / total_weight).floor() as i32;
        sizes[i] = share.max(0);
        assigned += sizes[i];
    }
    if let Some(&last) = percent.iter().rev().find(|&&i| style_of(i).size() > 0.0) {
        sizes[last] += (remaining - assigned).max(0);
    }

    sizes
}

fn offsets(origin: i32, sizes: &[i32]) -> Vec<i32> {
    sizes
        .iter()
        .scan(origin, |cursor, size| {
            let start = *cursor;
            *cursor += size;
            Some(start)
        })
        .collect()
}
