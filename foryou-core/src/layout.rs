use crate::model::SaveableNewsResource;

pub const COMPACT_MAX_WIDTH: f32 = 600.0;
pub const MEDIUM_MAX_WIDTH: f32 = 840.0;
pub const COLUMN_UNIT_WIDTH: f32 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowWidthClass {
    Compact,
    Medium,
    Expanded,
}

impl WindowWidthClass {
    pub fn from_width(width: f32) -> Self {
        Self::from_width_with(width, COMPACT_MAX_WIDTH, MEDIUM_MAX_WIDTH)
    }

    pub fn from_width_with(width: f32, compact_max: f32, medium_max: f32) -> Self {
        if width < compact_max {
            WindowWidthClass::Compact
        } else if width < medium_max {
            WindowWidthClass::Medium
        } else {
            WindowWidthClass::Expanded
        }
    }
}

/// Columns of the feed grid. Narrow layouts always get one column.
pub fn number_of_columns(class: WindowWidthClass, available_width: f32) -> usize {
    number_of_columns_with(class, available_width, COLUMN_UNIT_WIDTH)
}

pub fn number_of_columns_with(class: WindowWidthClass, available_width: f32, unit: f32) -> usize {
    match class {
        WindowWidthClass::Compact | WindowWidthClass::Medium => 1,
        WindowWidthClass::Expanded => {
            if !(available_width.is_finite() && unit > 0.0) {
                return 1;
            }
            ((available_width / unit).floor() as usize).max(1)
        }
    }
}

/// Splits the feed into rows of exactly `columns` slots, in order. The last
/// row is padded with `None` so the grid stays aligned.
pub fn chunk_feed(
    feed: &[SaveableNewsResource],
    columns: usize,
) -> Vec<Vec<Option<SaveableNewsResource>>> {
    let columns = columns.max(1);
    feed.chunks(columns)
        .map(|chunk| {
            let mut row: Vec<Option<SaveableNewsResource>> =
                chunk.iter().cloned().map(Some).collect();
            row.resize(columns, None);
            row
        })
        .collect()
}
