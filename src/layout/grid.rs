use crate::config::LayoutGroup;

/// Physical position of one sub-column of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
    pub group: usize,
    pub sub_column: usize,
}

/// Immutable grid geometry produced by [`GridBuilder::finish`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridGeometry {
    pub cells: Vec<CellPos>,
}

impl GridGeometry {
    /// (row, col) of every cell, row-major.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().map(|c| (c.row, c.col))
    }
}

/// Left-to-right, top-to-bottom fill. Rows only break after a group with `newline`.
#[derive(Debug, Default)]
pub struct GridBuilder {
    row: usize,
    col: usize,
    cells: Vec<CellPos>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `sub_columns` cells for group `group`, then break the row if asked.
    pub fn push_group(&mut self, group: usize, sub_columns: usize, newline: bool) {
        for sub_column in 0..sub_columns {
            self.cells.push(CellPos {
                row: self.row,
                col: self.col,
                group,
                sub_column,
            });
            self.col += 1;
        }
        if newline {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn finish(self) -> GridGeometry {
        GridGeometry { cells: self.cells }
    }
}

/// Geometry for a whole layout.
pub fn build_grid<'a>(groups: impl IntoIterator<Item = &'a LayoutGroup>) -> GridGeometry {
    let mut builder = GridBuilder::new();
    for (i, group) in groups.into_iter().enumerate() {
        builder.push_group(i, group.sub_columns(), group.newline);
    }
    builder.finish()
}
