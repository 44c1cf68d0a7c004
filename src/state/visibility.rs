use std::collections::BTreeSet;

/// Context-menu actions on a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityAction {
    HidePlot { row: usize, col: usize },
    HideRow(usize),
    HideColumn(usize),
    HideExceptPlot { row: usize, col: usize },
    HideExceptRow(usize),
    HideExceptColumn(usize),
    Restore,
}

/// Which grid cells are currently shown. Hidden cells keep their data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridVisibility {
    cells: Vec<(usize, usize)>,
    hidden: BTreeSet<(usize, usize)>,
}

impl GridVisibility {
    pub fn new(cells: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            hidden: BTreeSet::new(),
        }
    }

    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        !self.hidden.contains(&(row, col))
    }

    pub fn visible_count(&self) -> usize {
        self.cells.len() - self.hidden.len()
    }

    fn hide_where(&mut self, pred: impl Fn(usize, usize) -> bool) {
        for &(r, c) in &self.cells {
            if pred(r, c) {
                self.hidden.insert((r, c));
            }
        }
    }

    pub fn apply(&mut self, action: VisibilityAction) {
        match action {
            VisibilityAction::HidePlot { row, col } => self.hide_where(|r, c| r == row && c == col),
            VisibilityAction::HideRow(row) => self.hide_where(|r, _| r == row),
            VisibilityAction::HideColumn(col) => self.hide_where(|_, c| c == col),
            VisibilityAction::HideExceptPlot { row, col } => self.hide_where(|r, c| r != row || c != col),
            VisibilityAction::HideExceptRow(row) => self.hide_where(|r, _| r != row),
            VisibilityAction::HideExceptColumn(col) => self.hide_where(|_, c| c != col),
            VisibilityAction::Restore => self.hidden.clear(),
        }
    }

    /// Visible cells grouped by row, rows without visible cells dropped.
    pub fn visible_rows(&self) -> Vec<Vec<(usize, usize)>> {
        let mut rows: Vec<Vec<(usize, usize)>> = Vec::new();
        let mut current: Option<usize> = None;
        for &(r, c) in &self.cells {
            if !self.is_visible(r, c) {
                continue;
            }
            if current != Some(r) {
                rows.push(Vec::new());
                current = Some(r);
            }
            if let Some(last) = rows.last_mut() {
                last.push((r, c));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridVisibility {
        // row 0: 3 cells, row 1: 2 cells
        GridVisibility::new([(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)])
    }

    #[test]
    fn hide_column_spans_rows() {
        let mut v = grid();
        v.apply(VisibilityAction::HideColumn(1));
        assert_eq!(v.visible_rows(), vec![vec![(0, 0), (0, 2)], vec![(1, 0)]]);
    }

    #[test]
    fn hide_row_drops_empty_row() {
        let mut v = grid();
        v.apply(VisibilityAction::HideRow(0));
        assert_eq!(v.visible_rows(), vec![vec![(1, 0), (1, 1)]]);
    }

    #[test]
    fn except_actions_and_restore() {
        let mut v = grid();
        v.apply(VisibilityAction::HideExceptPlot { row: 1, col: 1 });
        assert_eq!(v.visible_count(), 1);
        assert!(v.is_visible(1, 1));
        v.apply(VisibilityAction::Restore);
        assert_eq!(v.visible_count(), 5);
        v.apply(VisibilityAction::HideExceptColumn(0));
        assert_eq!(v.visible_rows(), vec![vec![(0, 0)], vec![(1, 0)]]);
        v.apply(VisibilityAction::Restore);
        v.apply(VisibilityAction::HideExceptRow(1));
        v.apply(VisibilityAction::HidePlot { row: 1, col: 0 });
        assert_eq!(v.visible_rows(), vec![vec![(1, 1)]]);
    }
}
