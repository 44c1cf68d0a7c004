/// Numeric table of one log topic. Column 0 is always the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicTable {
    /// Row-major samples, `width` values per row.
    values: Vec<f64>,
    width: usize,
}

impl TopicTable {
    /// Build from rows that all have the same length (time + values).
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, String> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if width == 0 && !rows.is_empty() {
            return Err("empty row".to_string());
        }
        let mut values = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(format!("row {i} has {} columns, expected {width}", row.len()));
            }
            values.extend(row);
        }
        Ok(Self { values, width })
    }

    pub fn row_count(&self) -> usize {
        if self.width == 0 { 0 } else { self.values.len() / self.width }
    }

    /// Number of value columns, excluding the time column.
    pub fn value_width(&self) -> usize {
        self.width.saturating_sub(1)
    }

    pub fn times(&self) -> Vec<f64> {
        self.values.iter().step_by(self.width.max(1)).copied().collect()
    }

    /// Value column `column` (0 = first column after time).
    pub fn value_column(&self, column: usize) -> Option<Vec<f64>> {
        if column >= self.value_width() {
            return None;
        }
        Some(
            self.values
                .chunks_exact(self.width)
                .map(|row| row[column + 1])
                .collect(),
        )
    }
}
