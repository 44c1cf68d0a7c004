use std::fmt;

/// Pipeline step a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Layout,
    Plot,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Layout => "setLayout",
            Stage::Plot => "plotData",
        }
    }
}

/// A recovered per-cell or per-legend failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub stage: Stage,
    pub row: usize,
    pub col: usize,
    pub message: String,
}

impl Diagnostic {
    /// Record and log in one go.
    pub fn report(stage: Stage, row: usize, col: usize, message: String) -> Self {
        tracing::warn!("[{}] row:{row}, col:{col}: {message}", stage.label());
        Self { stage, row, col, message }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] row:{}, col:{}: {}", self.stage.label(), self.row, self.col, self.message)
    }
}
