// Status indicator domain models

/// The per-subject badges derived from the latest sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    EogActive,
    SignalOk,
    EyeActivity,
    FacElevated,
}

impl IndicatorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EogActive => "EOG",
            Self::SignalOk => "Signal",
            Self::EyeActivity => "Eye",
            Self::FacElevated => "FAC",
        }
    }
}

/// Answer to an indicator's question for one subject. `Unknown` means the
/// metric was never observed; it is distinct from a measured negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    Yes,
    No,
    Unknown,
}

/// One evaluated indicator, paired with the raw metric it was computed from
/// so the board can display both.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusIndicator {
    pub subject: String,
    pub kind: IndicatorKind,
    pub reading: Reading,
    pub metric: Option<f64>,
}
