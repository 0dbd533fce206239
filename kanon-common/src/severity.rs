//! k-anonymity severity classification
//!
//! The thresholds live here so every consumer of the KPI summary shares
//! them instead of re-deriving the bands in the display layer.

/// Highest k-anonymity still classified critical
const CRITICAL_MAX: u32 = 1;

/// Highest k-anonymity still classified a warning
const WARNING_MAX: u32 = 4;

/// Privacy severity band for a k-anonymity value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Good,
}

impl Severity {
    /// Classify a k-anonymity value: <= 1 critical, <= 4 warning, else
    /// good.
    pub fn classify(k_anonymity: u32) -> Self {
        if k_anonymity <= CRITICAL_MAX {
            Severity::Critical
        } else if k_anonymity <= WARNING_MAX {
            Severity::Warning
        } else {
            Severity::Good
        }
    }

    /// Label used by the report renderer
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Good => "good",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_bands() {
        assert_eq!(Severity::classify(0), Severity::Critical);
        assert_eq!(Severity::classify(1), Severity::Critical);
        assert_eq!(Severity::classify(2), Severity::Warning);
        assert_eq!(Severity::classify(4), Severity::Warning);
        assert_eq!(Severity::classify(5), Severity::Good);
        assert_eq!(Severity::classify(100), Severity::Good);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Severity::classify(1).label(), "critical");
        assert_eq!(Severity::classify(3).label(), "warning");
        assert_eq!(Severity::classify(10).label(), "good");
    }
}
