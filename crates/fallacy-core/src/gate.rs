use fallacy_schema::ClassificationResult;
use thiserror::Error;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GateError {
    #[error("confidence threshold must be within [0.0, 1.0], got {0}")]
    OutOfRange(f64),
}

/// Minimum confidence a result needs before it is shown or recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdGate {
    threshold: f64,
}

/// Result of passing a classification through the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateDecision {
    Accepted,
    BelowThreshold { confidence: f64, threshold: f64 },
}

impl GateDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateDecision::Accepted)
    }
}

impl Default for ThresholdGate {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl ThresholdGate {
    pub fn new(threshold: f64) -> Result<Self, GateError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(GateError::OutOfRange(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Inclusive: a confidence equal to the threshold is accepted.
    pub fn evaluate(&self, result: &ClassificationResult) -> GateDecision {
        if result.confidence >= self.threshold {
            GateDecision::Accepted
        } else {
            GateDecision::BelowThreshold {
                confidence: result.confidence,
                threshold: self.threshold,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fallacy_schema::CategoryId;

    fn result(confidence: f64) -> ClassificationResult {
        ClassificationResult {
            category_id: CategoryId::FalseDilemma,
            confidence,
            explanation: String::new(),
        }
    }

    #[test]
    fn default_threshold_is_half() {
        assert_eq!(ThresholdGate::default().threshold(), 0.5);
    }

    #[test]
    fn boundary_is_inclusive() {
        let gate = ThresholdGate::new(0.79).unwrap();
        assert_eq!(gate.evaluate(&result(0.79)), GateDecision::Accepted);
    }

    #[test]
    fn below_threshold_carries_both_values() {
        let gate = ThresholdGate::new(0.8).unwrap();
        assert_eq!(
            gate.evaluate(&result(0.68)),
            GateDecision::BelowThreshold {
                confidence: 0.68,
                threshold: 0.8
            }
        );
        assert!(!gate.evaluate(&result(0.68)).is_accepted());
    }

    #[test]
    fn extremes_are_valid() {
        assert!(ThresholdGate::new(0.0)
            .unwrap()
            .evaluate(&result(0.0))
            .is_accepted());
        assert!(!ThresholdGate::new(1.0)
            .unwrap()
            .evaluate(&result(0.82))
            .is_accepted());
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(ThresholdGate::new(1.5), Err(GateError::OutOfRange(1.5)));
        assert_eq!(ThresholdGate::new(-0.1), Err(GateError::OutOfRange(-0.1)));
        assert!(ThresholdGate::new(f64::NAN).is_err());
    }

    #[test]
    fn error_message_names_value() {
        let err = ThresholdGate::new(2.0).unwrap_err();
        assert!(err.to_string().contains("got 2"));
    }
}
