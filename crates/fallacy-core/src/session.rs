use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fallacy_schema::{ClassificationResult, HistoryEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::display_name;
use crate::classifier::Classifier;
use crate::gate::{GateDecision, ThresholdGate};

/// History of one interactive session. Each caller owns its own instance;
/// nothing here is shared between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSession {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    history: Vec<HistoryEntry>,
}

/// What happened to one submitted text.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// Passed the gate and was appended to history at `entry_index`.
    Accepted {
        result: ClassificationResult,
        display_name: String,
        entry_index: usize,
    },
    /// Classified, but not shown or recorded.
    BelowThreshold {
        result: ClassificationResult,
        threshold: f64,
    },
}

impl Analysis {
    pub fn result(&self) -> &ClassificationResult {
        match self {
            Analysis::Accepted { result, .. } | Analysis::BelowThreshold { result, .. } => result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryStats {
    pub total: usize,
    pub average_confidence: f64,
    pub most_common: String,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            created_at: Utc::now(),
            history: Vec::new(),
        }
    }

    /// Classify `text`, gate it, and record it when accepted.
    pub fn analyze(
        &mut self,
        text: &str,
        classifier: &dyn Classifier,
        gate: &ThresholdGate,
    ) -> Analysis {
        let result = classifier.classify(text);
        match gate.evaluate(&result) {
            GateDecision::Accepted => {
                let entry_index = self.record(text, &result);
                let display_name = self.history[entry_index].category_display_name.clone();
                Analysis::Accepted {
                    result,
                    display_name,
                    entry_index,
                }
            }
            GateDecision::BelowThreshold { threshold, .. } => {
                debug!(
                    session_id = %self.session_id,
                    confidence = result.confidence,
                    threshold,
                    "result below threshold, not recorded"
                );
                Analysis::BelowThreshold { result, threshold }
            }
        }
    }

    /// Append an entry for `result` and return its index.
    pub fn record(&mut self, text: &str, result: &ClassificationResult) -> usize {
        let name = display_name(&result.category_id);
        self.history.push(HistoryEntry::new(text, name, result.confidence));
        debug!(
            session_id = %self.session_id,
            category = %result.category_id,
            entries = self.history.len(),
            "recorded analysis"
        );
        self.history.len() - 1
    }

    pub fn clear(&mut self) {
        let dropped = self.history.len();
        self.history.clear();
        info!(session_id = %self.session_id, dropped, "session history cleared");
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter().rev().take(limit)
    }

    pub fn stats(&self) -> Option<HistoryStats> {
        if self.history.is_empty() {
            return None;
        }
        let total = self.history.len();
        let sum: f64 = self.history.iter().map(|e| e.confidence).sum();
        let most_common = self
            .distribution()
            .into_iter()
            .fold(None::<(String, usize)>, |best, (name, count)| match best {
                Some((best_name, best_count))
                    if best_count > count || (best_count == count && best_name <= name) =>
                {
                    Some((best_name, best_count))
                }
                _ => Some((name, count)),
            })
            .map(|(name, _)| name)
            .unwrap_or_default();
        Some(HistoryStats {
            total,
            average_confidence: sum / total as f64,
            most_common,
        })
    }

    /// `(display name, count)` by descending count; ties keep first-seen order.
    pub fn distribution(&self) -> Vec<(String, usize)> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.history {
            let name = entry.category_display_name.as_str();
            let count = counts.entry(name).or_insert(0);
            if *count == 0 {
                order.push(name);
            }
            *count += 1;
        }
        let mut out: Vec<(String, usize)> = order
            .into_iter()
            .map(|name| (name.to_string(), counts[name]))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// Confidence counts in `bins` equal-width buckets over [0, 1].
    /// A confidence of exactly 1.0 lands in the last bucket.
    pub fn confidence_histogram(&self, bins: usize) -> Vec<usize> {
        let mut buckets = vec![0; bins];
        if bins == 0 {
            return buckets;
        }
        for entry in &self.history {
            let scaled = (entry.confidence.clamp(0.0, 1.0) * bins as f64) as usize;
            buckets[scaled.min(bins - 1)] += 1;
        }
        buckets
    }
}
