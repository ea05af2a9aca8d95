//! Keyword-cascade classifier.
//!
//! The input is lower-cased once, then each rule's predicate is tried in
//! table order; the first hit decides the result. Matching is plain
//! substring containment, so `"or"` also hits inside `"corrupt"`.
//! Reordering [`DEFAULT_RULES`] changes results.

use fallacy_schema::{CategoryId, ClassificationResult};
use tracing::debug;

const PERSONAL_PRONOUNS: &[&str] = &["you", "your", "he", "she", "they"];
const DISCREDITING_PHRASES: &[&str] = &["can't trust", "not even", "never", "just"];
const CAUSE_MARKERS: &[&str] = &["because"];
const CAUSAL_CONNECTORS: &[&str] = &["therefore", "so", "thus", "caused"];
const DILEMMA_PHRASES: &[&str] = &["either", "or", "only two", "must be", "with us or against"];
const EMOTIONAL_PHRASES: &[&str] = &["think of", "children", "family", "heartless", "care about"];
const SWEEPING_WORDS: &[&str] = &["all", "every", "everyone", "no one", "always", "never"];

/// Condition over case-folded text.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    Always,
    /// At least one phrase occurs as a substring.
    AnyOf(&'static [&'static str]),
    /// Every nested predicate holds.
    AllOf(&'static [Predicate]),
}

impl Predicate {
    pub fn matches(&self, folded: &str) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::AnyOf(phrases) => phrases.iter().any(|p| folded.contains(p)),
            Predicate::AllOf(parts) => parts.iter().all(|p| p.matches(folded)),
        }
    }
}

/// A predicate and the fixed verdict it produces.
#[derive(Debug, Clone)]
pub struct Rule {
    pub category: CategoryId,
    pub confidence: f64,
    pub explanation: &'static str,
    pub predicate: Predicate,
}

impl Rule {
    pub fn matches(&self, folded: &str) -> bool {
        self.predicate.matches(folded)
    }

    pub fn verdict(&self) -> ClassificationResult {
        ClassificationResult {
            category_id: self.category.clone(),
            confidence: self.confidence,
            explanation: self.explanation.to_string(),
        }
    }
}

pub static DEFAULT_RULES: [Rule; 5] = [
    Rule {
        category: CategoryId::AdHominem,
        confidence: 0.82,
        explanation: "This argument attacks the person rather than addressing their point.",
        predicate: Predicate::AllOf(&[
            Predicate::AnyOf(PERSONAL_PRONOUNS),
            Predicate::AnyOf(DISCREDITING_PHRASES),
        ]),
    },
    Rule {
        category: CategoryId::FalseCausality,
        confidence: 0.76,
        explanation: "This argument assumes causation from correlation without evidence.",
        predicate: Predicate::AllOf(&[
            Predicate::AnyOf(CAUSE_MARKERS),
            Predicate::AnyOf(CAUSAL_CONNECTORS),
        ]),
    },
    Rule {
        category: CategoryId::FalseDilemma,
        confidence: 0.79,
        explanation: "This argument presents only two options when more exist.",
        predicate: Predicate::AnyOf(DILEMMA_PHRASES),
    },
    Rule {
        category: CategoryId::AppealToEmotion,
        confidence: 0.74,
        explanation: "This argument manipulates emotions rather than using logic.",
        predicate: Predicate::AnyOf(EMOTIONAL_PHRASES),
    },
    Rule {
        category: CategoryId::FaultyGeneralization,
        confidence: 0.71,
        explanation: "This argument makes sweeping claims from limited evidence.",
        predicate: Predicate::AnyOf(SWEEPING_WORDS),
    },
];

pub static FALLBACK_RULE: Rule = Rule {
    category: CategoryId::AppealToEmotion,
    confidence: 0.68,
    explanation: "This argument may rely on emotional appeal over logical reasoning.",
    predicate: Predicate::Always,
};

/// Ordered rules plus the terminal fallback.
///
/// The fallback's predicate is never consulted; it is returned whenever no
/// earlier rule matches.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    rules: &'static [Rule],
    fallback: &'static Rule,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(&DEFAULT_RULES, &FALLBACK_RULE)
    }
}

impl RuleSet {
    pub const fn new(rules: &'static [Rule], fallback: &'static Rule) -> Self {
        Self { rules, fallback }
    }

    /// Full evaluation order, fallback last.
    pub fn iter(&self) -> impl Iterator<Item = &'static Rule> {
        self.rules.iter().chain(std::iter::once(self.fallback))
    }

    pub fn len(&self) -> usize {
        self.rules.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// First matching rule and its position in [`RuleSet::iter`] order.
    pub fn first_match(&self, text: &str) -> (usize, &'static Rule) {
        let folded = text.to_lowercase();
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(&folded))
            .unwrap_or((self.rules.len(), self.fallback))
    }
}

/// Seam between rendering clients and whatever decides the category.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    /// Never fails; every input yields a result.
    fn classify(&self, text: &str) -> ClassificationResult;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier {
    rules: RuleSet,
}

impl KeywordClassifier {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Classifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    fn classify(&self, text: &str) -> ClassificationResult {
        let (position, rule) = self.rules.first_match(text);
        debug!(
            position,
            category = %rule.category,
            confidence = rule.confidence,
            fallback = (position == self.rules.len() - 1),
            "classified input"
        );
        rule.verdict()
    }
}

/// Classify with the built-in rule table.
pub fn classify(text: &str) -> ClassificationResult {
    KeywordClassifier::default().classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_of_is_substring_containment() {
        let p = Predicate::AnyOf(&["thus"]);
        assert!(p.matches("enthusiastic"));
        assert!(!p.matches("thu s"));
    }

    #[test]
    fn all_of_requires_every_part() {
        let p = Predicate::AllOf(&[Predicate::AnyOf(&["a"]), Predicate::AnyOf(&["z"])]);
        assert!(p.matches("az"));
        assert!(!p.matches("aa"));
        assert!(Predicate::AllOf(&[]).matches(""));
    }

    #[test]
    fn always_matches_empty() {
        assert!(Predicate::Always.matches(""));
    }

    #[test]
    fn rule_order_is_fixed() {
        let order: Vec<(&str, f64)> = RuleSet::default()
            .iter()
            .map(|r| (r.category.as_str(), r.confidence))
            .collect();
        assert_eq!(
            order,
            vec![
                ("ad hominem", 0.82),
                ("false causality", 0.76),
                ("false dilemma", 0.79),
                ("appeal to emotion", 0.74),
                ("faulty generalization", 0.71),
                ("appeal to emotion", 0.68),
            ]
        );
    }

    #[test]
    fn fallback_is_terminal_and_unconditional() {
        let rules = RuleSet::default();
        let last = rules.iter().last().unwrap();
        assert!(matches!(last.predicate, Predicate::Always));
        assert_eq!(rules.len(), 6);
        assert_eq!(rules.first_match("").0, 5);
    }

    #[test]
    fn first_match_reports_position() {
        let rules = RuleSet::default();
        assert_eq!(rules.first_match("you never listen").0, 0);
        assert_eq!(rules.first_match("because of this, therefore that").0, 1);
        assert_eq!(rules.first_match("either way").0, 2);
        assert_eq!(rules.first_match("my family").0, 3);
        assert_eq!(rules.first_match("all birds").0, 4);
    }

    #[test]
    fn custom_rule_set_is_honoured() {
        static ONLY: [Rule; 1] = [Rule {
            category: CategoryId::CircularReasoning,
            confidence: 0.5,
            explanation: "circular",
            predicate: Predicate::AnyOf(&["says so"]),
        }];
        let classifier = KeywordClassifier::new(RuleSet::new(&ONLY, &FALLBACK_RULE));
        let hit = classifier.classify("It is true because it says so.");
        assert_eq!(hit.category_id, CategoryId::CircularReasoning);
        let miss = classifier.classify("you never just");
        assert_eq!(miss.category_id, CategoryId::AppealToEmotion);
        assert_eq!(miss.confidence, 0.68);
    }

    #[test]
    fn explanations_come_from_rules() {
        let result = classify("Think of the family");
        assert_eq!(result.category_id, CategoryId::AppealToEmotion);
        assert_eq!(
            result.explanation,
            "This argument manipulates emotions rather than using logic."
        );
    }
}
