//! Read-only catalog of recognised fallacy patterns.
//!
//! Entries are kept in definition order; that order is what listing and
//! search return. Lookups go through [`CategoryId`], whose variant indexes
//! the static table directly.

use fallacy_schema::{CategoryId, FallacyCategory};

static CATALOG: [FallacyCategory; 8] = [
    FallacyCategory {
        id: CategoryId::AdHominem,
        display_name: "Ad Hominem",
        definition: "Attacking the person making an argument rather than the argument itself.",
        example: "You can't trust John's opinion on climate change because he's not a scientist.",
        why_problematic: "Dismisses valid arguments based on irrelevant personal characteristics.",
    },
    FallacyCategory {
        id: CategoryId::FalseCausality,
        display_name: "False Causality",
        definition: "Assuming that because one event followed another, the first caused the second.",
        example: "I wore my lucky socks and won the game, so my socks caused the victory.",
        why_problematic: "Confuses correlation with causation, ignoring other factors.",
    },
    FallacyCategory {
        id: CategoryId::FalseDilemma,
        display_name: "False Dilemma",
        definition: "Presenting only two options when more alternatives exist.",
        example: "You're either with us or against us.",
        why_problematic: "Oversimplifies complex situations and eliminates nuanced positions.",
    },
    FallacyCategory {
        id: CategoryId::AppealToEmotion,
        display_name: "Appeal to Emotion",
        definition: "Manipulating emotions rather than using valid reasoning.",
        example: "Think of the children! We must pass this law immediately.",
        why_problematic: "Bypasses logical thinking and can lead to poor decisions.",
    },
    FallacyCategory {
        id: CategoryId::FaultyGeneralization,
        display_name: "Faulty Generalization",
        definition: "Drawing broad conclusions from insufficient evidence.",
        example: "I met two rude people from that city, so everyone there must be rude.",
        why_problematic: "Ignores diversity and makes unfair assumptions about entire groups.",
    },
    FallacyCategory {
        id: CategoryId::AdPopulum,
        display_name: "Ad Populum",
        definition: "Arguing something is true or good because it's popular.",
        example: "Everyone's buying this product, so it must be the best.",
        why_problematic: "Popularity doesn't determine truth or quality.",
    },
    FallacyCategory {
        id: CategoryId::CircularReasoning,
        display_name: "Circular Reasoning",
        definition: "Using the conclusion as a premise in the argument.",
        example: "The Bible is true because it says so in the Bible.",
        why_problematic: "Provides no real justification for the conclusion.",
    },
    FallacyCategory {
        id: CategoryId::FallacyOfExtension,
        display_name: "Straw Man",
        definition: "Misrepresenting an opponent's argument to make it easier to attack.",
        example: "You say we should have some gun control, so you want to ban all guns.",
        why_problematic: "Doesn't address the actual argument being made.",
    },
];

fn slot(id: &CategoryId) -> Option<usize> {
    match id {
        CategoryId::AdHominem => Some(0),
        CategoryId::FalseCausality => Some(1),
        CategoryId::FalseDilemma => Some(2),
        CategoryId::AppealToEmotion => Some(3),
        CategoryId::FaultyGeneralization => Some(4),
        CategoryId::AdPopulum => Some(5),
        CategoryId::CircularReasoning => Some(6),
        CategoryId::FallacyOfExtension => Some(7),
        CategoryId::Unknown(_) => None,
    }
}

/// Entry for a typed id, if the catalog has one.
pub fn category(id: &CategoryId) -> Option<&'static FallacyCategory> {
    slot(id).map(|idx| &CATALOG[idx])
}

/// Exact-key lookup by string id. A miss is a normal outcome.
pub fn lookup_category(id: &str) -> Option<&'static FallacyCategory> {
    category(&CategoryId::parse(id))
}

/// Every entry, in definition order.
pub fn list_categories() -> &'static [FallacyCategory] {
    &CATALOG
}

/// Catalog display name, or the title-cased id when the catalog has no entry.
pub fn display_name(id: &CategoryId) -> String {
    category(id)
        .map(|c| c.display_name.to_string())
        .unwrap_or_else(|| id.fallback_display_name())
}

/// Case-insensitive substring search over display name and definition.
/// An empty query matches everything.
pub fn search_categories(query: &str) -> Vec<&'static FallacyCategory> {
    let needle = query.to_lowercase();
    CATALOG
        .iter()
        .filter(|c| {
            needle.is_empty()
                || c.display_name.to_lowercase().contains(&needle)
                || c.definition.to_lowercase().contains(&needle)
        })
        .collect()
}
