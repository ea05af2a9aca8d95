/// Ready-made arguments offered to users who don't want to type their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleGroup {
    pub display_name: &'static str,
    pub arguments: &'static [&'static str],
}

static SAMPLES: [SampleGroup; 5] = [
    SampleGroup {
        display_name: "Ad Hominem",
        arguments: &[
            "You can't trust her healthcare opinion—she's not even a doctor.",
            "Why listen to him about the economy? He's never run a business.",
            "She argues for vegetarianism, but she's just an emotional animal lover.",
        ],
    },
    SampleGroup {
        display_name: "False Causality",
        arguments: &[
            "I got sick after eating at that restaurant, so the food must have been bad.",
            "Crime dropped after the new mayor was elected, so he must be doing great.",
            "Every time I wash my car, it rains. I'm causing the rain.",
        ],
    },
    SampleGroup {
        display_name: "False Dilemma",
        arguments: &[
            "You're either with us or against us.",
            "Either we cut all social programs or the country goes bankrupt.",
            "If you don't support this war, you don't support our troops.",
        ],
    },
    SampleGroup {
        display_name: "Appeal to Emotion",
        arguments: &[
            "Think of the children! We must ban this immediately.",
            "Don't you care about your family's safety? Buy our system now.",
            "How can you be so heartless as to oppose this charity?",
        ],
    },
    SampleGroup {
        display_name: "Faulty Generalization",
        arguments: &[
            "My two French coworkers were rude, so French people are rude.",
            "I tried yoga once and didn't like it, so yoga doesn't work.",
            "All politicians are corrupt—just look at these three examples.",
        ],
    },
];

pub fn samples() -> &'static [SampleGroup] {
    &SAMPLES
}

/// Group whose display name matches `name`, ignoring case.
pub fn samples_for(name: &str) -> Option<&'static SampleGroup> {
    SAMPLES
        .iter()
        .find(|g| g.display_name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_groups_of_three() {
        assert_eq!(samples().len(), 5);
        assert!(samples().iter().all(|g| g.arguments.len() == 3));
    }

    #[test]
    fn group_names_resolve_in_catalog() {
        let names: Vec<&str> = crate::list_categories()
            .iter()
            .map(|c| c.display_name)
            .collect();
        for group in samples() {
            assert!(names.contains(&group.display_name), "{}", group.display_name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let group = samples_for("false dilemma").unwrap();
        assert_eq!(group.arguments[0], "You're either with us or against us.");
        assert!(samples_for("  Appeal to Emotion ").is_some());
        assert!(samples_for("Straw Man").is_none());
    }
}
