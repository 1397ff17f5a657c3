use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::model::BreakPrompt;

pub const BREAK_ACTIVITIES: [(&str, &str); 8] = [
    ("\u{1F9D8}", "Close your eyes and take 10 deep breaths"),
    ("\u{1F4AA}", "Stand up and stretch for 2 minutes"),
    ("\u{1F440}", "Look at something 20 feet away for 20 seconds"),
    ("\u{1F4A7}", "Get a glass of water and hydrate"),
    ("\u{1F6B6}", "Take a short walk around the room"),
    ("\u{1F64C}", "Do 10 shoulder rolls to release tension"),
    ("\u{270B}", "Stretch your wrists and fingers"),
    ("\u{1F33F}", "Step outside for some fresh air"),
];

/// Uniform pick over a fixed catalog of break activities.
pub struct BreakPromptSelector {
    catalog: Vec<BreakPrompt>,
    rng: StdRng,
}

impl BreakPromptSelector {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        let catalog = BREAK_ACTIVITIES
            .iter()
            .map(|(icon, text)| BreakPrompt {
                icon: (*icon).to_string(),
                text: (*text).to_string(),
            })
            .collect();
        Self::with_catalog(catalog, rng)
    }

    /// Falls back to the built-in catalog when `catalog` is empty.
    pub fn with_catalog(catalog: Vec<BreakPrompt>, rng: StdRng) -> Self {
        if catalog.is_empty() {
            return Self::with_rng(rng);
        }
        Self { catalog, rng }
    }

    pub fn select(&mut self) -> BreakPrompt {
        self.catalog
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| BreakPrompt {
                icon: BREAK_ACTIVITIES[0].0.to_string(),
                text: BREAK_ACTIVITIES[0].1.to_string(),
            })
    }
}

impl Default for BreakPromptSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn selections_come_from_catalog() {
        let mut selector = BreakPromptSelector::with_rng(StdRng::seed_from_u64(11));
        for _ in 0..32 {
            let prompt = selector.select();
            assert!(BREAK_ACTIVITIES
                .iter()
                .any(|(icon, text)| prompt.icon == *icon && prompt.text == *text));
        }
    }

    #[test]
    fn covers_whole_catalog_over_many_draws() {
        let mut selector = BreakPromptSelector::with_rng(StdRng::seed_from_u64(42));
        let seen: HashSet<String> = (0..500).map(|_| selector.select().text).collect();
        assert_eq!(seen.len(), BREAK_ACTIVITIES.len());
    }

    #[test]
    fn custom_catalog_is_used() {
        let only = BreakPrompt {
            icon: "*".into(),
            text: "Water the plants".into(),
        };
        let mut selector =
            BreakPromptSelector::with_catalog(vec![only.clone()], StdRng::seed_from_u64(1));
        assert_eq!(selector.select(), only);
    }
}
