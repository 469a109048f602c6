// File: src/core/rules.rs
//! Ordered keyword rules used to guess a category when nothing has been learned.
//!
//! Each rule is plain data: trigger keywords, optional refinements that look for
//! qualifiers such as "frozen" or "dried", and a fallback category. The chain walks
//! its stages in order and the first stage that yields a category wins.

use crate::core::catalog::Catalog;
use crate::core::types::SuggestionSource;

/// The two spellings of an item that keyword rules look at.
///
/// `text` keeps qualifiers ("dried oregano") that variant folding drops from
/// `normalized` ("oregano"). A keyword matches if either form contains it.
#[derive(Debug, Clone)]
pub struct Descriptor<'a> {
    pub text: &'a str,
    pub normalized: &'a str,
}

impl<'a> Descriptor<'a> {
    pub fn new(text: &'a str, normalized: &'a str) -> Self {
        Self { text, normalized }
    }

    pub fn mentions(&self, keyword: &str) -> bool {
        self.text.contains(keyword) || self.normalized.contains(keyword)
    }

    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|kw| self.mentions(kw))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Refinement {
    AnyOf(&'static [&'static str], &'static str),
    NoneOf(&'static [&'static str], &'static str),
}

impl Refinement {
    fn apply(&self, item: &Descriptor<'_>) -> Option<&'static str> {
        match *self {
            Refinement::AnyOf(keywords, category) => item.mentions_any(keywords).then_some(category),
            Refinement::NoneOf(keywords, category) => (!item.mentions_any(keywords)).then_some(category),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub refinements: &'static [Refinement],
    /// Category when triggered but no refinement applies. `None` falls through.
    pub fallback: Option<&'static str>,
}

impl Rule {
    pub fn evaluate(&self, item: &Descriptor<'_>) -> Option<&'static str> {
        if !item.mentions_any(self.triggers) {
            return None;
        }
        self.refinements
            .iter()
            .find_map(|refinement| refinement.apply(item))
            .or(self.fallback)
    }
}

const MEAT_WORDS: &[&str] = &["chicken", "beef", "pork", "meat"];
const SEAFOOD_WORDS: &[&str] = &["fish", "seafood", "shrimp"];

pub static HERBS: Rule = Rule {
    name: "herbs",
    triggers: &[
        "basil", "oregano", "thyme", "rosemary", "mint", "cilantro", "parsley", "sage",
        "dill", "chives", "herb", "herbs",
    ],
    refinements: &[
        Refinement::AnyOf(&["dried", "ground"], "dried_herbs"),
        Refinement::AnyOf(&["fresh"], "fresh_herbs"),
        Refinement::NoneOf(&["dried", "ground", "powdered"], "fresh_herbs"),
    ],
    fallback: Some("dried_herbs"),
};

pub static FRUITS: Rule = Rule {
    name: "fruits",
    triggers: &[
        "apple", "banana", "orange", "berry", "berries", "melon", "fruit", "grape",
        "citrus", "pear", "peach", "plum", "mango", "pineapple",
    ],
    refinements: &[Refinement::AnyOf(&["frozen"], "frozen_produce")],
    fallback: Some("fresh_fruits"),
};

pub static VEGETABLES: Rule = Rule {
    name: "vegetables",
    triggers: &[
        "lettuce", "spinach", "kale", "carrot", "potato", "onion", "garlic", "tomato",
        "cucumber", "pepper", "broccoli", "vegetable", "cauliflower", "celery",
        "asparagus", "zucchini", "eggplant", "mushroom", "corn", "peas", "beans", "greens",
    ],
    refinements: &[Refinement::AnyOf(&["frozen"], "frozen_produce")],
    fallback: Some("fresh_vegetables"),
};

pub static FROZEN: Rule = Rule {
    name: "frozen",
    triggers: &["frozen"],
    refinements: &[
        Refinement::AnyOf(MEAT_WORDS, "frozen_meat"),
        Refinement::AnyOf(SEAFOOD_WORDS, "frozen_seafood"),
        Refinement::AnyOf(&["pizza", "dinner", "meal"], "frozen_meals"),
        Refinement::AnyOf(&["ice cream", "dessert"], "frozen_dessert"),
    ],
    fallback: Some("frozen_meals"),
};

pub static FRESH: Rule = Rule {
    name: "fresh",
    triggers: &["fresh"],
    refinements: &[
        Refinement::AnyOf(&["meat", "chicken", "beef", "pork", "lamb"], "fresh_meat"),
        Refinement::AnyOf(&["fish", "seafood", "shrimp", "salmon"], "fresh_seafood"),
        Refinement::AnyOf(&["milk", "cheese", "dairy"], "fresh_dairy"),
    ],
    fallback: None,
};

pub static MEAT: Rule = Rule {
    name: "meat",
    triggers: &[
        "meat", "chicken", "beef", "pork", "lamb", "steak", "roast", "chop", "ground",
    ],
    refinements: &[],
    fallback: Some("fresh_meat"),
};

#[derive(Debug, Clone, Copy)]
pub enum Stage {
    Keyword(&'static Rule),
    /// The normalized name is itself a common item.
    ExactCatalog,
    /// A common item occurs inside the normalized name.
    SubstringCatalog,
}

impl Stage {
    fn evaluate(
        &self,
        item: &Descriptor<'_>,
        catalog: &Catalog,
    ) -> Option<(&'static str, SuggestionSource)> {
        match self {
            Stage::Keyword(rule) => rule
                .evaluate(item)
                .map(|category| (category, SuggestionSource::Rule(rule.name.to_string()))),
            Stage::ExactCatalog => catalog
                .default_category(item.normalized)
                .map(|category| (category, SuggestionSource::ExactCatalog)),
            Stage::SubstringCatalog => catalog
                .first_contained_item(item.normalized)
                .map(|(_, category)| (category, SuggestionSource::SubstringCatalog)),
        }
    }
}

/// Stages evaluated in priority order; first match wins.
#[derive(Debug, Clone)]
pub struct RuleChain {
    stages: Vec<Stage>,
}

impl RuleChain {
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push(&mut self, stage: Stage) -> &mut Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn classify(
        &self,
        item: &Descriptor<'_>,
        catalog: &Catalog,
    ) -> Option<(&'static str, SuggestionSource)> {
        self.stages.iter().find_map(|stage| stage.evaluate(item, catalog))
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self {
            stages: vec![
                Stage::Keyword(&HERBS),
                Stage::Keyword(&FRUITS),
                Stage::Keyword(&VEGETABLES),
                Stage::Keyword(&FROZEN),
                Stage::Keyword(&FRESH),
                Stage::ExactCatalog,
                Stage::SubstringCatalog,
                Stage::Keyword(&MEAT),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str, normalized: &str) -> Option<&'static str> {
        RuleChain::default()
            .classify(&Descriptor::new(text, normalized), &Catalog::new())
            .map(|(category, _)| category)
    }

    #[test]
    fn test_herb_qualifiers() {
        assert_eq!(HERBS.evaluate(&Descriptor::new("dried oregano", "oregano")), Some("dried_herbs"));
        assert_eq!(HERBS.evaluate(&Descriptor::new("ground sage", "ground sage")), Some("dried_herbs"));
        assert_eq!(HERBS.evaluate(&Descriptor::new("fresh basil", "basil")), Some("fresh_herbs"));
        assert_eq!(HERBS.evaluate(&Descriptor::new("thyme", "thyme")), Some("fresh_herbs"));
        assert_eq!(
            HERBS.evaluate(&Descriptor::new("powdered herbs", "powdered herbs")),
            Some("dried_herbs")
        );
        assert_eq!(HERBS.evaluate(&Descriptor::new("salt", "salt")), None);
    }

    #[test]
    fn test_frozen_produce_beats_generic_frozen() {
        assert_eq!(classify("frozen blueberries", "frozen blueberries"), Some("frozen_produce"));
        assert_eq!(classify("frozen peas", "frozen peas"), Some("frozen_produce"));
        assert_eq!(classify("frozen shrimp", "frozen shrimp"), Some("frozen_seafood"));
        assert_eq!(classify("frozen lasagna", "frozen lasagna"), Some("frozen_meals"));
        assert_eq!(classify("frozen dessert bars", "frozen dessert bars"), Some("frozen_dessert"));
    }

    #[test]
    fn test_fresh_falls_through_without_secondary_keyword() {
        assert_eq!(FRESH.evaluate(&Descriptor::new("fresh bread", "fresh bread")), None);
        assert_eq!(classify("fresh bread", "fresh bread"), Some("bakery"));
        assert_eq!(classify("fresh salmon fillet", "fresh salmon fillet"), Some("fresh_seafood"));
        assert_eq!(classify("fresh mozzarella cheese", "fresh mozzarella cheese"), Some("fresh_dairy"));
    }

    #[test]
    fn test_catalog_stages_and_meat_fallback() {
        assert_eq!(classify("yogurt", "yogurt"), Some("fresh_dairy"));
        assert_eq!(classify("greek yogurt", "greek yogurt"), Some("fresh_dairy"));
        assert_eq!(classify("lamb shank", "lamb shank"), Some("fresh_meat"));
        assert_eq!(classify("pork chop", "pork chop"), Some("fresh_meat"));
        assert_eq!(classify("xyzzy123", "xyzzy123"), None);
    }

    #[test]
    fn test_source_names_the_stage() {
        let catalog = Catalog::new();
        let chain = RuleChain::default();
        let (_, source) = chain.classify(&Descriptor::new("milk", "milk"), &catalog).unwrap();
        assert_eq!(source, SuggestionSource::ExactCatalog);
        let (_, source) = chain.classify(&Descriptor::new("kale", "kale"), &catalog).unwrap();
        assert_eq!(source, SuggestionSource::Rule("vegetables".to_string()));
    }

    #[test]
    fn test_custom_chain() {
        static SPREADS: Rule = Rule {
            name: "spreads",
            triggers: &["jam", "marmalade"],
            refinements: &[],
            fallback: Some("breakfast"),
        };
        let mut chain = RuleChain::empty();
        chain.push(Stage::Keyword(&SPREADS)).push(Stage::ExactCatalog);
        let catalog = Catalog::new();
        let hit = chain.classify(&Descriptor::new("apricot jam", "apricot jam"), &catalog);
        assert_eq!(hit.map(|(c, _)| c), Some("breakfast"));
        assert_eq!(chain.stages().len(), 2);
    }
}
