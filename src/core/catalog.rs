// File: src/core/catalog.rs
//! Static food taxonomy: category keys, common items and name variants.
//!
//! All three tables are ordered. Order matters for `categories()` (display order)
//! and for the substring scan over common items, where the first hit wins.

use crate::core::types::{DEFAULT_CATEGORY, UNCATEGORIZED};
use std::collections::HashMap;

pub const CATEGORIES: &[(&str, &str)] = &[
    // Fresh produce and ingredients
    ("fresh_fruits", "Fresh fruits and berries"),
    ("fresh_vegetables", "Fresh vegetables and greens"),
    ("fresh_herbs", "Fresh herbs and aromatics"),
    ("fresh_meat", "Fresh uncooked meat and poultry"),
    ("fresh_seafood", "Fresh fish and seafood"),
    ("fresh_dairy", "Fresh milk, cheese, and dairy products"),
    // Frozen
    ("frozen_produce", "Frozen fruits and vegetables"),
    ("frozen_meat", "Frozen meat and poultry"),
    ("frozen_seafood", "Frozen fish and seafood"),
    ("frozen_meals", "Frozen ready-to-eat meals"),
    ("frozen_dessert", "Ice cream and frozen desserts"),
    // Pantry
    ("canned", "Canned and preserved foods"),
    ("condiment", "Sauces, oils, spices, and seasonings"),
    ("dried_herbs", "Dried herbs and spices"),
    ("grain", "Rice, pasta, cereals, and grains"),
    ("baking", "Baking ingredients and supplies"),
    // Prepared
    ("deli", "Deli meats, cheeses, and prepared salads"),
    ("prepared", "Ready-to-eat dishes and meals"),
    ("bakery", "Bread, pastries, and baked goods"),
    // Snacks and sweets
    ("snack", "Chips, crackers, and savory snacks"),
    ("sweets", "Desserts, candies, and sweet treats"),
    ("nuts", "Nuts, seeds, and dried fruits"),
    // Beverages
    ("beverage", "Drinks and beverages"),
    ("alcohol", "Alcoholic beverages"),
    // Special
    ("organic", "Certified organic products"),
    ("gluten_free", "Gluten-free products"),
    ("vegan", "Vegan and plant-based products"),
    ("international", "International and ethnic food items"),
    ("breakfast", "Breakfast cereals, spreads, and items"),
    ("baby", "Baby food and formula"),
    ("pet", "Pet food and treats"),
    ("health", "Health foods and supplements"),
    (DEFAULT_CATEGORY, "Miscellaneous food items"),
];

/// Known common items (lowercase, singular) and their default category.
pub const COMMON_ITEMS: &[(&str, &str)] = &[
    ("apple", "fresh_fruits"),
    ("banana", "fresh_fruits"),
    ("orange", "fresh_fruits"),
    ("lemon", "fresh_fruits"),
    ("lime", "fresh_fruits"),
    ("grape", "fresh_fruits"),
    ("strawberry", "fresh_fruits"),
    ("blueberry", "fresh_fruits"),
    ("raspberry", "fresh_fruits"),
    ("blackberry", "fresh_fruits"),
    ("pear", "fresh_fruits"),
    ("peach", "fresh_fruits"),
    ("plum", "fresh_fruits"),
    ("mango", "fresh_fruits"),
    ("pineapple", "fresh_fruits"),
    ("kiwi", "fresh_fruits"),
    ("melon", "fresh_fruits"),
    ("watermelon", "fresh_fruits"),
    ("lettuce", "fresh_vegetables"),
    ("spinach", "fresh_vegetables"),
    ("kale", "fresh_vegetables"),
    ("carrot", "fresh_vegetables"),
    ("potato", "fresh_vegetables"),
    ("onion", "fresh_vegetables"),
    ("garlic", "fresh_vegetables"),
    ("tomato", "fresh_vegetables"),
    ("cucumber", "fresh_vegetables"),
    ("pepper", "fresh_vegetables"),
    ("broccoli", "fresh_vegetables"),
    ("cauliflower", "fresh_vegetables"),
    ("celery", "fresh_vegetables"),
    ("asparagus", "fresh_vegetables"),
    ("zucchini", "fresh_vegetables"),
    ("eggplant", "fresh_vegetables"),
    ("mushroom", "fresh_vegetables"),
    ("corn", "fresh_vegetables"),
    ("peas", "fresh_vegetables"),
    ("green beans", "fresh_vegetables"),
    ("chicken", "fresh_meat"),
    ("beef", "fresh_meat"),
    ("pork", "fresh_meat"),
    ("fish", "fresh_seafood"),
    ("salmon", "fresh_seafood"),
    ("shrimp", "fresh_seafood"),
    ("frozen vegetables", "frozen_produce"),
    ("frozen fruit", "frozen_produce"),
    ("frozen chicken", "frozen_meat"),
    ("frozen fish", "frozen_seafood"),
    ("frozen pizza", "frozen_meals"),
    ("ice cream", "frozen_dessert"),
    ("milk", "fresh_dairy"),
    ("cheese", "fresh_dairy"),
    ("yogurt", "fresh_dairy"),
    ("butter", "fresh_dairy"),
    ("eggs", "fresh_dairy"),
    ("pasta", "grain"),
    ("rice", "grain"),
    ("cereal", "breakfast"),
    ("bread", "bakery"),
    ("flour", "baking"),
    ("sugar", "baking"),
    ("olive oil", "condiment"),
    ("sauce", "condiment"),
    ("spices", "condiment"),
    ("canned soup", "canned"),
    ("canned beans", "canned"),
    ("canned tomatoes", "canned"),
    ("chips", "snack"),
    ("crackers", "snack"),
    ("cookies", "sweets"),
    ("candy", "sweets"),
    ("chocolate", "sweets"),
    ("nuts", "nuts"),
    ("dried fruit", "nuts"),
    ("juice", "beverage"),
    ("soda", "beverage"),
    ("water", "beverage"),
    ("coffee", "beverage"),
    ("tea", "beverage"),
    ("wine", "alcohol"),
    ("beer", "alcohol"),
    ("ham", "deli"),
    ("turkey", "deli"),
    ("deli meat", "deli"),
    ("deli cheese", "deli"),
    ("potato salad", "deli"),
    ("sushi", "international"),
    ("kimchi", "international"),
    ("curry", "international"),
    ("salsa", "international"),
    ("hummus", "international"),
];

/// Canonical base names and the spellings folded into them.
pub const ITEM_VARIATIONS: &[(&str, &[&str])] = &[
    ("salt", &["sea salt", "table salt", "kosher salt", "himalayan salt"]),
    ("sugar", &["white sugar", "granulated sugar", "caster sugar"]),
    ("olive oil", &["extra virgin olive oil", "evoo"]),
    ("onion", &["yellow onion", "white onion", "red onion"]),
    ("garlic", &["fresh garlic", "garlic cloves"]),
    ("tomato", &["tomatoes", "cherry tomatoes", "roma tomatoes"]),
    ("potato", &["potatoes", "russet potato", "sweet potato"]),
    ("carrot", &["carrots", "baby carrots"]),
    ("chicken", &["chicken breast", "chicken thigh", "chicken wings"]),
    ("beef", &["ground beef", "beef steak", "beef roast"]),
    ("rice", &["white rice", "brown rice", "jasmine rice", "basmati rice"]),
    ("basil", &["fresh basil", "sweet basil", "thai basil"]),
    ("oregano", &["fresh oregano", "dried oregano"]),
    ("thyme", &["fresh thyme", "dried thyme"]),
    ("rosemary", &["fresh rosemary", "dried rosemary"]),
    ("mint", &["fresh mint", "peppermint", "spearmint"]),
    ("cilantro", &["fresh cilantro", "coriander"]),
    ("parsley", &["fresh parsley", "italian parsley", "flat-leaf parsley"]),
    ("sage", &["fresh sage", "dried sage"]),
    ("dill", &["fresh dill", "dried dill"]),
    ("chives", &["fresh chives"]),
];

/// Read-only lookup structure over the static tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    descriptions: HashMap<&'static str, &'static str>,
    defaults: HashMap<&'static str, &'static str>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            descriptions: CATEGORIES.iter().copied().collect(),
            defaults: COMMON_ITEMS.iter().copied().collect(),
        }
    }

    /// Category keys in display order.
    pub fn categories(&self) -> Vec<&'static str> {
        CATEGORIES.iter().map(|(key, _)| *key).collect()
    }

    pub fn category_description(&self, category: &str) -> Option<&'static str> {
        self.descriptions.get(category.to_lowercase().as_str()).copied()
    }

    pub fn is_valid_category(&self, category: &str) -> bool {
        self.descriptions.contains_key(category.to_lowercase().as_str())
    }

    /// The table key matching `category` case-insensitively.
    pub fn canonical_key(&self, category: &str) -> Option<&'static str> {
        self.descriptions
            .get_key_value(category.to_lowercase().as_str())
            .map(|(key, _)| *key)
    }

    /// Canonical display form of a stored category value.
    pub fn format_category(&self, category: Option<&str>) -> &'static str {
        match category.map(str::trim) {
            None | Some("") => UNCATEGORIZED,
            Some(value) => self.canonical_key(value).unwrap_or(DEFAULT_CATEGORY),
        }
    }

    pub fn is_common_item(&self, item: &str) -> bool {
        self.defaults.contains_key(item)
    }

    /// Exact match against the common-item table.
    pub fn default_category(&self, item: &str) -> Option<&'static str> {
        self.defaults.get(item).copied()
    }

    /// First common item, in table order, that appears inside `text`.
    pub fn first_contained_item(&self, text: &str) -> Option<(&'static str, &'static str)> {
        COMMON_ITEMS.iter().copied().find(|(item, _)| text.contains(*item))
    }

    /// Base name of the first variant group that `name` belongs to.
    pub fn variant_base(&self, name: &str) -> Option<&'static str> {
        ITEM_VARIATIONS
            .iter()
            .find(|(base, variants)| *base == name || variants.contains(&name))
            .map(|(base, _)| *base)
    }

    /// Every group whose base or variants contain `name`.
    pub fn variant_groups_containing<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = (&'static str, &'static [&'static str])> + 'a {
        ITEM_VARIATIONS
            .iter()
            .copied()
            .filter(move |(base, variants)| *base == name || variants.contains(&name))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
