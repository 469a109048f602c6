// File: src/intake.rs
//! Glue between the resolver and its collaborators: item lists extracted by the
//! vision/chat model, and records already held by the inventory store.

use crate::core::engine::CategoryResolver;
use crate::core::types::{CategoryKey, UNCATEGORIZED};
use crate::error::{PantryError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One item as reported by the extraction model. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionReport {
    pub contains_food: bool,
    #[serde(rename = "food_items", alias = "items")]
    pub items: Vec<ExtractedItem>,
    pub description: String,
}

impl ExtractionReport {
    /// Parses a model response, which may wrap the JSON object in prose or
    /// markdown fences. Items without a name are dropped and fields are trimmed.
    pub fn parse(response: &str) -> Result<Self> {
        let start = response.find('{').ok_or(PantryError::NoJson)?;
        let end = response.rfind('}').ok_or(PantryError::NoJson)?;
        if end < start {
            return Err(PantryError::NoJson);
        }

        let mut report: ExtractionReport = serde_json::from_str(&response[start..=end])?;
        report.items = report
            .items
            .into_iter()
            .filter_map(|item| {
                let name = item.name.trim();
                if name.is_empty() {
                    return None;
                }
                let kind = match item.kind.trim() {
                    "" => UNCATEGORIZED.to_string(),
                    kind => kind.to_string(),
                };
                Some(ExtractedItem {
                    name: name.to_string(),
                    kind,
                    brand: item.brand.trim().to_string(),
                    quantity: item.quantity.trim().to_string(),
                })
            })
            .collect();
        report.description = report.description.trim().to_string();
        Ok(report)
    }
}

/// An item ready to be handed to the inventory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub category: CategoryKey,
    pub brand: Option<String>,
    pub quantity: Option<String>,
    /// True when the category came from the resolver rather than the model.
    pub suggested: bool,
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Keeps the model's type when it is a known category, otherwise substitutes the
/// resolver's suggestion.
pub fn classify_items(resolver: &CategoryResolver, items: &[ExtractedItem]) -> Vec<ItemDraft> {
    items
        .iter()
        .filter(|item| !item.name.trim().is_empty())
        .map(|item| {
            let name = item.name.trim().to_string();
            let (category, suggested) = if resolver.is_valid_category(item.kind.trim()) {
                (item.kind.trim().to_lowercase(), false)
            } else {
                let category = resolver.suggest_category(&name);
                debug!(item = %name, reported = %item.kind, %category, "replaced reported type");
                (category, true)
            };
            ItemDraft {
                name,
                category,
                brand: non_empty(&item.brand),
                quantity: non_empty(&item.quantity),
                suggested,
            }
        })
        .collect()
}

/// A record already in the inventory store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChange {
    pub id: i64,
    pub current: String,
    pub suggested: CategoryKey,
}

/// Lists stored items whose category differs from what the resolver would pick now.
pub fn review_categories(resolver: &CategoryResolver, stored: &[StoredItem]) -> Vec<CategoryChange> {
    stored
        .iter()
        .filter_map(|item| {
            let suggested = resolver.suggest_category(&item.name);
            let current = match item.category.as_deref().map(str::trim) {
                None | Some("") => UNCATEGORIZED.to_string(),
                Some(category) => category.to_string(),
            };
            (suggested != current).then_some(CategoryChange {
                id: item.id,
                current,
                suggested,
            })
        })
        .collect()
}

/// Returns the first existing name that refers to the same item as `candidate`.
pub fn find_duplicate<'a, S: AsRef<str>>(
    resolver: &CategoryResolver,
    existing: &'a [S],
    candidate: &str,
) -> Option<&'a str> {
    let normalized = resolver.normalize(candidate);
    if normalized.is_empty() {
        warn!("duplicate check called with a blank name");
        return None;
    }
    let similar = resolver.similar_items(candidate);

    existing.iter().map(|name| name.as_ref()).find(|name| {
        let other = resolver.normalize(name);
        other == normalized || similar.contains(&other)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"Here's what I found:
```json
{
    "contains_food": true,
    "food_items": [
        {"name": " Roma Tomatoes ", "type": "fresh", "brand": "", "quantity": "6"},
        {"name": "Greek Yogurt", "type": "Fresh_Dairy", "brand": "Fage", "quantity": "500g"},
        {"name": "", "type": "canned"},
        {"name": "Mystery Jar"}
    ],
    "description": " A shelf of groceries. "
}
```"#;

    #[test]
    fn test_parse_strips_fences_and_cleans_items() {
        let report = ExtractionReport::parse(RESPONSE).unwrap();
        assert!(report.contains_food);
        assert_eq!(report.items.len(), 3);
        assert_eq!(report.items[0].name, "Roma Tomatoes");
        assert_eq!(report.items[2].kind, "uncategorized");
        assert_eq!(report.description, "A shelf of groceries.");
    }

    #[test]
    fn test_parse_without_json_fails() {
        assert!(matches!(
            ExtractionReport::parse("No food or beverage items detected."),
            Err(PantryError::NoJson)
        ));
        assert!(matches!(ExtractionReport::parse("} oops {"), Err(PantryError::NoJson)));
        assert!(matches!(ExtractionReport::parse("{not json}"), Err(PantryError::Json(_))));
    }

    #[test]
    fn test_classify_keeps_valid_types_and_suggests_the_rest() {
        let resolver = CategoryResolver::new();
        let report = ExtractionReport::parse(RESPONSE).unwrap();
        let drafts = classify_items(&resolver, &report.items);

        assert_eq!(drafts[0].category, "fresh_vegetables");
        assert!(drafts[0].suggested);
        assert_eq!(drafts[0].brand, None);
        assert_eq!(drafts[0].quantity.as_deref(), Some("6"));

        assert_eq!(drafts[1].category, "fresh_dairy");
        assert!(!drafts[1].suggested);
        assert_eq!(drafts[1].brand.as_deref(), Some("Fage"));

        assert_eq!(drafts[2].category, "other");
    }

    #[test]
    fn test_review_lists_only_changes() {
        let resolver = CategoryResolver::new();
        let stored = vec![
            StoredItem { id: 1, name: "bananas".into(), category: Some("fresh_fruits".into()) },
            StoredItem { id: 2, name: "salmon".into(), category: None },
            StoredItem { id: 3, name: "ice cream".into(), category: Some("sweets".into()) },
        ];
        let changes = review_categories(&resolver, &stored);
        assert_eq!(
            changes,
            vec![
                CategoryChange { id: 2, current: "uncategorized".into(), suggested: "fresh_seafood".into() },
                CategoryChange { id: 3, current: "sweets".into(), suggested: "frozen_dessert".into() },
            ]
        );
    }

    #[test]
    fn test_find_duplicate_uses_variants_and_plurals() {
        let resolver = CategoryResolver::new();
        let existing = vec!["Extra Virgin Olive Oil".to_string(), "carrots".to_string(), "lentil".to_string()];
        assert_eq!(find_duplicate(&resolver, &existing, "evoo"), Some("Extra Virgin Olive Oil"));
        assert_eq!(find_duplicate(&resolver, &existing, "Carrot"), Some("carrots"));
        assert_eq!(find_duplicate(&resolver, &existing, "lentils"), Some("lentil"));
        assert_eq!(find_duplicate(&resolver, &existing, "rice"), None);
        assert_eq!(find_duplicate(&resolver, &existing, "  "), None);
    }
}
