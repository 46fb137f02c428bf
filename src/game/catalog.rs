//! Collectible item definitions
//!
//! The catalog is plain configuration data: the engine only reads the category
//! and point value of an item. Symbols and messages are carried through to the
//! presentation layer untouched, so a catalog can be swapped for another
//! language or theme by loading a JSON file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;

/// Largest point magnitude an item may carry; bounds per-item growth
pub const MAX_ITEM_POINTS: i32 = 100;

/// Polarity of a collectible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Grows the snake and adds points
    Positive,
    /// Shrinks the snake and subtracts points
    Negative,
}

/// A spawnable item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Short identifier, e.g. "solar"
    pub kind: String,
    pub category: Category,
    /// Display token drawn on the grid
    pub symbol: String,
    /// Awareness message shown when the item is collected
    pub message: String,
    /// Signed score delta, also the length delta
    pub points: i32,
}

impl ItemDefinition {
    pub fn new(
        kind: impl Into<String>,
        category: Category,
        symbol: impl Into<String>,
        message: impl Into<String>,
        points: i32,
    ) -> Self {
        Self {
            kind: kind.into(),
            category,
            symbol: symbol.into(),
            message: message.into(),
            points,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.points > 0
    }

    fn validate(&self) -> Result<(), GameError> {
        let reason = match self.category {
            _ if self.points == 0 => Some("points must be non-zero"),
            _ if self.points.unsigned_abs() > MAX_ITEM_POINTS as u32 => {
                Some("points magnitude exceeds the allowed maximum")
            }
            Category::Positive if self.points < 0 => Some("positive items need positive points"),
            Category::Negative if self.points > 0 => Some("negative items need negative points"),
            _ => None,
        };

        match reason {
            Some(reason) => Err(GameError::InvalidItem {
                kind: self.kind.clone(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Validated set of item definitions, split by category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalog {
    positive: Vec<ItemDefinition>,
    negative: Vec<ItemDefinition>,
}

impl ItemCatalog {
    /// Build a catalog, rejecting zero-point or oversized items, items whose
    /// sign disagrees with their category, and catalogs missing either category.
    pub fn new(items: Vec<ItemDefinition>) -> Result<Self, GameError> {
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for item in items {
            item.validate()?;
            match item.category {
                Category::Positive => positive.push(item),
                Category::Negative => negative.push(item),
            }
        }

        if positive.is_empty() {
            return Err(GameError::EmptyCatalog(Category::Positive));
        }
        if negative.is_empty() {
            return Err(GameError::EmptyCatalog(Category::Negative));
        }

        Ok(Self { positive, negative })
    }

    /// Parse a JSON array of item definitions
    pub fn from_json_str(json: &str) -> Result<Self> {
        let items: Vec<ItemDefinition> =
            serde_json::from_str(json).context("Failed to parse item catalog")?;
        Ok(Self::new(items)?)
    }

    /// Load a JSON array of item definitions from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read item catalog {:?}", path))?;
        Self::from_json_str(&json).with_context(|| format!("Invalid item catalog {:?}", path))
    }

    pub fn by_category(&self, category: Category) -> &[ItemDefinition] {
        match category {
            Category::Positive => &self.positive,
            Category::Negative => &self.negative,
        }
    }

    /// All items, positive first
    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.positive.iter().chain(self.negative.iter())
    }

    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self {
            positive: vec![
                ItemDefinition::new(
                    "solar",
                    Category::Positive,
                    "☀️",
                    "الألواح الشمسية مصدر نظيف للكهرباء وتقلل من الانبعاثات الضارة",
                    2,
                ),
                ItemDefinition::new(
                    "tree",
                    Category::Positive,
                    "🌳",
                    "الأشجار تنقي الهواء وتوفر الأكسجين وتحافظ على التوازن البيئي",
                    3,
                ),
                ItemDefinition::new(
                    "recycle",
                    Category::Positive,
                    "♻️",
                    "إعادة التدوير تحافظ على الموارد الطبيعية وتقلل من النفايات",
                    2,
                ),
            ],
            negative: vec![
                ItemDefinition::new(
                    "coal",
                    Category::Negative,
                    "🛢️",
                    "الفحم يطلق غازات ضارة ويساهم في التغير المناخي",
                    -2,
                ),
                ItemDefinition::new(
                    "factory",
                    Category::Negative,
                    "🏭",
                    "الدخان الصناعي يلوث الهواء ويضر بالصحة والبيئة",
                    -3,
                ),
                ItemDefinition::new(
                    "plastic",
                    Category::Negative,
                    "🔥",
                    "البلاستيك الأحادي الاستخدام يلوث المحيطات ويضر بالكائنات البحرية",
                    -2,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = ItemCatalog::default();
        let rebuilt = ItemCatalog::new(catalog.items().cloned().collect()).unwrap();
        assert_eq!(rebuilt, catalog);
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.by_category(Category::Positive).len(), 3);
        assert!(catalog
            .by_category(Category::Negative)
            .iter()
            .all(|item| item.points < 0));
    }

    #[test]
    fn test_rejects_zero_points() {
        let items = vec![
            ItemDefinition::new("dud", Category::Positive, "?", "", 0),
            ItemDefinition::new("coal", Category::Negative, "x", "", -1),
        ];
        assert!(matches!(
            ItemCatalog::new(items),
            Err(GameError::InvalidItem { kind, .. }) if kind == "dud"
        ));
    }

    #[test]
    fn test_rejects_oversized_points() {
        let huge = vec![
            ItemDefinition::new("forest", Category::Positive, "F", "", MAX_ITEM_POINTS + 1),
            ItemDefinition::new("coal", Category::Negative, "x", "", -1),
        ];
        assert!(matches!(
            ItemCatalog::new(huge),
            Err(GameError::InvalidItem { kind, .. }) if kind == "forest"
        ));

        let extreme = vec![
            ItemDefinition::new("tree", Category::Positive, "t", "", 3),
            ItemDefinition::new("spill", Category::Negative, "s", "", i32::MIN),
        ];
        assert!(ItemCatalog::new(extreme).is_err());

        let at_limit = vec![
            ItemDefinition::new("forest", Category::Positive, "F", "", MAX_ITEM_POINTS),
            ItemDefinition::new("spill", Category::Negative, "s", "", -MAX_ITEM_POINTS),
        ];
        assert!(ItemCatalog::new(at_limit).is_ok());
    }

    #[test]
    fn test_rejects_sign_mismatch() {
        let items = vec![
            ItemDefinition::new("tree", Category::Positive, "t", "", 3),
            ItemDefinition::new("fake", Category::Negative, "f", "", 2),
        ];
        assert!(matches!(
            ItemCatalog::new(items),
            Err(GameError::InvalidItem { .. })
        ));
    }

    #[test]
    fn test_rejects_missing_category() {
        let items = vec![ItemDefinition::new("tree", Category::Positive, "t", "", 3)];
        assert_eq!(
            ItemCatalog::new(items),
            Err(GameError::EmptyCatalog(Category::Negative))
        );
    }

    #[test]
    fn test_bundled_english_catalog() {
        let catalog = ItemCatalog::from_json_str(include_str!("../../assets/catalog.en.json"))
            .unwrap();
        assert_eq!(catalog.len(), 6);
        let tree = catalog.items().find(|item| item.kind == "tree").unwrap();
        assert_eq!(tree.points, 3);
        assert!(tree.message.contains("oxygen"));
    }

    #[test]
    fn test_json_parse_error() {
        assert!(ItemCatalog::from_json_str("{ not json").is_err());
    }
}
