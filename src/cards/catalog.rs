//! The fixed card catalog.
//!
//! Every deck is drawn from these entries. A matched pair turns into a
//! garden item carrying the entry's `type` and emoji.

use serde::{Deserialize, Serialize};

/// Catalog grouping. Purely descriptive, it never affects matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Flower,
    Tool,
    Insect,
    Weather,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Flower, Category::Tool, Category::Insect, Category::Weather];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Flower => "flower",
            Category::Tool => "tool",
            Category::Insect => "insect",
            Category::Weather => "weather",
        };
        f.write_str(name)
    }
}

/// One catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CatalogEntry {
    /// Catalog key; two cards match when their kinds are equal.
    pub kind: &'static str,
    /// Display glyph.
    pub emoji: &'static str,
    pub category: Category,
}

impl CatalogEntry {
    const fn new(kind: &'static str, emoji: &'static str, category: Category) -> Self {
        Self { kind, emoji, category }
    }
}

/// All entries: flowers, then tools, insects, weather.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry::new("rose", "🌹", Category::Flower),
    CatalogEntry::new("sunflower", "🌻", Category::Flower),
    CatalogEntry::new("tulip", "🌷", Category::Flower),
    CatalogEntry::new("cherry_blossom", "🌸", Category::Flower),
    CatalogEntry::new("seedling", "🌱", Category::Tool),
    CatalogEntry::new("potted_plant", "🪴", Category::Tool),
    CatalogEntry::new("watering_can", "💧", Category::Tool),
    CatalogEntry::new("butterfly", "🦋", Category::Insect),
    CatalogEntry::new("ladybug", "🐞", Category::Insect),
    CatalogEntry::new("bee", "🐝", Category::Insect),
    CatalogEntry::new("sun", "☀️", Category::Weather),
    CatalogEntry::new("cloud", "☁️", Category::Weather),
    CatalogEntry::new("rain", "🌧️", Category::Weather),
];

/// Look up an entry by its kind.
#[cfg(test)]
pub(crate) fn find(kind: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.kind == kind)
}
