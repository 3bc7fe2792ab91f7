use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    common::generate_timestamp,
    shopping_list::{formatter::render_message, value_objects::UncategorizedPolicy},
};

/// Text recognized in a recipe photo, lines joined by a single space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawText(String);

impl RawText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Slices by character offsets `[start, end)`.
    pub fn slice_chars(&self, start: usize, end: usize) -> Option<&str> {
        if start > end {
            return None;
        }

        let byte_at = |offset: usize| {
            self.0
                .char_indices()
                .map(|(index, _)| index)
                .chain(std::iter::once(self.0.len()))
                .nth(offset)
        };

        let start_byte = byte_at(start)?;
        let end_byte = byte_at(end)?;
        Some(&self.0[start_byte..end_byte])
    }
}

impl fmt::Display for RawText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The categories a shopping list is rendered with, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Produce,
    MeatAndFish,
    Dairy,
    Other,
    Spices,
}

impl Category {
    pub const DISPLAY_ORDER: [Category; 5] = [
        Category::Produce,
        Category::MeatAndFish,
        Category::Dairy,
        Category::Other,
        Category::Spices,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Produce => "PRODUCE",
            Category::MeatAndFish => "MEAT AND FISH",
            Category::Dairy => "DAIRY",
            Category::Other => "OTHER",
            Category::Spices => "SPICES",
        }
    }

    pub fn from_label(label: &CategoryLabel) -> Option<Self> {
        Self::DISPLAY_ORDER
            .into_iter()
            .find(|category| category.display_name() == label.as_str())
    }
}

/// Display form of a classifier label, `MEAT_FISH` becoming `MEAT AND FISH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryLabel(String);

impl CategoryLabel {
    const MODEL_SEPARATOR: &'static str = "_";
    const DISPLAY_SEPARATOR: &'static str = " AND ";

    pub fn from_model_label(label: &str) -> Self {
        Self(label.replace(Self::MODEL_SEPARATOR, Self::DISPLAY_SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_label(self)
    }
}

impl From<Category> for CategoryLabel {
    fn from(category: Category) -> Self {
        Self(category.display_name().to_string())
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ingredients grouped by label. Labels keep first-seen order and items keep
/// insertion order within a label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGrouping {
    groups: Vec<(CategoryLabel, Vec<String>)>,
}

impl CategoryGrouping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: CategoryLabel, ingredient: String) {
        match self.groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, items)) => items.push(ingredient),
            None => self.groups.push((label, vec![ingredient])),
        }
    }

    pub fn items(&self, label: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(existing, _)| existing.as_str() == label)
            .map(|(_, items)| items.as_slice())
    }

    /// Total number of ingredients across every label.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryLabel, &[String])> {
        self.groups
            .iter()
            .map(|(label, items)| (label, items.as_slice()))
    }

    /// Ingredients whose label is outside the display order, first-seen order.
    pub fn uncategorized(&self) -> Vec<&str> {
        self.iter()
            .filter(|(label, _)| label.category().is_none())
            .flat_map(|(_, items)| items.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingListCategory {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingList {
    pub id: Uuid,
    pub raw_text: String,
    pub categories: Vec<ShoppingListCategory>,
    pub uncategorized: Vec<String>,
    pub ingredient_count: usize,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ShoppingList {
    pub fn new(raw_text: RawText, grouping: &CategoryGrouping, policy: UncategorizedPolicy) -> Self {
        let (now, timestamp) = generate_timestamp();

        let categories = Category::DISPLAY_ORDER
            .iter()
            .filter_map(|category| {
                let items = grouping.items(category.display_name())?;
                (!items.is_empty()).then(|| ShoppingListCategory {
                    name: category.display_name().to_string(),
                    items: items.to_vec(),
                })
            })
            .collect();

        Self {
            id: Uuid::new_v7(timestamp),
            raw_text: raw_text.into_string(),
            categories,
            uncategorized: grouping
                .uncategorized()
                .into_iter()
                .map(str::to_string)
                .collect(),
            ingredient_count: grouping.len(),
            message: render_message(grouping, policy),
            created_at: now,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ingredient_count == 0
    }
}
