use std::collections::HashMap;

use async_graphql::{Enum, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::error::{CornerError, CornerResult};

/// Which side of the points ledger an event category falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryClass {
    /// Attending earns credit toward points
    Pointable,
    /// Tracked for value reporting only
    NonPointable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
pub struct Category {
    /// The name events are filed under
    pub name: String,
    /// Whether events of this category earn points
    pub class: CategoryClass,
}

impl Category {
    pub const C5_SITE: &'static str = "C5 Site";
    pub const C3_SITE: &'static str = "C3 Site";
    pub const GAS: &'static str = "Gas";
    pub const PVP: &'static str = "PVP";
    pub const OTHER: &'static str = "Other";
    pub const MINING: &'static str = "Mining";

    pub fn new(name: impl Into<String>, class: CategoryClass) -> Self {
        Self {
            name: name.into(),
            class,
        }
    }
}

/// The validated table of known categories, in declaration order.
///
/// Every name maps to exactly one class, so the pointable and non-pointable
/// sets never overlap.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Categories {
    categories: Vec<Category>,
    classes: HashMap<String, CategoryClass>,
}

impl Categories {
    pub fn new(categories: Vec<Category>) -> CornerResult<Self> {
        let mut classes = HashMap::with_capacity(categories.len());

        for category in &categories {
            if category.name.trim().is_empty() {
                return Err(CornerError::EmptyCategoryName);
            }
            if classes
                .insert(category.name.clone(), category.class)
                .is_some()
            {
                return Err(CornerError::DuplicateCategory(category.name.clone()));
            }
        }

        Ok(Self {
            categories,
            classes,
        })
    }

    pub fn class_of(&self, name: &str) -> CornerResult<CategoryClass> {
        self.classes
            .get(name)
            .copied()
            .ok_or_else(|| CornerError::UnknownCategory(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn of_class(&self, class: CategoryClass) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(move |category| category.class == class)
    }
}

impl Default for Categories {
    fn default() -> Self {
        let categories = vec![
            Category::new(Category::C5_SITE, CategoryClass::Pointable),
            Category::new(Category::C3_SITE, CategoryClass::Pointable),
            Category::new(Category::GAS, CategoryClass::Pointable),
            Category::new(Category::PVP, CategoryClass::Pointable),
            Category::new(Category::OTHER, CategoryClass::Pointable),
            Category::new(Category::MINING, CategoryClass::NonPointable),
        ];
        let classes = categories
            .iter()
            .map(|category| (category.name.clone(), category.class))
            .collect();

        Self {
            categories,
            classes,
        }
    }
}

impl TryFrom<Vec<Category>> for Categories {
    type Error = CornerError;

    fn try_from(categories: Vec<Category>) -> CornerResult<Self> {
        Self::new(categories)
    }
}

impl From<Categories> for Vec<Category> {
    fn from(categories: Categories) -> Self {
        categories.categories
    }
}
