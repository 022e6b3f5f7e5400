use async_graphql::{ComplexObject, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::error::{CornerError, CornerResult};
use crate::models::category::{Categories, Category};

/// The admin-editable settings every report reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
#[graphql(complex)]
pub struct Settings {
    /// The summed share a player needs in one operational day to earn a point
    #[serde(default = "Settings::default_minimum_value")]
    pub minimum_value: f64,
    #[serde(default)]
    #[graphql(skip)]
    pub categories: Categories,
}

#[ComplexObject]
impl Settings {
    /// The known event categories and whether they earn points
    pub async fn categories(&self) -> Vec<Category> {
        self.categories.all().to_vec()
    }
}

impl Settings {
    pub const DEFAULT_MINIMUM_VALUE: f64 = 80.0;

    fn default_minimum_value() -> f64 {
        Self::DEFAULT_MINIMUM_VALUE
    }

    pub fn check_minimum_value(value: f64) -> CornerResult<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(CornerError::InvalidThreshold(value))
        }
    }

    pub fn validate(&self) -> CornerResult<()> {
        Self::check_minimum_value(self.minimum_value).map(|_| ())
    }

    /// The threshold to use for one report, captured once up front.
    pub fn threshold(&self, minimum_value_override: Option<f64>) -> CornerResult<f64> {
        Self::check_minimum_value(minimum_value_override.unwrap_or(self.minimum_value))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            minimum_value: Self::DEFAULT_MINIMUM_VALUE,
            categories: Categories::default(),
        }
    }
}
