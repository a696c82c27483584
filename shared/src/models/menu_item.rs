//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum MenuCategory {
    Appetizer,
    #[serde(rename = "Main Course")]
    #[cfg_attr(feature = "db", sqlx(rename = "Main Course"))]
    MainCourse,
    Dessert,
    Beverage,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Appetizer => "Appetizer",
            Self::MainCourse => "Main Course",
            Self::Dessert => "Dessert",
            Self::Beverage => "Beverage",
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Always > 0
    pub price: f64,
    pub category: MenuCategory,
}

/// Menu items grouped by category, in category order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSection {
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_course_round_trips_with_space() {
        let json = serde_json::to_string(&MenuCategory::MainCourse).unwrap();
        assert_eq!(json, "\"Main Course\"");
        let back: MenuCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "Main Course");
    }
}
