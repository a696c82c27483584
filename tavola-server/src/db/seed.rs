//! Sample data (示例数据)
//!
//! Two staff accounts and a small menu, inserted with `INSERT OR IGNORE` so
//! repeated startups leave existing rows alone.

use shared::models::{MenuCategory, StaffRole};
use sqlx::SqlitePool;

use super::repository::{menu_item, staff};
use crate::auth::password::hash_password;
use crate::utils::{AppError, AppResult};

/// Password shared by the sample accounts
pub const SAMPLE_PASSWORD: &str = "password123";

const SAMPLE_STAFF: &[(&str, &str, StaffRole)] = &[
    ("John Manager", "manager", StaffRole::Manager),
    ("Alice Waiter", "waiter1", StaffRole::Waiter),
];

const SAMPLE_MENU: &[(&str, &str, f64, MenuCategory)] = &[
    ("Caesar Salad", "Fresh romaine lettuce with Caesar dressing", 8.99, MenuCategory::Appetizer),
    ("Garlic Bread", "Toasted bread with garlic butter", 4.99, MenuCategory::Appetizer),
    ("Grilled Salmon", "Fresh salmon with lemon butter sauce", 24.99, MenuCategory::MainCourse),
    ("Beef Steak", "8oz ribeye steak with vegetables", 29.99, MenuCategory::MainCourse),
    ("Chocolate Cake", "Rich chocolate cake with ganache", 7.99, MenuCategory::Dessert),
    ("Tiramisu", "Classic Italian dessert", 8.99, MenuCategory::Dessert),
    ("House Wine", "Red wine, glass", 6.99, MenuCategory::Beverage),
    ("Sparkling Water", "Bottled sparkling water", 3.99, MenuCategory::Beverage),
];

/// Insert sample staff and menu items that are not already present
pub async fn seed_sample_data(pool: &SqlitePool) -> AppResult<()> {
    let mut staff_added = 0;
    for (name, username, role) in SAMPLE_STAFF {
        // skip the argon2 work for accounts that already exist
        if staff::exists(pool, username).await? {
            continue;
        }
        let hash = hash_password(SAMPLE_PASSWORD)
            .map_err(|e| AppError::internal(format!("Failed to hash sample password: {e}")))?;
        if staff::insert_if_absent(pool, name, username, *role, &hash).await? {
            staff_added += 1;
        }
    }

    let mut menu_added = 0;
    for (name, description, price, category) in SAMPLE_MENU {
        if menu_item::insert_if_absent(pool, name, description, *price, *category).await? {
            menu_added += 1;
        }
    }

    tracing::info!(staff_added, menu_added, "Sample data ensured");
    Ok(())
}
