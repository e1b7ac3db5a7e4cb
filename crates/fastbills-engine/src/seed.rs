//! # Seed Data
//!
//! The static sample catalog and user set the store starts from when no
//! persisted snapshot exists (first launch, or after a factory reset).
//!
//! Users are extendable only by editing this set; there is no in-app user
//! creation surface.

use fastbills_core::{Money, Product, Role, User};

fn product(
    id: &str,
    name: &str,
    price: f64,
    category: &str,
    unit: &str,
    barcode: &str,
    stock_quantity: i64,
    low_stock_threshold: i64,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Money::new(price),
        category: category.to_string(),
        unit: unit.to_string(),
        barcode: Some(barcode.to_string()),
        stock_quantity,
        low_stock_threshold,
    }
}

/// The sample catalog.
#[rustfmt::skip]
pub fn sample_products() -> Vec<Product> {
    vec![
        product("1",  "Apples",       2.99, "Fruits",     "kg",    "8901234567890", 50, 10),
        product("2",  "Bananas",      1.49, "Fruits",     "kg",    "8901234567891", 40,  8),
        product("3",  "Milk",         3.49, "Dairy",      "liter", "8901234567892", 30, 10),
        product("4",  "Bread",        2.29, "Bakery",     "pcs",   "8901234567893", 25,  5),
        product("5",  "Eggs",         3.99, "Dairy",      "dozen", "8901234567894", 20,  5),
        product("6",  "Chicken",      7.99, "Meat",       "kg",    "8901234567895", 15,  3),
        product("7",  "Rice",         4.99, "Grains",     "kg",    "8901234567896", 40, 10),
        product("8",  "Pasta",        1.99, "Grains",     "pcs",   "8901234567897", 35,  7),
        product("9",  "Tomatoes",     2.49, "Vegetables", "kg",    "8901234567898", 30,  5),
        product("10", "Potatoes",     1.99, "Vegetables", "kg",    "8901234567899", 45, 10),
        product("11", "Orange Juice", 3.99, "Beverages",  "liter", "8901234567900", 18,  5),
        product("12", "Coffee",       5.99, "Beverages",  "pcs",   "8901234567901", 20,  5),
        product("13", "Chocolate",    2.99, "Snacks",     "pcs",   "8901234567902", 40,  8),
        product("14", "Cheese",       4.49, "Dairy",      "pcs",   "8901234567903", 15,  4),
        product("15", "Yogurt",       1.79, "Dairy",      "pcs",   "8901234567904", 25,  6),
    ]
}

/// The sample user set. Login name doubles as the identifier the cashier
/// types; passwords are plain text by inherited contract.
pub fn sample_users() -> Vec<User> {
    let user = |id: &str, name: &str, role: Role, password: &str| User {
        id: id.to_string(),
        name: name.to_string(),
        role,
        password: password.to_string(),
    };
    vec![
        user("1", "manager", Role::Manager, "manager123"),
        user("2", "cashier", Role::Cashier, "cashier123"),
        user("3", "cashier1", Role::Cashier, "cashier123"),
        user("4", "cashier2", Role::Cashier, "cashier456"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let products = sample_products();
        for (i, p) in products.iter().enumerate() {
            assert!(products.iter().skip(i + 1).all(|q| q.id != p.id));
        }

        let users = sample_users();
        for (i, u) in users.iter().enumerate() {
            assert!(users.iter().skip(i + 1).all(|v| v.id != u.id));
        }
    }

    #[test]
    fn seed_stock_is_never_negative_or_low() {
        for p in sample_products() {
            assert!(p.stock_quantity >= 0);
            assert!(!p.is_low_stock(), "{} seeds below threshold", p.name);
        }
    }

    #[test]
    fn exactly_one_seeded_manager() {
        let managers = sample_users()
            .iter()
            .filter(|u| u.role == Role::Manager)
            .count();
        assert_eq!(managers, 1);
    }
}
