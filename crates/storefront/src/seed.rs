//! Static datasets the stores load at startup.
//!
//! The menu and order ledger are not persisted; every start reseeds them
//! from here.

use chrono::{DateTime, Duration, Utc};

use delicious_bites_core::{DeliveryType, MenuItemId, Money, OrderId, OrderStatus};

use crate::models::order::PICKUP_ADDRESS;
use crate::models::{MenuItem, Order, OrderLine};

/// Category filter value that matches every item.
pub const ALL: &str = "All";

/// Menu categories in display order, starting with [`ALL`].
pub const CATEGORIES: &[&str] = &[
    ALL,
    "Pizza",
    "Main Course",
    "Salads",
    "Burgers",
    "Desserts",
    "Sushi",
    "Pasta",
    "Tacos",
];

/// Cuisine filter values, starting with [`ALL`].
pub const CUISINES: &[&str] = &[
    ALL,
    "Italian",
    "Indian",
    "American",
    "Japanese",
    "Mexican",
    "International",
];

struct Dish {
    id: i64,
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: &'static str,
    cuisine: &'static str,
    photo: u32,
    vegetarian: bool,
    popular: bool,
}

const DISHES: &[Dish] = &[
    Dish {
        id: 1,
        name: "Margherita Pizza",
        description: "Fresh tomatoes, mozzarella, basil leaves",
        cents: 1299,
        category: "Pizza",
        cuisine: "Italian",
        photo: 315_755,
        vegetarian: true,
        popular: true,
    },
    Dish {
        id: 2,
        name: "Chicken Tikka Masala",
        description: "Tender chicken in creamy tomato sauce",
        cents: 1599,
        category: "Main Course",
        cuisine: "Indian",
        photo: 2_474_661,
        vegetarian: false,
        popular: true,
    },
    Dish {
        id: 3,
        name: "Caesar Salad",
        description: "Crisp romaine lettuce with parmesan and croutons",
        cents: 899,
        category: "Salads",
        cuisine: "American",
        photo: 1_059_905,
        vegetarian: true,
        popular: false,
    },
    Dish {
        id: 4,
        name: "Beef Burger",
        description: "Juicy beef patty with lettuce, tomato, and cheese",
        cents: 1399,
        category: "Burgers",
        cuisine: "American",
        photo: 1_639_557,
        vegetarian: false,
        popular: true,
    },
    Dish {
        id: 5,
        name: "Chocolate Cake",
        description: "Rich chocolate cake with chocolate frosting",
        cents: 699,
        category: "Desserts",
        cuisine: "International",
        photo: 291_528,
        vegetarian: true,
        popular: false,
    },
    Dish {
        id: 6,
        name: "Sushi Roll",
        description: "Fresh salmon and avocado sushi roll",
        cents: 1199,
        category: "Sushi",
        cuisine: "Japanese",
        photo: 357_756,
        vegetarian: false,
        popular: true,
    },
    Dish {
        id: 7,
        name: "Vegetable Pasta",
        description: "Fresh vegetables with pasta in garlic sauce",
        cents: 1099,
        category: "Pasta",
        cuisine: "Italian",
        photo: 1_279_330,
        vegetarian: true,
        popular: false,
    },
    Dish {
        id: 8,
        name: "Fish Tacos",
        description: "Grilled fish with fresh salsa and avocado",
        cents: 999,
        category: "Tacos",
        cuisine: "Mexican",
        photo: 461_198,
        vegetarian: false,
        popular: false,
    },
];

fn photo_url(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=500"
    )
}

/// The starting menu.
#[must_use]
pub fn menu_items() -> Vec<MenuItem> {
    DISHES
        .iter()
        .map(|dish| MenuItem {
            id: MenuItemId::new(dish.id),
            name: dish.name.to_owned(),
            description: dish.description.to_owned(),
            price: Money::from_cents(dish.cents),
            category: dish.category.to_owned(),
            cuisine: dish.cuisine.to_owned(),
            image: photo_url(dish.photo),
            is_vegetarian: dish.vegetarian,
            is_popular: dish.popular,
        })
        .collect()
}

/// The starting category list.
#[must_use]
pub fn categories() -> Vec<String> {
    CATEGORIES.iter().map(|&c| c.to_owned()).collect()
}

/// The starting order ledger, most recent first, dated relative to `now`.
#[must_use]
pub fn orders(now: DateTime<Utc>) -> Vec<Order> {
    vec![
        Order {
            id: OrderId::new(1),
            customer_name: "John Doe".to_owned(),
            customer_email: None,
            customer_phone: None,
            items: vec![
                OrderLine {
                    name: "Margherita Pizza".to_owned(),
                    quantity: 1,
                    price: Money::from_cents(1299),
                },
                OrderLine {
                    name: "Caesar Salad".to_owned(),
                    quantity: 1,
                    price: Money::from_cents(899),
                },
            ],
            total: Money::from_cents(2198),
            delivery_type: DeliveryType::Delivery,
            address: "123 Main St, City, State".to_owned(),
            status: OrderStatus::Preparing,
            order_date: now,
            payment_method: None,
            payment_id: None,
            instructions: None,
        },
        Order {
            id: OrderId::new(2),
            customer_name: "Jane Smith".to_owned(),
            customer_email: None,
            customer_phone: None,
            items: vec![OrderLine {
                name: "Chicken Tikka Masala".to_owned(),
                quantity: 2,
                price: Money::from_cents(1599),
            }],
            total: Money::from_cents(3198),
            delivery_type: DeliveryType::Pickup,
            address: PICKUP_ADDRESS.to_owned(),
            status: OrderStatus::Delivered,
            order_date: now - Duration::hours(1),
            payment_method: None,
            payment_id: None,
            instructions: None,
        },
    ]
}
