//! Blog content.
//!
//! Posts are compiled in and held in memory for the life of the process.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use delicious_bites_core::BlogPostId;

use crate::seed::ALL;

/// Blog categories in display order, starting with `All`.
pub const BLOG_CATEGORIES: &[&str] = &[
    ALL,
    "Recipes",
    "Sustainability",
    "Menu Updates",
    "Cooking Tips",
    "Desserts",
    "Reviews",
];

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: BlogPostId,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub date: NaiveDate,
    pub read_time: String,
    pub category: String,
    pub image: String,
    pub tags: Vec<String>,
}

/// Search and category filter for the blog index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlogQuery {
    /// Case-insensitive substring of the title, excerpt, or any tag.
    pub search: String,
    pub category: Option<String>,
}

impl BlogQuery {
    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || post.title.to_lowercase().contains(&needle)
            || post.excerpt.to_lowercase().contains(&needle)
            || post.tags.iter().any(|tag| tag.to_lowercase().contains(&needle));
        let matches_category = match self.category.as_deref() {
            None | Some("" | ALL) => true,
            Some(category) => post.category == category,
        };
        matches_search && matches_category
    }
}

struct Entry {
    id: i64,
    title: &'static str,
    excerpt: &'static str,
    content: &'static str,
    author: &'static str,
    date: (i32, u32, u32),
    read_time: &'static str,
    category: &'static str,
    photo: u32,
    tags: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: 1,
        title: "The Secret Behind Our Signature Pizza Sauce",
        excerpt: "Discover the carefully guarded recipe and techniques that make our pizza sauce so irresistible.",
        content: "Our signature pizza sauce is the heart of every pizza we serve. It starts with San Marzano tomatoes, crushed by hand and simmered slowly with garlic, fresh basil, and a splash of olive oil.",
        author: "Chef Marco",
        date: (2024, 1, 15),
        read_time: "5 min read",
        category: "Recipes",
        photo: 315_755,
        tags: &["pizza", "sauce", "recipe", "italian"],
    },
    Entry {
        id: 2,
        title: "Farm to Table: Our Commitment to Fresh Ingredients",
        excerpt: "Learn about our partnerships with local farms and our dedication to serving the freshest ingredients.",
        content: "At Delicious Bites, we believe that great food starts with great ingredients. We work with local farms to bring seasonal produce to the kitchen every morning.",
        author: "Sarah Johnson",
        date: (2024, 1, 10),
        read_time: "7 min read",
        category: "Sustainability",
        photo: 1_640_777,
        tags: &["farm-to-table", "fresh", "local", "organic"],
    },
    Entry {
        id: 3,
        title: "New Menu Items: Asian Fusion Delights",
        excerpt: "Exciting new additions to our menu featuring authentic Asian flavors with a modern twist.",
        content: "We are thrilled to introduce our new Asian fusion menu items, pairing classic techniques with bold, modern flavors.",
        author: "Chef Lin",
        date: (2024, 1, 5),
        read_time: "4 min read",
        category: "Menu Updates",
        photo: 357_756,
        tags: &["asian", "fusion", "new-menu", "sushi"],
    },
    Entry {
        id: 4,
        title: "The Art of Perfect Burger Preparation",
        excerpt: "Behind the scenes look at how we prepare our award-winning burgers.",
        content: "Creating the perfect burger is an art form that requires attention to detail, from the grind of the beef to the toast on the bun.",
        author: "Chef Mike",
        date: (2024, 1, 1),
        read_time: "6 min read",
        category: "Cooking Tips",
        photo: 1_639_557,
        tags: &["burger", "grilling", "technique", "beef"],
    },
    Entry {
        id: 5,
        title: "Seasonal Desserts: Winter Comfort Treats",
        excerpt: "Warm up with our special winter dessert collection featuring seasonal flavors.",
        content: "Winter calls for comfort desserts that warm the soul. This season we are baking with spiced apples, dark chocolate, and roasted chestnuts.",
        author: "Pastry Chef Anna",
        date: (2023, 12, 20),
        read_time: "3 min read",
        category: "Desserts",
        photo: 291_528,
        tags: &["desserts", "winter", "seasonal", "comfort"],
    },
    Entry {
        id: 6,
        title: "Customer Spotlight: Food Blogger Review",
        excerpt: "Read what food blogger @FoodieLife had to say about their dining experience.",
        content: "We were honored to host renowned food blogger @FoodieLife for a tasting of our full menu.",
        author: "Marketing Team",
        date: (2023, 12, 15),
        read_time: "2 min read",
        category: "Reviews",
        photo: 1_279_330,
        tags: &["review", "customer", "blogger", "experience"],
    },
];

/// Content store that holds every post in memory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    posts: Arc<Vec<Post>>,
}

impl ContentStore {
    /// Build the store from the compiled-in posts, newest first.
    #[must_use]
    pub fn load() -> Self {
        let mut posts: Vec<Post> = ENTRIES
            .iter()
            .filter_map(|entry| {
                let (year, month, day) = entry.date;
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    tracing::error!(post_id = entry.id, "Skipping post with invalid date");
                    return None;
                };
                Some(Post {
                    id: BlogPostId::new(entry.id),
                    title: entry.title.to_owned(),
                    excerpt: entry.excerpt.to_owned(),
                    content: entry.content.to_owned(),
                    author: entry.author.to_owned(),
                    date,
                    read_time: entry.read_time.to_owned(),
                    category: entry.category.to_owned(),
                    image: format!(
                        "https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg?auto=compress&cs=tinysrgb&w=500",
                        entry.photo
                    ),
                    tags: entry.tags.iter().map(|&t| t.to_owned()).collect(),
                })
            })
            .collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::info!(posts = posts.len(), "Blog content loaded");
        Self {
            posts: Arc::new(posts),
        }
    }

    /// Posts matching `query`, newest first.
    #[must_use]
    pub fn posts(&self, query: &BlogQuery) -> Vec<&Post> {
        self.posts.iter().filter(|post| query.matches(post)).collect()
    }

    #[must_use]
    pub fn post(&self, id: BlogPostId) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// Posts in the same category as `post`, excluding it.
    #[must_use]
    pub fn related(&self, post: &Post) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|other| other.id != post.id && other.category == post.category)
            .collect()
    }
}
