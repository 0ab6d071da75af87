/// A product in the Aura catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub price_usd: f64,
    pub description: &'static str,
}

/// All products, in display order.
pub const CATALOG: &[Product] = &[
    Product {
        id: "halo-lamp",
        name: "Halo Lamp",
        category: "Lighting",
        price_usd: 129.0,
        description: "A sunrise lamp that wakes you with warm, gradual light.",
    },
    Product {
        id: "drift-speaker",
        name: "Drift Speaker",
        category: "Audio",
        price_usd: 249.0,
        description: "A stone-finish speaker with room-filling, balanced sound.",
    },
    Product {
        id: "hush-earbuds",
        name: "Hush Earbuds",
        category: "Audio",
        price_usd: 179.0,
        description: "Noise-cancelling earbuds designed for all-day comfort.",
    },
    Product {
        id: "mist-diffuser",
        name: "Mist Diffuser",
        category: "Home",
        price_usd: 89.0,
        description: "An ultrasonic diffuser with a soft ambient glow.",
    },
    Product {
        id: "dawn-clock",
        name: "Dawn Clock",
        category: "Home",
        price_usd: 99.0,
        description: "A minimalist clock that keeps screens out of the bedroom.",
    },
    Product {
        id: "stone-charger",
        name: "Stone Charger",
        category: "Accessories",
        price_usd: 59.0,
        description: "A wireless charging pad carved from natural stone.",
    },
];

/// Looks up a product by id (case-insensitive).
pub fn find_product(id: &str) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id.eq_ignore_ascii_case(id.trim()))
}
