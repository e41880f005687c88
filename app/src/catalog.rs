//! Built-in marketplace catalog.
//!
//! The contract only exposes per-id item lookups, so the storefront keeps
//! its own listing of known item ids and display copy, refreshing price and
//! availability against the live `get_marketplace_item_view` records.

use capy_api::types::ItemKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Rare => "RARE",
            Self::Epic => "EPIC",
            Self::Legendary => "LEGENDARY",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Common => "text-gray-500",
            Self::Rare => "text-blue-500",
            Self::Epic => "text-purple-500",
            Self::Legendary => "text-yellow-500",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatalogItem {
    pub id: u64,
    pub name: &'static str,
    pub description: &'static str,
    /// Listed price in APT; superseded by the live record when available.
    pub price: u64,
    pub kind: ItemKind,
    pub rarity: Rarity,
    pub emoji: &'static str,
}

pub const CATALOG: &[CatalogItem] = &[
    CatalogItem {
        id: 1,
        name: "Premium Cat Food",
        description: "Nutritious and delicious food that makes your pet happy",
        price: 5,
        kind: ItemKind::Food,
        rarity: Rarity::Common,
        emoji: "\u{1F356}",
    },
    CatalogItem {
        id: 2,
        name: "Deluxe Fish",
        description: "Fresh fish that your pet will love",
        price: 8,
        kind: ItemKind::Food,
        rarity: Rarity::Rare,
        emoji: "\u{1F41F}",
    },
    CatalogItem {
        id: 3,
        name: "Special Treats",
        description: "Rare treats that boost happiness",
        price: 15,
        kind: ItemKind::Food,
        rarity: Rarity::Epic,
        emoji: "\u{1F36A}",
    },
    CatalogItem {
        id: 4,
        name: "Blue Ball",
        description: "A fun blue ball for your pet to play with",
        price: 3,
        kind: ItemKind::Toy,
        rarity: Rarity::Common,
        emoji: "\u{1F3BE}",
    },
    CatalogItem {
        id: 5,
        name: "Mouse Toy",
        description: "Interactive mouse toy that moves",
        price: 7,
        kind: ItemKind::Toy,
        rarity: Rarity::Rare,
        emoji: "\u{1F401}",
    },
    CatalogItem {
        id: 6,
        name: "Laser Pointer",
        description: "High-tech laser pointer for endless fun",
        price: 12,
        kind: ItemKind::Toy,
        rarity: Rarity::Epic,
        emoji: "\u{1F526}",
    },
    CatalogItem {
        id: 7,
        name: "Flower Pot",
        description: "Beautiful flower pot to decorate your pet's room",
        price: 4,
        kind: ItemKind::Decoration,
        rarity: Rarity::Common,
        emoji: "\u{1F33B}",
    },
    CatalogItem {
        id: 8,
        name: "Wall Art",
        description: "Elegant wall art for your pet's space",
        price: 10,
        kind: ItemKind::Decoration,
        rarity: Rarity::Rare,
        emoji: "\u{1F5BC}",
    },
    CatalogItem {
        id: 9,
        name: "Blue Cat Bed",
        description: "Comfortable blue bed for your pet to rest",
        price: 20,
        kind: ItemKind::Furniture,
        rarity: Rarity::Common,
        emoji: "\u{1F6CF}",
    },
    CatalogItem {
        id: 10,
        name: "Purple Cat Bed",
        description: "Luxurious purple bed for ultimate comfort",
        price: 35,
        kind: ItemKind::Furniture,
        rarity: Rarity::Rare,
        emoji: "\u{1F6CB}",
    },
    CatalogItem {
        id: 11,
        name: "Cat Home",
        description: "A cozy home for your pet to live in",
        price: 50,
        kind: ItemKind::Furniture,
        rarity: Rarity::Epic,
        emoji: "\u{1F3E0}",
    },
    CatalogItem {
        id: 12,
        name: "Puzzle Game",
        description: "Interactive puzzle game to keep your pet entertained",
        price: 25,
        kind: ItemKind::Toy,
        rarity: Rarity::Rare,
        emoji: "\u{1F9E9}",
    },
    CatalogItem {
        id: 13,
        name: "Arcade Machine",
        description: "Retro arcade machine for gaming fun",
        price: 75,
        kind: ItemKind::Toy,
        rarity: Rarity::Legendary,
        emoji: "\u{1F579}",
    },
];

pub fn kind_emoji(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Food => "\u{1F37D}",
        ItemKind::Toy => "\u{1F3BE}",
        ItemKind::Furniture => "\u{1F6CF}",
        ItemKind::Decoration => "\u{1F3A8}",
        ItemKind::Unknown(_) => "\u{2753}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_unique_and_sequential() {
        for (i, item) in CATALOG.iter().enumerate() {
            assert_eq!(item.id, i as u64 + 1);
        }
    }
}
