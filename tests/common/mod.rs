//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

use tcg_deckbuilder::cards::{Card, CardFactory};
use tcg_deckbuilder::catalog::MemoryCatalog;

static LOGGING: OnceCell<()> = OnceCell::new();

/// Initialise test logging once.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// A small catalog: three characters, one of each other kind.
pub fn sample_cards() -> Vec<Card> {
    let factory = CardFactory::new();
    let records = [
        json!({
            "id": "diluc", "name": "Diluc", "card_type": "CHARACTER",
            "element": "Pyro", "weapon": "Claymore", "hp": 10, "max_energy": 3,
            "skills": ["Tempered Sword", "Searing Onslaught", "Dawn"],
        }),
        json!({
            "id": "xingqiu", "name": "Xingqiu", "card_type": "CHARACTER",
            "element": "Hydro", "weapon": "Sword", "hp": 10, "max_energy": 2,
        }),
        json!({
            "id": "fischl", "name": "Fischl", "card_type": "CHARACTER",
            "element": "Electro", "weapon": "Bow", "hp": 10, "max_energy": 3,
        }),
        json!({
            "id": "sweet_madame", "name": "Sweet Madame", "card_type": "ACTION",
            "cost": 0, "tags": ["Food"],
        }),
        json!({
            "id": "wolfs_gravestone", "name": "Wolf's Gravestone", "card_type": "EQUIPMENT",
            "cost": 3, "slot": "Weapon",
        }),
        json!({
            "id": "paimon", "name": "Paimon", "card_type": "SUPPORT",
            "cost": 3, "support_type": "Companion", "usages": 2,
        }),
        json!({
            "id": "abyssal_summons", "name": "Abyssal Summons", "card_type": "EVENT",
            "cost": 2, "duration": 2,
        }),
    ];

    records
        .iter()
        .map(|r| factory.create_card_from_json(r).expect("sample card is well formed"))
        .collect()
}

/// `MemoryCatalog` holding `sample_cards()`.
pub fn sample_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    for card in sample_cards() {
        catalog.register(card);
    }
    catalog
}
