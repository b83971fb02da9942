use crate::{
    navigation::prelude::PendingWorkCounter,
    utils::{async_sleep, log_error_ccstr, CCStr},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub slug: CCStr,
    pub name: CCStr,
    pub summary: CCStr,
    pub price_cents: u64,
}

const CATALOG: &[(&str, &str, &str, u64)] = &[
    (
        "linen-tote",
        "Linen Tote",
        "Washed linen tote bag with an inner pocket.",
        2400,
    ),
    (
        "ceramic-mug",
        "Ceramic Mug",
        "Stoneware mug, 350ml, dishwasher safe.",
        1600,
    ),
    (
        "wool-throw",
        "Wool Throw",
        "Merino throw blanket, 130x170cm.",
        8900,
    ),
    (
        "oak-board",
        "Oak Serving Board",
        "Oiled oak board with a juice groove.",
        4200,
    ),
    (
        "beeswax-candle",
        "Beeswax Candle",
        "Hand-poured pillar candle, 40h burn time.",
        1250,
    ),
];

fn products() -> impl Iterator<Item = Product> {
    CATALOG
        .iter()
        .map(|(slug, name, summary, price_cents)| Product {
            slug: (*slug).into(),
            name: (*name).into(),
            summary: (*summary).into(),
            price_cents: *price_cents,
        })
}

/// Lists the catalog, counted as a fetch
pub async fn fetch_products(
    work: &PendingWorkCounter,
    latency_ms: u64,
) -> Result<Vec<Product>, CCStr> {
    work.track_fetch(async move {
        async_sleep(latency_ms).await;
        Ok(products().collect())
    })
    .await
}

/// Looks a product up by slug, counted as a fetch
pub async fn fetch_product(
    work: &PendingWorkCounter,
    slug: &str,
    latency_ms: u64,
) -> Result<Product, CCStr> {
    work.track_fetch(async move {
        async_sleep(latency_ms).await;
        products()
            .find(|p| p.slug.as_ref() == slug)
            .ok_or_else(|| log_error_ccstr(format!("No product named \"{slug}\"")))
    })
    .await
}

/// Round-trip of a write to the backend, counted as a mutation
pub async fn persist_cart_change(work: &PendingWorkCounter, latency_ms: u64) {
    work.track_mutation(async_sleep(latency_ms)).await
}
