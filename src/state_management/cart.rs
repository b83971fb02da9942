use dioxus::prelude::*;

use futures_util::stream::StreamExt;
use uuid::Uuid;

use crate::{config::APP_CONFIG, navigation::prelude::PendingWorkCounter};

use super::catalog::{persist_cart_change, Product};

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: Uuid,
    pub product: Product,
    pub quantity: u32,
}
impl CartLine {
    pub fn subtotal_cents(&self) -> u64 {
        self.product.price_cents * u64::from(self.quantity)
    }
}

pub static CART: GlobalSignal<Vec<CartLine>> = Signal::global(Vec::new);

/// Commands for the cart service
#[derive(Debug)]
pub enum CartCommand {
    Add { product: Product, quantity: u32 },
    Remove { line: Uuid },
}

/// Cart service coroutine
///
/// Every change is persisted on the backend before being applied locally and
/// counts as a mutation meanwhile.
pub(super) fn use_cart_service(work: PendingWorkCounter) -> Coroutine<CartCommand> {
    use_coroutine(move |mut rx: UnboundedReceiver<CartCommand>| {
        let work = work.clone();
        async move {
            log::info!("cart_service (coroutine) - start");

            while let Some(cmd) = rx.next().await {
                log::debug!("cart_service (coroutine) - Processing command {cmd:?}...");
                let latency_ms = APP_CONFIG.peek().backend.latency_ms;
                persist_cart_change(&work, latency_ms).await;

                match cmd {
                    CartCommand::Add { product, quantity } => {
                        apply_add(&mut CART.write(), product, quantity)
                    }
                    CartCommand::Remove { line } => {
                        CART.write().retain(|l| l.id != line);
                    }
                }
                log::debug!("cart_service (coroutine) - Command processed");
            }
        }
    })
}

fn apply_add(lines: &mut Vec<CartLine>, product: Product, quantity: u32) {
    match lines.iter_mut().find(|l| l.product.slug == product.slug) {
        Some(line) => line.quantity += quantity,
        None => lines.push(CartLine {
            id: Uuid::new_v4(),
            product,
            quantity,
        }),
    }
}

pub fn cart_total_cents(lines: &[CartLine]) -> u64 {
    lines.iter().map(CartLine::subtotal_cents).sum()
}

pub fn cart_item_count(lines: &[CartLine]) -> u32 {
    lines.iter().map(|l| l.quantity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(slug: &str, price_cents: u64) -> Product {
        Product {
            slug: slug.into(),
            name: slug.into(),
            summary: "".into(),
            price_cents,
        }
    }

    #[test]
    fn adding_the_same_product_merges_lines() {
        let mut lines = Vec::new();
        apply_add(&mut lines, product("mug", 1600), 1);
        apply_add(&mut lines, product("tote", 2400), 1);
        apply_add(&mut lines, product("mug", 1600), 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(cart_item_count(&lines), 4);
        assert_eq!(cart_total_cents(&lines), 3 * 1600 + 2400);
    }
}
