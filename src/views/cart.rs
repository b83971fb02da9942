use crate::prelude::*;

use crate::{components::misc::Divider, utils::format_price, Route};

#[component]
pub fn CartView() -> Element {
    log::debug!("CartView Rendered");

    let cart_service = state_management::use_cart_service();
    let total = use_memo(move || state_management::cart_total_cents(&state_management::CART.read()));

    use_drop(|| log::debug!("CartView Dropped"));

    let lines = state_management::CART();

    rsx! {
        h1 { class: "text-2xl font-black my-4", "Your cart" }
        if lines.is_empty() {
            div { class: "flex flex-col gap-4",
                p { "Your cart is empty." }
                Link { class: "btn btn-primary w-fit", to: Route::ProductListView {}, "Browse the shop" }
            }
        } else {
            table { class: "table",
                thead {
                    tr {
                        th { "Product" }
                        th { "Quantity" }
                        th { "Subtotal" }
                        th {}
                    }
                }
                tbody {
                    for line in lines {
                        tr { key: "{line.id}",
                            td { "{line.product.name}" }
                            td { "{line.quantity}" }
                            td { class: "font-mono", {format_price(line.subtotal_cents())} }
                            td {
                                button {
                                    class: "btn btn-sm btn-outline btn-error",
                                    onclick: move |_| cart_service.send(CartCommand::Remove { line: line.id }),
                                    "Remove"
                                }
                            }
                        }
                    }
                }
            }
            Divider { "Total" }
            div { class: "text-2xl font-mono text-right", {format_price(total())} }
        }
    }
}
