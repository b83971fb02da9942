use crate::prelude::*;

use crate::utils::CCStr;

/// Static policy pages, no data to load
#[component]
pub fn PolicyView(name: CCStr) -> Element {
    let body = match name.as_ref() {
        "shipping" => "Orders ship within two business days from our workshop.",
        "returns" => "Unused items can be returned within 30 days for a full refund.",
        "privacy" => "We only keep what we need to ship your order.",
        _ => "This policy does not exist.",
    };

    rsx! {
        h1 { class: "text-2xl font-black my-4 capitalize", "{name} policy" }
        p { class: "text-lg max-w-xl", "{body}" }
    }
}
