use crate::prelude::*;

use crate::utils::CCStr;

#[component]
pub fn Divider(children: Element) -> Element {
    rsx! {
        div { class: "divider text-base-content/60 text-base text-nowrap mt-6 mb-4",
            {children}
        }
    }
}

/// Back button pushing an explicit route rather than popping history
#[component]
pub fn BackButton(route: crate::Route) -> Element {
    let click_back = move |_| {
        navigator().push(route.clone());
    };

    rsx! {
        div { class: "h-full content-center",
            button { class: "btn btn-outline btn-primary", onclick: click_back, "Back" }
        }
    }
}

/// Inline error box for a failed fetch
#[component]
pub fn LoadError(message: CCStr) -> Element {
    rsx! {
        div { class: "alert alert-error text-base font-semibold", role: "alert", "{message}" }
    }
}
