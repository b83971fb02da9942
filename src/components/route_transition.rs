use crate::prelude::*;

use std::{cell::RefCell, rc::Rc};

use tokio::time::Instant;

use crate::{config::APP_CONFIG, Route};

/// Renders the routed page with enter/exit animation classes.
///
/// Layers are keyed by path: the leaving route keeps an empty layer for the
/// duration of its exit animation, the current one hosts the [Outlet].
#[component]
pub fn RouteTransition() -> Element {
    let path = use_route::<Route>().to_string();
    let presenter = use_hook(|| {
        Rc::new(RefCell::new(TransitionPresenter::new(
            APP_CONFIG.peek().transition.clone(),
        )))
    });
    // Bumped when a phase ends so that the layers are recomputed
    let mut frame = use_signal(|| 0u64);
    let _ = frame();

    let now = Instant::now();
    let (layers, next_change) = {
        let mut presenter = presenter.borrow_mut();
        if presenter.set_path(&path, now) {
            log::debug!("RouteTransition - now on {path}");
        }
        (presenter.layers(now), presenter.next_change(now))
    };

    use_effect(use_reactive((&next_change,), move |(next_change,)| {
        if let Some(at) = next_change {
            spawn(async move {
                tokio::time::sleep_until(at).await;
                frame += 1;
            });
        }
    }));

    rsx! {
        div { class: "route-stage relative",
            for layer in layers {
                div {
                    key: "{layer.path}",
                    class: "route-layer",
                    class: layer.phase.css_class(),
                    if layer.path.as_ref() == path.as_str() {
                        Outlet::<Route> {}
                    }
                }
            }
        }
    }
}
