pub mod loading_overlay;
pub mod misc;
pub mod product_card;
pub mod route_transition;
