pub mod cart;
pub mod home;
pub mod main_layout;
pub mod policy;
pub mod products;
