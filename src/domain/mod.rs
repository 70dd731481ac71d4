//! Domain types shared by the wardrobe server and the clothing list store.

pub mod clothing;
pub mod filter;
pub mod types;
