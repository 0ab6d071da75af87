//! Product catalog and the in-memory cart.

mod cart;
mod catalog;

pub use cart::Cart;
pub use catalog::{CATALOG, Product, find_product};
