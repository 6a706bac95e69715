pub mod common;
pub mod health;
pub mod search;
pub mod suppliers;

pub use health::{health, ready};
pub use search::{post_offers, post_search};
pub use suppliers::{get_supplier_by_id, get_suppliers};
