//! Domain model
pub mod events;
pub mod order;
pub mod pincode;
pub mod product;
pub mod seller;

pub use events::OrderPlaced;
pub use order::{Order, OrderStatus, UnknownStatus};
pub use pincode::{Pincode, PincodeError};
pub use product::Product;
pub use seller::Seller;
