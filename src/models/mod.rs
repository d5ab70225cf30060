mod category;
mod customer;
mod order;
mod product;

pub use category::*;
pub use customer::*;
pub use order::*;
pub use product::*;
