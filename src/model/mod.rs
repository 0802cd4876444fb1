pub mod catalog;
pub mod common;
pub mod identity;
pub mod location;
pub mod product;

pub use catalog::*;
pub use common::*;
pub use identity::*;
pub use location::*;
pub use product::*;
