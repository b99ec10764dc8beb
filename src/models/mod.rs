mod mock;
mod product;

pub use mock::*;
pub use product::*;
