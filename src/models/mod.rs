pub mod character;
pub mod favorite;
pub mod pricing;

pub use character::*;
pub use favorite::*;
pub use pricing::*;
