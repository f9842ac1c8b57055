pub mod categories;
pub mod entity;
pub mod hours;

pub use categories::*;
pub use entity::*;
pub use hours::*;
