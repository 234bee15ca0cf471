mod item;
mod view;

pub use item::*;
pub use view::*;
