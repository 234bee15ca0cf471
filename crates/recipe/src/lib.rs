mod detail;
mod form;
mod list;

pub use detail::*;
pub use form::*;
pub use list::*;
