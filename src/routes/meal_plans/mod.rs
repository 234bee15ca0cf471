pub mod detail;
pub mod form;
pub mod index;
pub mod shopping_list;
