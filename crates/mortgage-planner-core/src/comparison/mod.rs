pub mod catalog;
pub mod quotes;
pub mod selection;
