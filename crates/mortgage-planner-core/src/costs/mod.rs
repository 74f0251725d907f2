pub mod brackets;
pub mod malaysia;
