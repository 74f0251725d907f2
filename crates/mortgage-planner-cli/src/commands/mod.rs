pub mod affordability;
pub mod comparison;
pub mod mortgage;
