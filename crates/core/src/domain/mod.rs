pub mod behavior;
pub mod product;
pub mod search;
