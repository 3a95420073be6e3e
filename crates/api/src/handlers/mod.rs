pub mod generation;
pub mod page;
