pub mod product;
pub mod savings;
pub mod sizing;
pub mod sizing_mode;
