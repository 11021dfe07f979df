pub mod key_value_store;
pub mod product_catalog;
pub mod sizing_types;
pub mod sizing_yaml;
