pub mod string;

pub use string::{clean_string, clean_table, clean_value};
