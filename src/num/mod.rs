pub mod number;

pub use number::{collapse, format_float, format_integer, Numeric};
