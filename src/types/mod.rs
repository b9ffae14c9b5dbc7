mod string;
mod table;
mod value;

pub use string::LuaString;
pub use table::Table;
pub use value::Value;
