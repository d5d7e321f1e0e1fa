pub mod card;
pub mod date_format;
pub mod font;
pub mod parsers;

pub use card::{FontFile, StyleConfig};
pub use date_format::DateFormat;
pub use font::{FontSpec, FontStyle, FontWeight};
pub use parsers::StyleParseError;
