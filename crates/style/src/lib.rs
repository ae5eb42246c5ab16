pub mod dimension;
pub mod error;
pub mod flex;
pub mod font;
pub mod keyword;
pub mod parsers;
pub mod property;
pub mod style;
pub mod text;
pub mod value;

pub use dimension::{Dimension, Margins};
pub use error::StyleError;
pub use flex::{AlignItems, Direction, Display, JustifyContent, Visibility};
pub use font::{Font, FontStyle, FontVariant, FontWeight};
pub use keyword::Keyword;
pub use property::StyleProperty;
pub use style::Style;
pub use text::{TextAlign, TextDirection};
pub use value::StyleValue;
