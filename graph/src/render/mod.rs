pub mod text;

pub use text::{Charset, Color, TextRenderer};
