pub mod lexer;

pub use lexer::{Coerced, Lexer, Token, coerce_int};
