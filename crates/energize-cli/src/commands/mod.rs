pub mod evaluate;
pub mod parse;
