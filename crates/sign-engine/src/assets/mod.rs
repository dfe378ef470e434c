pub mod manifest;
pub mod words;
