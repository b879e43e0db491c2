pub mod chatbot;
pub mod greeting;
pub mod normalizer;
pub mod persona;
pub mod prompt;
pub mod upstream;
