pub mod choice;
pub mod context;
pub mod document;
pub mod generator;
pub mod template;
