pub mod layout;
pub mod loader;
pub mod names;

#[cfg(test)]
mod loader_tests;
