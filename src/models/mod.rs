// Re-export model modules
mod currencies;

pub use currencies::*;
