pub mod constants;
pub mod encoder;
pub mod generator;
pub mod naming;
pub mod paths;
pub mod render;
pub mod types;

#[cfg(test)]
mod test_support;

pub use generator::{generate_plain, generate_with_logo, GenerateError};
pub use naming::{unique_filename, NamingError};
pub use paths::Defaults;
