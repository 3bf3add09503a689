pub mod assistant;
pub mod command;
pub mod completion;
pub mod conversation;
pub mod error;
pub mod http;
pub mod prompt;
pub mod provider;
pub mod render;
pub mod respond;
pub mod suggest;
pub mod transport;
pub mod types;
pub mod upload;

pub use error::*;
pub use types::*;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }
}
