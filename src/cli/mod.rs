pub mod args;
pub mod constants;

pub use args::Args;
