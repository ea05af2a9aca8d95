pub mod catalog;
pub mod classifier;
pub mod config;
pub mod gate;
pub mod samples;
pub mod session;

pub use catalog::*;
pub use classifier::*;
pub use config::*;
pub use gate::*;
pub use samples::*;
pub use session::*;
