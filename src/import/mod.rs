pub mod error;
pub mod notification;
pub mod outcome;
pub mod ports;
pub mod registry;
pub mod session;
pub mod state;
pub mod strategy;
pub mod types;


pub use error::*;
pub use notification::*;
pub use outcome::*;
pub use ports::*;
pub use registry::*;
pub use session::*;
pub use state::*;
pub use strategy::*;
pub use types::*;
