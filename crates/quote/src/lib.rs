mod board;
mod error;
mod quote;
mod stage;
mod transition;

pub use board::*;
pub use error::*;
pub use quote::*;
pub use stage::*;
pub use transition::*;
