mod error;
mod login;
mod role;
mod session;
mod storage;
mod store;
mod view;

pub use error::*;
pub use login::*;
pub use role::*;
pub use session::*;
pub use storage::*;
pub use store::*;
pub use view::*;
