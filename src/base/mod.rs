mod channel;
mod error;
mod frame;
#[cfg(test)]
pub(crate) mod mock;
mod traits;

pub use self::channel::*;
pub use self::error::{Error, Result};
pub use self::frame::CommandFrame;
pub use self::traits::{Connector, Transport};
