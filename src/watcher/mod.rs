mod poll;
mod utils;

pub use self::poll::*;
pub(crate) use self::utils::*;
