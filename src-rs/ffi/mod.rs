mod session;
mod session_util;

pub use session::*;
