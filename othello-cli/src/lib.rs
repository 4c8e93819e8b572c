//! 黑白棋终端客户端

pub mod session;
pub mod settings;

pub use session::{Command, Session};
pub use settings::{PlayerKind, Settings};
