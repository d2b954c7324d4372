//! slidetoe - terminal driver for the sliding-mark tic-tac-toe engine
//!
//! Wraps [`slidetoe_engine::GameEngine`] with the pieces a playable program
//! needs around it.
//!
//! # Architecture
//!
//! - **Config**: TOML settings for the win threshold, cooldowns and snapshot path
//! - **Store**: snapshot persistence (JSON file or in-memory)
//! - **Session**: text commands in, reply lines out, cooldowns signalled to the caller
//!
//! # Example
//!
//! ```
//! use slidetoe::{AppConfig, InputCommand, MemoryStore, Session};
//!
//! let mut session = Session::open(MemoryStore::new(), AppConfig::default());
//! session.handle(InputCommand::Resume);
//! let reply = session.handle("4".parse().unwrap());
//! assert_eq!(reply.lines[0], "Player 1 (X) takes 4");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod session;
mod store;

pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use session::{Cooldown, InputCommand, ParseCommandError, Reply, Session};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore, StoreError};
