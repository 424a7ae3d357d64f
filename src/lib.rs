//! Client adapter for a line-oriented DNS record control protocol.
//!
//! Each operation opens a TCP session on port 7070, authenticates with
//! `LOGIN`, issues newline-terminated commands (`LISTRR`, `ADDRR`, `DELRR`),
//! and parses the status-prefixed line responses into [`Record`]s. Sessions
//! are ephemeral: one connect/login/disconnect cycle per operation, no
//! pooling and no retries.

mod codec;
pub mod config;
pub mod error;
pub mod provider;
pub mod rr;
mod session;

pub use self::config::{Password, ProviderConfig};
pub use self::error::ControlError;
pub use self::provider::{Provider, RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
pub use self::rr::{Record, TimeToLive};
pub use self::session::CONTROL_PORT;
