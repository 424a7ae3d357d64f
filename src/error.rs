use std::io;

/// Errors surfaced by control-protocol operations.
///
/// `Connect` and `Login` are fatal for the whole call: they occur before any
/// record is processed. `Send`, `Recv` and `Closed` are fatal when they hit
/// the session handshake or a listing, but within a batch append/set/delete
/// they fail only the record in flight.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("connecting to control server: {0}")]
    Connect(#[source] io::Error),

    #[error("login failed: {0}")]
    Login(String),

    #[error("Send IO error: {0}")]
    Send(#[source] io::Error),

    #[error("Recv IO error: {0}")]
    Recv(#[source] io::Error),

    #[error("Connection closed")]
    Closed,
}
