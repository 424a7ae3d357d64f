//! Ephemeral authenticated sessions with the control server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, trace};

use crate::codec;
use crate::config::ProviderConfig;
use crate::error::ControlError;

/// TCP port the control protocol listens on.
pub const CONTROL_PORT: u16 = 7070;

/// Upper bound on a single response read.
const RESPONSE_BUFFER: usize = 4096;

/// One authenticated connection to the control server.
///
/// A session lives for exactly one provider operation: it is opened, used
/// for one or more command round-trips, and closed when dropped. Sessions
/// are never pooled or shared, and no timeouts are set on the socket.
#[derive(Debug)]
pub(crate) struct Session {
    stream: TcpStream,
}

impl Session {
    /// Connects, discards the greeting banner, and logs in.
    ///
    /// The login response must contain the `225` acknowledgement; any other
    /// response, and any I/O error along the way, fails the call and drops
    /// the socket before returning.
    pub(crate) async fn connect(config: &ProviderConfig) -> Result<Self, ControlError> {
        let address = if config.host.contains(':') {
            config.host.clone()
        } else {
            format!("{}:{}", config.host, CONTROL_PORT)
        };
        let stream = TcpStream::connect(&address)
            .await
            .map_err(ControlError::Connect)?;
        debug!(%address, "connected to control server");

        let mut session = Session { stream };

        // The server greets with an unsolicited banner line; an empty
        // command round-trip consumes it before the handshake.
        session.send_command("").await?;

        let response = session
            .send_command(&codec::login(&config.username, config.password.expose()))
            .await?;
        if !response.contains(codec::LOGIN_OK) {
            return Err(ControlError::Login(response.trim().to_owned()));
        }
        debug!(username = %config.username, "logged in");

        Ok(session)
    }

    /// Sends one newline-terminated command and reads one response chunk.
    ///
    /// Exactly one bounded read is performed. The server's framing
    /// guarantees are unknown, so a response longer than the buffer or split
    /// across TCP segments may come back truncated; callers get whatever
    /// arrived first. An empty command is valid and used for the banner.
    pub(crate) async fn send_command(&mut self, command: &str) -> Result<String, ControlError> {
        let mut line = String::with_capacity(command.len() + 1);
        line.push_str(command);
        line.push('\n');
        self.stream
            .write_all(line.as_bytes())
            .await
            .map_err(ControlError::Send)?;

        let mut buffer = vec![0u8; RESPONSE_BUFFER];
        let n = self
            .stream
            .read(&mut buffer)
            .await
            .map_err(ControlError::Recv)?;
        if n == 0 {
            return Err(ControlError::Closed);
        }

        trace!(bytes = n, "command round-trip");
        Ok(String::from_utf8_lossy(&buffer[..n]).into_owned())
    }
}
