#![allow(unused)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, Once};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

/// Registers a global default tracing subscriber when called for the first time. This is intended
/// for use in tests.
pub fn subscribe() {
    static INSTALL_TRACING_SUBSCRIBER: Once = Once::new();
    INSTALL_TRACING_SUBSCRIBER.call_once(|| {
        let subscriber = tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).unwrap();
    });
}

/// Scripted behavior for one [`ControlServer`].
#[derive(Debug, Clone)]
pub struct ServerScript {
    /// Banner sent unsolicited as soon as a client connects.
    pub banner: String,
    /// Response to `LOGIN`.
    pub login_response: String,
    /// Response to `LISTRR`.
    pub listing: String,
    /// Response to `ADDRR` / `DELRR`.
    pub command_response: String,
    /// Close the connection after responding to this many record commands.
    pub close_after: Option<usize>,
}

impl Default for ServerScript {
    fn default() -> Self {
        ServerScript {
            banner: "220 control server ready".into(),
            login_response: "225 Login successful".into(),
            listing: "250 end of listing".into(),
            command_response: "200 OK".into(),
            close_after: None,
        }
    }
}

/// In-process stand-in for the control server.
///
/// Accepts connections in a background task and plays the script against
/// each one, recording every command line it receives.
pub struct ControlServer {
    addr: SocketAddr,
    commands: Arc<Mutex<Vec<String>>>,
}

impl ControlServer {
    pub async fn start(script: ServerScript) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let commands = Arc::new(Mutex::new(Vec::new()));

        let transcript = commands.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                serve(stream, script.clone(), transcript.clone()).await;
            }
        });

        ControlServer { addr, commands }
    }

    /// `host:port` string suitable for `ProviderConfig::host`.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Every non-empty command line received so far, across all connections.
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

async fn serve(stream: TcpStream, script: ServerScript, transcript: Arc<Mutex<Vec<String>>>) {
    let (read, mut write) = stream.into_split();
    let mut lines = BufReader::new(read).lines();

    // Unsolicited greeting; the client consumes it with a blind read.
    if write
        .write_all(format!("{}\r\n", script.banner).as_bytes())
        .await
        .is_err()
    {
        return;
    }

    let mut responded = 0usize;
    while let Ok(Some(line)) = lines.next_line().await {
        if line.is_empty() {
            // The client's banner-consuming probe; the banner already
            // answered it.
            continue;
        }
        transcript.lock().unwrap().push(line.clone());

        let response = if line.starts_with("LOGIN") {
            script.login_response.clone()
        } else if line.starts_with("LISTRR") {
            script.listing.clone()
        } else {
            script.command_response.clone()
        };
        if write
            .write_all(format!("{response}\r\n").as_bytes())
            .await
            .is_err()
        {
            return;
        }

        if !line.starts_with("LOGIN") && !line.starts_with("LISTRR") {
            responded += 1;
            if script.close_after.is_some_and(|limit| responded >= limit) {
                // Drop both halves to close the connection mid-batch.
                return;
            }
        }
    }
}
