//! The provider: four record-management capabilities over ephemeral sessions.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::codec::{self, TtlSuffix};
use crate::config::ProviderConfig;
use crate::error::ControlError;
use crate::rr::Record;
use crate::session::Session;

/// Lists the records of a zone.
#[async_trait]
pub trait RecordGetter {
    /// Returns the records the server reports for `zone`, in the order the
    /// server listed them. An empty listing is `Ok(vec![])`, not an error.
    async fn get_records(
        &self,
        zone: &str,
        cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError>;
}

/// Adds records to a zone.
#[async_trait]
pub trait RecordAppender {
    /// Adds `records` one by one, best effort, and returns the subset whose
    /// command round-trip succeeded.
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
        cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError>;
}

/// Overwrites records in a zone.
#[async_trait]
pub trait RecordSetter {
    /// Writes `records` one by one, best effort, and returns the subset
    /// whose command round-trip succeeded.
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
        cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError>;
}

/// Removes records from a zone.
#[async_trait]
pub trait RecordDeleter {
    /// Deletes `records` one by one, best effort, and returns the subset
    /// whose command round-trip succeeded.
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
        cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError>;
}

/// Client adapter for the line-oriented DNS control protocol.
///
/// Every operation opens its own TCP session (connect, banner, `LOGIN`),
/// issues its commands, and drops the connection when it returns, so the
/// provider itself is freely cloneable and shareable; concurrent calls never
/// share a socket.
///
/// The [`CancellationToken`] accepted by each operation is part of the
/// interface contract but is not wired into in-flight reads and writes: a
/// cancelled token does not interrupt a round-trip already underway.
///
/// Batch operations are not transactional. Records are sent one command at a
/// time; a record whose command fails is logged and skipped, and the call
/// returns the records that were sent. "Sent" means the command was
/// transmitted and a response came back without a transport error; the
/// server's acknowledgement codes are not inspected.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ProviderConfig,
}

impl Provider {
    pub fn new(config: ProviderConfig) -> Self {
        Provider { config }
    }

    /// Sends one command per record over a single session, accumulating the
    /// records that made it through. A mid-batch failure skips that record
    /// and continues; there is no rollback of earlier sends.
    async fn send_batch<F>(
        &self,
        records: Vec<Record>,
        render: F,
        action: &str,
    ) -> Result<Vec<Record>, ControlError>
    where
        F: Fn(&Record) -> String,
    {
        let mut session = Session::connect(&self.config).await?;
        let mut sent = Vec::with_capacity(records.len());
        for record in records {
            match session.send_command(&render(&record)).await {
                Ok(_) => sent.push(record),
                Err(error) => {
                    warn!(
                        name = %record.name,
                        rtype = %record.rtype,
                        %error,
                        "failed to {action} record, skipping"
                    );
                }
            }
        }
        Ok(sent)
    }
}

impl From<ProviderConfig> for Provider {
    fn from(config: ProviderConfig) -> Self {
        Provider::new(config)
    }
}

#[async_trait]
impl RecordGetter for Provider {
    #[tracing::instrument(skip_all, fields(%zone), level = "debug")]
    async fn get_records(
        &self,
        zone: &str,
        _cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError> {
        let mut session = Session::connect(&self.config).await?;
        let response = session.send_command(&codec::list(zone)).await?;
        Ok(codec::parse_listing(&response))
    }
}

#[async_trait]
impl RecordAppender for Provider {
    // The zone is implied by the record names; the add command does not
    // carry it.
    #[tracing::instrument(skip_all, fields(%zone, count = records.len()), level = "debug")]
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<Record>,
        _cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError> {
        self.send_batch(records, |record| codec::add(record, TtlSuffix::Always), "add")
            .await
    }
}

#[async_trait]
impl RecordSetter for Provider {
    #[tracing::instrument(skip_all, fields(%zone, count = records.len()), level = "debug")]
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<Record>,
        _cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError> {
        // Overwrites reuse the add command; only the TTL suffix differs.
        self.send_batch(records, |record| codec::add(record, TtlSuffix::SrvOnly), "set")
            .await
    }
}

#[async_trait]
impl RecordDeleter for Provider {
    #[tracing::instrument(skip_all, fields(%zone, count = records.len()), level = "debug")]
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<Record>,
        _cancel: CancellationToken,
    ) -> Result<Vec<Record>, ControlError> {
        self.send_batch(records, codec::delete, "delete").await
    }
}
