// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

/// Connection strategy used for the downstream `tonic` channels.
///
/// `Pooled` is the default: one shared HTTP/2 connection multiplexed across
/// calls. `Single`/`Short` exist for parity with the original access node's
/// `brpc::ChannelOptions::connection_type` knob and are accepted but do not
/// change `tonic`'s own connection-pooling behavior.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Single,
    Pooled,
    Short,
}

impl Default for ConnectionType {
    fn default() -> Self {
        ConnectionType::Pooled
    }
}

/// Top-level access-node configuration, loaded from a YAML file.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Address this node's gRPC server binds to, e.g. `"0.0.0.0:8001"`.
    pub server_address: String,
    /// Endpoint of the downstream logic tier (message persistence/routing).
    pub logic_channel: String,
    /// Endpoint of the downstream dbproxy tier (auth + session metadata).
    pub db_channel: String,
    #[serde(default)]
    pub connection_type: ConnectionType,
    /// RPC timeout applied to calls to the downstream tiers.
    #[serde(with = "serde_millis")]
    pub timeout_ms: Duration,
    /// Max retries for downstream calls (not including the first attempt).
    #[serde(default = "default_max_retry")]
    pub max_retry: u32,
    /// Seconds of inactivity before a user's session is torn down.
    #[serde(default = "default_heartbeat_timeout_s")]
    pub recv_heartbeat_timeout_s: u64,
    /// Number of shards in the session table. Must be a power of two.
    #[serde(default = "default_shard_count")]
    pub shard_count: usize,
}

fn default_max_retry() -> u32 {
    3
}

fn default_heartbeat_timeout_s() -> u64 {
    400
}

fn default_shard_count() -> usize {
    16
}

impl Config {
    /// Loads the configuration from YAML, validates it, and returns the
    /// ready-to-use value.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path)?;
        let mut cfg: Config =
            serde_yaml::from_str(&s).context("failed to parse config YAML")?;
        cfg.validate_and_normalize()?;
        Ok(cfg)
    }

    /// Validates invariants that the wire/runtime code relies on.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        ensure!(!self.server_address.is_empty(), "server_address must not be empty");
        ensure!(!self.logic_channel.is_empty(), "logic_channel must not be empty");
        ensure!(!self.db_channel.is_empty(), "db_channel must not be empty");
        ensure!(self.shard_count > 0, "shard_count must be > 0");
        ensure!(
            self.shard_count.is_power_of_two(),
            "shard_count must be a power of two, got {}",
            self.shard_count
        );
        ensure!(
            self.recv_heartbeat_timeout_s > 0,
            "recv_heartbeat_timeout_s must be > 0"
        );
        Ok(())
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.recv_heartbeat_timeout_s)
    }
}

/// Serde helper representing a `Duration` as a number of milliseconds.
mod serde_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}
