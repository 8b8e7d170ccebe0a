//! Server configuration.

use std::time::Duration;

use crate::domain::SpawnArea;

use super::error::ConfigError;

/// Runtime configuration of the relay server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to (0 picks an ephemeral port)
    pub port: u16,
    /// Interval between two full-sync broadcasts
    pub sync_interval: Duration,
    /// Capacity of each connection's outbound queue
    pub outbound_capacity: usize,
    /// Longest a single socket write may take before the connection is dropped
    pub write_timeout: Duration,
    /// Region new players spawn in
    pub spawn_area: SpawnArea,
}

impl ServerConfig {
    pub const DEFAULT_HOST: &'static str = "127.0.0.1";
    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_SYNC_INTERVAL_MS: u64 = 33;
    pub const DEFAULT_OUTBOUND_CAPACITY: usize = 256;
    pub const DEFAULT_WRITE_TIMEOUT_MS: u64 = 5000;

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check the values the ticker and the per-connection queues depend on.
    ///
    /// `spawn_area` is validated when it is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sync_interval.is_zero() {
            return Err(ConfigError::ZeroSyncInterval);
        }
        if self.outbound_capacity == 0 {
            return Err(ConfigError::ZeroOutboundCapacity);
        }
        if self.write_timeout.is_zero() {
            return Err(ConfigError::ZeroWriteTimeout(self.write_timeout));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
            sync_interval: Duration::from_millis(Self::DEFAULT_SYNC_INTERVAL_MS),
            outbound_capacity: Self::DEFAULT_OUTBOUND_CAPACITY,
            write_timeout: Duration::from_millis(Self::DEFAULT_WRITE_TIMEOUT_MS),
            spawn_area: SpawnArea::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定は 8080 番ポート・33ms 間隔の full-sync
        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.sync_interval, Duration::from_millis(33));
        assert_eq!(config.outbound_capacity, 256);
        assert_eq!(config.write_timeout, Duration::from_secs(5));
        assert_eq!(config.spawn_area, SpawnArea::default());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_values_the_server_cannot_run_with() {
        // テスト項目: full-sync 間隔 0・送信キュー容量 0・書き込みタイムアウト 0 は拒否される
        // given (前提条件):
        let cases = [
            (
                ServerConfig {
                    sync_interval: Duration::ZERO,
                    ..ServerConfig::default()
                },
                ConfigError::ZeroSyncInterval,
            ),
            (
                ServerConfig {
                    outbound_capacity: 0,
                    ..ServerConfig::default()
                },
                ConfigError::ZeroOutboundCapacity,
            ),
            (
                ServerConfig {
                    write_timeout: Duration::ZERO,
                    ..ServerConfig::default()
                },
                ConfigError::ZeroWriteTimeout(Duration::ZERO),
            ),
        ];

        for (config, expected) in cases {
            // when (操作):
            let result = config.validate();

            // then (期待する結果):
            assert_eq!(result, Err(expected));
        }
    }
}
