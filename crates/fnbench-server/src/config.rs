// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 9 October 2026

use fnbench_core::{ConfigError, ExecutionLimit};
use std::{
    net::{SocketAddr, ToSocketAddrs},
    time::Duration,
};

/// Environment variable holding the listening port.
pub const PORT_ENV: &str = "GRPC_PORT";
/// The unspecified IPv6 address, which also accepts IPv4 on dual-stack hosts.
pub const DEFAULT_HOST: &str = "::";
pub const DEFAULT_PORT: u16 = 50051;
pub const DEFAULT_WORKERS: usize = 2;

/// How a server listens and runs calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host or address to bind, all interfaces by default.
    pub host: String,
    pub port: u16,
    /// Size of the worker pool. Calls beyond this queue in the listener.
    pub workers: usize,
    /// How often an idle worker checks for shutdown.
    pub poll_interval: Duration,
    pub limit: ExecutionLimit,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKERS,
            poll_interval: Duration::from_millis(100),
            limit: ExecutionLimit::Unbounded,
        }
    }
}

impl ServerConfig {
    /// Defaults, with the port taken from `GRPC_PORT` when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddress(format!("{}={}", PORT_ENV, port)))?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }

        self.socket_addr().map(|_| ())
    }

    /// Resolve `host:port`. IPv6 literals may be given with or without brackets.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');
        let invalid = || ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port));

        (host, self.port)
            .to_socket_addrs()
            .map_err(|_| invalid())?
            .next()
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, DEFAULT_HOST, DEFAULT_PORT, PORT_ENV};
    use fnbench_core::ConfigError;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::]:50051");
        assert_eq!(config.workers, 2);
    }

    // One test touches the variable so no other test races with it.
    #[test]
    fn port_from_environment() {
        let saved = std::env::var(PORT_ENV).ok();

        std::env::remove_var(PORT_ENV);
        assert_eq!(ServerConfig::from_env().unwrap().port, DEFAULT_PORT);

        std::env::set_var(PORT_ENV, " 6061 ");
        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.port, 6061);
        assert_eq!(config.host, DEFAULT_HOST);

        std::env::set_var(PORT_ENV, "fifty");
        assert!(matches!(
            ServerConfig::from_env(),
            Err(ConfigError::InvalidAddress(_))
        ));

        std::env::set_var(PORT_ENV, "70000");
        assert!(ServerConfig::from_env().is_err());

        match saved {
            Some(port) => std::env::set_var(PORT_ENV, port),
            None => std::env::remove_var(PORT_ENV),
        }
    }

    #[test]
    fn ipv6_host() {
        let config = ServerConfig {
            host: "[::]".to_owned(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "[::]:8080");
    }

    #[test]
    fn rejects_zero_workers() {
        let config = ServerConfig {
            workers: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWorkers)));
    }

    #[test]
    fn rejects_garbage_host() {
        let config = ServerConfig {
            host: "not a host name".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }
}
