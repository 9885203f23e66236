//! Runtime settings for the HTTP server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Database file used when none is given, relative to the working directory.
pub const DEFAULT_DB_PATH: &str = "data/notes.db";

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_localhost() {
        let config = ServerConfig::default();
        assert_eq!(config.addr().to_string(), "127.0.0.1:8000");
        assert_eq!(config.db_path, PathBuf::from("data/notes.db"));
    }
}
