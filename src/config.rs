//! Command line and server configuration

use crate::core::{ConsoleError, Result};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port used when `--port` is absent, empty or not a valid port number
pub const DEFAULT_PORT: u16 = 5000;

/// Listen on all interfaces by default
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Remote console: receives JSON log records over HTTP and prints them
#[derive(Debug, Parser)]
#[command(name = "remote-console", version, about)]
pub struct Cli {
    /// Port to listen on (invalid values fall back to 5000)
    #[arg(
        short,
        long,
        value_name = "PORT",
        num_args = 0..=1,
        default_missing_value = "",
        allow_negative_numbers = true
    )]
    pub port: Option<String>,

    /// Address to bind
    #[arg(long, value_name = "ADDR", default_value = "0.0.0.0")]
    pub host: String,

    /// Print records without colors (colors are also off when stdout is not
    /// a terminal or NO_COLOR is set)
    #[arg(long)]
    pub no_color: bool,

    /// Log request handling details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the server configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidConfiguration`] when `--host` is not an
    /// IP address. A bad port never fails.
    pub fn server_config(&self) -> Result<ServerConfig> {
        self.server_config_for(colored::control::SHOULD_COLORIZE.should_colorize())
    }

    /// Build the server configuration for a terminal that does
    /// (`terminal_colors`) or does not accept colors.
    pub fn server_config_for(&self, terminal_colors: bool) -> Result<ServerConfig> {
        let host = self.host.trim().parse::<IpAddr>().map_err(|err| {
            ConsoleError::config("host", format!("'{}' is not an IP address: {}", self.host, err))
        })?;

        Ok(ServerConfig {
            host,
            port: resolve_port(self.port.as_deref()),
            use_colors: resolve_colors(self.no_color, terminal_colors),
        })
    }
}

/// `--no-color` always wins; otherwise follow what the terminal allows
pub fn resolve_colors(no_color: bool, terminal_colors: bool) -> bool {
    !no_color && terminal_colors
}

/// Parse a `--port` value, falling back to [`DEFAULT_PORT`] silently
pub fn resolve_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub use_colors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            use_colors: true,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
