use axum::http::HeaderValue;
use clap::Parser;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),
    #[error("At least one CORS origin is required")]
    NoOrigins,
}

/// Command line / environment options for the relay server.
#[derive(Debug, Clone, Parser)]
#[command(name = "relay-server", version, about = "Prompt relay server for browser automation")]
pub struct ServerArgs {
    /// Interface to bind.
    #[arg(long, env = "RELAY_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "RELAY_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Origins allowed to call the API (comma separated).
    #[arg(
        long = "cors-origin",
        env = "RELAY_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "https://gemini.google.com"
    )]
    pub cors_origins: Vec<String>,

    /// Fallback log filter when RUST_LOG is unset.
    #[arg(long, env = "RELAY_LOG", default_value = "info")]
    pub log_level: String,
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<HeaderValue>,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_args(args: ServerArgs) -> Result<Self, ConfigError> {
        if args.port == 0 {
            return Err(ConfigError::PortOutOfRange(args.port));
        }

        let cors_origins = args
            .cors_origins
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                HeaderValue::from_str(s).map_err(|_| ConfigError::InvalidOrigin(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cors_origins.is_empty() {
            return Err(ConfigError::NoOrigins);
        }

        Ok(Self {
            host: args.host,
            port: args.port,
            cors_origins,
            log_level: args.log_level,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec![HeaderValue::from_static("https://gemini.google.com")],
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> ServerArgs {
        ServerArgs::try_parse_from(std::iter::once("relay-server").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn explicit_flags_are_used() {
        let config = ServerConfig::from_args(parse(&[
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--cors-origin",
            "https://a.example, https://b.example",
            "--log-level",
            "relay_server=debug",
        ]))
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, "relay_server=debug");
        assert_eq!(
            config.cors_origins,
            vec![
                HeaderValue::from_static("https://a.example"),
                HeaderValue::from_static("https://b.example"),
            ]
        );
    }

    #[test]
    fn port_zero_is_rejected() {
        let err = ServerConfig::from_args(parse(&["--port", "0"])).unwrap_err();
        assert_eq!(err, ConfigError::PortOutOfRange(0));
    }

    #[test]
    fn blank_origin_list_is_rejected() {
        let err = ServerConfig::from_args(parse(&["--cors-origin", " "])).unwrap_err();
        assert_eq!(err, ConfigError::NoOrigins);
    }

    #[test]
    fn origin_with_control_characters_is_rejected() {
        let mut args = parse(&[]);
        args.cors_origins = vec!["https://bad\n.example".to_string()];
        assert!(matches!(
            ServerConfig::from_args(args),
            Err(ConfigError::InvalidOrigin(_))
        ));
    }

    #[test]
    fn environment_variables_fill_unset_flags() {
        const VARS: [(&str, &str); 4] = [
            ("RELAY_HOST", "0.0.0.0"),
            ("RELAY_PORT", "9100"),
            ("RELAY_CORS_ORIGINS", "https://a.example,https://b.example"),
            ("RELAY_LOG", "warn"),
        ];
        // SAFETY: 他のテストはこれらの値に依存しない（明示フラグで上書きするか、どの値でも通る）
        unsafe {
            for (key, value) in VARS {
                std::env::set_var(key, value);
            }
        }
        let parsed = ServerArgs::try_parse_from(["relay-server"]);
        let overridden = ServerArgs::try_parse_from(["relay-server", "--port", "9200"]);
        unsafe {
            for (key, _) in VARS {
                std::env::remove_var(key);
            }
        }

        let config = ServerConfig::from_args(parsed.unwrap()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9100);
        assert_eq!(
            config.cors_origins,
            vec![
                HeaderValue::from_static("https://a.example"),
                HeaderValue::from_static("https://b.example"),
            ]
        );
        assert_eq!(config.log_level, "warn");

        // フラグは環境変数より優先
        assert_eq!(overridden.unwrap().port, 9200);
    }
}
