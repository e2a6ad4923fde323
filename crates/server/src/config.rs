use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MQTT_PORT: u16 = 1883;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("Broker endpoint is empty")]
    Empty,

    #[error("Unsupported broker scheme {0:?}, expected tcp:// or mqtt://")]
    UnsupportedScheme(String),

    #[error("Invalid broker port {0:?}")]
    InvalidPort(String),
}

/// Plain-TCP MQTT broker address.
///
/// Accepts `tcp://host:port`, `mqtt://host:port`, `host:port` or a bare host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokerEndpoint {
    pub host: String,
    pub port: u16,
}

impl FromStr for BrokerEndpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let address = match s.trim().split_once("://") {
            Some(("tcp" | "mqtt", rest)) => rest,
            Some((scheme, _)) => return Err(EndpointError::UnsupportedScheme(scheme.to_owned())),
            None => s.trim(),
        };
        let address = address.trim_end_matches('/');

        let (host, port) = match address.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse()
                    .map_err(|_| EndpointError::InvalidPort(port.to_owned()))?;
                (host, port)
            }
            None => (address, DEFAULT_MQTT_PORT),
        };

        if host.is_empty() {
            return Err(EndpointError::Empty);
        }

        Ok(Self {
            host: host.to_owned(),
            port,
        })
    }
}

impl fmt::Display for BrokerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tcp://{}:{}", self.host, self.port)
    }
}
