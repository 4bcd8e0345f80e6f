use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Error, Result, SerialNumber};

/// Unicast addressing for a known controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Controller IP address and port
    pub address: SocketAddr,
    /// Door names, indexed from door 1
    #[serde(default)]
    pub doors: Vec<String>,
}

/// Configuration for the controller client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local address to bind to (port 0 for an ephemeral port)
    pub bind_addr: SocketAddr,
    /// Destination for discovery and for controllers without a unicast address
    pub broadcast_addr: SocketAddr,
    /// Known controllers, keyed by serial number
    pub devices: HashMap<u32, DeviceConfig>,
    /// How long to wait for a reply to a request
    #[serde(serialize_with = "super::serde::serialize_duration")]
    #[serde(deserialize_with = "super::serde::deserialize_duration")]
    pub timeout: Duration,
    /// How long to collect discovery replies
    #[serde(serialize_with = "super::serde::serialize_duration")]
    #[serde(deserialize_with = "super::serde::deserialize_duration")]
    pub broadcast_window: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0)),
            broadcast_addr: SocketAddr::V4(SocketAddrV4::new(
                Ipv4Addr::BROADCAST,
                super::DEFAULT_PORT,
            )),
            devices: HashMap::new(),
            timeout: super::DEFAULT_TIMEOUT,
            broadcast_window: super::DEFAULT_BROADCAST_WINDOW,
        }
    }
}

impl Config {
    /// Checks that the configuration can drive the IPv4-only protocol
    pub fn validate(&self) -> Result<()> {
        if !self.bind_addr.is_ipv4() {
            return Err(Error::config(format!(
                "bind address {} is not IPv4",
                self.bind_addr
            )));
        }

        if !self.broadcast_addr.is_ipv4() {
            return Err(Error::config(format!(
                "broadcast address {} is not IPv4",
                self.broadcast_addr
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::config("timeout must be greater than zero"));
        }

        if self.broadcast_window.is_zero() {
            return Err(Error::config("broadcast window must be greater than zero"));
        }

        for (serial_number, device) in &self.devices {
            if !device.address.is_ipv4() {
                return Err(Error::config(format!(
                    "address {} for controller {} is not IPv4",
                    device.address, serial_number
                )));
            }
        }

        Ok(())
    }

    /// Resolves the destination for a controller: its configured unicast
    /// address, else the broadcast address
    pub fn address_of(&self, serial_number: SerialNumber) -> SocketAddr {
        self.devices
            .get(&serial_number.0)
            .map(|device| device.address)
            .unwrap_or(self.broadcast_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "0.0.0.0:0".parse::<SocketAddr>().unwrap());
        assert_eq!(config.broadcast_addr, "255.255.255.255:60000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.timeout, Duration::from_millis(5000));
        assert_eq!(config.broadcast_window, Duration::from_millis(2500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_address_of() {
        let mut config = Config::default();
        config.devices.insert(
            423187757,
            DeviceConfig {
                address: "192.168.1.100:60000".parse().unwrap(),
                doors: vec!["Front".into(), "Back".into()],
            },
        );

        assert_eq!(
            config.address_of(SerialNumber(423187757)),
            "192.168.1.100:60000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.address_of(SerialNumber(1)), config.broadcast_addr);
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.timeout = Duration::ZERO;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.broadcast_window = Duration::ZERO;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.bind_addr = "[::1]:0".parse().unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{
            "bind_addr": "192.168.1.10:0",
            "timeout": 1.5,
            "devices": {
                "423187757": { "address": "192.168.1.100:60000" }
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.bind_addr, "192.168.1.10:0".parse::<SocketAddr>().unwrap());
        assert_eq!(config.broadcast_addr, Config::default().broadcast_addr);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(config.broadcast_window, Duration::from_millis(2500));
        assert!(config.devices[&423187757].doors.is_empty());
        assert!(config.validate().is_ok());
    }
}
