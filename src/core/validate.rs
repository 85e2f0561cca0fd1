//! Field validation rules shared by the table loader and the worker.
//!
//! A node id is valid when non-negative. A host is either the literal
//! `localhost` or a dotted-quad IPv4 address with four decimal octets in
//! `[0, 255]`. A port is valid in `1025..=65535`; everything at or below
//! 1024 is rejected.

use std::net::{IpAddr, Ipv4Addr};

use thiserror::Error;

use super::NodeId;

/// Lowest port accepted by the validation rules.
pub const MIN_PORT: u16 = 1025;

/// A single configuration field that failed validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A table line did not have exactly three fields.
    #[error("expected `<id> <host> <port>`, found {0} fields")]
    FieldCount(usize),

    /// Node id was unparsable or negative.
    #[error("invalid node id `{0}` (expected a non-negative 16-bit integer)")]
    NodeId(String),

    /// Host was neither `localhost` nor a dotted-quad IPv4 address.
    #[error("invalid host `{0}` (expected `localhost` or dotted-quad IPv4)")]
    Host(String),

    /// Port was unparsable or outside `1025..=65535`.
    #[error("invalid port `{0}` (expected an integer in 1025..=65535)")]
    Port(String),
}

/// Parse and validate a node id field.
pub fn node_id(raw: &str) -> Result<NodeId, FieldError> {
    let id: NodeId = raw
        .parse()
        .map_err(|_| FieldError::NodeId(raw.to_owned()))?;
    check_node_id(id)?;
    Ok(id)
}

/// Validate an already-parsed node id.
pub fn check_node_id(id: NodeId) -> Result<(), FieldError> {
    if id >= 0 {
        Ok(())
    } else {
        Err(FieldError::NodeId(id.to_string()))
    }
}

/// Parse and validate a host field.
///
/// `localhost` resolves to 127.0.0.1; anything else must be a dotted
/// quad.
pub fn host(raw: &str) -> Result<IpAddr, FieldError> {
    if raw == "localhost" {
        return Ok(IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    let mut octets = [0u8; 4];
    let mut parts = raw.split('.');
    for octet in &mut octets {
        let part = parts.next().ok_or_else(|| FieldError::Host(raw.to_owned()))?;
        *octet = part.parse().map_err(|_| FieldError::Host(raw.to_owned()))?;
    }
    if parts.next().is_some() {
        return Err(FieldError::Host(raw.to_owned()));
    }

    Ok(IpAddr::V4(Ipv4Addr::from(octets)))
}

/// Parse and validate a port field.
pub fn port(raw: &str) -> Result<u16, FieldError> {
    let port: u16 = raw
        .parse()
        .map_err(|_| FieldError::Port(raw.to_owned()))?;
    check_port(port)?;
    Ok(port)
}

/// Validate an already-parsed port.
pub fn check_port(port: u16) -> Result<(), FieldError> {
    if port >= MIN_PORT {
        Ok(())
    } else {
        Err(FieldError::Port(port.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_bounds() {
        assert_eq!(node_id("0"), Ok(0));
        assert_eq!(node_id("10"), Ok(10));
        assert_eq!(node_id("32767"), Ok(32767));

        assert!(node_id("-1").is_err());
        assert!(node_id("32768").is_err());
        assert!(node_id("abc").is_err());
        assert!(node_id("").is_err());
    }

    #[test]
    fn test_host_accepts_localhost_and_dotted_quads() {
        assert_eq!(host("localhost"), Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(
            host("192.168.0.1"),
            Ok(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1)))
        );
        assert_eq!(host("0.0.0.0"), Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED)));
        assert_eq!(
            host("255.255.255.255"),
            Ok(IpAddr::V4(Ipv4Addr::BROADCAST))
        );
    }

    #[test]
    fn test_host_rejects_bad_shapes() {
        assert!(host("192.168.0").is_err());
        assert!(host("192.168.0.1.5").is_err());
        assert!(host("192.168.0.2000").is_err());
        assert!(host("192.168.0.-1").is_err());
        assert!(host("example.com").is_err());
        assert!(host("").is_err());
    }

    #[test]
    fn test_port_bounds() {
        assert_eq!(port("1025"), Ok(1025));
        assert_eq!(port("8080"), Ok(8080));
        assert_eq!(port("65535"), Ok(65535));

        assert!(port("1024").is_err());
        assert!(port("80").is_err());
        assert!(port("0").is_err());
        assert!(port("65536").is_err());
        assert!(port("x").is_err());
    }
}
