//! Tests for application execution.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;

use ipof::config::{Cli, Mode, ValidatedConfig};
use ipof::network::{AddressRecord, InterfaceFlags, InterfaceInfo};
use ipof::outbound::DatagramSocket;

use super::*;

// ============================================================================
// Test Fixtures
// ============================================================================

struct FakeProvider {
    interfaces: HashMap<String, (InterfaceFlags, Vec<AddressRecord>)>,
}

impl FakeProvider {
    fn new() -> Self {
        Self {
            interfaces: HashMap::new(),
        }
    }

    fn with(mut self, name: &str, flags: InterfaceFlags, addrs: &[&str]) -> Self {
        let records = addrs
            .iter()
            .map(|a| AddressRecord::Network {
                addr: a.parse().unwrap(),
                prefix_len: 24,
            })
            .collect();
        self.interfaces
            .insert(name.to_string(), (flags, records));
        self
    }
}

impl InterfaceProvider for FakeProvider {
    fn lookup(&self, name: &str) -> Result<InterfaceInfo, FetchError> {
        self.interfaces
            .get(name)
            .map(|(flags, _)| InterfaceInfo::new(name, *flags))
            .ok_or_else(|| FetchError::not_found(name))
    }

    fn addresses(&self, iface: &InterfaceInfo) -> Result<Vec<AddressRecord>, FetchError> {
        self.interfaces
            .get(&iface.name)
            .map(|(_, records)| records.clone())
            .ok_or_else(|| FetchError::not_found(&iface.name))
    }
}

struct FixedSocket(SocketAddr);

impl DatagramSocket for FixedSocket {
    fn local_addr(&self) -> io::Result<SocketAddr> {
        Ok(self.0)
    }
}

/// Factory whose socket reports a fixed local endpoint, or fails to open.
struct FakeFactory(Option<SocketAddr>);

impl SocketFactory for FakeFactory {
    type Socket = FixedSocket;

    fn open(&self, _target: SocketAddr) -> io::Result<FixedSocket> {
        self.0.map(FixedSocket).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NetworkUnreachable, "network is unreachable")
        })
    }
}

const DOWN: InterfaceFlags = InterfaceFlags {
    up: false,
    loopback: false,
};

const LOOPBACK: InterfaceFlags = InterfaceFlags {
    up: true,
    loopback: true,
};

fn provider() -> FakeProvider {
    FakeProvider::new()
        .with(
            "eth0",
            InterfaceFlags::UP,
            &["192.168.1.20", "fe80::1", "10.0.0.7", "2001:db8::20"],
        )
        .with("wlan0", InterfaceFlags::UP, &["172.16.5.5", "fe80::2"])
        .with("eth1", DOWN, &["192.168.2.1"])
        .with("lo", LOOPBACK, &["127.0.0.1", "::1"])
}

fn factory() -> FakeFactory {
    FakeFactory(Some("192.168.1.20:50000".parse().unwrap()))
}

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["ipof"];
    full_args.extend(args);
    ValidatedConfig::from_cli(&Cli::parse_from_iter(full_args)).unwrap()
}

/// Runs `args` against the fakes, returning stdout and the result.
fn run(args: &[&str]) -> (String, Result<(), RunError>) {
    run_with(args, &factory())
}

fn run_with(args: &[&str], factory: &FakeFactory) -> (String, Result<(), RunError>) {
    let mut out = Vec::new();
    let result = execute(&config(args), &provider(), factory, &mut out);
    (String::from_utf8(out).unwrap(), result)
}

// ============================================================================
// Outbound mode
// ============================================================================

mod outbound_mode {
    use super::*;

    #[test]
    fn prints_exactly_one_address_line() {
        let (out, result) = run(&[]);

        result.unwrap();
        assert_eq!(out, "192.168.1.20\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].parse::<std::net::IpAddr>().is_ok());
    }

    #[test]
    fn ipv6_source_printed_without_port() {
        let factory = FakeFactory(Some("[2001:db8::5]:41000".parse().unwrap()));

        let (out, result) = run_with(&[], &factory);

        result.unwrap();
        assert_eq!(out, "2001:db8::5\n");
    }

    #[test]
    fn json_output() {
        let (out, result) = run(&["--format", "json"]);

        result.unwrap();
        assert_eq!(out, "{\"address\":\"192.168.1.20\"}\n");
    }

    #[test]
    fn unreachable_network_is_an_error() {
        let (out, result) = run_with(&[], &FakeFactory(None));

        assert!(out.is_empty());
        assert!(matches!(
            result,
            Err(RunError::Outbound(OutboundError::Open { .. }))
        ));
    }

    #[test]
    fn config_mode_is_outbound() {
        assert!(matches!(config(&[]).mode, Mode::Outbound { .. }));
    }
}

// ============================================================================
// Interface mode
// ============================================================================

mod interface_mode {
    use super::*;

    #[test]
    fn prints_v4_addresses_by_default() {
        let (out, result) = run(&["eth0"]);

        result.unwrap();
        assert_eq!(out, "192.168.1.20\n10.0.0.7\n");
    }

    #[test]
    fn prints_v6_addresses_with_flag() {
        let (out, result) = run(&["-v6", "eth0"]);

        result.unwrap();
        assert_eq!(out, "fe80::1\n2001:db8::20\n");
    }

    #[test]
    fn multiple_interfaces_in_argument_order() {
        let (out, result) = run(&["wlan0", "eth0"]);

        result.unwrap();
        assert_eq!(out, "172.16.5.5\n192.168.1.20\n10.0.0.7\n");
    }

    #[test]
    fn down_interface_prints_nothing_and_fails() {
        let (out, result) = run(&["eth1"]);

        assert!(out.is_empty());
        let error = result.unwrap_err();
        assert!(matches!(error, RunError::Extract(ExtractError::Down { .. })));
        assert!(error.to_string().contains("interface is down"));
    }

    #[test]
    fn loopback_interface_fails() {
        let (out, result) = run(&["lo"]);

        assert!(out.is_empty());
        assert!(matches!(
            result,
            Err(RunError::Extract(ExtractError::Loopback { .. }))
        ));
    }

    #[test]
    fn unknown_interface_fails() {
        let (_, result) = run(&["eth9"]);

        let error = result.unwrap_err();
        assert!(matches!(error, RunError::Lookup(FetchError::NotFound { .. })));
        assert!(error.to_string().contains("eth9"));
    }

    #[test]
    fn first_error_stops_processing() {
        let (out, result) = run(&["wlan0", "eth1", "eth0"]);

        assert!(result.is_err());
        assert_eq!(out, "172.16.5.5\n");
    }

    #[test]
    fn json_output_lists_each_interface() {
        let (out, result) = run(&["--format", "json", "-v6", "eth0", "wlan0"]);

        result.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"interface": "eth0", "family": "ipv6", "addresses": ["fe80::1", "2001:db8::20"]},
                {"interface": "wlan0", "family": "ipv6", "addresses": ["fe80::2"]},
            ])
        );
    }

    #[test]
    fn json_output_is_all_or_nothing() {
        let (out, result) = run(&["--format", "json", "eth0", "eth1"]);

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let (first, _) = run(&["eth0", "wlan0"]);
        let (second, _) = run(&["eth0", "wlan0"]);

        assert_eq!(first, second);
    }
}
