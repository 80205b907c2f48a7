//! Pre-flight port availability check (§4.7).
//!
//! Binds a throwaway listener on each configured port and drops it
//! immediately — the one spot the standard library, not a crate, is the
//! idiomatic choice, matching `port_checker_service.py`'s bind-then-close
//! probe.

use std::collections::BTreeMap;
use std::net::TcpListener;

use tracing::{error, info};

/// Checks whether each port in `ports` can currently be bound on loopback.
/// Returns a map from port to availability; callers treat "all true" as the
/// pre-flight passing.
pub fn check_port_availability(ports: &[u16]) -> BTreeMap<u16, bool> {
    let mut results = BTreeMap::new();
    for &port in ports {
        let available = TcpListener::bind(("127.0.0.1", port)).is_ok();
        if available {
            info!(port, "port is available");
        } else {
            error!(port, "port is already in use");
        }
        results.insert(port, available);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_port_is_reported_available() {
        let results = check_port_availability(&[0]);
        // Port 0 asks the OS for an ephemeral port, which always succeeds —
        // used here only to confirm the happy path without colliding with
        // a port some other test process is holding.
        assert_eq!(results.get(&0), Some(&true));
    }

    #[test]
    fn port_held_by_another_listener_is_reported_unavailable() {
        let held = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = held.local_addr().unwrap().port();

        let results = check_port_availability(&[port]);

        assert_eq!(results.get(&port), Some(&false));
    }
}
