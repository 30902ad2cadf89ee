use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_millis(250);

/// Subset of `ports` that already have a listener on localhost, in the
/// order given.
///
/// A successful connect means the port is taken; the probe socket is
/// dropped as soon as the check completes.
pub fn occupied(ports: &[u16]) -> Vec<u16> {
    ports.iter().copied().filter(|&port| is_in_use(port)).collect()
}

fn is_in_use(port: u16) -> bool {
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok()
}
