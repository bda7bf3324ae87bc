//! Expansion of raw user input into canonical single addresses.
//!
//! IP input understands lists (`;` before `,`), dash ranges and CIDR
//! blocks, recursively, so a list of CIDR blocks works as expected. Ranges
//! are capped at 256 addresses. MAC input understands lists only.

use ipnet::{Ipv4AddrRange, Ipv4Net};
use std::net::Ipv4Addr;

/// Upper bound on the number of addresses a single range expands to.
pub const MAX_RANGE_LEN: u32 = 256;

/// Expand IP input into the addresses to query, in input order.
///
/// # Examples
/// ```
/// use netlookup::expand_ip;
///
/// assert_eq!(expand_ip("10.0.0.1, 10.0.0.9"), vec!["10.0.0.1", "10.0.0.9"]);
/// assert_eq!(expand_ip("192.168.1.0/30").len(), 4);
/// ```
pub fn expand_ip(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    expand_ip_into(input, &mut out);
    out
}

fn expand_ip_into(input: &str, out: &mut Vec<String>) {
    if input.contains(';') {
        for part in input.split(';') {
            expand_ip_into(part.trim(), out);
        }
    } else if input.contains(',') {
        for part in input.split(',') {
            expand_ip_into(part.trim(), out);
        }
    } else if input.contains('-') {
        expand_range(input, out);
    } else if input.contains('/') {
        if let Some(range) = cidr_to_range(input) {
            expand_ip_into(&range, out);
        }
    } else if !input.is_empty() && !input.contains(' ') {
        out.push(input.to_string());
    }
}

fn expand_range(input: &str, out: &mut Vec<String>) {
    let mut parts = input.split('-');
    let (Some(start), Some(end)) = (parts.next(), parts.next()) else {
        return;
    };
    let (Some(start), Some(end)) = (parse_ipv4(start.trim()), parse_ipv4(end.trim())) else {
        log::debug!("discarding malformed range {:?}", input);
        return;
    };

    let start = u32::from(start);
    let end = u32::from(end).max(start);
    let end = end.min(start.saturating_add(MAX_RANGE_LEN - 1));

    out.extend(
        Ipv4AddrRange::new(Ipv4Addr::from(start), Ipv4Addr::from(end)).map(|ip| ip.to_string()),
    );
}

/// Rewrite `a.b.c.d/n` as `network - broadcast`.
fn cidr_to_range(input: &str) -> Option<String> {
    let mut parts = input.split('/');
    let ip = parts.next()?.trim();
    let prefix = parts.next()?.trim();

    let prefix: i64 = match prefix.parse() {
        Ok(p) if p >= 0 => p,
        _ => {
            log::debug!("discarding CIDR with bad prefix {:?}", input);
            return None;
        }
    };
    let ip = parse_ipv4(ip)?;

    let net = Ipv4Net::new(ip, prefix.min(32) as u8).ok()?;
    Some(format!("{} - {}", net.network(), net.broadcast()))
}

/// Parse a dotted quad: exactly four decimal octets in [0, 255].
///
/// Leading zeros are accepted (`010` is 10).
pub fn parse_ipv4(input: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = input.split('.');
    for octet in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *octet = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

/// Expand MAC input into normalized addresses, in input order.
///
/// Each item has every `-`, `:` and space removed.
pub fn expand_mac(input: &str) -> Vec<String> {
    let items: Vec<&str> = if input.contains(';') {
        input.split(';').map(str::trim).collect()
    } else if input.contains(',') {
        input.split(',').map(str::trim).collect()
    } else {
        vec![input]
    };

    items
        .into_iter()
        .map(normalize_mac)
        .filter(|mac| !mac.is_empty())
        .collect()
}

/// Strip separators from a MAC address.
pub fn normalize_mac(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '-' | ':' | ' '))
        .collect()
}

/// Decode the 24-bit OUI prefix from a normalized MAC address.
pub fn parse_mac_prefix(mac: &str) -> Option<u32> {
    let hex = mac.get(..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
