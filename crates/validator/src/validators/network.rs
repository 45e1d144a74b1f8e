//! Network address validators
//!
//! IP addresses are parsed with `std::net`; URLs with the `url` crate.

use crate::macros::string_rule;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

string_rule! {
    /// Accepts dotted-quad IPv4 addresses.
    pub Ipv4 => "ipv4";
    rule(input) { input.parse::<Ipv4Addr>().is_ok() }
    fn ipv4;
}

string_rule! {
    /// Accepts IPv6 addresses.
    pub Ipv6 => "ipv6";
    rule(input) { input.parse::<Ipv6Addr>().is_ok() }
    fn ipv6;
}

string_rule! {
    /// Accepts IPv4 or IPv6 addresses.
    pub Ip => "ip";
    rule(input) { input.parse::<IpAddr>().is_ok() }
    fn ip;
}

string_rule! {
    /// Accepts absolute URLs with a scheme and a host.
    pub Url => "url";
    rule(input) { url::Url::parse(input).is_ok_and(|parsed| parsed.has_host()) }
    fn url;
}
