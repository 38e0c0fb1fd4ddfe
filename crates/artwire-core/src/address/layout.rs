/// Raw length of an IPv4 address, network byte order.
pub const IPV4_LEN: usize = 4;
/// Raw length of an IPv6 address, network byte order.
pub const IPV6_LEN: usize = 16;
