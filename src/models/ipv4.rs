//! IPv4 prefix and CIDR arithmetic.
//!
//! Provides [`Ipv4Net`] for representing IPv4 network prefixes, along with the
//! mask and boundary helpers used by the aggregator.

use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use rpki_ov_route_map::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Get the network address for a given IP and prefix length.
pub fn cut_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    Ok(Ipv4Addr::from(u32::from(addr) & get_cidr_mask(len)?))
}

/// Returns the IP address following the given subnet.
pub fn ip_after_subnet(addr: Ipv4Addr, cidr: u8) -> Result<Ipv4Addr, Box<dyn Error>> {
    let network_bits = u64::from(u32::from(cut_addr(addr, cidr)?));
    let next_subnet_bits = u32::try_from(network_bits + block_size(cidr)?)
        .map_err(|_| "Next subnet calculation overflowed")?;
    Ok(Ipv4Addr::from(next_subnet_bits))
}

/// Number of addresses covered by a prefix of the given length.
pub fn block_size(len: u8) -> Result<u64, Box<dyn Error>> {
    if len > MAX_LENGTH {
        Err("Network length is too long".into())
    } else {
        Ok(1u64 << (MAX_LENGTH - len))
    }
}

/// IPv4 network prefix in CIDR notation.
///
/// The address never has bits set past the prefix length, so two prefixes
/// covering the same block always compare equal. Ordering is by network
/// address first, then by length, which puts a covering block in front of
/// the blocks it contains.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Ipv4Net {
    addr: Ipv4Addr,
    mask: u8,
}

impl Ipv4Net {
    /// Create a prefix, rejecting host bits set past `mask`.
    pub fn new(addr: Ipv4Addr, mask: u8) -> Result<Ipv4Net, Box<dyn Error>> {
        let network = cut_addr(addr, mask)?;
        if network != addr {
            return Err(format!("{addr}/{mask} has host bits set").into());
        }
        Ok(Ipv4Net { addr, mask })
    }

    /// Create a prefix, clearing any host bits set past `mask`.
    pub fn truncate(addr: Ipv4Addr, mask: u8) -> Result<Ipv4Net, Box<dyn Error>> {
        Ok(Ipv4Net {
            addr: cut_addr(addr, mask)?,
            mask,
        })
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Lowest (network) address in the prefix.
    pub fn lo(&self) -> Ipv4Addr {
        self.addr
    }

    /// Highest (broadcast) address in the prefix.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) | !self.mask_bits())
    }

    /// Number of addresses in the prefix.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask)
    }

    /// True when `other` lies entirely within this prefix.
    pub fn contains(&self, other: &Ipv4Net) -> bool {
        self.mask <= other.mask && u32::from(other.addr) & self.mask_bits() == u32::from(self.addr)
    }

    /// True when the two prefixes share at least one address.
    pub fn overlaps(&self, other: &Ipv4Net) -> bool {
        self.contains(other) || other.contains(self)
    }

    /// The prefix one bit shorter that covers this one, `None` for `0.0.0.0/0`.
    pub fn parent(&self) -> Option<Ipv4Net> {
        let mask = self.mask.checked_sub(1)?;
        Some(Ipv4Net {
            addr: Ipv4Addr::from(u32::from(self.addr) & mask_bits(mask)),
            mask,
        })
    }

    /// True when this prefix is the lower half and `other` the upper half of
    /// the same parent block.
    pub fn is_lower_sibling_of(&self, other: &Ipv4Net) -> bool {
        self.mask == other.mask
            && self.mask > 0
            && self.parent().map(|p| p.addr) == Some(self.addr)
            && ip_after_subnet(self.addr, self.mask).ok() == Some(other.addr)
    }

    fn mask_bits(&self) -> u32 {
        mask_bits(self.mask)
    }
}

fn mask_bits(len: u8) -> u32 {
    match len {
        0 => 0,
        len => u32::MAX << (MAX_LENGTH - len),
    }
}

impl FromStr for Ipv4Net {
    type Err = Box<dyn Error>;

    /// Parse `a.b.c.d/len`; a bare address is read as a host route.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (addr, mask) = match s.split_once('/') {
            Some((addr, mask)) => (addr, mask),
            None => (s, "32"),
        };
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| format!("Invalid address {addr}"))?;
        let mask: u8 = mask
            .parse()
            .map_err(|_| format!("Invalid prefix length {mask}"))?;
        if mask > MAX_LENGTH {
            return Err("Network length is too long".into());
        }
        Ipv4Net::new(addr, mask)
    }
}

impl std::fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Ipv4Net {
        s.parse().unwrap()
    }

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert!(get_cidr_mask(33).is_err());
    }

    #[test]
    fn test_cut_addr() {
        let ip = Ipv4Addr::new(192, 168, 1, 42);
        assert_eq!(cut_addr(ip, 24).unwrap(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(cut_addr(ip, 16).unwrap(), Ipv4Addr::new(192, 168, 0, 0));
        assert_eq!(cut_addr(ip, 0).unwrap(), Ipv4Addr::new(0, 0, 0, 0));
        assert_eq!(cut_addr(ip, 32).unwrap(), Ipv4Addr::new(192, 168, 1, 42));
        assert!(cut_addr(ip, 33).is_err());
    }

    #[test]
    fn test_ip_after_subnet() {
        let ip = Ipv4Addr::new(192, 168, 1, 0);
        assert_eq!(
            ip_after_subnet(ip, 24).unwrap(),
            Ipv4Addr::new(192, 168, 2, 0)
        );
        assert_eq!(ip_after_subnet(ip, 8).unwrap(), Ipv4Addr::new(193, 0, 0, 0));
        assert_eq!(
            ip_after_subnet(ip, 32).unwrap(),
            Ipv4Addr::new(192, 168, 1, 1)
        );
        assert!(ip_after_subnet(Ipv4Addr::new(255, 255, 255, 255), 24).is_err());
        assert!(ip_after_subnet(ip, 0).is_err());
    }

    #[test]
    fn test_parse() {
        let p = net("192.0.2.0/24");
        assert_eq!(p.addr(), Ipv4Addr::new(192, 0, 2, 0));
        assert_eq!(p.mask(), 24);
        assert_eq!(p.to_string(), "192.0.2.0/24");
        assert_eq!(net(" 10.0.0.1 ").to_string(), "10.0.0.1/32");
        assert!("192.0.2.1/24".parse::<Ipv4Net>().is_err());
        assert!("192.0.2.0/33".parse::<Ipv4Net>().is_err());
        assert!("192.0.2/24".parse::<Ipv4Net>().is_err());
        assert!("2001:db8::/32".parse::<Ipv4Net>().is_err());
        assert_eq!(
            Ipv4Net::truncate(Ipv4Addr::new(192, 0, 2, 77), 24).unwrap(),
            net("192.0.2.0/24")
        );
    }

    #[test]
    fn test_lo_hi_size() {
        let p = net("10.0.0.0/8");
        assert_eq!(p.lo(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(p.hi(), Ipv4Addr::new(10, 255, 255, 255));
        assert_eq!(p.size(), 1 << 24);
        assert_eq!(net("0.0.0.0/0").size(), 1 << 32);
        assert_eq!(net("0.0.0.0/0").hi(), Ipv4Addr::new(255, 255, 255, 255));
        assert_eq!(net("10.1.1.1/32").hi(), Ipv4Addr::new(10, 1, 1, 1));
    }

    #[test]
    fn test_contains() {
        let p8 = net("10.0.0.0/8");
        let p24 = net("10.0.10.0/24");
        assert!(p8.contains(&p24));
        assert!(!p24.contains(&p8));
        assert!(p8.contains(&p8));
        assert!(net("0.0.0.0/0").contains(&p24));
        assert!(!p24.contains(&net("10.0.11.0/24")));
        assert!(p24.overlaps(&p8));
        assert!(!p24.overlaps(&net("10.0.11.0/24")));
    }

    #[test]
    fn test_parent_and_siblings() {
        assert_eq!(net("10.0.0.128/25").parent(), Some(net("10.0.0.0/24")));
        assert_eq!(net("0.0.0.0/0").parent(), None);
        assert!(net("10.0.0.0/25").is_lower_sibling_of(&net("10.0.0.128/25")));
        assert!(!net("10.0.0.128/25").is_lower_sibling_of(&net("10.0.0.0/25")));
        // adjacent but in different parents
        assert!(!net("10.0.1.0/24").is_lower_sibling_of(&net("10.0.2.0/24")));
        assert!(!net("10.0.0.0/24").is_lower_sibling_of(&net("10.0.1.0/25")));
        assert!(net("255.255.255.254/32").is_lower_sibling_of(&net("255.255.255.255/32")));
    }

    #[test]
    fn test_ip4_cmp() {
        let ip1 = net("10.0.10.0/24");
        let ip2 = net("10.0.0.0/8");
        let ip3 = net("10.0.10.64/26");
        let ip4 = net("9.255.0.0/16");

        assert!(ip2 < ip1);
        assert!(ip1 < ip3);
        assert!(ip4 < ip2);
        // same address, shorter prefix first
        assert!(net("10.0.0.0/8") < net("10.0.0.0/9"));
    }
}
