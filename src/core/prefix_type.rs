use ipnetwork::IpNetwork;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Prefix Type
-------------------------------------------------------------------------------------------------*/

/// IP prefix type (IPv4 or IPv6) of a CIDR literal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrefixType {
    IPv4,
    IPv6,
}

impl PrefixType {
    /// Classify a CIDR literal (`address/prefix-length`). Returns `None` when the string is not
    /// a CIDR literal, including bare addresses without a prefix length.
    ///
    /// IPv4-mapped IPv6 prefixes (`::ffff:192.0.2.0/120`) are [PrefixType::IPv6].
    pub fn of(cidr: &str) -> Option<PrefixType> {
        let (address, prefix_length) = cidr.split_once('/')?;
        if prefix_length.is_empty() || !prefix_length.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let address: IpAddr = address.parse().ok()?;
        let prefix_length: u8 = prefix_length.parse().ok()?;

        match IpNetwork::new(address, prefix_length).ok()? {
            IpNetwork::V4(_) => Some(PrefixType::IPv4),
            IpNetwork::V6(_) => Some(PrefixType::IPv6),
        }
    }

    pub fn is_ipv4(&self) -> bool {
        match self {
            PrefixType::IPv4 => true,
            PrefixType::IPv6 => false,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    /*----------------------------------------------------------------------------------
      PrefixType
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_prefix_type_is_ipv4() {
        assert!(PrefixType::IPv4.is_ipv4());
        assert!(!PrefixType::IPv6.is_ipv4());
    }

    #[test]
    fn test_prefix_type_of_valid_cidrs() {
        assert_eq!(PrefixType::of("4.148.0.0/16"), Some(PrefixType::IPv4));
        assert_eq!(PrefixType::of("192.30.252.153/32"), Some(PrefixType::IPv4));
        assert_eq!(PrefixType::of("0.0.0.0/0"), Some(PrefixType::IPv4));
        assert_eq!(
            PrefixType::of("2a01:111:f403:d91b::/64"),
            Some(PrefixType::IPv6)
        );
        assert_eq!(
            PrefixType::of("::ffff:192.0.2.0/120"),
            Some(PrefixType::IPv6)
        );
    }

    #[test]
    fn test_prefix_type_of_invalid_cidrs() {
        assert_eq!(PrefixType::of("4.148.0.0"), None);
        assert_eq!(PrefixType::of("4.148.0.0/"), None);
        assert_eq!(PrefixType::of("4.148.0.0/33"), None);
        assert_eq!(PrefixType::of("4.148.0.0/-1"), None);
        assert_eq!(PrefixType::of("4.148.0/16"), None);
        assert_eq!(PrefixType::of("2a01:111:f403:d91b::/129"), None);
        assert_eq!(PrefixType::of("github.com/16"), None);
        assert_eq!(PrefixType::of(""), None);
    }
}
