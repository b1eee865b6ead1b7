use crate::core::prefix_type::PrefixType;
use log::debug;

/*-------------------------------------------------------------------------------------------------
  IPv4 Filter
-------------------------------------------------------------------------------------------------*/

/// Keep the CIDR strings whose network address is a true IPv4 address.
///
/// Entries that are not parsable CIDR literals are skipped, not reported as errors. The
/// output preserves input order and duplicates, and holds the original strings unchanged.
pub fn filter_ipv4<S: AsRef<str>>(cidrs: &[S]) -> Vec<String> {
    cidrs
        .iter()
        .map(|cidr| cidr.as_ref())
        .filter(|cidr| match PrefixType::of(cidr) {
            Some(prefix_type) => prefix_type.is_ipv4(),
            None => {
                debug!("Skipping invalid CIDR: {cidr:?}");
                false
            }
        })
        .map(str::to_string)
        .collect()
}

/*-------------------------------------------------------------------------------------------------
  Prefix Summary
-------------------------------------------------------------------------------------------------*/

/// Counts of the CIDR strings extracted for a service, classified the same way [filter_ipv4]
/// classifies them.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PrefixSummary {
    /// Number of extracted CIDR strings.
    pub total: usize,

    /// IPv4 prefixes; these are kept in the policy.
    pub ipv4: usize,

    /// IPv6 prefixes; dropped.
    pub ipv6: usize,

    /// Strings that are not CIDR literals; dropped.
    pub invalid: usize,
}

pub fn summarize<S: AsRef<str>>(cidrs: &[S]) -> PrefixSummary {
    cidrs.iter().fold(
        PrefixSummary {
            total: cidrs.len(),
            ..PrefixSummary::default()
        },
        |mut summary, cidr| {
            match PrefixType::of(cidr.as_ref()) {
                Some(PrefixType::IPv4) => summary.ipv4 += 1,
                Some(PrefixType::IPv6) => summary.ipv6 += 1,
                None => summary.invalid += 1,
            }
            summary
        },
    )
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
