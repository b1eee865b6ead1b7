/*-------------------------------------------------------------------------------------------------
  ipfilter Library
-------------------------------------------------------------------------------------------------*/

//! Generate an AWS deny policy that only admits a provider's published IP ranges.
//!
//! The pipeline fetches the provider's metadata document, extracts the CIDR list for one
//! service, keeps the IPv4 prefixes, and serializes a single-statement deny policy with its
//! top-level keys in `Version`, `Id`, `Statement` order.
//!
//! ```no_run
//! // GitHub Actions runner ranges, pretty printed
//! let policy = ipfilter::generate_policy("actions", false)?;
//! # Ok::<(), ipfilter::Error>(())
//! ```

mod core;
pub mod lambda;

/*-------------------------------------------------------------------------------------------------
  Primary Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::client::{generate_policy, Client, ClientBuilder, GeneratedPolicy};
pub use crate::core::errors::{Error, ErrorKind, Result};
pub use crate::core::extract::extract_service_cidrs;
pub use crate::core::fetch::fetch;
pub use crate::core::filter::{filter_ipv4, summarize, PrefixSummary};
pub use crate::core::policy::{
    build_deny_policy, Condition, Effect, NotIpAddress, Policy, PolicyTemplate, Statement,
};
pub use crate::core::prefix_type::PrefixType;
pub use crate::core::reorder::{policy_key_order, reorder_top_level, POLICY_KEY_ORDER};
pub use crate::core::source::Source;
