/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod client;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod policy;
pub mod prefix_type;
pub mod reorder;
pub mod source;
