//! Find a network range in a Men&Mice Micetro IPAM by prefix length and title, and optionally
//! relabel it.
//!
//! The resolver walks the Micetro range tree depth-first, starting from the ranges matching each
//! requested network, and stops at the first range whose prefix length equals the target and
//! whose title contains the search text (case-insensitive).
//!
//! ```no_run
//! use micetro_findrange::{find_range, ClientBuilder, SearchQuery};
//!
//! let client = ClientBuilder::new()
//!     .url("http://micetro.example.net")
//!     .user("apiuser")
//!     .password("apipasswd")
//!     .build()?;
//!
//! let query = SearchQuery::new(["192.168.0.0/24"], 28)?
//!     .title("free")
//!     .new_title("reserved");
//!
//! let result = find_range(&client, &query, false)?;
//! println!("Reserved {}", result.message);
//! # Ok::<(), micetro_findrange::Error>(())
//! ```

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::api::MicetroApi;
pub use crate::core::client::{Client, ClientBuilder};
pub use crate::core::errors::{Error, Result};
pub use crate::core::query::{DescentBound, SearchQuery};
pub use crate::core::range::{parse_cidr, ChildRange, Range};
pub use crate::core::resolver::{
    find_range, lookup_range, resolve_range, FindRangeResult, Outcome, RangeMatch,
};

/*--------------------------------------------------------------------------------------
  Re-exports
--------------------------------------------------------------------------------------*/

pub use ipnetwork;
