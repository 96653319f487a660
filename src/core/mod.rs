/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod api;
pub mod client;
pub mod errors;
pub mod json;
pub mod query;
pub mod range;
pub mod resolver;
