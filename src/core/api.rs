use crate::core::errors::Result;
use crate::core::range::Range;

/*-------------------------------------------------------------------------------------------------
  Micetro API
-------------------------------------------------------------------------------------------------*/

/// The Micetro REST operations the range resolver depends on.
///
/// [Client](crate::Client) implements this over HTTP; tests substitute an in-memory tree.
pub trait MicetroApi {
    /// `GET Ranges?filter=<filter>`: top-level ranges matching a network name or CIDR.
    fn get_ranges(&self, filter: &str) -> Result<Vec<Range>>;

    /// `GET <range_ref>`: materialize a single range by reference.
    fn get_range(&self, range_ref: &str) -> Result<Range>;

    /// `PUT <range_ref>`: overwrite the range's `Title` custom property.
    fn set_range_title(&self, range_ref: &str, title: &str) -> Result<()>;
}
