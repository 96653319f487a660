use crate::core::errors::{Error, Result};
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Range
-------------------------------------------------------------------------------------------------*/

/// A node in the Micetro address-space tree: a CIDR block with its custom properties and the
/// references to its child ranges.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    /// CIDR name of the range, e.g. `192.168.0.0/28`.
    pub name: String,

    /// Opaque resource reference, e.g. `Ranges/42`.
    #[serde(rename = "ref")]
    pub range_ref: String,

    /// Custom properties; `Title` holds the free-text label.
    #[serde(default)]
    pub custom_properties: BTreeMap<String, serde_json::Value>,

    /// Child ranges in the order the service lists them.
    #[serde(default)]
    pub child_ranges: Vec<ChildRange>,
}

/// Reference to a child range, materialized with a separate `GET <ref>`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChildRange {
    #[serde(rename = "ref")]
    pub range_ref: String,
}

/*--------------------------------------------------------------------------------------
  Range Implementation
--------------------------------------------------------------------------------------*/

impl Range {
    /// The range's `Title` custom property, or `""` when unset or not a string.
    pub fn title(&self) -> &str {
        self.custom_properties
            .get("Title")
            .and_then(|title| title.as_str())
            .unwrap_or("")
    }

    /// Case-insensitive substring match against the title. An empty needle matches any title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Parse the range name as an `address/prefix` network.
    pub fn network(&self) -> Result<IpNetwork> {
        parse_cidr(&self.name)
    }

    /// Prefix length of the range, taken from its name.
    pub fn prefix_length(&self) -> Result<u8> {
        Ok(self.network()?.prefix())
    }

    pub fn has_children(&self) -> bool {
        !self.child_ranges.is_empty()
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Parse a strict `address/prefix` CIDR string.
///
/// Unlike `IpNetwork::from_str`, a bare address without a `/prefix` is rejected.
pub fn parse_cidr(cidr: &str) -> Result<IpNetwork> {
    let invalid = |reason: String| Error::InvalidCidr {
        cidr: cidr.to_string(),
        reason,
    };

    let (address, prefix) = cidr
        .trim()
        .split_once('/')
        .ok_or_else(|| invalid("expected `address/prefix`".to_string()))?;

    let address: IpAddr = address
        .parse()
        .map_err(|error: std::net::AddrParseError| invalid(error.to_string()))?;
    let prefix: u8 = prefix
        .parse()
        .map_err(|error: std::num::ParseIntError| invalid(error.to_string()))?;

    IpNetwork::new(address, prefix).map_err(|error| invalid(error.to_string()))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /*----------------------------------------------------------------------------------
      Test Helper Functions
    ----------------------------------------------------------------------------------*/

    pub(crate) fn test_range(name: &str, range_ref: &str, title: &str, children: &[&str]) -> Range {
        let mut custom_properties = BTreeMap::new();
        custom_properties.insert("Title".to_string(), json!(title));

        Range {
            name: name.to_string(),
            range_ref: range_ref.to_string(),
            custom_properties,
            child_ranges: children
                .iter()
                .map(|child_ref| ChildRange {
                    range_ref: child_ref.to_string(),
                })
                .collect(),
        }
    }

    /*----------------------------------------------------------------------------------
      Range
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_deserialize_range() {
        let range: Range = serde_json::from_value(json!({
            "ref": "Ranges/7",
            "name": "192.168.0.0/24",
            "customProperties": { "Title": "Office LAN", "Location": "HQ" },
            "childRanges": [
                { "ref": "Ranges/8", "name": "192.168.0.0/28" },
                { "ref": "Ranges/9" }
            ],
            "isContainer": false
        }))
        .unwrap();

        assert_eq!(range.range_ref, "Ranges/7");
        assert_eq!(range.title(), "Office LAN");
        assert_eq!(range.prefix_length().unwrap(), 24);
        assert_eq!(range.child_ranges.len(), 2);
        assert_eq!(range.child_ranges[1].range_ref, "Ranges/9");
    }

    #[test]
    fn test_missing_properties_default_to_empty() {
        let range: Range = serde_json::from_value(json!({
            "ref": "Ranges/1",
            "name": "10.0.0.0/8"
        }))
        .unwrap();

        assert_eq!(range.title(), "");
        assert!(!range.has_children());
        assert!(range.title_contains(""));
        assert!(!range.title_contains("free"));
    }

    #[test]
    fn test_title_contains_is_case_insensitive() {
        let range = test_range("10.0.0.0/28", "Ranges/1", "FREE-001", &[]);
        assert!(range.title_contains("free"));
        assert!(range.title_contains("Free-0"));
        assert!(!range.title_contains("reserved"));
    }

    #[test]
    fn test_non_string_title_is_empty() {
        let mut range = test_range("10.0.0.0/28", "Ranges/1", "", &[]);
        range
            .custom_properties
            .insert("Title".to_string(), json!(null));
        assert_eq!(range.title(), "");
    }

    /*----------------------------------------------------------------------------------
      CIDR Parsing
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_parse_cidr() {
        assert_eq!(parse_cidr("192.168.0.16/28").unwrap().prefix(), 28);
        assert_eq!(parse_cidr("2001:db8::/48").unwrap().prefix(), 48);
    }

    #[test]
    fn test_parse_cidr_rejects_malformed_names() {
        for cidr in ["192.168.0.0", "192.168.0.0/", "192.168.0.0/33", "examplenet/24", "a/b/c"] {
            let result = parse_cidr(cidr);
            assert!(
                matches!(result, Err(Error::InvalidCidr { .. })),
                "expected parse error for {cidr:?}"
            );
        }
    }
}
