use micetro_findrange::{Error, Result, SearchQuery};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Ansible Module Arguments
-------------------------------------------------------------------------------------------------*/

/// Arguments Ansible writes to the JSON file passed to a binary module.
///
/// Ansible does not type-check binary module parameters, so `network` and `prefixlength` accept
/// the same loose values Ansible's `list` and `int` argument types would.
#[derive(Debug, Deserialize, PartialEq)]
pub struct ModuleArgs {
    pub mm_provider: Provider,

    #[serde(deserialize_with = "network_list")]
    pub network: Vec<String>,

    #[serde(deserialize_with = "prefix_length")]
    pub prefixlength: u8,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub new_title: String,

    #[serde(default, rename = "_ansible_check_mode")]
    pub check_mode: bool,
}

/// Micetro connection settings.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Provider {
    pub mm_url: String,
    pub mm_user: String,
    pub mm_password: String,
}

/*--------------------------------------------------------------------------------------
  Loose Parameter Types
--------------------------------------------------------------------------------------*/

/// A list, a comma-separated string, or a single scalar. Scalars are stringified and `null`
/// entries dropped.
fn network_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let scalar = |value: Value| -> std::result::Result<Option<String>, D::Error> {
        match value {
            Value::String(network) => Ok(Some(network)),
            Value::Number(number) => Ok(Some(number.to_string())),
            Value::Bool(flag) => Ok(Some(flag.to_string())),
            Value::Null => Ok(None),
            other => Err(de::Error::custom(format!("invalid network: {other}"))),
        }
    };

    match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| scalar(value).transpose())
            .collect(),
        Value::String(networks) => Ok(networks.split(',').map(str::to_string).collect()),
        value => Ok(scalar(value)?.into_iter().collect()),
    }
}

/// An integer or an integer string, between 0 and 128.
fn prefix_length<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let prefix_length = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };

    prefix_length
        .filter(|prefix_length| *prefix_length <= 128)
        .and_then(|prefix_length| u8::try_from(prefix_length).ok())
        .ok_or_else(|| de::Error::custom("prefixlength must be an integer between 0 and 128"))
}

/*--------------------------------------------------------------------------------------
  Parsing
--------------------------------------------------------------------------------------*/

pub fn parse(json: &str) -> Result<ModuleArgs> {
    serde_json::from_str(json)
        .map_err(|error| Error::InvalidArguments(format!("Invalid module arguments: {error}")))
}

pub fn read(path: &Path) -> Result<ModuleArgs> {
    parse(&fs::read_to_string(path)?)
}

impl ModuleArgs {
    pub fn query(&self) -> Result<SearchQuery> {
        Ok(SearchQuery::new(&self.network, self.prefixlength)?
            .title(&self.title)
            .new_title(&self.new_title))
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
