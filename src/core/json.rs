use crate::core::errors::{Error, Result};
use crate::core::range::Range;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

/// Parse a Micetro response body, turning an `{"error": {...}}` envelope into [Error::Api].
pub fn parse<T: DeserializeOwned>(json: &str) -> Result<T> {
    let envelope: JsonEnvelope<T> = serde_json::from_str(json)?;
    match (envelope.result, envelope.error) {
        (_, Some(error)) => Err(Error::Api(error.message)),
        (Some(result), None) => Ok(result),
        (None, None) => Err(Error::Api("Response contains no result".to_string())),
    }
}

/// Extract the service's error message from a failed response body, if it has one.
pub fn error_message(json: &str) -> Option<String> {
    serde_json::from_str::<JsonEnvelope<serde::de::IgnoredAny>>(json)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|error| error.message)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Response Envelope
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize)]
struct JsonEnvelope<T> {
    result: Option<T>,
    error: Option<JsonError>,
}

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonError {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

/*--------------------------------------------------------------------------------------
  Results
--------------------------------------------------------------------------------------*/

/// `GET Ranges?filter=...`
#[derive(Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRanges {
    #[serde(default)]
    pub ranges: Vec<Range>,

    #[serde(default)]
    pub total_results: Option<u64>,
}

/// `GET <range-ref>`
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonRange {
    pub range: Range,
}

/*--------------------------------------------------------------------------------------
  Requests
--------------------------------------------------------------------------------------*/

/// `PUT <range-ref>` body setting range properties.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonUpdateRange<'j> {
    #[serde(rename = "ref")]
    pub range_ref: &'j str,
    pub properties: BTreeMap<&'j str, &'j str>,
    pub save_comment: &'j str,
}

impl<'j> JsonUpdateRange<'j> {
    pub fn title(range_ref: &'j str, title: &'j str, save_comment: &'j str) -> Self {
        Self {
            range_ref,
            properties: BTreeMap::from([("Title", title)]),
            save_comment,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
