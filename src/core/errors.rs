/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Error type used throughout the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Micetro API rejected a request; carries the service's message verbatim.
    #[error("{0}")]
    Api(String),

    /// A range name (or other CIDR string) is not in `address/prefix` form.
    #[error("Invalid CIDR `{cidr}`: {reason}")]
    InvalidCidr { cidr: String, reason: String },

    /// Missing or malformed caller input.
    #[error("{0}")]
    InvalidArguments(String),

    /// The whole range forest was searched without finding a match.
    #[error("No acceptable /{prefix_length} range found in the provided network(s).")]
    NotFound { prefix_length: u8 },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = Error::NotFound { prefix_length: 28 };
        assert_eq!(
            error.to_string(),
            "No acceptable /28 range found in the provided network(s)."
        );
    }

    #[test]
    fn test_api_message_is_verbatim() {
        let error = Error::Api("Object not found for reference: Ranges/9".to_string());
        assert_eq!(error.to_string(), "Object not found for reference: Ranges/9");
    }
}
