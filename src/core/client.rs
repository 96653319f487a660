use crate::core::api::MicetroApi;
use crate::core::errors::{Error, Result};
use crate::core::json::{self, JsonRange, JsonRanges, JsonUpdateRange};
use crate::core::range::Range;
use log::{info, trace, warn};
use reqwest::blocking::{RequestBuilder, Response};
use reqwest::Method;
use std::env;
use std::time::Duration;

/// Path of the REST API below the Micetro server URL.
const API_PATH: &str = "/mmws/api/";

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration. The
/// [ClientBuilder] struct provides setters for each configuration value and a
/// [ClientBuilder::build] method to create a [Client] instance.
///
/// ```
/// let client = micetro_findrange::ClientBuilder::new()
///     .url("http://micetro.example.net")
///     .user("apiuser")
///     .password("apipasswd")
///     .timeout(10_000) // 10 seconds
///     .build()
///     .unwrap();
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [ClientBuilder::default] method to create a new [ClientBuilder] instance.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    user: String,
    password: String,
    timeout: u64,
    save_comment: String,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    fn default() -> Self {
        Self {
            url: "http://localhost".to_string(),
            user: String::new(),
            password: String::new(),
            timeout: 30_000, // 30 seconds
            save_comment: "Ansible API".to_string(),
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `MICETRO_URL`
    /// - `MICETRO_USER`
    /// - `MICETRO_PASSWORD`
    /// - `MICETRO_TIMEOUT`
    /// - `MICETRO_SAVE_COMMENT`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            url: get_env_var("MICETRO_URL", default.url),
            user: get_env_var("MICETRO_USER", default.user),
            password: get_secret_env_var("MICETRO_PASSWORD", default.password),
            timeout: get_env_var("MICETRO_TIMEOUT", default.timeout),
            save_comment: get_env_var("MICETRO_SAVE_COMMENT", default.save_comment),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the Micetro server URL, e.g. `http://micetro.example.net`. The
    /// REST API path (`/mmws/api/`) is appended by the client.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the user ID used to log in to the API.
    pub fn user(&mut self, user: &str) -> &mut Self {
        self.user = user.to_string();
        self
    }

    /// Set the password used to log in to the API.
    pub fn password(&mut self, password: &str) -> &mut Self {
        self.password = password.to_string();
        self
    }

    /// Set the per-request timeout in milliseconds; defaults to `30000`.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Set the audit comment saved with every title change; defaults to
    /// `Ansible API`.
    pub fn save_comment(&mut self, save_comment: &str) -> &mut Self {
        self.save_comment = save_comment.to_string();
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Result<Client> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(self.timeout))
            .build()?;

        Ok(Client {
            http,
            api_url: api_url(&self.url),
            user: self.user.clone(),
            password: self.password.clone(),
            timeout: self.timeout,
            save_comment: self.save_comment.clone(),
        })
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A synchronous (blocking) client for the Micetro REST API. Every call is a single HTTP round
/// trip authenticated with HTTP basic auth; there is no caching and no retry.
///
/// ```no_run
/// use micetro_findrange::MicetroApi;
///
/// let client = micetro_findrange::Client::new()?;
/// let ranges = client.get_ranges("192.168.0.0/24")?;
/// # Ok::<(), micetro_findrange::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::blocking::Client,
    api_url: String,
    user: String,
    password: String,
    timeout: u64,
    save_comment: String,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Client {
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Get the REST API base URL, e.g. `http://micetro.example.net/mmws/api/`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Get the per-request timeout in milliseconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    pub fn save_comment(&self) -> &str {
        &self.save_comment
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path.trim_start_matches('/'));
        trace!("{} {}", method, url);
        self.http
            .request(method, url)
            .basic_auth(&self.user, Some(&self.password))
    }

    /// Send a request and return the body, mapping any failure status to [Error::Api].
    fn send(&self, request: RequestBuilder) -> Result<String> {
        let response: Response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            Ok(body)
        } else {
            let message = json::error_message(&body).unwrap_or_else(|| status.to_string());
            warn!("Micetro API request failed ({}): {}", status, message);
            Err(Error::Api(message))
        }
    }
}

impl MicetroApi for Client {
    fn get_ranges(&self, filter: &str) -> Result<Vec<Range>> {
        info!("Query ranges matching filter: {}", filter);
        let body = self.send(self.request(Method::GET, "Ranges").query(&[("filter", filter)]))?;
        let ranges: JsonRanges = json::parse(&body)?;
        Ok(ranges.ranges)
    }

    fn get_range(&self, range_ref: &str) -> Result<Range> {
        let body = self.send(self.request(Method::GET, range_ref))?;
        let range: JsonRange = json::parse(&body)?;
        Ok(range.range)
    }

    fn set_range_title(&self, range_ref: &str, title: &str) -> Result<()> {
        info!("Set title of {} to {:?}", range_ref, title);
        let update = JsonUpdateRange::title(range_ref, title, &self.save_comment);
        let body = self.send(self.request(Method::PUT, range_ref).json(&update))?;

        // A successful PUT may return an empty body; only an error envelope fails it.
        match json::error_message(&body) {
            Some(message) => Err(Error::Api(message)),
            None => Ok(()),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Build the REST API base URL from a server URL, accepting URLs that already include the
/// API path.
fn api_url(url: &str) -> String {
    let base = url.trim().trim_end_matches('/');
    let base = base.strip_suffix(API_PATH.trim_end_matches('/')).unwrap_or(base);
    format!("{base}{API_PATH}")
}

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/// Like [get_env_var], without logging the value.
fn get_secret_env_var(env_var: &str, default: String) -> String {
    env::var(env_var)
        .inspect(|_| info!("Using {}", env_var))
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::log_error;
    use env::VarError;
    use test_log::test;

    /*-------------------------------------------------------------------------
      Test Environment Variable Configuration
    -------------------------------------------------------------------------*/

    /// ENV_VAR: MICETRO_URL
    /// ENV_VAR: MICETRO_USER
    /// ENV_VAR: MICETRO_PASSWORD
    /// ENV_VAR: MICETRO_TIMEOUT
    /// ENV_VAR: MICETRO_SAVE_COMMENT
    #[test]
    fn test_environment_variable_configuration() {
        let test_env_vars = [
            ("MICETRO_URL", "https://micetro.example.net"),
            ("MICETRO_USER", "apiuser"),
            ("MICETRO_PASSWORD", "apipasswd"),
            ("MICETRO_TIMEOUT", "5000"),
            ("MICETRO_SAVE_COMMENT", "reserved by pipeline"),
        ];

        let default = ClientBuilder::default().build().unwrap();

        // Store environment variable values
        let stored_env_vars: Vec<(String, std::result::Result<String, VarError>)> = test_env_vars
            .iter()
            .map(|(env_var, _)| (env_var.to_string(), env::var(env_var)))
            .collect();

        // Unset all environment variables
        test_env_vars.iter().for_each(|(env_var, _)| unsafe {
            env::remove_var(env_var);
        });

        // Test default cases
        let new = Client::new().unwrap();
        assert_eq!(new.api_url(), default.api_url());
        assert_eq!(new.user(), default.user());
        assert_eq!(new.timeout(), default.timeout());
        assert_eq!(new.save_comment(), default.save_comment());

        // Set all environment variables
        for (env_var, value) in test_env_vars.iter() {
            unsafe { env::set_var(env_var, value) };
        }

        // Test environment variable configuration
        let env_config = Client::new().unwrap();
        assert_eq!(env_config.api_url(), "https://micetro.example.net/mmws/api/");
        assert_eq!(env_config.user(), "apiuser");
        assert_eq!(env_config.password, "apipasswd");
        assert_eq!(env_config.timeout(), 5000);
        assert_eq!(env_config.save_comment(), "reserved by pipeline");

        // Invalid values fall back to the default
        unsafe { env::set_var("MICETRO_TIMEOUT", "soon") };
        assert_eq!(Client::new().unwrap().timeout(), default.timeout());

        // Reset environment variables
        for (env_var, value) in stored_env_vars {
            match value {
                Ok(value) => unsafe { env::set_var(env_var, value) },
                Err(VarError::NotPresent) => unsafe { env::remove_var(env_var) },
                Err(VarError::NotUnicode(value)) => unsafe { env::set_var(env_var, value) },
            }
        }
    }

    /*-------------------------------------------------------------------------
      Test Getter and Setter Methods
    -------------------------------------------------------------------------*/

    #[test]
    fn test_getter_and_setter_methods() {
        let client = ClientBuilder::default()
            .url("http://micetro.example.net/")
            .user("apiuser")
            .password("apipasswd")
            .timeout(1000)
            .save_comment("test")
            .build()
            .inspect_err(log_error)
            .unwrap();

        assert_eq!(client.api_url(), "http://micetro.example.net/mmws/api/");
        assert_eq!(client.user(), "apiuser");
        assert_eq!(client.timeout(), 1000);
        assert_eq!(client.save_comment(), "test");
    }

    /*-------------------------------------------------------------------------
      Test URL Handling
    -------------------------------------------------------------------------*/

    #[test]
    fn test_api_url() {
        assert_eq!(api_url("http://mm"), "http://mm/mmws/api/");
        assert_eq!(api_url("http://mm/"), "http://mm/mmws/api/");
        assert_eq!(api_url("http://mm/mmws/api"), "http://mm/mmws/api/");
        assert_eq!(api_url(" http://mm/mmws/api/ "), "http://mm/mmws/api/");
    }

    #[test]
    fn test_request_url_joins_reference() {
        let client = ClientBuilder::default()
            .url("http://micetro.example.net")
            .build()
            .unwrap();

        let request = client.request(Method::GET, "Ranges/42").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://micetro.example.net/mmws/api/Ranges/42"
        );

        let request = client
            .request(Method::GET, "Ranges")
            .query(&[("filter", "192.168.0.0/24")])
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://micetro.example.net/mmws/api/Ranges?filter=192.168.0.0%2F24"
        );
    }

    #[test]
    fn test_unreachable_server_is_http_error() {
        let client = ClientBuilder::default()
            .url("http://127.0.0.1:9")
            .timeout(500)
            .build()
            .unwrap();

        let result = client.get_ranges("192.168.0.0/24");
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
