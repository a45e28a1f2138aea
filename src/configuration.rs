//! Config for the server and the terminal client
//!
//! Configuration can be created programmatically using [`Configuration::new()`] or by reading
//! environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! All values are optional. Flags are case-insensitive; set them to `"true"` to enable.
//! Unparsable values are reported with a warning and replaced by the default.
//!
//! - `PORT`: Port the server listens on (default: `8080`)
//! - `FRONTEND_URL`: Origin allowed by CORS, `*` for any (default: `*`)
//! - `DATA_PATH`: Character file loaded at startup (default: `data.csv`)
//! - `API_URL`: Base URL the client talks to (default: `http://localhost:8080/api`)
//! - `REQUEST_TIMEOUT_MS`: Client request timeout in milliseconds (default: `5000`)
//! - `SEARCH_DEBOUNCE_MS`: Quiet time before a typed search is sent (default: `300`)
//! - `SPECIAL_IDENTITY`: Character guaranteed to be drawn early, empty to disable (default: `刘锦东`)
//! - `GUARANTEE_ROUND`: Round by which that character is forced (default: `5`)
//! - `GUESS_VERBOSE`: Debug level logs (default: `true`)
//! - `GUESS_LOG`: Log to a file instead of stdout (default: `false`)

use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::warn;

use crate::target_selection::{DEFAULT_GUARANTEE_ROUND, DEFAULT_SPECIAL_IDENTITY};

/// Configuration shared by both binaries.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub(crate) port: u16,
    pub(crate) frontend_url: String,
    pub(crate) data_path: PathBuf,
    pub(crate) api_url: String,
    pub(crate) request_timeout: Duration,
    pub(crate) search_debounce: Duration,
    pub(crate) special_identity: Option<String>,
    pub(crate) guarantee_round: u32,
    pub(crate) verbose: bool,
    pub(crate) log: bool,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - The server listens on port 8080 and allows any origin.
    /// - Characters are read from `data.csv` in the working directory.
    /// - The client talks to `http://localhost:8080/api`, gives up on requests after 5 seconds
    ///   and waits 300 ms of quiet typing before searching.
    /// - The special character guarantee applies to `刘锦东` by round 5.
    /// - Logs go to stdout at debug level.
    pub fn new() -> Self {
        Self {
            port: 8080,
            frontend_url: "*".to_owned(),
            data_path: PathBuf::from("data.csv"),
            api_url: "http://localhost:8080/api".to_owned(),
            request_timeout: Duration::from_millis(5000),
            search_debounce: Duration::from_millis(300),
            special_identity: Some(DEFAULT_SPECIAL_IDENTITY.to_owned()),
            guarantee_round: DEFAULT_GUARANTEE_ROUND,
            verbose: true,
            log: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// See the module documentation for the recognized variables. Any variable left unset keeps
    /// its default value.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        fn get_env_parsed<T: FromStr>(var: &str, default: T) -> T
        where
            T::Err: Display,
        {
            match env::var(var) {
                Ok(val) => val.trim().parse().unwrap_or_else(|e| {
                    warn!("Invalid {var} value '{val}': {e}, using default");
                    default
                }),
                Err(_) => default,
            }
        }

        let defaults = Self::new();
        let special_identity = match env::var("SPECIAL_IDENTITY") {
            Ok(name) if name.trim().is_empty() => None,
            Ok(name) => Some(name),
            Err(_) => defaults.special_identity,
        };

        Self {
            port: get_env_parsed("PORT", defaults.port),
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            data_path: env::var("DATA_PATH").map_or(defaults.data_path, PathBuf::from),
            api_url: env::var("API_URL").unwrap_or(defaults.api_url),
            request_timeout: Duration::from_millis(get_env_parsed("REQUEST_TIMEOUT_MS", 5000)),
            search_debounce: Duration::from_millis(get_env_parsed("SEARCH_DEBOUNCE_MS", 300)),
            special_identity,
            guarantee_round: get_env_parsed("GUARANTEE_ROUND", defaults.guarantee_round),
            verbose: get_env_flag("GUESS_VERBOSE", defaults.verbose),
            log: get_env_flag("GUESS_LOG", defaults.log),
        }
    }

    /// Port the server listens on.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Origin allowed by CORS. `*` allows any origin.
    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }

    /// Character file read by the server at startup.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Base URL of the API, without trailing route (e.g. `http://host:8080/api`).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Timeout of every client request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Quiet time before a typed search is sent.
    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// Character covered by the early draw guarantee, `None` to disable it.
    pub fn with_special_identity(mut self, identity: Option<String>) -> Self {
        self.special_identity = identity;
        self
    }

    /// Round by which the special character is forced.
    pub fn with_guarantee_round(mut self, round: u32) -> Self {
        self.guarantee_round = round;
        self
    }

    /// Enable or disable debug level logs.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Port the server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL of the API.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Quiet time before a typed search is sent.
    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    /// Character covered by the guarantee, if any.
    pub fn special_identity(&self) -> Option<&str> {
        self.special_identity.as_deref()
    }

    /// Round by which the special character is forced.
    pub fn guarantee_round(&self) -> u32 {
        self.guarantee_round
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
