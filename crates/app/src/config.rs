use ums_core::topics;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local server. In a deployed
/// environment, override via environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full WebSocket URL of the STOMP endpoint.
    pub broker_ws_url: String,
    /// Base HTTP URL of the REST API.
    pub api_base_url: String,
    /// Bearer token for the authenticated course endpoints, if issued.
    pub courses_token: Option<String>,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var         | Default                     |
    /// |-----------------|-----------------------------|
    /// | `BROKER_WS_URL` | `ws://localhost:8081/ws`    |
    /// | `API_BASE_URL`  | `http://localhost:8081`     |
    /// | `COURSES_TOKEN` | unset                       |
    pub fn from_env() -> Self {
        let broker_ws_url = std::env::var("BROKER_WS_URL")
            .unwrap_or_else(|_| format!("ws://localhost:8081{}", topics::STOMP_ENDPOINT));

        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8081".into());

        let courses_token = std::env::var("COURSES_TOKEN").ok().filter(|t| !t.is_empty());

        Self {
            broker_ws_url,
            api_base_url,
            courses_token,
        }
    }
}
