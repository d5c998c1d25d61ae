use std::env;
use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub client_url: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub model_api_base: String,
    pub model_api_key: SecretString,
    pub model_name: String,
    pub model_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "mentor-local".to_string()),
            client_url: env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            model_api_base: env::var("MODEL_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model_api_key: SecretString::from(env::var("MODEL_API_KEY")
                .unwrap_or_else(|_| "dev_model_key_change_in_production".to_string())),
            model_name: env::var("MODEL_NAME").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            model_timeout_secs: env::var("MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let model_key = self.model_api_key.expose_secret();

        if model_key == "dev_model_key_change_in_production" {
            panic!(
                "FATAL: MODEL_API_KEY is using default value! Set MODEL_API_KEY environment variable."
            );
        }

        if self.model_timeout_secs == 0 {
            panic!("FATAL: MODEL_TIMEOUT_SECS must be greater than zero.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "mentor-test".to_string(),
            client_url: "http://localhost:5173".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            model_api_base: "http://localhost:11434/v1".to_string(),
            model_api_key: SecretString::from("test_model_key".to_string()),
            model_name: "test-model".to_string(),
            model_timeout_secs: 5,
        }
    }
}
