use alloy::primitives::Address;
use dotenv::dotenv;
use eyre::{Result, eyre};
use std::{env, fs};
use toml::Value;

/// Thin accessor over `config.toml`.
///
/// ```toml
/// [rpc_endpoints]
/// 1 = "env:MAINNET_RPC_URL"
///
/// [deployments.default]
/// roles_authority = "0x..."
///
/// [deployments.1]
/// vault = "0x..."
/// ```
pub struct ConfigWrapper {
    raw_config: Value,
}

impl ConfigWrapper {
    pub fn new(raw_config: Value) -> Self {
        Self { raw_config }
    }

    pub fn from_file(path: Option<&str>) -> Result<Self> {
        dotenv().ok(); // Load environment variables from .env file

        let path = path.unwrap_or("config.toml");
        let config_content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read config file {}: {}", path, e))?;
        let raw_config: Value = config_content.parse::<Value>()?;

        Ok(Self { raw_config })
    }

    pub fn get_rpc_url(&self, network_id: u32) -> Result<String> {
        let url_str = self
            .raw_config
            .get("rpc_endpoints")
            .and_then(|r| r.get(&network_id.to_string()))
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("URL not found for network_id: {}", network_id))?;

        if let Some(env_var) = url_str.strip_prefix("env:") {
            env::var(env_var).map_err(|_| eyre!("Environment variable {} not set", env_var))
        } else {
            Ok(url_str.to_string())
        }
    }

    /// Looks up a named deployment, network specific entries first, then
    /// the `default` table.
    pub fn get_deployment(&self, network_id: u32, name: &str) -> Result<Address> {
        let deployments = self.raw_config.get("deployments");
        let value = deployments
            .and_then(|d| d.get(&network_id.to_string()))
            .and_then(|d| d.get(name))
            .or_else(|| {
                // Fallback to default if network specific not found
                deployments
                    .and_then(|d| d.get("default"))
                    .and_then(|d| d.get(name))
            })
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("{} not found in deployments for network_id: {}", name, network_id))?;

        value
            .parse::<Address>()
            .map_err(|e| eyre!("Deployment {} is not a valid address ({}): {}", name, value, e))
    }
}
