use {
    crate::constants::{DEFAULT_ABI_PATH, DEFAULT_ADDRESSES_PATH, DEFAULT_ETH_RPC, DEFAULT_USER_PATH},
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, path::PathBuf, str::FromStr},
};

pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub eth_rpc: String,
    pub abi_path: PathBuf,
    pub addresses_path: PathBuf,
    pub user_path: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        Self {
            eth_rpc: std::env::var("ETH_RPC").unwrap_or_else(|_| DEFAULT_ETH_RPC.to_string()),
            abi_path: Self::get_var_t("POOL_ABI_PATH", PathBuf::from(DEFAULT_ABI_PATH)),
            addresses_path: Self::get_var_t(
                "POOL_ADDRESSES_PATH",
                PathBuf::from(DEFAULT_ADDRESSES_PATH),
            ),
            user_path: Self::get_var_t("POOL_USER_PATH", PathBuf::from(DEFAULT_USER_PATH)),
        }
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| s.trim().parse::<T>().ok())
            .unwrap_or(default)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
