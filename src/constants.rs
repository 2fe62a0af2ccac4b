#[macro_export]
macro_rules! env_lazy {
    ($( $vis:vis $name:ident : $ty:ty = ($key:literal, $default:expr); )* ) => {
        $(
            $vis static $name: ::std::sync::LazyLock<$ty> = ::std::sync::LazyLock::new(|| {
                $crate::libs::config::load_env();
                $crate::libs::config::Config::get_var_t::<$ty>($key, $default)
            });
        )*
    };
}

pub const DEFAULT_ETH_RPC: &str = "http://127.0.0.1:8545";
pub const DEFAULT_ABI_PATH: &str = "./Deploy/ABIs/Logic.json";
pub const DEFAULT_ADDRESSES_PATH: &str = "./Deploy/addresses.json";
pub const DEFAULT_USER_PATH: &str = "./user.json";

/// Unit label printed next to scaled amounts.
pub const DISPLAY_UNIT: &str = "ETH";

env_lazy! {
    pub POOL_ROLE: String       = ("POOL_ROLE", ethpool::PROXY_ROLE.to_string());
    pub COLOR_OUTPUT: bool      = ("COLOR_OUTPUT", true);
}
