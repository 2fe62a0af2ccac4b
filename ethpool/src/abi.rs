use alloy::json_abi::JsonAbi;
use alloy::sol_types::SolCall;
use serde_json::Value;

use crate::error::{ReaderError, Result};

alloy::sol! {
    /// View surface of the ETHPool logic contract, called through its proxy.
    interface IETHPool {
        /// Reward accumulator held by the pool.
        function Rwd() view returns (uint256);
        /// Total staked by all users.
        function balanceOf() view returns (uint256);
        function getUserState(address user) view returns (
            uint256 rewardableWeightedTime,
            uint256 nonRewardableWeightedTime,
            uint256 totalStaked,
            uint256 lastCheckpointTimestamp,
            uint256 rewardableStaked
        );
        function getUserAvailable(address user) view returns (uint256);
        function getUserReward(address user) view returns (uint256);
    }
}

/// (name, selector) of every method the reader calls.
pub(crate) fn required_methods() -> [(&'static str, [u8; 4]); 5] {
    [
        ("Rwd", IETHPool::RwdCall::SELECTOR),
        ("balanceOf", IETHPool::balanceOfCall::SELECTOR),
        ("getUserState", IETHPool::getUserStateCall::SELECTOR),
        ("getUserAvailable", IETHPool::getUserAvailableCall::SELECTOR),
        ("getUserReward", IETHPool::getUserRewardCall::SELECTOR),
    ]
}

/// A parsed contract ABI. Accepts a bare ABI array or a build artifact with
/// an `abi` field.
#[derive(Clone, Debug)]
pub struct InterfaceDescriptor {
    abi: JsonAbi,
}

impl InterfaceDescriptor {
    pub fn from_value(value: Value) -> Result<Self> {
        let abi_value = match value {
            Value::Object(mut artifact) => artifact.remove("abi").ok_or_else(|| {
                ReaderError::Configuration("ABI object has no `abi` field".into())
            })?,
            other => other,
        };
        if !abi_value.is_array() {
            return Err(ReaderError::Configuration(
                "ABI must be a JSON array of entries".into(),
            ));
        }
        let abi: JsonAbi = serde_json::from_value(abi_value)
            .map_err(|e| ReaderError::Configuration(format!("malformed ABI: {e}")))?;
        Ok(Self { abi })
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| ReaderError::Configuration(format!("ABI is not JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn declares(&self, name: &str, selector: [u8; 4]) -> bool {
        self.abi
            .function(name)
            .is_some_and(|overloads| overloads.iter().any(|f| f.selector().0 == selector))
    }

    /// Fails with the list of pool methods this ABI does not declare.
    pub fn ensure_pool_methods(&self) -> Result<()> {
        let missing: Vec<&str> = required_methods()
            .into_iter()
            .filter(|(name, selector)| !self.declares(name, *selector))
            .map(|(name, _)| name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ReaderError::Configuration(format!(
                "ABI does not declare {}",
                missing.join(", ")
            )))
        }
    }
}
