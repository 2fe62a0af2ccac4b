use alloy::primitives::U256;

use crate::abi::IETHPool;
use crate::units::AmountWei;

/// Pool-wide balance. `total` is always `reward + staked` in wei.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolBalance {
    pub reward: AmountWei,
    pub staked: AmountWei,
    pub total: AmountWei,
}

/// The five words returned by `getUserState`, in contract order.
///
/// Field names are read off the labels the pool's reporting tooling prints
/// next to each index; they are not taken from contract documentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserStateSnapshot {
    /// Index 0, wei x seconds eligible for reward.
    pub rewardable_weighted_time: U256,
    /// Index 1, wei x seconds not eligible for reward.
    pub non_rewardable_weighted_time: U256,
    /// Index 2.
    pub total_staked: AmountWei,
    /// Index 3, unix seconds.
    pub last_checkpoint_timestamp: U256,
    /// Index 4.
    pub rewardable_staked: AmountWei,
}

impl UserStateSnapshot {
    /// The snapshot as the raw ordered tuple the contract returns.
    pub fn as_words(&self) -> [U256; 5] {
        [
            self.rewardable_weighted_time,
            self.non_rewardable_weighted_time,
            self.total_staked.0,
            self.last_checkpoint_timestamp,
            self.rewardable_staked.0,
        ]
    }

    /// Checkpoint as unix seconds, if it fits an `i64`.
    pub fn last_checkpoint_secs(&self) -> Option<i64> {
        u64::try_from(self.last_checkpoint_timestamp)
            .ok()
            .and_then(|secs| i64::try_from(secs).ok())
    }
}

impl From<IETHPool::getUserStateReturn> for UserStateSnapshot {
    fn from(ret: IETHPool::getUserStateReturn) -> Self {
        Self {
            rewardable_weighted_time: ret.rewardableWeightedTime,
            non_rewardable_weighted_time: ret.nonRewardableWeightedTime,
            total_staked: AmountWei(ret.totalStaked),
            last_checkpoint_timestamp: ret.lastCheckpointTimestamp,
            rewardable_staked: AmountWei(ret.rewardableStaked),
        }
    }
}
