//! Plain-text rendering of pool and user reports. Amounts arrive in wei and
//! are scaled here, at the edge, and nowhere else.

use {
    crate::constants::DISPLAY_UNIT,
    alloy::primitives::Address,
    chrono::{DateTime, Utc},
    ethpool::{to_display_amount, AmountWei, PoolBalance, UserStateSnapshot},
};

fn ether(v: AmountWei) -> String {
    format!("{} {DISPLAY_UNIT}", to_display_amount(v))
}

pub fn connectivity_line(endpoint: &str, listening: bool) -> String {
    if listening {
        format!("Node at {endpoint} is listening")
    } else {
        format!("Node at {endpoint} answered but is NOT listening")
    }
}

pub fn pool_balance_lines(pool: Address, bal: &PoolBalance) -> Vec<String> {
    vec![
        format!("ETHPool {}", pool.to_checksum(None)),
        format!("The net balance in ETHPool is {},", ether(bal.total)),
        format!("The net value in rewards is {},", ether(bal.reward)),
        format!(
            "And the total value staked by users is {}.",
            ether(bal.staked)
        ),
    ]
}

pub struct UserReport {
    pub user: Address,
    pub state: UserStateSnapshot,
    pub available: AmountWei,
    pub reward: AmountWei,
}

pub fn user_state_lines(r: &UserReport) -> Vec<String> {
    let s = &r.state;
    let checkpoint = s
        .last_checkpoint_secs()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|t| format!(" ({})", t.format("%Y-%m-%d %H:%M:%S UTC")))
        .unwrap_or_default();
    vec![
        format!(
            "The state parameters for the user {} are:",
            r.user.to_checksum(None)
        ),
        format!("Rewardable WEIs*seconds: {}", s.rewardable_weighted_time),
        format!("Not Rewardable WEIs*seconds: {}", s.non_rewardable_weighted_time),
        format!(
            "Total staked in WEIs: {} ({})",
            s.total_staked,
            ether(s.total_staked)
        ),
        format!(
            "Rewardable stake in WEIs: {} ({})",
            s.rewardable_staked,
            ether(s.rewardable_staked)
        ),
        format!(
            "Total available in WEIs: {} ({})",
            r.available,
            ether(r.available)
        ),
        format!("Claimable reward in WEIs: {} ({})", r.reward, ether(r.reward)),
        format!(
            "Last check point of time in unix epoch: {}{checkpoint}",
            s.last_checkpoint_timestamp
        ),
    ]
}
