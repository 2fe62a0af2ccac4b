//! The [`ContractStateReader`] wraps one deployed pool contract behind a
//! JSON-RPC endpoint and exposes its view methods as typed async calls.
//!
//! Every call is one `eth_call` round trip awaited before the next one is
//! issued. Nothing is retried or cached; failures come back as
//! [`ReaderError`] untouched.

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use serde_json::{json, Value};

use crate::abi::{IETHPool, InterfaceDescriptor};
use crate::addresses::{parse_address, AddressBook};
use crate::error::{ReaderError, Result};
use crate::state::{PoolBalance, UserStateSnapshot};
use crate::transport::{HttpTransport, RpcTransport, TransportError};
use crate::units::{self, AmountEther, AmountWei};

/// Method label on the error when `Rwd()` and `balanceOf()` do not add up.
pub const POOL_SUM: &str = "Rwd() + balanceOf()";

#[derive(Clone, Debug)]
pub struct ContractStateReader<T = HttpTransport> {
    transport: T,
    contract: Address,
}

impl ContractStateReader<HttpTransport> {
    /// Reader over HTTP. Validates all inputs, performs no network I/O.
    pub fn new(
        endpoint_url: &str,
        contract_address: &str,
        descriptor: &InterfaceDescriptor,
    ) -> Result<Self> {
        let transport = HttpTransport::new(endpoint_url)?;
        Self::with_transport(transport, contract_address, descriptor)
    }

    /// Reader bound to the address book's `Proxy` entry.
    pub fn from_address_book(
        endpoint_url: &str,
        book: &AddressBook,
        descriptor: &InterfaceDescriptor,
    ) -> Result<Self> {
        Self::new(endpoint_url, book.proxy()?, descriptor)
    }
}

impl<T: RpcTransport> ContractStateReader<T> {
    pub fn with_transport(
        transport: T,
        contract_address: &str,
        descriptor: &InterfaceDescriptor,
    ) -> Result<Self> {
        let contract = parse_address(contract_address)
            .map_err(|e| ReaderError::Configuration(format!("contract {e}")))?;
        descriptor.ensure_pool_methods()?;
        Ok(Self {
            transport,
            contract,
        })
    }

    pub fn contract(&self) -> Address {
        self.contract
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `net_listening` probe. `Ok(false)` means the node answered but is not
    /// listening; an unreachable endpoint is a [`ReaderError::Network`].
    pub async fn check_connectivity(&self) -> Result<bool> {
        let res = self
            .transport
            .request("net_listening", json!([]))
            .await
            .map_err(ReaderError::Network)?;
        match res {
            Value::Bool(listening) => Ok(listening),
            other => Err(ReaderError::Network(TransportError::Malformed(format!(
                "net_listening returned {other}, expected a boolean"
            )))),
        }
    }

    /// Reward accumulator and total stake, plus their exact sum.
    pub async fn get_pool_balance(&self) -> Result<PoolBalance> {
        let reward = AmountWei(self.view(IETHPool::RwdCall {}).await?);
        let staked = AmountWei(self.view(IETHPool::balanceOfCall {}).await?);
        let total = reward.checked_add(staked).ok_or_else(|| {
            ReaderError::contract_call(POOL_SUM, "sum overflows uint256")
        })?;
        Ok(PoolBalance {
            reward,
            staked,
            total,
        })
    }

    pub async fn get_user_state(&self, user_address: &str) -> Result<UserStateSnapshot> {
        let user = user_arg(user_address)?;
        let ret = self.view(IETHPool::getUserStateCall { user }).await?;
        Ok(ret.into())
    }

    /// Amount the user can withdraw right now.
    pub async fn get_user_available(&self, user_address: &str) -> Result<AmountWei> {
        let user = user_arg(user_address)?;
        Ok(AmountWei(
            self.view(IETHPool::getUserAvailableCall { user }).await?,
        ))
    }

    /// Reward accrued and claimable by the user.
    pub async fn get_user_reward(&self, user_address: &str) -> Result<AmountWei> {
        let user = user_arg(user_address)?;
        Ok(AmountWei(self.view(IETHPool::getUserRewardCall { user }).await?))
    }

    pub fn to_display_amount(value: AmountWei) -> AmountEther {
        units::to_display_amount(value)
    }

    async fn view<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let method = C::SIGNATURE;
        let data = Bytes::from(call.abi_encode());
        let params = json!([{ "to": self.contract, "data": data }, "latest"]);
        let result = self
            .transport
            .request("eth_call", params)
            .await
            .map_err(|e| match e {
                TransportError::Unreachable(_) => ReaderError::Network(e),
                other => ReaderError::contract_call(method, other),
            })?;
        let raw: Bytes = serde_json::from_value(result)
            .map_err(|e| ReaderError::contract_call(method, format!("result is not hex data: {e}")))?;
        if raw.is_empty() {
            return Err(ReaderError::contract_call(
                method,
                "empty return data (no contract code at the address?)",
            ));
        }
        C::abi_decode_returns(&raw).map_err(|e| ReaderError::contract_call(method, e))
    }
}

fn user_arg(raw: &str) -> Result<Address> {
    parse_address(raw).map_err(|e| ReaderError::InvalidInput(format!("user {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::fixtures::pool_abi;
    use crate::mock::{unreachable, words_hex, ScriptedTransport};
    use alloy::primitives::{hex, U256};

    const POOL: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const USER: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

    fn descriptor() -> InterfaceDescriptor {
        InterfaceDescriptor::from_value(pool_abi()).unwrap()
    }

    fn reader(t: ScriptedTransport) -> ContractStateReader<ScriptedTransport> {
        ContractStateReader::with_transport(t, POOL, &descriptor()).unwrap()
    }

    fn ether(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    fn calldata(params: &Value) -> String {
        params[0]["data"].as_str().unwrap().to_string()
    }

    #[test]
    fn construction_validates_inputs() {
        let ok = ContractStateReader::new("http://127.0.0.1:8545", POOL, &descriptor()).unwrap();
        assert_eq!(ok.contract(), POOL.parse::<Address>().unwrap());

        for bad in ["", "0x1234", "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"] {
            let err = ContractStateReader::new("http://127.0.0.1:8545", bad, &descriptor())
                .unwrap_err();
            assert!(err.is_configuration(), "{bad}: {err}");
        }
        assert!(ContractStateReader::new("", POOL, &descriptor())
            .unwrap_err()
            .is_configuration());

        let partial = InterfaceDescriptor::from_value(json!([])).unwrap();
        let t = ScriptedTransport::new();
        let err = ContractStateReader::with_transport(&t, POOL, &partial).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(t.call_count(), 0);
    }

    #[test]
    fn built_from_address_book() {
        let book = AddressBook::from_value(json!({ "Proxy": POOL })).unwrap();
        let r =
            ContractStateReader::from_address_book("https://rpc.example.org", &book, &descriptor())
                .unwrap();
        assert_eq!(r.contract(), POOL.parse::<Address>().unwrap());

        let empty = AddressBook::from_value(json!({ "Logic": POOL })).unwrap();
        assert!(
            ContractStateReader::from_address_book("https://rpc.example.org", &empty, &descriptor())
                .unwrap_err()
                .is_configuration()
        );
    }

    #[tokio::test]
    async fn pool_balance_sums_raw_values() {
        let reward = U256::from(123_456_789_000_000_000u128);
        let staked = ether(42) + U256::from(1u8);
        let r = reader(
            ScriptedTransport::new()
                .reply_words(&[reward])
                .reply_words(&[staked]),
        );
        let bal = r.get_pool_balance().await.unwrap();
        assert_eq!(bal.reward, AmountWei(reward));
        assert_eq!(bal.staked, AmountWei(staked));
        assert_eq!(bal.total, AmountWei(reward + staked));
        assert_eq!(
            ContractStateReader::<ScriptedTransport>::to_display_amount(bal.total).to_string(),
            "42.123456789000000001"
        );

        let calls = r.transport().calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(m, p)| m == "eth_call" && p[1] == "latest"));
        assert_eq!(
            calls[0].1[0]["to"].as_str().unwrap().parse::<Address>().unwrap(),
            r.contract()
        );
        assert_eq!(calldata(&calls[0].1), hex::encode_prefixed(IETHPool::RwdCall::SELECTOR));
        assert_eq!(
            calldata(&calls[1].1),
            hex::encode_prefixed(IETHPool::balanceOfCall::SELECTOR)
        );
    }

    #[tokio::test]
    async fn pool_balance_fails_on_revert_or_garbage() {
        let r = reader(ScriptedTransport::new().revert());
        let err = r.get_pool_balance().await.unwrap_err();
        assert!(err.is_contract_call(), "{err}");
        assert_eq!(r.transport().call_count(), 1);

        let r = reader(
            ScriptedTransport::new()
                .reply_words(&[U256::from(1u8)])
                .reply(json!("not hex")),
        );
        assert!(r.get_pool_balance().await.unwrap_err().is_contract_call());

        let r = reader(ScriptedTransport::new().reply(json!("0x")));
        assert!(r.get_pool_balance().await.unwrap_err().is_contract_call());

        // shorter than one word
        let r = reader(ScriptedTransport::new().reply(json!("0x0102")));
        assert!(r.get_pool_balance().await.unwrap_err().is_contract_call());

        let r = reader(
            ScriptedTransport::new().fail(TransportError::Malformed("html page".into())),
        );
        assert!(r.get_pool_balance().await.unwrap_err().is_contract_call());

        let r = reader(ScriptedTransport::new().fail(unreachable()));
        assert!(r.get_pool_balance().await.unwrap_err().is_network());
    }

    #[tokio::test]
    async fn pool_balance_overflow_is_reported() {
        let r = reader(
            ScriptedTransport::new()
                .reply_words(&[U256::MAX])
                .reply_words(&[U256::from(1u8)]),
        );
        let err = r.get_pool_balance().await.unwrap_err();
        assert!(
            matches!(err, ReaderError::ContractCall { method, .. } if method == POOL_SUM),
            "{err}"
        );
        assert!(err.to_string().contains("`Rwd() + balanceOf()`"), "{err}");
        assert_eq!(r.transport().call_count(), 2);
    }

    #[tokio::test]
    async fn user_state_decodes_in_order() {
        let words = [
            U256::from(1000u64),
            U256::ZERO,
            ether(5),
            U256::from(1_700_000_000u64),
            ether(5),
        ];
        let r = reader(ScriptedTransport::new().reply_words(&words));
        let snap = r.get_user_state(USER).await.unwrap();

        assert_eq!(snap.rewardable_weighted_time, U256::from(1000u64));
        assert_eq!(snap.non_rewardable_weighted_time, U256::ZERO);
        assert_eq!(
            snap.total_staked,
            AmountWei::from(5_000_000_000_000_000_000u128)
        );
        assert_eq!(snap.last_checkpoint_timestamp, U256::from(1_700_000_000u64));
        assert_eq!(
            snap.rewardable_staked,
            AmountWei::from(5_000_000_000_000_000_000u128)
        );
        assert_eq!(snap.as_words(), words);
        assert_eq!(snap.last_checkpoint_secs(), Some(1_700_000_000));

        let calls = r.transport().calls();
        let user: Address = USER.parse().unwrap();
        assert_eq!(
            calldata(&calls[0].1),
            hex::encode_prefixed(IETHPool::getUserStateCall { user }.abi_encode())
        );
    }

    #[tokio::test]
    async fn user_state_rejects_short_return() {
        let r = reader(ScriptedTransport::new().reply_words(&[U256::from(1u8); 4]));
        assert!(r.get_user_state(USER).await.unwrap_err().is_contract_call());
    }

    #[tokio::test]
    async fn user_available_and_reward() {
        let r = reader(
            ScriptedTransport::new()
                .reply_words(&[ether(3)])
                .reply_words(&[U256::from(777u64)]),
        );
        assert_eq!(r.get_user_available(USER).await.unwrap(), AmountWei(ether(3)));
        assert_eq!(
            r.get_user_reward(&USER.to_lowercase()).await.unwrap(),
            AmountWei::from(777u128)
        );
        let user: Address = USER.parse().unwrap();
        let calls = r.transport().calls();
        assert_eq!(
            calldata(&calls[0].1),
            hex::encode_prefixed(IETHPool::getUserAvailableCall { user }.abi_encode())
        );
        assert_eq!(
            calldata(&calls[1].1),
            hex::encode_prefixed(IETHPool::getUserRewardCall { user }.abi_encode())
        );
    }

    #[tokio::test]
    async fn invalid_user_never_hits_the_wire() {
        let r = reader(ScriptedTransport::new().reply(words_hex(&[U256::ZERO; 5])));
        for bad in [
            "",
            "0x123",
            "fB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d3591",
            "0xfb6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        ] {
            assert!(r.get_user_state(bad).await.unwrap_err().is_invalid_input(), "{bad}");
            assert!(r.get_user_available(bad).await.unwrap_err().is_invalid_input());
            assert!(r.get_user_reward(bad).await.unwrap_err().is_invalid_input());
        }
        assert_eq!(r.transport().call_count(), 0);
    }

    #[tokio::test]
    async fn connectivity_probe() {
        let r = reader(
            ScriptedTransport::new()
                .reply(json!(true))
                .reply(json!(false))
                .fail(unreachable())
                .fail(TransportError::Rpc {
                    code: -32601,
                    message: "method not found".into(),
                    data: None,
                })
                .reply(json!("0x1")),
        );
        assert!(r.check_connectivity().await.unwrap());
        assert!(!r.check_connectivity().await.unwrap());
        assert!(r.check_connectivity().await.unwrap_err().is_network());
        assert!(r.check_connectivity().await.unwrap_err().is_network());
        assert!(r.check_connectivity().await.unwrap_err().is_network());
        let calls = r.transport().calls();
        assert!(calls.iter().all(|(m, p)| m == "net_listening" && p == &json!([])));
    }

    #[tokio::test]
    async fn reader_is_reusable_across_calls() {
        let mut t = ScriptedTransport::new();
        for i in 1..=3u64 {
            t = t.reply_words(&[ether(i)]).reply_words(&[ether(10 * i)]);
        }
        let r = reader(t);
        for i in 1..=3u64 {
            let bal = r.get_pool_balance().await.unwrap();
            assert_eq!(bal.total, AmountWei(ether(11 * i)));
        }
        assert_eq!(r.transport().call_count(), 6);
    }

    #[tokio::test]
    async fn unreachable_http_endpoint() {
        let r = ContractStateReader::new("http://127.0.0.1:1", POOL, &descriptor()).unwrap();
        assert!(r.check_connectivity().await.unwrap_err().is_network());
        assert!(r.get_pool_balance().await.unwrap_err().is_network());
    }
}
