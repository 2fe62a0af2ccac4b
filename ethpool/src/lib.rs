//! Read-only access to a deployed ETHPool staking contract over JSON-RPC.

pub mod abi;
pub mod addresses;
pub mod error;
pub mod reader;
pub mod state;
pub mod transport;
pub mod units;

#[cfg(test)]
mod mock;

pub use addresses::{parse_address, AddressBook, AddressError, UserReference, PROXY_ROLE};
pub use abi::InterfaceDescriptor;
pub use error::ReaderError;
pub use reader::ContractStateReader;
pub use state::{PoolBalance, UserStateSnapshot};
pub use transport::{HttpTransport, RpcTransport, TransportError};
pub use units::{to_display_amount, AmountEther, AmountWei};
