#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bytes;
pub mod constants;
pub mod crypto;
mod eth_hash;
mod eth_uint;
pub mod header;
mod log;
pub mod receipt;
#[cfg(feature = "with-rlp")]
pub mod rlp_utils;
#[cfg(feature = "with-serde")]
mod serde_utils;
pub mod transactions;
pub mod withdrawal;

pub use bytes::Bytes;
pub use eth_hash::{Address, Public, Secret, TxHash, H128, H256, H384, H512, H520, H64};
pub use eth_uint::{U128, U256, U512, U64};
pub use ethbloom::{Bloom, BloomRef, Input as BloomInput};
pub use header::Header;
pub use log::Log;
pub use receipt::Receipt;
pub use transactions::{
    access_list::{AccessList, AccessListItem, AccessListWithGasUsed},
    eip7702::Authorization,
    signed_transaction::SignedTransaction,
    typed_transaction::TypedTransaction,
};
pub use withdrawal::Withdrawal;
