pub mod access_list;
pub mod eip1559;
pub mod eip2930;
pub mod eip4844;
pub mod eip7702;
pub mod legacy;
pub mod signature;
pub mod signed_transaction;
pub mod typed_transaction;

use crate::{
    bytes::Bytes,
    eth_hash::{Address, H256},
    eth_uint::U256,
};
pub use access_list::AccessList;
pub use eip1559::Eip1559Transaction;
pub use eip2930::Eip2930Transaction;
pub use eip4844::Eip4844Transaction;
pub use eip7702::{Authorization, Eip7702Transaction};
pub use legacy::LegacyTransaction;
pub use signature::Signature;
pub use signed_transaction::SignedTransaction;
pub use typed_transaction::TypedTransaction;

/// A fully signed transaction of any type, keyed by its computed hash.
pub type Transaction = SignedTransaction<TypedTransaction>;

/// The fee-market shape a transaction was priced under, used by admission/execution to compute
/// the effective gas price without re-matching on the concrete transaction type.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "with-codec",
    derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum GasPrice {
    Legacy(U256),
    Eip1559 { max_priority_fee_per_gas: U256, max_fee_per_gas: U256 },
}

impl Default for GasPrice {
    fn default() -> Self {
        Self::Legacy(U256::zero())
    }
}

/// Common surface every transaction variant (typed or legacy) exposes to the state-transition
/// core. `gas_limit` returns a [`U256`] rather than a `u64` because the fee/gas arithmetic in
/// this workspace is carried out in [`U256`] throughout (see `rosetta-ethereum-stf::fee`).
pub trait TransactionT {
    type ExtraFields: Send + Sync + Clone + PartialEq + Eq;

    /// Encode the transaction, optionally attaching a signature.
    fn encode(&self, signature: Option<&Signature>) -> Bytes;

    /// The hash of the transaction without signature; this is what gets signed.
    fn sighash(&self) -> H256;

    /// Compute the tx-hash using the provided signature.
    fn compute_tx_hash(&self, signature: &Signature) -> H256;

    /// Chain id; only `None` for legacy transactions that predate EIP-155.
    fn chain_id(&self) -> Option<u64>;
    fn nonce(&self) -> u64;
    fn gas_price(&self) -> GasPrice;
    fn gas_limit(&self) -> U256;
    fn to(&self) -> Option<Address>;
    fn value(&self) -> U256;
    fn data(&self) -> &[u8];

    /// EIP-2930 access list, if this transaction type carries one.
    fn access_list(&self) -> Option<&AccessList>;
    /// EIP-4844 max fee per blob gas, for blob transactions only.
    fn max_fee_per_blob_gas(&self) -> Option<U256> {
        None
    }
    /// EIP-4844 versioned hashes of the blobs this transaction commits to.
    fn blob_versioned_hashes(&self) -> &[H256] {
        &[]
    }
    /// EIP-7702 authorization list, for set-code transactions only.
    fn authorization_list(&self) -> &[Authorization] {
        &[]
    }
    /// EIP-2718 transaction type.
    fn transaction_type(&self) -> Option<u8>;
    fn extra_fields(&self) -> Option<Self::ExtraFields>;
}

pub trait SignedTransactionT: TransactionT {
    fn tx_hash(&self) -> H256;
    fn signature(&self) -> Signature;
    fn encode_signed(&self) -> Bytes;
}
