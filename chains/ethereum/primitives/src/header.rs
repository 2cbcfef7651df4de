use crate::{
    bytes::Bytes,
    eth_hash::{Address, H256, H64},
    eth_uint::{U256, U64},
};
use ethbloom::Bloom;

#[cfg(feature = "with-crypto")]
use crate::crypto::{Crypto, DefaultCrypto};

/// Block header at the Prague fork: every field the protocol requires is present
/// unconditionally (there is no earlier-fork optionality to model at this level).
#[derive(Clone, Default, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "with-codec",
    derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Header {
    pub parent_hash: H256,
    pub ommers_hash: H256,
    pub coinbase: Address,
    pub state_root: H256,
    pub transactions_root: H256,
    pub receipt_root: H256,
    pub bloom: Bloom,
    pub difficulty: U256,
    pub number: U64,
    pub gas_limit: U64,
    pub gas_used: U64,
    pub timestamp: U64,
    /// At most 32 bytes; enforced by [`crate::constants::MAX_EXTRA_DATA_BYTES`] at validation
    /// time, not by this type.
    pub extra_data: Bytes,
    pub prev_randao: H256,
    pub nonce: H64,
    pub base_fee_per_gas: U256,
    pub withdrawals_root: H256,
    pub blob_gas_used: U64,
    pub excess_blob_gas: U64,
    pub parent_beacon_block_root: H256,
    pub requests_hash: H256,
}

impl rlp::Encodable for Header {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        s.begin_list(21);
        s.append(&self.parent_hash);
        s.append(&self.ommers_hash);
        s.append(&self.coinbase);
        s.append(&self.state_root);
        s.append(&self.transactions_root);
        s.append(&self.receipt_root);
        s.append(&self.bloom);
        s.append(&self.difficulty);
        s.append(&self.number);
        s.append(&self.gas_limit);
        s.append(&self.gas_used);
        s.append(&self.timestamp);
        s.append(&self.extra_data.as_ref());
        s.append(&self.prev_randao);
        s.append(&self.nonce);
        s.append(&self.base_fee_per_gas);
        s.append(&self.withdrawals_root);
        s.append(&self.blob_gas_used);
        s.append(&self.excess_blob_gas);
        s.append(&self.parent_beacon_block_root);
        s.append(&self.requests_hash);
    }
}

impl rlp::Decodable for Header {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        if rlp.item_count()? != 21 {
            return Err(rlp::DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            parent_hash: rlp.val_at(0)?,
            ommers_hash: rlp.val_at(1)?,
            coinbase: rlp.val_at(2)?,
            state_root: rlp.val_at(3)?,
            transactions_root: rlp.val_at(4)?,
            receipt_root: rlp.val_at(5)?,
            bloom: rlp.val_at(6)?,
            difficulty: rlp.val_at(7)?,
            number: rlp.val_at(8)?,
            gas_limit: rlp.val_at(9)?,
            gas_used: rlp.val_at(10)?,
            timestamp: rlp.val_at(11)?,
            extra_data: Bytes::from(rlp.val_at::<Vec<u8>>(12)?),
            prev_randao: rlp.val_at(13)?,
            nonce: rlp.val_at(14)?,
            base_fee_per_gas: rlp.val_at(15)?,
            withdrawals_root: rlp.val_at(16)?,
            blob_gas_used: rlp.val_at(17)?,
            excess_blob_gas: rlp.val_at(18)?,
            parent_beacon_block_root: rlp.val_at(19)?,
            requests_hash: rlp.val_at(20)?,
        })
    }
}

impl Header {
    /// `keccak256(rlp(self))`. The hash every child header's `parent_hash` must match.
    #[cfg(feature = "with-crypto")]
    #[must_use]
    pub fn hash(&self) -> H256 {
        DefaultCrypto::keccak256(rlp::encode(self))
    }
}
