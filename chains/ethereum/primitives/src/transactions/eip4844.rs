#![allow(clippy::missing_errors_doc)]

use super::{access_list::AccessList, signature::Signature};
use crate::{
    bytes::Bytes,
    eth_hash::{Address, H256},
    eth_uint::U256,
};

#[cfg(feature = "with-rlp")]
use crate::rlp_utils::{RlpDecodableTransaction, RlpEncodableTransaction, RlpExt, RlpStreamExt};

/// Transactions with type 0x3 carry blobs, introduced in EIP-4844. Unlike EIP-1559 transactions,
/// blob transactions must target a concrete contract (`to` is mandatory) and commit to a
/// non-empty list of KZG blob versioned hashes, each paid for out of a separate blob gas market
/// priced by `max_fee_per_blob_gas`.
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
pub struct Eip4844Transaction {
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    #[cfg_attr(feature = "with-serde", serde(rename = "gas"))]
    pub gas_limit: u64,
    pub to: Address,
    pub value: U256,
    #[cfg_attr(feature = "with-serde", serde(default, skip_serializing_if = "Bytes::is_empty"))]
    pub data: Bytes,
    #[cfg_attr(
        feature = "with-serde",
        serde(default, skip_serializing_if = "AccessList::is_empty")
    )]
    pub access_list: AccessList,
    pub max_fee_per_blob_gas: U256,
    pub blob_versioned_hashes: Vec<H256>,
}

#[cfg(feature = "with-rlp")]
impl RlpDecodableTransaction for Eip4844Transaction {
    fn rlp_decode(
        rlp: &rlp::Rlp,
        decode_signature: bool,
    ) -> Result<(Self, Option<Signature>), rlp::DecoderError> {
        let first = *rlp.data()?.first().ok_or(rlp::DecoderError::RlpIsTooShort)?;
        if first != 0x03 {
            return Err(rlp::DecoderError::Custom("invalid transaction type"));
        }

        let rest = rlp::Rlp::new(
            rlp.as_raw()
                .get(1..)
                .ok_or(rlp::DecoderError::Custom("missing transaction payload"))?,
        );

        let is_signed = match rest.item_count()? {
            11 => false,
            14 => true,
            _ => return Err(rlp::DecoderError::RlpIncorrectListLen),
        };

        let tx = Self {
            chain_id: rest.val_at(0usize)?,
            nonce: rest.val_at(1usize)?,
            max_priority_fee_per_gas: rest.val_at(2usize)?,
            max_fee_per_gas: rest.val_at(3usize)?,
            gas_limit: rest.val_at(4usize)?,
            to: rest.val_at(5usize)?,
            value: rest.val_at(6usize)?,
            data: rest.val_at(7usize)?,
            access_list: rest.val_at(8usize)?,
            max_fee_per_blob_gas: rest.val_at(9usize)?,
            blob_versioned_hashes: rest.list_at(10usize)?,
        };

        let signature = if is_signed && decode_signature {
            Some(Signature {
                v: rest.val_at(11usize)?,
                r: rest.val_at(12usize)?,
                s: rest.val_at(13usize)?,
            })
        } else {
            None
        };

        Ok((tx, signature))
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Decodable for Eip4844Transaction {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        <Self as RlpDecodableTransaction>::rlp_decode_unsigned(rlp)
    }
}

#[cfg(feature = "with-rlp")]
impl RlpEncodableTransaction for Eip4844Transaction {
    fn rlp_append(&self, stream: &mut rlp::RlpStream, signature: Option<&Signature>) {
        stream.append_internal(&3u8);
        let mut num_fields = 11;
        if signature.is_some() {
            num_fields += 3;
        }

        stream
            .begin_list(num_fields)
            .append(&self.chain_id)
            .append(&self.nonce)
            .append(&self.max_priority_fee_per_gas)
            .append(&self.max_fee_per_gas)
            .append(&self.gas_limit)
            .append(&self.to)
            .append(&self.value)
            .append(&self.data)
            .append(&self.access_list)
            .append(&self.max_fee_per_blob_gas)
            .append_list(&self.blob_versioned_hashes);

        if let Some(sig) = signature {
            let v = sig.v.y_parity();
            stream.append(&v).append(&sig.r).append(&sig.s);
        }
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Encodable for Eip4844Transaction {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        RlpEncodableTransaction::rlp_append(self, s, None);
    }
}

#[cfg(all(feature = "with-rlp", feature = "with-crypto"))]
impl super::TransactionT for Eip4844Transaction {
    type ExtraFields = ();

    fn encode(&self, signature: Option<&Signature>) -> Bytes {
        let bytes = signature.map_or_else(
            || RlpEncodableTransaction::rlp_unsigned(self),
            |signature| RlpEncodableTransaction::rlp_signed(self, signature),
        );
        Bytes(bytes)
    }

    fn sighash(&self) -> H256 {
        use crate::crypto::{Crypto, DefaultCrypto};
        DefaultCrypto::keccak256(RlpEncodableTransaction::rlp_unsigned(self))
    }

    fn compute_tx_hash(&self, signature: &Signature) -> H256 {
        use crate::crypto::{Crypto, DefaultCrypto};
        DefaultCrypto::keccak256(RlpEncodableTransaction::rlp_signed(self, signature))
    }

    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }

    fn nonce(&self) -> u64 {
        self.nonce
    }

    fn gas_price(&self) -> super::GasPrice {
        super::GasPrice::Eip1559 {
            max_priority_fee_per_gas: self.max_priority_fee_per_gas,
            max_fee_per_gas: self.max_fee_per_gas,
        }
    }

    fn gas_limit(&self) -> U256 {
        self.gas_limit.into()
    }

    fn to(&self) -> Option<Address> {
        Some(self.to)
    }

    fn value(&self) -> U256 {
        self.value
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn access_list(&self) -> Option<&AccessList> {
        Some(&self.access_list)
    }

    fn max_fee_per_blob_gas(&self) -> Option<U256> {
        Some(self.max_fee_per_blob_gas)
    }

    fn blob_versioned_hashes(&self) -> &[H256] {
        &self.blob_versioned_hashes
    }

    fn transaction_type(&self) -> Option<u8> {
        Some(0x03)
    }

    fn extra_fields(&self) -> Option<Self::ExtraFields> {
        None
    }
}
