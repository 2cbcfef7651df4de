#![allow(clippy::missing_errors_doc)]

use super::{access_list::AccessList, signature::Signature};
use crate::{
    bytes::Bytes,
    eth_hash::{Address, H256},
    eth_uint::U256,
};

#[cfg(feature = "with-rlp")]
use crate::rlp_utils::{RlpDecodableTransaction, RlpEncodableTransaction};

/// An EIP-7702 authorization tuple: a signed statement by `signer` (recovered from `y_parity`,
/// `r`, `s`) that the code at `address` should be installed as a delegation designator on the
/// signer's own account for the given `chain_id` (or any chain, if zero) at `nonce`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "with-rlp", derive(rlp_derive::RlpEncodable, rlp_derive::RlpDecodable))]
#[cfg_attr(
    feature = "with-codec",
    derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Authorization {
    pub chain_id: u64,
    pub address: Address,
    pub nonce: u64,
    pub y_parity: u8,
    pub r: U256,
    pub s: U256,
}

impl Authorization {
    /// The message hash that `y_parity`/`r`/`s` sign: `keccak256(0x05 ‖ rlp([chain_id, address, nonce]))`.
    #[cfg(all(feature = "with-rlp", feature = "with-crypto"))]
    pub fn signing_hash(&self) -> H256 {
        use crate::crypto::{Crypto, DefaultCrypto};
        let mut stream = rlp::RlpStream::new();
        stream.begin_list(3).append(&self.chain_id).append(&self.address).append(&self.nonce);
        let mut bytes = Vec::with_capacity(1 + stream.as_raw().len());
        bytes.push(0x05);
        bytes.extend_from_slice(stream.as_raw());
        DefaultCrypto::keccak256(bytes)
    }

    /// Recover the account that produced this authorization, per EIP-7702.
    #[cfg(all(feature = "with-rlp", feature = "with-crypto"))]
    pub fn recover_authority<C: crate::crypto::Crypto>(&self) -> Result<Address, C::Error> {
        let sig = Signature {
            v: super::signature::RecoveryId::new(u64::from(self.y_parity)),
            r: self.r,
            s: self.s,
        };
        C::secp256k1_ecdsa_recover(&sig, self.signing_hash())
    }
}

/// Transactions with type 0x4 carry a list of [`Authorization`] tuples, introduced in EIP-7702.
/// Each authorization temporarily installs a delegation designator on the authorizing EOA,
/// pointing it at `address`'s code for the duration of the transaction. Like blob transactions,
/// set-code transactions must target a concrete recipient.
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
pub struct Eip7702Transaction {
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
    pub authorization_list: Vec<Authorization>,
}

#[cfg(feature = "with-rlp")]
impl RlpDecodableTransaction for Eip7702Transaction {
    fn rlp_decode(
        rlp: &rlp::Rlp,
        decode_signature: bool,
    ) -> Result<(Self, Option<Signature>), rlp::DecoderError> {
        let first = *rlp.data()?.first().ok_or(rlp::DecoderError::RlpIsTooShort)?;
        if first != 0x04 {
            return Err(rlp::DecoderError::Custom("invalid transaction type"));
        }

        let rest = rlp::Rlp::new(
            rlp.as_raw()
                .get(1..)
                .ok_or(rlp::DecoderError::Custom("missing transaction payload"))?,
        );

        let is_signed = match rest.item_count()? {
            10 => false,
            13 => true,
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
            authorization_list: rest.list_at(9usize)?,
        };

        let signature = if is_signed && decode_signature {
            Some(Signature {
                v: rest.val_at(10usize)?,
                r: rest.val_at(11usize)?,
                s: rest.val_at(12usize)?,
            })
        } else {
            None
        };

        Ok((tx, signature))
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Decodable for Eip7702Transaction {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        <Self as RlpDecodableTransaction>::rlp_decode_unsigned(rlp)
    }
}

#[cfg(feature = "with-rlp")]
impl RlpEncodableTransaction for Eip7702Transaction {
    fn rlp_append(&self, stream: &mut rlp::RlpStream, signature: Option<&Signature>) {
        stream.append_internal(&4u8);
        let mut num_fields = 10;
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
            .append_list(&self.authorization_list);

        if let Some(sig) = signature {
            let v = sig.v.y_parity();
            stream.append(&v).append(&sig.r).append(&sig.s);
        }
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Encodable for Eip7702Transaction {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        RlpEncodableTransaction::rlp_append(self, s, None);
    }
}

#[cfg(all(feature = "with-rlp", feature = "with-crypto"))]
impl super::TransactionT for Eip7702Transaction {
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

    fn authorization_list(&self) -> &[Authorization] {
        &self.authorization_list
    }

    fn transaction_type(&self) -> Option<u8> {
        Some(0x04)
    }

    fn extra_fields(&self) -> Option<Self::ExtraFields> {
        None
    }
}

#[cfg(all(test, feature = "with-rlp", feature = "with-crypto"))]
mod tests {
    use super::{Authorization, Eip7702Transaction};
    use crate::{
        bytes::Bytes,
        rlp_utils::{RlpDecodableTransaction, RlpEncodableTransaction},
        transactions::{
            access_list::AccessList,
            signature::{RecoveryId, Signature},
            TransactionT,
        },
    };
    use hex_literal::hex;

    fn build_setcode_tx() -> (Eip7702Transaction, Signature) {
        let tx = Eip7702Transaction {
            chain_id: 1,
            nonce: 4,
            max_priority_fee_per_gas: 1_000_000_000u64.into(),
            max_fee_per_gas: 20_000_000_000u64.into(),
            gas_limit: 100_000,
            to: hex!("3fc91a3afd70395cd496c647d5a6cc9d4b2b7fad").into(),
            value: 0.into(),
            data: Bytes::default(),
            access_list: AccessList::default(),
            authorization_list: vec![Authorization {
                chain_id: 1,
                address: hex!("1111111111111111111111111111111111111111").into(),
                nonce: 0,
                y_parity: 1,
                r: hex!("1111111111111111111111111111111111111111111111111111111111111111").into(),
                s: hex!("2222222222222222222222222222222222222222222222222222222222222222").into(),
            }],
        };
        let signature = Signature {
            v: RecoveryId::new(0x00),
            r: hex!("5fe8eb06ac27f44de3e8d1c7214f750b9fc8291ab63d71ea6a4456cfd328deb9").into(),
            s: hex!("41425cc35a5ed1c922c898cb7fda5cf3b165b4792ada812700bf55cbc21a75a1").into(),
        };
        (tx, signature)
    }

    #[test]
    fn rlp_round_trip_unsigned() {
        let tx = build_setcode_tx().0;
        let encoded = Bytes::from(tx.rlp_unsigned());
        let decoded = {
            let rlp = rlp::Rlp::new(encoded.as_ref());
            Eip7702Transaction::rlp_decode_unsigned(&rlp).unwrap()
        };
        assert_eq!(tx, decoded);
    }

    #[test]
    fn rlp_round_trip_signed() {
        let (tx, sig) = build_setcode_tx();
        let encoded = Bytes::from(tx.rlp_signed(&sig));
        let (decoded_tx, decoded_sig) = {
            let rlp = rlp::Rlp::new(encoded.as_ref());
            Eip7702Transaction::rlp_decode_signed(&rlp).unwrap()
        };
        assert_eq!(tx, decoded_tx);
        assert_eq!(Some(sig), decoded_sig);
    }

    #[test]
    fn transaction_type_is_four() {
        let tx = build_setcode_tx().0;
        assert_eq!(Some(0x04), tx.transaction_type());
        assert_eq!(1, tx.authorization_list().len());
    }
}
