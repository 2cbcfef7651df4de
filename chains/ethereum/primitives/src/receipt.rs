use crate::{eth_uint::U64, log::Log};
use alloc::vec::Vec;
use ethbloom::Bloom;

/// The fields every receipt type carries, regardless of the transaction type it belongs to.
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
pub struct ReceiptPayload {
    pub succeeded: bool,
    pub cumulative_gas_used: U64,
    pub bloom: Bloom,
    pub logs: Vec<Log>,
}

#[cfg(feature = "with-rlp")]
impl rlp::Encodable for ReceiptPayload {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        s.begin_list(4);
        s.append(&u8::from(self.succeeded));
        s.append(&self.cumulative_gas_used);
        s.append(&self.bloom);
        s.append_list(&self.logs);
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Decodable for ReceiptPayload {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        if rlp.item_count()? != 4 {
            return Err(rlp::DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            succeeded: rlp.val_at::<u8>(0)? != 0,
            cumulative_gas_used: rlp.val_at(1)?,
            bloom: rlp.val_at(2)?,
            logs: rlp.list_at(3)?,
        })
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Encodable for Log {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        s.begin_list(3);
        s.append(&self.address);
        s.append_list(&self.topics);
        s.append(&self.data.as_ref());
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Decodable for Log {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        if rlp.item_count()? != 3 {
            return Err(rlp::DecoderError::RlpIncorrectListLen);
        }
        Ok(Self {
            address: rlp.val_at(0)?,
            topics: rlp.list_at(1)?,
            data: crate::bytes::Bytes::from(rlp.val_at::<Vec<u8>>(2)?),
            ..Self::default()
        })
    }
}

/// A transaction receipt, keyed by the same [EIP-2718](https://eips.ethereum.org/EIPS/eip-2718)
/// type byte as the transaction it belongs to. The wire encoding of every non-legacy variant is
/// `type_byte || rlp(payload)`, mirroring [`crate::transactions::TypedTransaction`].
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "with-codec",
    derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type")
)]
pub enum Receipt {
    #[cfg_attr(feature = "with-serde", serde(rename = "0x00"))]
    Legacy(ReceiptPayload),
    #[cfg_attr(feature = "with-serde", serde(rename = "0x01"))]
    Eip2930(ReceiptPayload),
    #[cfg_attr(feature = "with-serde", serde(rename = "0x02"))]
    Eip1559(ReceiptPayload),
    #[cfg_attr(feature = "with-serde", serde(rename = "0x03"))]
    Eip4844(ReceiptPayload),
    #[cfg_attr(feature = "with-serde", serde(rename = "0x04"))]
    Eip7702(ReceiptPayload),
}

impl Receipt {
    #[must_use]
    pub const fn transaction_type(&self) -> u8 {
        match self {
            Self::Legacy(_) => 0x00,
            Self::Eip2930(_) => 0x01,
            Self::Eip1559(_) => 0x02,
            Self::Eip4844(_) => 0x03,
            Self::Eip7702(_) => 0x04,
        }
    }

    #[must_use]
    pub const fn payload(&self) -> &ReceiptPayload {
        match self {
            Self::Legacy(p)
            | Self::Eip2930(p)
            | Self::Eip1559(p)
            | Self::Eip4844(p)
            | Self::Eip7702(p) => p,
        }
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Encodable for Receipt {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        match self {
            Self::Legacy(payload) => payload.rlp_append(s),
            Self::Eip2930(payload) => {
                s.append_internal(&1u8);
                payload.rlp_append(s);
            },
            Self::Eip1559(payload) => {
                s.append_internal(&2u8);
                payload.rlp_append(s);
            },
            Self::Eip4844(payload) => {
                s.append_internal(&3u8);
                payload.rlp_append(s);
            },
            Self::Eip7702(payload) => {
                s.append_internal(&4u8);
                payload.rlp_append(s);
            },
        }
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Decodable for Receipt {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        let first = *rlp.data()?.first().ok_or(rlp::DecoderError::RlpIsTooShort)?;
        match first {
            0x01 => Ok(Self::Eip2930(ReceiptPayload::decode(rlp)?)),
            0x02 => Ok(Self::Eip1559(ReceiptPayload::decode(rlp)?)),
            0x03 => Ok(Self::Eip4844(ReceiptPayload::decode(rlp)?)),
            0x04 => Ok(Self::Eip7702(ReceiptPayload::decode(rlp)?)),
            v if v >= 0xc0 => Ok(Self::Legacy(ReceiptPayload::decode(rlp)?)),
            _ => Err(rlp::DecoderError::Custom("unknown receipt type")),
        }
    }
}

#[cfg(all(test, feature = "with-rlp"))]
mod tests {
    use super::{Receipt, ReceiptPayload};

    #[test]
    fn legacy_rlp_round_trip() {
        let receipt = Receipt::Legacy(ReceiptPayload {
            succeeded: true,
            cumulative_gas_used: 21000u64.into(),
            ..ReceiptPayload::default()
        });
        let encoded = rlp::encode(&receipt);
        let decoded = rlp::decode::<Receipt>(&encoded).unwrap();
        assert_eq!(receipt, decoded);
    }

    #[test]
    fn typed_rlp_round_trip_preserves_type_byte() {
        let receipt = Receipt::Eip1559(ReceiptPayload {
            succeeded: true,
            cumulative_gas_used: 50_000u64.into(),
            ..ReceiptPayload::default()
        });
        let encoded = rlp::encode(&receipt);
        assert_eq!(encoded[0], 0x02);
        let decoded = rlp::decode::<Receipt>(&encoded).unwrap();
        assert_eq!(receipt, decoded);
    }
}
