use crate::{eth_hash::Address, eth_uint::U64};

/// A validator withdrawal, credited to `address` after all transactions in a block.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, Hash)]
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
pub struct Withdrawal {
    pub index: U64,
    pub validator_index: U64,
    pub address: Address,
    /// Amount in Gwei, as carried on the wire; callers convert to Wei before crediting balance.
    pub amount: U64,
}

#[cfg(all(test, feature = "with-rlp"))]
mod tests {
    use super::Withdrawal;

    #[test]
    fn rlp_round_trip() {
        let withdrawal = Withdrawal {
            index: 7.into(),
            validator_index: 42.into(),
            address: [0x11; 20].into(),
            amount: 1_000_000_000u64.into(),
        };
        let encoded = rlp::encode(&withdrawal);
        let decoded = rlp::decode::<Withdrawal>(&encoded).unwrap();
        assert_eq!(withdrawal, decoded);
    }
}
