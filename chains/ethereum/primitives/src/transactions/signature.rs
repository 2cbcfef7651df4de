use crate::eth_uint::U256;

/// The `v` component of an ECDSA signature.
///
/// Ethereum overloads this single field across the life of the protocol: legacy
/// pre-[EIP-155](https://eips.ethereum.org/EIPS/eip-155) transactions carry `27`/`28`, legacy
/// EIP-155 transactions carry `35 + 2*chain_id + y_parity`, and every typed transaction
/// (EIP-2930 onward) carries the bare `y_parity` bit (`0`/`1`). [`RecoveryId`] stores the raw
/// wire value unchanged and exposes [`y_parity`](Self::y_parity) / [`chain_id`](Self::chain_id)
/// to recover the two pieces of information consensus code actually needs.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
#[cfg_attr(
    feature = "with-codec",
    derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(transparent))]
pub struct RecoveryId(u64);

impl RecoveryId {
    #[must_use]
    pub const fn new(v: u64) -> Self {
        Self(v)
    }

    /// The raw value as it appears on the wire.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// The secp256k1 recovery id (`0` or `1`), regardless of which `v` encoding was used.
    #[must_use]
    pub const fn y_parity(self) -> u8 {
        let v = self.0;
        if v >= 35 {
            ((v - 35) % 2) as u8
        } else if v >= 27 {
            ((v - 27) % 2) as u8
        } else {
            (v % 2) as u8
        }
    }

    /// The chain id encoded in an EIP-155 legacy `v`, if this is one.
    #[must_use]
    pub const fn chain_id(self) -> Option<u64> {
        if self.0 >= 35 {
            Some((self.0 - 35) / 2)
        } else {
            None
        }
    }

    /// Re-encode this recovery id as an EIP-155 `v` for the given chain id.
    #[must_use]
    pub const fn as_eip155(self, chain_id: u64) -> Self {
        Self(35 + 2 * chain_id + self.y_parity() as u64)
    }
}

impl From<u64> for RecoveryId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl From<i32> for RecoveryId {
    fn from(v: i32) -> Self {
        Self(v as u64)
    }
}

impl From<RecoveryId> for u64 {
    fn from(v: RecoveryId) -> Self {
        v.0
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Encodable for RecoveryId {
    fn rlp_append(&self, s: &mut rlp::RlpStream) {
        self.0.rlp_append(s);
    }
}

#[cfg(feature = "with-rlp")]
impl rlp::Decodable for RecoveryId {
    fn decode(rlp: &rlp::Rlp) -> Result<Self, rlp::DecoderError> {
        <u64 as rlp::Decodable>::decode(rlp).map(Self)
    }
}

/// An ECDSA signature over a transaction's signing hash, in the `(v, r, s)` shape every
/// Ethereum transaction type carries.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
#[cfg_attr(
    feature = "with-codec",
    derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Signature {
    pub v: RecoveryId,
    pub r: U256,
    pub s: U256,
}

impl Signature {
    /// Packs this signature into the 65-byte `r || s || recovery_id` layout expected by
    /// secp256k1 recovery implementations.
    pub fn to_raw_signature(&self, out: &mut [u8; 65]) {
        self.r.to_big_endian(&mut out[0..32]);
        self.s.to_big_endian(&mut out[32..64]);
        out[64] = self.v.y_parity();
    }
}

#[cfg(all(test, feature = "with-rlp"))]
mod tests {
    use super::RecoveryId;

    #[test]
    fn y_parity_covers_every_v_encoding() {
        assert_eq!(0, RecoveryId::new(0).y_parity());
        assert_eq!(1, RecoveryId::new(1).y_parity());
        assert_eq!(0, RecoveryId::new(27).y_parity());
        assert_eq!(1, RecoveryId::new(28).y_parity());
        assert_eq!(0, RecoveryId::new(35 + 2).y_parity());
        assert_eq!(1, RecoveryId::new(36 + 2).y_parity());
    }

    #[test]
    fn chain_id_only_set_for_eip155() {
        assert_eq!(None, RecoveryId::new(27).chain_id());
        assert_eq!(None, RecoveryId::new(28).chain_id());
        assert_eq!(Some(1), RecoveryId::new(37).chain_id());
        assert_eq!(Some(1), RecoveryId::new(38).chain_id());
    }
}
