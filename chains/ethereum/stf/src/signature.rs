//! ECDSA parameter validation and sender recovery (C2).

use crate::error::SignatureError;
use rosetta_ethereum_primitives::{
    crypto::{Crypto, DefaultCrypto},
    transactions::{signature::Signature, SignedTransactionT, TransactionT},
    Address, U256,
};

/// The secp256k1 curve order.
pub const SECP256K1N: U256 = U256([
    0xbfd2_5e8c_d036_4141,
    0xbaae_dce6_af48_a03b,
    0xffff_ffff_ffff_fffe,
    0xffff_ffff_ffff_ffff,
]);

/// Half the curve order; EIP-2 caps `s` at this to forbid signature malleability.
pub const SECP256K1N_HALF: U256 = U256([
    0xdfe9_2f46_681b_20a0,
    0x5d57_6e73_57a4_501d,
    0xffff_ffff_ffff_ffff,
    0x7fff_ffff_ffff_ffff,
]);

/// Checks `0 < r < SECP256K1N` and `0 < s <= SECP256K1N / 2`, the bounds every transaction
/// signature (and EIP-7702 authorization) must satisfy regardless of its `v`/`y_parity` encoding.
pub fn validate_signature_params(r: U256, s: U256) -> Result<(), SignatureError> {
    if r.is_zero() || r >= SECP256K1N {
        return Err(SignatureError::InvalidR);
    }
    if s.is_zero() || s > SECP256K1N_HALF {
        return Err(SignatureError::InvalidS);
    }
    Ok(())
}

/// Validates a legacy transaction's `v`: either the pre-EIP-155 `27`/`28`, or a valid EIP-155
/// encoding `35 + 2*chain_id + y_parity`.
pub fn validate_legacy_v(v: u64, expected_chain_id: Option<u64>) -> Result<(), SignatureError> {
    if v == 27 || v == 28 {
        return Ok(());
    }
    if v >= 35 {
        let chain_id = (v - 35) / 2;
        if expected_chain_id.is_none_or(|expected| expected == chain_id) {
            return Ok(());
        }
    }
    Err(SignatureError::InvalidLegacyV(v))
}

/// Recovers the sending account of a signed transaction, validating the signature's `r`/`s`
/// bounds first.
pub fn recover_sender<T>(tx: &T) -> Result<Address, SignatureError>
where
    T: SignedTransactionT + TransactionT,
{
    let signature: Signature = tx.signature();
    validate_signature_params(signature.r, signature.s)?;
    if tx.chain_id().is_none() {
        validate_legacy_v(signature.v.as_u64(), None)?;
    }
    DefaultCrypto::secp256k1_ecdsa_recover(&signature, tx.sighash())
        .map_err(|_| SignatureError::RecoveryFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_r_and_s() {
        assert!(validate_signature_params(U256::zero(), U256::one()).is_err());
        assert!(validate_signature_params(U256::one(), U256::zero()).is_err());
    }

    #[test]
    fn rejects_s_above_half_curve_order() {
        assert!(validate_signature_params(U256::one(), SECP256K1N_HALF).is_ok());
        assert!(validate_signature_params(U256::one(), SECP256K1N_HALF + U256::one()).is_err());
    }

    #[test]
    fn rejects_r_at_or_above_curve_order() {
        assert!(validate_signature_params(SECP256K1N - U256::one(), U256::one()).is_ok());
        assert!(validate_signature_params(SECP256K1N, U256::one()).is_err());
    }

    #[test]
    fn legacy_v_accepts_pre_and_post_eip155() {
        assert!(validate_legacy_v(27, None).is_ok());
        assert!(validate_legacy_v(28, None).is_ok());
        assert!(validate_legacy_v(37, Some(1)).is_ok());
        assert!(validate_legacy_v(38, Some(1)).is_ok());
        assert!(validate_legacy_v(37, Some(5)).is_err());
        assert!(validate_legacy_v(26, None).is_err());
    }
}
