//! Header validator (C3): shape and linkage checks on a candidate header against its parent.

use crate::{
    error::HeaderError,
    fee::{calculate_base_fee_per_gas, validate_gas_limit},
};
use rosetta_ethereum_primitives::{
    constants::EMPTY_OMMER_ROOT_HASH,
    crypto::{Crypto, DefaultCrypto},
    Header, H64,
};

/// Maximum length of `header.extra_data`.
pub const MAX_EXTRA_DATA_BYTES: usize = 32;

/// Validates `header` against its `parent`. Does not check `excess_blob_gas`: that depends on
/// whether a given fork requires it, and `state_transition` (C8) verifies it directly.
pub fn validate_header(header: &Header, parent: &Header) -> Result<(), HeaderError> {
    if header.gas_used.as_u64() > header.gas_limit.as_u64() {
        return Err(HeaderError::GasUsedExceedsLimit {
            gas_used: header.gas_used.as_u64(),
            gas_limit: header.gas_limit.as_u64(),
        });
    }

    validate_gas_limit(header.gas_limit.as_u64(), parent.gas_limit.as_u64())?;

    let expected_base_fee = calculate_base_fee_per_gas(parent);
    if header.base_fee_per_gas != expected_base_fee {
        return Err(HeaderError::BaseFeeMismatch {
            expected: expected_base_fee,
            found: header.base_fee_per_gas,
        });
    }

    if header.timestamp.as_u64() <= parent.timestamp.as_u64() {
        return Err(HeaderError::TimestampNotIncreasing {
            child: header.timestamp.as_u64(),
            parent: parent.timestamp.as_u64(),
        });
    }

    if header.number.as_u64() != parent.number.as_u64() + 1 {
        return Err(HeaderError::NumberNotSequential {
            child: header.number.as_u64(),
            parent: parent.number.as_u64(),
        });
    }

    if header.extra_data.len() > MAX_EXTRA_DATA_BYTES {
        return Err(HeaderError::ExtraDataTooLong(header.extra_data.len()));
    }

    if !header.difficulty.is_zero() {
        return Err(HeaderError::NonZeroDifficulty);
    }

    if header.nonce != H64::zero() {
        return Err(HeaderError::NonZeroNonce);
    }

    if header.ommers_hash != EMPTY_OMMER_ROOT_HASH {
        return Err(HeaderError::WrongOmmersHash);
    }

    if header.parent_hash != DefaultCrypto::keccak256(rlp::encode(parent)) {
        return Err(HeaderError::WrongParentHash);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_ethereum_primitives::{Bytes, U256, U64};

    fn parent() -> Header {
        Header {
            number: U64::from(10u64),
            gas_limit: U64::from(30_000_000u64),
            gas_used: U64::from(15_000_000u64),
            base_fee_per_gas: U256::from(1_000_000_000u64),
            timestamp: U64::from(1_000u64),
            ..Header::default()
        }
    }

    fn valid_child(parent: &Header) -> Header {
        Header {
            parent_hash: DefaultCrypto::keccak256(rlp::encode(parent)),
            ommers_hash: EMPTY_OMMER_ROOT_HASH,
            number: U64::from(parent.number.as_u64() + 1),
            gas_limit: parent.gas_limit,
            gas_used: U64::from(0u64),
            base_fee_per_gas: calculate_base_fee_per_gas(parent),
            timestamp: U64::from(parent.timestamp.as_u64() + 12),
            ..Header::default()
        }
    }

    #[test]
    fn accepts_well_formed_child() {
        let parent = parent();
        let child = valid_child(&parent);
        assert!(validate_header(&child, &parent).is_ok());
    }

    #[test]
    fn rejects_gas_used_above_limit() {
        let parent = parent();
        let mut child = valid_child(&parent);
        child.gas_used = U64::from(child.gas_limit.as_u64() + 1);
        assert!(matches!(validate_header(&child, &parent), Err(HeaderError::GasUsedExceedsLimit { .. })));
    }

    #[test]
    fn rejects_non_sequential_number() {
        let parent = parent();
        let mut child = valid_child(&parent);
        child.number = U64::from(parent.number.as_u64() + 2);
        assert!(matches!(validate_header(&child, &parent), Err(HeaderError::NumberNotSequential { .. })));
    }

    #[test]
    fn rejects_non_increasing_timestamp() {
        let parent = parent();
        let mut child = valid_child(&parent);
        child.timestamp = parent.timestamp;
        assert!(matches!(validate_header(&child, &parent), Err(HeaderError::TimestampNotIncreasing { .. })));
    }

    #[test]
    fn rejects_extra_data_over_32_bytes() {
        let parent = parent();
        let mut child = valid_child(&parent);
        child.extra_data = Bytes::from(vec![0u8; 33]);
        assert!(matches!(validate_header(&child, &parent), Err(HeaderError::ExtraDataTooLong(33))));
    }

    #[test]
    fn rejects_wrong_parent_hash() {
        let parent = parent();
        let mut child = valid_child(&parent);
        child.parent_hash = Default::default();
        assert!(matches!(validate_header(&child, &parent), Err(HeaderError::WrongParentHash)));
    }

    #[test]
    fn rejects_mismatched_base_fee() {
        let parent = parent();
        let mut child = valid_child(&parent);
        child.base_fee_per_gas += U256::one();
        assert!(matches!(validate_header(&child, &parent), Err(HeaderError::BaseFeeMismatch { .. })));
    }
}
