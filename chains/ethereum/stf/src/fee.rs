//! Fee and gas arithmetic (C1): base-fee-per-gas, gas-limit bounds, intrinsic cost, blob pricing.

use crate::{
    config::{ELASTICITY_MULTIPLIER, MAX_CODE_SIZE},
    error::HeaderError,
};
use rosetta_ethereum_primitives::{transactions::TransactionT, Header, U256};

/// `2**17`, the unit blob gas charges in.
pub const GAS_PER_BLOB: u64 = 1 << 17;
/// Three blobs per block is the fee-market target.
pub const TARGET_BLOB_GAS_PER_BLOCK: u64 = 3 * GAS_PER_BLOB;
/// Six blobs per block is the hard cap.
pub const MAX_BLOB_GAS_PER_BLOCK: u64 = 6 * GAS_PER_BLOB;
/// Floor below which blob gas price never drops.
pub const MIN_BASE_FEE_PER_BLOB_GAS: u64 = 1;
/// Denominator of the blob-gas-price exponential approximation at Prague (EIP-7691 raised the
/// blob target/max from Cancun's 2/3 to 3/6, and with it this fraction from 3_338_477).
pub const BLOB_BASE_FEE_UPDATE_FRACTION: u64 = 5_007_716;

pub const TX_CREATE_COST: u64 = 32_000;
pub const INIT_CODE_WORD_COST: u64 = 2;
pub const PER_EMPTY_ACCOUNT_COST: u64 = 25_000;
pub const PER_AUTH_BASE_COST: u64 = 12_500;
pub const ACCESS_LIST_ADDRESS_COST: u64 = 2_400;
pub const ACCESS_LIST_STORAGE_KEY_COST: u64 = 1_900;

/// Maximum creation data length admission accepts: twice the deployable code size limit.
pub const MAX_INIT_CODE_SIZE: usize = 2 * MAX_CODE_SIZE;

/// Child block's `base_fee_per_gas`, computed from the parent header (§4.1).
#[must_use]
pub fn calculate_base_fee_per_gas(parent: &Header) -> U256 {
    let parent_gas_limit = U256::from(parent.gas_limit.as_u64());
    let parent_gas_used = U256::from(parent.gas_used.as_u64());
    let parent_base_fee = parent.base_fee_per_gas;
    let target = parent_gas_limit / U256::from(ELASTICITY_MULTIPLIER);

    if parent_gas_used == target {
        return parent_base_fee;
    }

    if parent_gas_used > target {
        let gas_delta = parent_gas_used - target;
        let delta = core::cmp::max(U256::one(), parent_base_fee * gas_delta / target / 8);
        parent_base_fee + delta
    } else {
        let gas_delta = target - parent_gas_used;
        let delta = parent_base_fee * gas_delta / target / 8;
        parent_base_fee.saturating_sub(delta)
    }
}

/// Validates a child's gas_limit against its parent's (§3 invariants, §4.1).
///
/// # Errors
/// Returns [`HeaderError`] if the limit drifted by more than `parent/1024` or fell below 5000.
pub fn validate_gas_limit(child_gas_limit: u64, parent_gas_limit: u64) -> Result<(), HeaderError> {
    let max_delta = parent_gas_limit / 1024;
    let diff = child_gas_limit.abs_diff(parent_gas_limit);
    if diff > max_delta {
        return Err(HeaderError::GasLimitOutOfBounds {
            child: child_gas_limit,
            parent: parent_gas_limit,
            max_delta,
        });
    }
    if child_gas_limit < 5000 {
        return Err(HeaderError::GasLimitTooLow(child_gas_limit));
    }
    Ok(())
}

/// `ceil32(n) * INIT_CODE_WORD_COST` — the per-creation cost of a contract's init code (§4.1).
#[must_use]
pub fn init_code_cost(len: usize) -> u64 {
    let words = u64::try_from(len.div_ceil(32)).unwrap_or(u64::MAX);
    words.saturating_mul(INIT_CODE_WORD_COST)
}

/// `intrinsic_cost(tx)` (§4.1): the minimum gas a transaction must supply before execution.
#[must_use]
pub fn intrinsic_cost<T: TransactionT>(tx: &T, to_is_empty: bool, data: &[u8]) -> u64 {
    let mut cost = 21_000u64;

    for byte in data {
        cost = cost.saturating_add(if *byte == 0 { 4 } else { 16 });
    }

    if to_is_empty {
        cost = cost.saturating_add(TX_CREATE_COST).saturating_add(init_code_cost(data.len()));
    }

    if let Some(access_list) = tx.access_list() {
        for item in access_list.iter() {
            cost = cost.saturating_add(ACCESS_LIST_ADDRESS_COST);
            cost = cost
                .saturating_add((item.storage_keys.len() as u64).saturating_mul(ACCESS_LIST_STORAGE_KEY_COST));
        }
    }

    let authorizations = tx.authorization_list().len() as u64;
    cost = cost.saturating_add(authorizations.saturating_mul(PER_EMPTY_ACCOUNT_COST));

    cost
}

/// Total blob gas a transaction consumes: zero for non-blob transactions.
#[must_use]
pub fn calculate_total_blob_gas<T: TransactionT>(tx: &T) -> u64 {
    (tx.blob_versioned_hashes().len() as u64).saturating_mul(GAS_PER_BLOB)
}

/// `excess_blob_gas` for the child block, from the parent's excess and usage (§4.1).
#[must_use]
pub fn calculate_excess_blob_gas(parent_excess_blob_gas: u64, parent_blob_gas_used: u64) -> u64 {
    let total = parent_excess_blob_gas.saturating_add(parent_blob_gas_used);
    total.saturating_sub(TARGET_BLOB_GAS_PER_BLOCK)
}

/// `fake_exponential(MIN_BASE_FEE_PER_BLOB_GAS, excess_blob_gas, BLOB_BASE_FEE_UPDATE_FRACTION)`,
/// the per-unit blob gas price (§4.1).
#[must_use]
pub fn calculate_blob_gas_price(excess_blob_gas: u64) -> U256 {
    fake_exponential(
        U256::from(MIN_BASE_FEE_PER_BLOB_GAS),
        U256::from(excess_blob_gas),
        U256::from(BLOB_BASE_FEE_UPDATE_FRACTION),
    )
}

/// Taylor-series approximation of `factor * e^(numerator / denominator)`, truncating at every
/// step the way every EIP-4844-derived fee formula specifies it (never a floating-point `exp`).
fn fake_exponential(factor: U256, numerator: U256, denominator: U256) -> U256 {
    let mut i = U256::one();
    let mut output = U256::zero();
    let mut numerator_accum = factor * denominator;

    while numerator_accum > U256::zero() {
        output += numerator_accum;
        numerator_accum = numerator_accum * numerator / (denominator * i);
        i += U256::one();
    }

    output / denominator
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_ethereum_primitives::U64;

    fn header_with(gas_limit: u64, gas_used: u64, base_fee: u64) -> Header {
        Header {
            gas_limit: U64::from(gas_limit),
            gas_used: U64::from(gas_used),
            base_fee_per_gas: U256::from(base_fee),
            ..Header::default()
        }
    }

    #[test]
    fn base_fee_unchanged_at_target() {
        let parent = header_with(30_000_000, 15_000_000, 1_000_000_000);
        assert_eq!(calculate_base_fee_per_gas(&parent), U256::from(1_000_000_000u64));
    }

    #[test]
    fn base_fee_rises_when_full() {
        let parent = header_with(30_000_000, 30_000_000, 1_000_000_000);
        assert_eq!(calculate_base_fee_per_gas(&parent), U256::from(1_125_000_000u64));
    }

    #[test]
    fn base_fee_falls_when_empty() {
        // A fully empty parent drives the maximum 12.5% per-block decrease, symmetric with
        // `base_fee_rises_when_full`'s maximum increase.
        let parent = header_with(30_000_000, 0, 1_000_000_000);
        assert_eq!(calculate_base_fee_per_gas(&parent), U256::from(875_000_000u64));
    }

    #[test]
    fn gas_limit_bounds_accept_and_reject() {
        assert!(validate_gas_limit(30_029_296, 30_000_000).is_ok());
        assert!(validate_gas_limit(30_029_297, 30_000_000).is_err());
        assert!(validate_gas_limit(29_970_704, 30_000_000).is_ok());
        assert!(validate_gas_limit(29_970_703, 30_000_000).is_err());
        assert!(validate_gas_limit(4999, 30_000_000).is_err());
    }

    #[test]
    fn init_code_cost_rounds_up_to_whole_words() {
        assert_eq!(init_code_cost(0), 0);
        assert_eq!(init_code_cost(1), INIT_CODE_WORD_COST);
        assert_eq!(init_code_cost(32), INIT_CODE_WORD_COST);
        assert_eq!(init_code_cost(33), 2 * INIT_CODE_WORD_COST);
    }

    #[test]
    fn excess_blob_gas_below_target_floors_at_zero() {
        assert_eq!(calculate_excess_blob_gas(0, 0), 0);
        assert_eq!(calculate_excess_blob_gas(0, TARGET_BLOB_GAS_PER_BLOCK), 0);
    }

    #[test]
    fn blob_gas_price_floors_at_minimum() {
        assert_eq!(calculate_blob_gas_price(0), U256::from(MIN_BASE_FEE_PER_BLOB_GAS));
    }
}
