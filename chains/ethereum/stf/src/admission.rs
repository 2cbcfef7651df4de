//! Transaction admitter (C4): the ten ordered checks a transaction must pass before execution.

use crate::{
    config::VERSIONED_HASH_VERSION_KZG,
    error::AdmissionError,
    fee::{calculate_blob_gas_price, calculate_total_blob_gas, intrinsic_cost, MAX_INIT_CODE_SIZE},
    signature::recover_sender,
    state::Account,
};
use rosetta_ethereum_primitives::{
    transactions::{GasPrice, Transaction, TransactionT},
    Address, H256, U256,
};

/// The outcome of a successful admission: who pays, at what price, and which blobs this
/// transaction commits the block to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdmittedTransaction {
    pub sender: Address,
    pub effective_gas_price: U256,
    pub blob_versioned_hashes: Vec<H256>,
    pub max_gas_fee: U256,
}

/// Checks `tx` is admissible against the current `sender_account`, the remaining block gas, the
/// block's base fee, and the current excess blob gas (§4.4). `_chain_id` is accepted to match the
/// core's documented C4 input shape but unused: only legacy EIP-155 transactions carry a chain id
/// to check, and that check already happens inside `recover_sender`'s `v` validation.
pub fn admit_transaction(
    tx: &Transaction,
    sender_account: &Account,
    gas_available: u64,
    _chain_id: Option<u64>,
    base_fee_per_gas: U256,
    excess_blob_gas: u64,
) -> Result<AdmittedTransaction, AdmissionError> {
    let to_is_empty = tx.to().is_none();
    let gas_limit = tx.gas_limit().as_u64();

    // 1. intrinsic_cost(tx) <= tx.gas
    let cost = intrinsic_cost(tx, to_is_empty, tx.data());
    if cost > gas_limit {
        return Err(AdmissionError::IntrinsicCostExceedsGas { cost, gas: gas_limit });
    }

    // 2. tx.nonce < 2**64 - 1
    if tx.nonce() == u64::MAX {
        return Err(AdmissionError::NonceAtMaximum(tx.nonce()));
    }

    // 3. creation data length bound
    if to_is_empty && tx.data().len() > MAX_INIT_CODE_SIZE {
        return Err(AdmissionError::CreationDataTooLarge(tx.data().len()));
    }

    // 4. tx.gas <= gas_available
    if gas_limit > gas_available {
        return Err(AdmissionError::GasExceedsBlockAvailable { gas: gas_limit, available: gas_available });
    }

    // 5. recover sender.
    let sender = recover_sender(tx).map_err(AdmissionError::Signature)?;

    // 6/7. fee-market checks, by transaction shape
    let (effective_gas_price, mut max_gas_fee) = match tx.gas_price() {
        GasPrice::Legacy(gas_price) => {
            if gas_price < base_fee_per_gas {
                return Err(AdmissionError::GasPriceBelowBaseFee { gas_price, base_fee: base_fee_per_gas });
            }
            (gas_price, gas_price * U256::from(gas_limit))
        },
        GasPrice::Eip1559 { max_priority_fee_per_gas, max_fee_per_gas } => {
            if max_fee_per_gas < max_priority_fee_per_gas {
                return Err(AdmissionError::PriorityAboveMaxFee { max_fee: max_fee_per_gas, max_priority: max_priority_fee_per_gas });
            }
            if max_fee_per_gas < base_fee_per_gas {
                return Err(AdmissionError::MaxFeeBelowBaseFee { max_fee: max_fee_per_gas, base_fee: base_fee_per_gas });
            }
            let priority = core::cmp::min(max_priority_fee_per_gas, max_fee_per_gas - base_fee_per_gas);
            (priority + base_fee_per_gas, U256::from(gas_limit) * max_fee_per_gas)
        },
    };

    // 8. blob-specific checks
    if tx.transaction_type() == Some(0x03) {
        for hash in tx.blob_versioned_hashes() {
            if hash.as_bytes()[0] != VERSIONED_HASH_VERSION_KZG {
                return Err(AdmissionError::WrongBlobVersionedHashVersion);
            }
        }
        let max_fee_per_blob_gas =
            tx.max_fee_per_blob_gas().expect("blob transactions always carry max_fee_per_blob_gas");
        let blob_gas_price = calculate_blob_gas_price(excess_blob_gas);
        if max_fee_per_blob_gas < blob_gas_price {
            return Err(AdmissionError::MaxFeePerBlobGasTooLow { expected: blob_gas_price, found: max_fee_per_blob_gas });
        }
        max_gas_fee += U256::from(calculate_total_blob_gas(tx)) * max_fee_per_blob_gas;
        if to_is_empty {
            return Err(AdmissionError::MissingTo);
        }
    }

    // 9. setcode-specific checks
    if tx.transaction_type() == Some(0x04) {
        if to_is_empty {
            return Err(AdmissionError::MissingTo);
        }
        if tx.authorization_list().is_empty() {
            return Err(AdmissionError::EmptyAuthorizationList);
        }
    }

    // 10. sender account checks
    if sender_account.nonce != tx.nonce() {
        return Err(AdmissionError::NonceMismatch { account: sender_account.nonce, tx: tx.nonce() });
    }
    let required = max_gas_fee + tx.value();
    if sender_account.balance < required {
        return Err(AdmissionError::InsufficientBalance { balance: sender_account.balance, required });
    }
    if !is_valid_delegation(&sender_account.code) {
        return Err(AdmissionError::SenderNotEoa);
    }

    Ok(AdmittedTransaction {
        sender,
        effective_gas_price,
        blob_versioned_hashes: tx.blob_versioned_hashes().to_vec(),
        max_gas_fee,
    })
}

/// `is_valid_delegation(code)` (§4.4.1): `true` iff `code` is empty, or is exactly the 23-byte
/// EOA delegation designator `0xef0100 || address`.
#[must_use]
pub fn is_valid_delegation(code: &[u8]) -> bool {
    code.is_empty() || (code.len() == 23 && code[0..3] == [0xef, 0x01, 0x00])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegation_designator_shapes() {
        assert!(is_valid_delegation(&[]));
        let mut designator = vec![0xef, 0x01, 0x00];
        designator.extend_from_slice(&[0u8; 20]);
        assert!(is_valid_delegation(&designator));
        assert!(!is_valid_delegation(&[0x60, 0x00]));
        assert!(!is_valid_delegation(&designator[..22]));
    }
}
