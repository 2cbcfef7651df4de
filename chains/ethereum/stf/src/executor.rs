//! Transaction executor (C6): runs a single admitted transaction against the EVM collaborator
//! and settles gas fees around it.

use crate::{
    admission::is_valid_delegation,
    error::CollaboratorError,
    evm::{Env, Evm, Message},
    fee::{calculate_blob_gas_price, calculate_total_blob_gas, intrinsic_cost, PER_AUTH_BASE_COST, PER_EMPTY_ACCOUNT_COST},
    signature::validate_signature_params,
    state::State,
};
use alloc::vec::Vec;
use rosetta_ethereum_primitives::{
    crypto::DefaultCrypto,
    transactions::{Transaction, TransactionT},
    Address, Authorization, Bytes, Log, H256, U256,
};

/// What executing a transaction reports back to the body applier (§4.6 step 8): the block-gas
/// charge net of the sender's refund, the logs it produced, and whether its top-level call
/// succeeded (receipts need this to set their `succeeded` bit).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedTransaction {
    pub net_gas_used: u64,
    pub logs: Vec<Log>,
    pub succeeded: bool,
}

/// Executes `tx`, already admitted by C4 under `sender`, against `(state, evm)` within `env`
/// (§4.6). `env.gas_price` must already be the transaction's effective gas price, and
/// `env.blob_versioned_hashes` the transaction's own blobs — both are per-transaction, unlike
/// every other `Env` field, which is constant across a block.
#[allow(clippy::too_many_lines)]
pub fn execute_transaction<S, X>(
    tx: &Transaction,
    sender: Address,
    env: &Env,
    state: &mut S,
    evm: &mut X,
) -> Result<ExecutedTransaction, CollaboratorError<S::Error, X::Error>>
where
    S: State,
    X: Evm<S>,
{
    let to_is_empty = tx.to().is_none();
    let gas_limit = tx.gas_limit().as_u64();

    // 1. blob_gas_fee, blob transactions only.
    let blob_gas_fee = if tx.transaction_type() == Some(0x03) {
        U256::from(calculate_total_blob_gas(tx)) * calculate_blob_gas_price(env.excess_blob_gas)
    } else {
        U256::zero()
    };

    // 2/3. effective_gas_fee and the gas left over for execution once the intrinsic cost is paid.
    let effective_gas_fee = U256::from(gas_limit) * env.gas_price;
    let execution_gas = gas_limit - intrinsic_cost(tx, to_is_empty, tx.data());

    // 4. nonce then balance debit.
    state.increment_nonce(sender).map_err(CollaboratorError::State)?;
    let sender_account = state.get_account(sender).map_err(CollaboratorError::State)?;
    let balance_after_fee = sender_account.balance - effective_gas_fee - blob_gas_fee;
    state.set_account_balance(sender, balance_after_fee).map_err(CollaboratorError::State)?;

    // 4.5. EIP-7702 authorizations apply before the call, so delegated code is in place for it.
    let auth_refund =
        apply_authorizations(tx.authorization_list(), env.chain_id, state).map_err(CollaboratorError::State)?;

    // 5/6. preaccessed set plus the message itself.
    let message = prepare_message(tx, sender, env.coinbase, execution_gas);
    let output = evm.process_message_call(message, env, state).map_err(CollaboratorError::Evm)?;

    // 7. settle gas: refund the sender, pay the coinbase its priority fee, clean up.
    let gas_used_before_refund = gas_limit - output.gas_left;
    let gas_refund = core::cmp::min(gas_used_before_refund / 5, output.gas_refund) + auth_refund;
    let net_gas_used = gas_used_before_refund - gas_refund;

    let refund_amount = U256::from(output.gas_left + gas_refund) * env.gas_price;
    let sender_balance = state.get_account(sender).map_err(CollaboratorError::State)?.balance;
    state.set_account_balance(sender, sender_balance + refund_amount).map_err(CollaboratorError::State)?;

    // For non-1559 transactions env.gas_price == tx.gas_price, so this is the flat case too.
    let priority_fee_per_gas = env.gas_price - env.base_fee_per_gas;
    let transaction_fee = U256::from(net_gas_used) * priority_fee_per_gas;

    let coinbase_balance = state.get_account(env.coinbase).map_err(CollaboratorError::State)?.balance;
    let coinbase_balance_after = coinbase_balance + transaction_fee;
    if !coinbase_balance_after.is_zero() {
        state.set_account_balance(env.coinbase, coinbase_balance_after).map_err(CollaboratorError::State)?;
    } else if state.account_exists_and_is_empty(env.coinbase).map_err(CollaboratorError::State)? {
        state.destroy_account(env.coinbase).map_err(CollaboratorError::State)?;
    }

    for address in &output.accounts_to_delete {
        state.destroy_account(*address).map_err(CollaboratorError::State)?;
    }
    state.destroy_touched_empty_accounts(&output.touched_accounts).map_err(CollaboratorError::State)?;

    Ok(ExecutedTransaction { net_gas_used, logs: output.logs, succeeded: output.succeeded })
}

/// Builds the top-level [`Message`] for `tx` (§4.6 steps 5/6): the preaccessed set seeds the
/// coinbase alongside every `(address, storage_keys)` pair of the transaction's own access list.
fn prepare_message(tx: &Transaction, sender: Address, coinbase: Address, execution_gas: u64) -> Message {
    let mut access_list: Vec<(Address, alloc::vec::Vec<H256>)> = Vec::new();
    if let Some(list) = tx.access_list() {
        for item in list.iter() {
            access_list.push((item.address, item.storage_keys.clone()));
        }
    }
    if !access_list.iter().any(|(address, _)| *address == coinbase) {
        access_list.push((coinbase, Vec::new()));
    }

    Message {
        caller: sender,
        origin: sender,
        to: tx.to(),
        value: tx.value(),
        data: Bytes::from(tx.data().to_vec()),
        gas_limit: execution_gas,
        should_transfer_value: true,
        depth: 0,
        access_list,
        authorization_list: tx.authorization_list().to_vec(),
    }
}

/// Applies a set-code transaction's authorization list (§3.2), in order: each tuple either
/// installs a delegation designator on its recovered authority or is skipped. An invalid
/// individual authorization is never a block error, only a missed delegation. Returns the gas
/// refund its successful entries earn, for step 7 to fold into `gas_refund`.
fn apply_authorizations<S: State>(
    authorizations: &[Authorization],
    chain_id: u64,
    state: &mut S,
) -> Result<u64, S::Error> {
    let mut refund = 0u64;
    for authorization in authorizations {
        if authorization.chain_id != 0 && authorization.chain_id != chain_id {
            continue;
        }
        if authorization.y_parity > 1 {
            continue;
        }
        if validate_signature_params(authorization.r, authorization.s).is_err() {
            continue;
        }
        let Ok(authority) = authorization.recover_authority::<DefaultCrypto>() else {
            continue;
        };

        // Non-existent authorities are implicitly created with nonce 0 before this check, which
        // `get_account`'s default already models.
        let account = state.get_account(authority)?;
        if !is_valid_delegation(&account.code) {
            continue;
        }
        if account.nonce != authorization.nonce {
            continue;
        }

        let code = if authorization.address.is_zero() {
            Bytes::default()
        } else {
            let mut designator = Vec::with_capacity(23);
            designator.extend_from_slice(&[0xef, 0x01, 0x00]);
            designator.extend_from_slice(authorization.address.as_bytes());
            Bytes::from(designator)
        };
        state.set_account_code(authority, code)?;
        state.increment_nonce(authority)?;
        refund += PER_EMPTY_ACCOUNT_COST - PER_AUTH_BASE_COST;
    }
    Ok(refund)
}
