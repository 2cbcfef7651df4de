//! Body applier (C7): runs every system call, transaction, and withdrawal in a block body and
//! assembles the commitments the header claims.

use crate::{
    admission::admit_transaction,
    config::{
        BEACON_ROOTS_ADDRESS, CONSOLIDATION_REQUEST_PREDEPLOY_ADDRESS, CONSOLIDATION_REQUEST_TYPE,
        DEPOSIT_CONTRACT_ADDRESS, DEPOSIT_REQUEST_TYPE, HISTORY_STORAGE_ADDRESS,
        WITHDRAWAL_REQUEST_PREDEPLOY_ADDRESS, WITHDRAWAL_REQUEST_TYPE,
    },
    error::{CollaboratorError, Error, InvalidBlock},
    evm::{Env, Evm},
    executor::execute_transaction,
    fee::calculate_total_blob_gas,
    signature::recover_sender,
    state::State,
    syscall::system_call,
};
use alloc::vec::Vec;
use rosetta_ethereum_primitives::{
    crypto::{Crypto, DefaultCrypto},
    receipt::{Receipt, ReceiptPayload},
    transactions::{Transaction, TransactionT},
    Bloom, BloomInput, Bytes, Log, Withdrawal, H256, U64,
};

/// Everything `apply_body` needs that is constant across the whole block, beyond the per-block
/// [`Env`] (§4.7): the history window, the raw transaction list, the withdrawals, and the beacon
/// root the two header-driven system calls commit to.
pub struct ApplyBodyInput<'a> {
    pub block_hashes: Vec<H256>,
    pub transactions: &'a [Bytes],
    pub withdrawals: &'a [Withdrawal],
    pub parent_beacon_block_root: H256,
}

/// Everything `state_transition` (C8) must verify against the candidate block's header (§4.7).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyBodyOutput {
    pub block_gas_used: u64,
    pub transactions_root: H256,
    pub receipt_root: H256,
    pub block_logs_bloom: Bloom,
    pub state_root: H256,
    pub withdrawals_root: H256,
    pub blob_gas_used: u64,
    pub requests_hash: H256,
}

/// Applies a block body to `state` (§4.7). `env` carries the block-level fields (`gas_price` must
/// already equal `base_fee_per_gas`: every per-transaction environment is derived from it).
#[allow(clippy::too_many_lines)]
pub fn apply_body<S, X>(
    input: ApplyBodyInput<'_>,
    env: &Env,
    state: &mut S,
    evm: &mut X,
) -> Result<ApplyBodyOutput, Error<CollaboratorError<S::Error, X::Error>>>
where
    S: State,
    X: Evm<S>,
{
    let mut gas_available = env.block_gas_limit;
    let mut blob_gas_used = 0u64;
    let mut transactions_raw: Vec<&Bytes> = Vec::with_capacity(input.transactions.len());
    let mut receipts_encoded: Vec<Bytes> = Vec::with_capacity(input.transactions.len());
    let mut block_logs: Vec<Log> = Vec::new();
    let mut deposit_requests: Vec<u8> = Vec::new();

    // 1. the two header-driven system calls, in order.
    system_call(BEACON_ROOTS_ADDRESS, Bytes::from(input.parent_beacon_block_root.as_bytes().to_vec()), env, state, evm)
        .map_err(Error::State)?;
    let parent_hash =
        *input.block_hashes.last().expect("at least the genesis parent hash is always present");
    system_call(HISTORY_STORAGE_ADDRESS, Bytes::from(parent_hash.as_bytes().to_vec()), env, state, evm)
        .map_err(Error::State)?;

    // 2. every transaction, in input order.
    for (index, raw) in input.transactions.iter().enumerate() {
        transactions_raw.push(raw);

        let tx = decode_transaction(raw)
            .map_err(|source| Error::InvalidBlock(InvalidBlock::Transaction { index, source }))?;

        let sender = recover_sender(&tx)
            .map_err(|source| Error::InvalidBlock(InvalidBlock::Signature(source)))?;
        let sender_account = state.get_account(sender).map_err(|e| Error::State(CollaboratorError::State(e)))?;

        let admitted = admit_transaction(
            &tx,
            &sender_account,
            gas_available,
            Some(env.chain_id),
            env.base_fee_per_gas,
            env.excess_blob_gas,
        )
        .map_err(|source| {
            tracing::warn!(index, error = %source, "transaction rejected");
            Error::InvalidBlock(InvalidBlock::Transaction { index, source })
        })?;

        let tx_env = Env {
            gas_price: admitted.effective_gas_price,
            blob_versioned_hashes: admitted.blob_versioned_hashes,
            ..env.clone()
        };

        let executed = execute_transaction(&tx, admitted.sender, &tx_env, state, evm).map_err(Error::State)?;
        gas_available -= executed.net_gas_used;

        let cumulative_gas_used = env.block_gas_limit - gas_available;
        let receipt = make_receipt(&tx, executed.succeeded, cumulative_gas_used, executed.logs.clone());
        let encoded_receipt = Bytes::from(rlp::encode(&receipt).to_vec());
        receipts_encoded.push(encoded_receipt);

        deposit_requests.extend(parse_deposit_requests_from_receipt(&receipt));

        block_logs.extend(executed.logs);
        blob_gas_used += calculate_total_blob_gas(&tx);
    }

    let block_gas_used = env.block_gas_limit - gas_available;
    let block_logs_bloom = logs_bloom(&block_logs);

    // 4. withdrawals, in input order, after every transaction.
    let mut withdrawals_encoded: Vec<Bytes> = Vec::with_capacity(input.withdrawals.len());
    for withdrawal in input.withdrawals {
        withdrawals_encoded.push(Bytes::from(rlp::encode(withdrawal).to_vec()));
        state.process_withdrawal(withdrawal).map_err(|e| Error::State(CollaboratorError::State(e)))?;
        if state
            .account_exists_and_is_empty(withdrawal.address)
            .map_err(|e| Error::State(CollaboratorError::State(e)))?
        {
            state.destroy_account(withdrawal.address).map_err(|e| Error::State(CollaboratorError::State(e)))?;
        }
    }

    // 5. the request list, in strict ascending type order.
    let mut requests_from_execution: Vec<Vec<u8>> = Vec::new();
    if !deposit_requests.is_empty() {
        let mut tagged = alloc::vec![DEPOSIT_REQUEST_TYPE];
        tagged.extend_from_slice(&deposit_requests);
        requests_from_execution.push(tagged);
    }

    let withdrawal_request_output = system_call(
        WITHDRAWAL_REQUEST_PREDEPLOY_ADDRESS,
        Bytes::default(),
        env,
        state,
        evm,
    )
    .map_err(Error::State)?;
    if !withdrawal_request_output.return_data.is_empty() {
        let mut tagged = alloc::vec![WITHDRAWAL_REQUEST_TYPE];
        tagged.extend_from_slice(&withdrawal_request_output.return_data);
        requests_from_execution.push(tagged);
    }

    let consolidation_request_output = system_call(
        CONSOLIDATION_REQUEST_PREDEPLOY_ADDRESS,
        Bytes::default(),
        env,
        state,
        evm,
    )
    .map_err(Error::State)?;
    if !consolidation_request_output.return_data.is_empty() {
        let mut tagged = alloc::vec![CONSOLIDATION_REQUEST_TYPE];
        tagged.extend_from_slice(&consolidation_request_output.return_data);
        requests_from_execution.push(tagged);
    }

    let requests_hash = compute_requests_hash(&requests_from_execution);

    Ok(ApplyBodyOutput {
        block_gas_used,
        transactions_root: rosetta_ethereum_trie::trie_root(transactions_raw),
        receipt_root: rosetta_ethereum_trie::trie_root(receipts_encoded),
        block_logs_bloom,
        state_root: state.state_root(),
        withdrawals_root: rosetta_ethereum_trie::trie_root(withdrawals_encoded),
        blob_gas_used,
        requests_hash,
    })
}

/// Decodes a raw transaction (legacy bare rlp, or `type_byte || rlp(payload)`), admitting a
/// signature error the same way every other admission failure is reported.
fn decode_transaction(raw: &[u8]) -> Result<Transaction, crate::error::AdmissionError> {
    rlp::decode::<Transaction>(raw)
        .map_err(|_| crate::error::AdmissionError::Signature(crate::error::SignatureError::RecoveryFailed))
}

/// Builds and type-prefix-encodes the receipt for an executed transaction (§4.7 step 2).
fn make_receipt(tx: &Transaction, succeeded: bool, cumulative_gas_used: u64, logs: Vec<Log>) -> Receipt {
    let payload = ReceiptPayload {
        succeeded,
        cumulative_gas_used: U64::from(cumulative_gas_used),
        bloom: logs_bloom(&logs),
        logs,
    };
    match tx.transaction_type() {
        Some(0x01) => Receipt::Eip2930(payload),
        Some(0x02) => Receipt::Eip1559(payload),
        Some(0x03) => Receipt::Eip4844(payload),
        Some(0x04) => Receipt::Eip7702(payload),
        _ => Receipt::Legacy(payload),
    }
}

/// `logs_bloom(logs)` (§6): folds every log's address and topics into a single 256-byte bloom.
#[must_use]
pub fn logs_bloom(logs: &[Log]) -> Bloom {
    let mut bloom = Bloom::default();
    for log in logs {
        bloom.accrue(BloomInput::Raw(log.address.as_bytes()));
        for topic in &log.topics {
            bloom.accrue(BloomInput::Raw(topic.as_bytes()));
        }
    }
    bloom
}

/// EIP-6110 byte offsets of a `DepositEvent` log's ABI-encoded data: `bytes pubkey, bytes
/// withdrawal_credentials, bytes amount, bytes signature, bytes index`, each a dynamic `bytes`
/// ABI value at a fixed offset since every deposit log has the same field lengths.
const DEPOSIT_PUBKEY_OFFSET: usize = 192;
const DEPOSIT_PUBKEY_LEN: usize = 48;
const DEPOSIT_WITHDRAWAL_CREDENTIALS_OFFSET: usize = 288;
const DEPOSIT_WITHDRAWAL_CREDENTIALS_LEN: usize = 32;
const DEPOSIT_AMOUNT_OFFSET: usize = 352;
const DEPOSIT_AMOUNT_LEN: usize = 8;
const DEPOSIT_SIGNATURE_OFFSET: usize = 416;
const DEPOSIT_SIGNATURE_LEN: usize = 96;
const DEPOSIT_INDEX_OFFSET: usize = 544;
const DEPOSIT_INDEX_LEN: usize = 8;

/// Extracts the 192-byte deposit-request payload from a single `DepositEvent` log's data, or
/// `None` if the log is too short to be well-formed.
fn parse_deposit_data(data: &[u8]) -> Option<Vec<u8>> {
    if data.len() < DEPOSIT_INDEX_OFFSET + DEPOSIT_INDEX_LEN {
        return None;
    }
    let mut out = Vec::with_capacity(
        DEPOSIT_PUBKEY_LEN
            + DEPOSIT_WITHDRAWAL_CREDENTIALS_LEN
            + DEPOSIT_AMOUNT_LEN
            + DEPOSIT_SIGNATURE_LEN
            + DEPOSIT_INDEX_LEN,
    );
    out.extend_from_slice(&data[DEPOSIT_PUBKEY_OFFSET..DEPOSIT_PUBKEY_OFFSET + DEPOSIT_PUBKEY_LEN]);
    out.extend_from_slice(
        &data[DEPOSIT_WITHDRAWAL_CREDENTIALS_OFFSET
            ..DEPOSIT_WITHDRAWAL_CREDENTIALS_OFFSET + DEPOSIT_WITHDRAWAL_CREDENTIALS_LEN],
    );
    out.extend_from_slice(&data[DEPOSIT_AMOUNT_OFFSET..DEPOSIT_AMOUNT_OFFSET + DEPOSIT_AMOUNT_LEN]);
    out.extend_from_slice(&data[DEPOSIT_SIGNATURE_OFFSET..DEPOSIT_SIGNATURE_OFFSET + DEPOSIT_SIGNATURE_LEN]);
    out.extend_from_slice(&data[DEPOSIT_INDEX_OFFSET..DEPOSIT_INDEX_OFFSET + DEPOSIT_INDEX_LEN]);
    Some(out)
}

/// Scans a receipt's logs for `DepositEvent`s emitted by the deposit contract and concatenates
/// their parsed payloads (§4.7 step 2).
fn parse_deposit_requests_from_receipt(receipt: &Receipt) -> Vec<u8> {
    let mut out = Vec::new();
    for log in &receipt.payload().logs {
        if log.address == DEPOSIT_CONTRACT_ADDRESS {
            if let Some(bytes) = parse_deposit_data(&log.data) {
                out.extend_from_slice(&bytes);
            }
        }
    }
    out
}

/// `keccak256(concat_i keccak256(requests[i]))` (§4.7 step 6).
fn compute_requests_hash(requests: &[Vec<u8>]) -> H256 {
    let mut concatenated = Vec::with_capacity(requests.len() * 32);
    for request in requests {
        concatenated.extend_from_slice(DefaultCrypto::keccak256(request).as_bytes());
    }
    DefaultCrypto::keccak256(&concatenated)
}
