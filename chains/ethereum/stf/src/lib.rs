//! Ethereum Prague-fork block-level state transition function.
//!
//! This crate implements the state transition core only: given a [`BlockChain`] (prior blocks
//! plus persistent state) and a candidate [`Block`], [`state_transition`] either applies the
//! block and advances the chain, or rejects it with the specific consensus rule it broke. The EVM
//! interpreter and the persistent account/storage store are collaborators the caller injects
//! through the [`evm::Evm`] and [`state::State`] traits (§6); this crate drives them, it does not
//! implement them.
#![cfg_attr(not(test), allow(clippy::missing_errors_doc))]

extern crate alloc;

pub mod admission;
pub mod body;
pub mod config;
pub mod error;
pub mod evm;
pub mod executor;
pub mod fee;
pub mod header;
pub mod memory;
pub mod signature;
pub mod state;
pub mod syscall;

use crate::{
    body::{apply_body, ApplyBodyInput},
    config::BLOCK_HASH_HISTORY_WINDOW,
    error::{CollaboratorError, Error, InvalidBlock},
    evm::{Env, Evm},
    fee::calculate_excess_blob_gas,
    header::validate_header,
    state::State,
};
use alloc::vec::Vec;
use rosetta_ethereum_primitives::{Bytes, Header, Withdrawal, H256};

/// A candidate or committed block body (§3): a header, its ordered raw transactions, its ordered
/// withdrawals, and its ommers — which Prague requires to be empty (§4.8 step 3).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Bytes>,
    pub withdrawals: Vec<Withdrawal>,
    pub ommers: Vec<Header>,
}

/// A chain of accepted blocks plus the persistent state they produced (§3). Only the last
/// [`BLOCK_HASH_HISTORY_WINDOW`] blocks are retained; `state_transition` prunes older ones as it
/// appends.
#[derive(Clone, Debug)]
pub struct BlockChain<S> {
    pub blocks: Vec<Block>,
    pub state: S,
    pub chain_id: u64,
}

impl<S> BlockChain<S> {
    /// A fresh chain seeded with `genesis` and no history before it.
    pub fn new(genesis: Block, state: S, chain_id: u64) -> Self {
        Self { blocks: alloc::vec![genesis], state, chain_id }
    }

    /// The block hashes `BLOCKHASH`/the history-storage predeploy must be able to serve (§4.5,
    /// §9 Open Questions): the `parent_hash` of every one of the last
    /// [`BLOCK_HASH_HISTORY_WINDOW`] retained blocks, followed by the hash of the most recent one
    /// itself. Empty if the chain has no blocks yet.
    #[must_use]
    pub fn last_256_block_hashes(&self) -> Vec<H256> {
        let start = self.blocks.len().saturating_sub(BLOCK_HASH_HISTORY_WINDOW);
        let recent = &self.blocks[start..];
        let Some(most_recent) = recent.last() else {
            return Vec::new();
        };

        let mut hashes: Vec<H256> = recent.iter().map(|block| block.header.parent_hash).collect();
        hashes.push(most_recent.header.hash());
        hashes
    }
}

/// Applies `block` to `chain` (§4.8): validates it against the chain's tip, runs its body through
/// `evm`, checks every commitment the header claims, then appends the block and prunes history.
/// On success `chain` now reflects `block`; on failure `chain` is left untouched.
pub fn state_transition<S, X>(
    chain: &mut BlockChain<S>,
    block: Block,
    evm: &mut X,
) -> Result<(), Error<CollaboratorError<S::Error, X::Error>>>
where
    S: State,
    X: Evm<S>,
{
    let parent_header =
        chain.blocks.last().map(|b| &b.header).expect("chain always contains at least a genesis block").clone();

    let excess_blob_gas = calculate_excess_blob_gas(parent_header.excess_blob_gas.as_u64(), parent_header.blob_gas_used.as_u64());
    if excess_blob_gas != block.header.excess_blob_gas.as_u64() {
        tracing::warn!(
            number = block.header.number.as_u64(),
            expected = excess_blob_gas,
            found = block.header.excess_blob_gas.as_u64(),
            "excess_blob_gas mismatch"
        );
        return Err(Error::InvalidBlock(InvalidBlock::Header(crate::error::HeaderError::ExcessBlobGasMismatch {
            expected: excess_blob_gas,
            found: block.header.excess_blob_gas.as_u64(),
        })));
    }

    validate_header(&block.header, &parent_header).map_err(|source| {
        tracing::warn!(number = block.header.number.as_u64(), error = %source, "header rejected");
        InvalidBlock::from(source)
    })?;

    if !block.ommers.is_empty() {
        tracing::warn!(number = block.header.number.as_u64(), "block carries ommers");
        return Err(Error::InvalidBlock(InvalidBlock::OmmersPresent));
    }

    let env = Env {
        block_number: block.header.number.as_u64(),
        timestamp: block.header.timestamp.as_u64(),
        coinbase: block.header.coinbase,
        prev_randao: block.header.prev_randao,
        block_gas_limit: block.header.gas_limit.as_u64(),
        base_fee_per_gas: block.header.base_fee_per_gas,
        gas_price: block.header.base_fee_per_gas,
        chain_id: chain.chain_id,
        blob_versioned_hashes: Vec::new(),
        excess_blob_gas,
    };

    let input = ApplyBodyInput {
        block_hashes: chain.last_256_block_hashes(),
        transactions: &block.transactions,
        withdrawals: &block.withdrawals,
        parent_beacon_block_root: block.header.parent_beacon_block_root,
    };

    let output = apply_body(input, &env, &mut chain.state, evm)?;

    // Every field `apply_body` computed must match what the header claims (§4.8 step 5).
    let mismatch = |field: &'static str| {
        tracing::warn!(number = block.header.number.as_u64(), field, "computed commitment does not match header");
        Error::InvalidBlock(InvalidBlock::CommitmentMismatch { field })
    };
    if output.block_gas_used != block.header.gas_used.as_u64() {
        return Err(mismatch("gas_used"));
    }
    if output.transactions_root != block.header.transactions_root {
        return Err(mismatch("transactions_root"));
    }
    if output.receipt_root != block.header.receipt_root {
        return Err(mismatch("receipt_root"));
    }
    if output.block_logs_bloom != block.header.bloom {
        return Err(mismatch("logs_bloom"));
    }
    if output.state_root != block.header.state_root {
        return Err(mismatch("state_root"));
    }
    if output.withdrawals_root != block.header.withdrawals_root {
        return Err(mismatch("withdrawals_root"));
    }
    if output.blob_gas_used != block.header.blob_gas_used.as_u64() {
        return Err(mismatch("blob_gas_used"));
    }
    if output.requests_hash != block.header.requests_hash {
        return Err(mismatch("requests_hash"));
    }

    tracing::debug!(number = block.header.number.as_u64(), gas_used = output.block_gas_used, "block applied");
    chain.blocks.push(block);
    if chain.blocks.len() > BLOCK_HASH_HISTORY_WINDOW {
        let excess = chain.blocks.len() - BLOCK_HASH_HISTORY_WINDOW;
        chain.blocks.drain(0..excess);
    }

    Ok(())
}
