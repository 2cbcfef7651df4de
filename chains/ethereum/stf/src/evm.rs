//! The `Evm` collaborator trait (§6) and the message/environment/output types C5 and C6 build to
//! drive it. The real interpreter is out of scope here (§1); this is the seam it plugs into.

use alloc::collections::BTreeSet;
use rosetta_ethereum_primitives::{Address, Authorization, Bytes, Log, H256, U256};

/// A single message call: either a transaction's top-level call or a system call (§4.5/§4.6).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub caller: Address,
    pub origin: Address,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Bytes,
    pub gas_limit: u64,
    pub should_transfer_value: bool,
    pub depth: u32,
    /// Addresses and storage keys preloaded from the transaction's access list (§4.6 step 5);
    /// empty for system calls.
    pub access_list: Vec<(Address, Vec<H256>)>,
    /// EIP-7702 authorizations to apply before execution; empty outside set-code transactions.
    pub authorization_list: Vec<Authorization>,
}

impl Message {
    /// A system call: caller and origin both [`crate::config::SYSTEM_ADDRESS`], no value
    /// transfer, depth zero, no preloaded access list (§4.5).
    #[must_use]
    pub fn system_call(to: Address, data: Bytes) -> Self {
        Self {
            caller: crate::config::SYSTEM_ADDRESS,
            origin: crate::config::SYSTEM_ADDRESS,
            to: Some(to),
            value: U256::zero(),
            data,
            gas_limit: crate::config::SYSTEM_TRANSACTION_GAS,
            should_transfer_value: false,
            depth: 0,
            access_list: Vec::new(),
            authorization_list: Vec::new(),
        }
    }
}

/// Block-level execution environment, reused unchanged across every call in a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Env {
    pub block_number: u64,
    pub timestamp: u64,
    pub coinbase: Address,
    pub prev_randao: H256,
    pub block_gas_limit: u64,
    pub base_fee_per_gas: U256,
    pub gas_price: U256,
    pub chain_id: u64,
    pub blob_versioned_hashes: Vec<H256>,
    pub excess_blob_gas: u64,
}

/// What a completed call reports back to its driver (§4.6 step 7).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct MessageCallOutput {
    pub gas_left: u64,
    pub gas_refund: u64,
    pub logs: Vec<Log>,
    pub return_data: Bytes,
    pub accounts_to_delete: Vec<Address>,
    pub touched_accounts: BTreeSet<Address>,
    pub succeeded: bool,
}

/// The EVM collaborator: given a prepared [`Message`] and the block [`Env`], executes it against
/// `state` and reports the outcome. The real interpreter is out of scope for this crate (§1); it
/// is always supplied by the caller.
pub trait Evm<S: crate::state::State> {
    type Error;

    fn process_message_call(
        &mut self,
        message: Message,
        env: &Env,
        state: &mut S,
    ) -> Result<MessageCallOutput, Self::Error>;
}
