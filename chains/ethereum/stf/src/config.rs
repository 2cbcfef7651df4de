use rosetta_ethereum_primitives::Address;

/// SYSTEM_ADDRESS, the caller/origin of every synthetic system call (§4.5).
pub const SYSTEM_ADDRESS: Address = Address(hex_literal::hex!("fffffffffffffffffffffffffffffffffffffffe"));

/// Predeploy invoked with `parent_beacon_block_root` at the top of every block (EIP-4788).
pub const BEACON_ROOTS_ADDRESS: Address = Address(hex_literal::hex!("000F3df6D732807Ef1319fB7B8bB8522d0Beac02"));

/// Predeploy invoked with the parent hash at the top of every block (EIP-2935).
pub const HISTORY_STORAGE_ADDRESS: Address = Address(hex_literal::hex!("0aae40965e6800cd9b1f4b05ff21581047e3f91e"));

/// Predeploy invoked after all transactions and withdrawals (EIP-7002).
pub const WITHDRAWAL_REQUEST_PREDEPLOY_ADDRESS: Address =
    Address(hex_literal::hex!("09Fc772D0857550724b07B850a4323f39112aAaA"));

/// Predeploy invoked immediately after the withdrawal-request predeploy (EIP-7251).
pub const CONSOLIDATION_REQUEST_PREDEPLOY_ADDRESS: Address =
    Address(hex_literal::hex!("01aBEa29659e5e97C95107F20bb753cD3e09bBBb"));

/// The fixed contract address `process_transaction` scans receipt logs for when extracting
/// deposit requests (§4.7.1). Not a system-call target: no code executes there for this purpose.
pub const DEPOSIT_CONTRACT_ADDRESS: Address = Address(hex_literal::hex!("00000000219ab540356cBB839Cbe05303d7705Fa"));

/// Gas stipend for every system call (§4.5).
pub const SYSTEM_TRANSACTION_GAS: u64 = 30_000_000;

/// Only commitment kind EIP-4844 accepts for a blob versioned hash's leading byte.
pub const VERSIONED_HASH_VERSION_KZG: u8 = 0x01;

/// Number of blocks behind the chain tip `BLOCKHASH`/history-storage queries must serve.
pub const HISTORY_SERVE_WINDOW: u64 = 8192;

/// Target-to-limit ratio used by the base-fee formula (§4.1).
pub const ELASTICITY_MULTIPLIER: u64 = 2;

/// Maximum bytecode size a contract may deploy (EIP-170); admission rejects creation data more
/// than twice this (§4.4 step 3).
pub const MAX_CODE_SIZE: usize = 24576;

/// Request type tags, in the strict ascending order §4.7 step 5 assembles them.
pub const DEPOSIT_REQUEST_TYPE: u8 = 0x00;
pub const WITHDRAWAL_REQUEST_TYPE: u8 = 0x01;
pub const CONSOLIDATION_REQUEST_TYPE: u8 = 0x02;

/// Number of historical blocks a [`crate::BlockChain`] retains (§4.8, §9 Open Questions: the
/// retention window is 255, not 256, and the name below is kept exactly as the window it
/// describes despite that mismatch).
pub const BLOCK_HASH_HISTORY_WINDOW: usize = 255;

/// A chain's tunable protocol parameters. Everything in §6's "Fixed constants" list that
/// genuinely never varies by network lives as a `pub const` above; `ChainConfig` exists for the
/// one value every deployment of this core legitimately overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "with-codec",
    derive(parity_scale_codec::Encode, parity_scale_codec::Decode, scale_info::TypeInfo)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainConfig {
    pub chain_id: u64,
}

impl ChainConfig {
    #[must_use]
    pub const fn mainnet() -> Self {
        Self { chain_id: 1 }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}
