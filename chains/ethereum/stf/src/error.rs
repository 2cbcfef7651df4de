/// Top-level error returned by [`crate::state_transition`].
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    #[error("invalid block: {0}")]
    InvalidBlock(#[from] InvalidBlock),
    #[error("state error: {0}")]
    State(E),
}

/// Folds the two collaborator-associated error types (`State::Error`, `Evm::Error`) into the
/// single `E` that flows through [`Error::State`]. C5/C6/C7 are generic over both collaborators
/// at once and need one channel to report either kind of failure.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError<SE, EE> {
    #[error("state: {0}")]
    State(SE),
    #[error("evm: {0}")]
    Evm(EE),
}

/// Every way a candidate block can fail consensus validation. There is
/// deliberately no finer split than this at the public API: §7 of the core
/// this crate implements treats block rejection as a single outcome.
#[derive(Debug, thiserror::Error)]
pub enum InvalidBlock {
    #[error("header: {0}")]
    Header(#[from] HeaderError),
    #[error("transaction {index} rejected: {source}")]
    Transaction {
        index: usize,
        #[source]
        source: AdmissionError,
    },
    #[error("invalid signature: {0}")]
    Signature(#[from] SignatureError),
    #[error("ommers must be empty")]
    OmmersPresent,
    #[error("computed {field} does not match header")]
    CommitmentMismatch { field: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("gas_used {gas_used} exceeds gas_limit {gas_limit}")]
    GasUsedExceedsLimit { gas_used: u64, gas_limit: u64 },
    #[error("gas_limit {child} out of bounds of parent {parent} (max delta {max_delta})")]
    GasLimitOutOfBounds { child: u64, parent: u64, max_delta: u64 },
    #[error("gas_limit {0} below the protocol minimum of 5000")]
    GasLimitTooLow(u64),
    #[error("base_fee_per_gas {found} does not match computed {expected}")]
    BaseFeeMismatch { expected: rosetta_ethereum_primitives::U256, found: rosetta_ethereum_primitives::U256 },
    #[error("timestamp {child} does not exceed parent timestamp {parent}")]
    TimestampNotIncreasing { child: u64, parent: u64 },
    #[error("block number {child} is not parent number {parent} + 1")]
    NumberNotSequential { child: u64, parent: u64 },
    #[error("extra_data is {0} bytes, exceeds the 32 byte limit")]
    ExtraDataTooLong(usize),
    #[error("difficulty must be zero post-merge")]
    NonZeroDifficulty,
    #[error("nonce must be zero post-merge")]
    NonZeroNonce,
    #[error("ommers_hash does not equal keccak256(rlp([]))")]
    WrongOmmersHash,
    #[error("parent_hash does not equal keccak256(rlp(parent_header))")]
    WrongParentHash,
    #[error("excess_blob_gas {found} does not match computed {expected}")]
    ExcessBlobGasMismatch { expected: u64, found: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum AdmissionError {
    #[error("intrinsic cost {cost} exceeds tx.gas {gas}")]
    IntrinsicCostExceedsGas { cost: u64, gas: u64 },
    #[error("nonce {0} at the u64 maximum")]
    NonceAtMaximum(u64),
    #[error("creation data length {0} exceeds 2 * MAX_CODE_SIZE")]
    CreationDataTooLarge(usize),
    #[error("tx.gas {gas} exceeds remaining block gas {available}")]
    GasExceedsBlockAvailable { gas: u64, available: u64 },
    #[error("signature: {0}")]
    Signature(#[from] SignatureError),
    #[error("max_fee_per_gas {max_fee} below max_priority_fee_per_gas {max_priority}")]
    PriorityAboveMaxFee { max_fee: rosetta_ethereum_primitives::U256, max_priority: rosetta_ethereum_primitives::U256 },
    #[error("max_fee_per_gas {max_fee} below block base fee {base_fee}")]
    MaxFeeBelowBaseFee { max_fee: rosetta_ethereum_primitives::U256, base_fee: rosetta_ethereum_primitives::U256 },
    #[error("gas_price {gas_price} below block base fee {base_fee}")]
    GasPriceBelowBaseFee { gas_price: rosetta_ethereum_primitives::U256, base_fee: rosetta_ethereum_primitives::U256 },
    #[error("blob versioned hash does not start with the KZG commitment version byte")]
    WrongBlobVersionedHashVersion,
    #[error("max_fee_per_blob_gas {found} below computed blob gas price {expected}")]
    MaxFeePerBlobGasTooLow { expected: rosetta_ethereum_primitives::U256, found: rosetta_ethereum_primitives::U256 },
    #[error("blob/setcode transactions require a concrete `to` address")]
    MissingTo,
    #[error("setcode transactions require a non-empty authorization list")]
    EmptyAuthorizationList,
    #[error("sender nonce {account} does not match tx.nonce {tx}")]
    NonceMismatch { account: u64, tx: u64 },
    #[error("sender balance {balance} is below required {required}")]
    InsufficientBalance { balance: rosetta_ethereum_primitives::U256, required: rosetta_ethereum_primitives::U256 },
    #[error("sender code is neither empty nor a valid EOA delegation designator")]
    SenderNotEoa,
}

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("r is zero or not below SECP256K1N")]
    InvalidR,
    #[error("s is zero or above SECP256K1N / 2")]
    InvalidS,
    #[error("legacy v {0} is neither pre-EIP-155 nor a valid EIP-155 encoding")]
    InvalidLegacyV(u64),
    #[error("recovery failed")]
    RecoveryFailed,
}
