//! The `State` collaborator trait (§6): the persistent-storage seam this crate is injected
//! against. A trait with an associated `Error` type and `Result`-returning methods; no method
//! panics.

use alloc::collections::BTreeSet;
use rosetta_ethereum_primitives::{Address, Bytes, Withdrawal, H256, U256};

/// An account's consensus-relevant fields. Storage is not exposed here: the EVM collaborator
/// reads and writes storage directly against `State`'s implementor, this core only ever needs
/// balance, nonce, and code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub nonce: u64,
    pub balance: U256,
    pub code: Bytes,
}

impl Account {
    /// An account is "empty" in the EIP-161 sense: zero nonce, zero balance, no code. Both
    /// `destroy_touched_empty_accounts` and the coinbase-destroy condition (§4.6.1) key on this.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nonce == 0 && self.balance.is_zero() && self.code.is_empty()
    }
}

/// Everything the core reads and writes against persistent state. No method panics; every
/// fallible operation surfaces through `Self::Error`.
pub trait State {
    type Error;

    fn get_account(&self, address: Address) -> Result<Account, Self::Error>;
    fn set_account_balance(&mut self, address: Address, balance: U256) -> Result<(), Self::Error>;
    fn increment_nonce(&mut self, address: Address) -> Result<(), Self::Error>;
    fn destroy_account(&mut self, address: Address) -> Result<(), Self::Error>;

    /// Sets `address`'s code outright, e.g. installing or clearing an EIP-7702 delegation
    /// designator (§3.2). Does not touch balance or nonce.
    fn set_account_code(&mut self, address: Address, code: Bytes) -> Result<(), Self::Error>;

    /// Destroys every address in `touched` whose account is currently empty (§9 Open Questions:
    /// called unconditionally after every system call, not only when one is believed reachable).
    fn destroy_touched_empty_accounts(&mut self, touched: &BTreeSet<Address>) -> Result<(), Self::Error>;

    fn account_exists_and_is_empty(&self, address: Address) -> Result<bool, Self::Error>;

    /// Credits `withdrawal.amount` (denominated in Gwei, converted to Wei by the implementor) to
    /// `withdrawal.address`.
    fn process_withdrawal(&mut self, withdrawal: &Withdrawal) -> Result<(), Self::Error>;

    /// The root hash of the account trie in its current state.
    fn state_root(&self) -> H256;
}
