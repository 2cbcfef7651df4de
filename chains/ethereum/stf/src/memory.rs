//! In-memory `State`/`Evm` test doubles (§6), used by this crate's own tests and available to
//! callers wiring up a quick integration test of their own.

use crate::{
    evm::{Env, Evm, Message, MessageCallOutput},
    state::{Account, State},
};
use alloc::collections::{BTreeMap, BTreeSet};
use core::convert::Infallible;
use rosetta_ethereum_primitives::{
    constants::KECCAK_EMPTY,
    crypto::{Crypto, DefaultCrypto},
    Address, Bytes, Withdrawal, H256, U256,
};
use rosetta_ethereum_trie::db::{trie_hash_db, AccountInfo, DbAccount};

/// Wei per Gwei; withdrawal amounts arrive denominated in Gwei (§4.7.2).
const GWEI_TO_WEI: u64 = 1_000_000_000;

/// A `BTreeMap`-backed account store. Never fails: every [`State`] method is infallible here, so
/// `Error = Infallible`. Intended for tests, not production use — it keeps every account in
/// memory and recomputes the whole trie from scratch on every `state_root()` call.
#[derive(Clone, Debug, Default)]
pub struct InMemoryState {
    accounts: BTreeMap<Address, Account>,
}

impl InMemoryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or overwrites `address`'s account, e.g. to fund a sender before a test transaction.
    pub fn set_account(&mut self, address: Address, account: Account) {
        self.accounts.insert(address, account);
    }

    #[must_use]
    pub fn get(&self, address: Address) -> Option<&Account> {
        self.accounts.get(&address)
    }
}

impl State for InMemoryState {
    type Error = Infallible;

    fn get_account(&self, address: Address) -> Result<Account, Self::Error> {
        Ok(self.accounts.get(&address).cloned().unwrap_or_default())
    }

    fn set_account_balance(&mut self, address: Address, balance: U256) -> Result<(), Self::Error> {
        self.accounts.entry(address).or_default().balance = balance;
        Ok(())
    }

    fn increment_nonce(&mut self, address: Address) -> Result<(), Self::Error> {
        self.accounts.entry(address).or_default().nonce += 1;
        Ok(())
    }

    fn destroy_account(&mut self, address: Address) -> Result<(), Self::Error> {
        self.accounts.remove(&address);
        Ok(())
    }

    fn set_account_code(&mut self, address: Address, code: Bytes) -> Result<(), Self::Error> {
        self.accounts.entry(address).or_default().code = code;
        Ok(())
    }

    fn destroy_touched_empty_accounts(&mut self, touched: &BTreeSet<Address>) -> Result<(), Self::Error> {
        for address in touched {
            if self.accounts.get(address).is_some_and(Account::is_empty) {
                self.accounts.remove(address);
            }
        }
        Ok(())
    }

    fn account_exists_and_is_empty(&self, address: Address) -> Result<bool, Self::Error> {
        Ok(self.accounts.get(&address).is_some_and(Account::is_empty))
    }

    fn process_withdrawal(&mut self, withdrawal: &Withdrawal) -> Result<(), Self::Error> {
        let amount_wei = U256::from(withdrawal.amount.as_u64()) * U256::from(GWEI_TO_WEI);
        self.accounts.entry(withdrawal.address).or_default().balance += amount_wei;
        Ok(())
    }

    fn state_root(&self) -> H256 {
        let accounts: BTreeMap<Address, DbAccount> = self
            .accounts
            .iter()
            .filter(|(_, account)| !account.is_empty())
            .map(|(address, account)| {
                let code_hash =
                    if account.code.is_empty() { KECCAK_EMPTY } else { DefaultCrypto::keccak256(&account.code) };
                let info = AccountInfo { balance: account.balance, nonce: account.nonce, code_hash, code: None };
                (*address, DbAccount { info, ..DbAccount::default() })
            })
            .collect();
        trie_hash_db(&accounts).1
    }
}

/// An `Evm` that performs no execution: every call succeeds immediately with no state effects, no
/// logs, and all gas refunded. Useful for exercising C5/C7/C8's bookkeeping in isolation from a
/// real interpreter.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEvm;

impl<S: State> Evm<S> for NoopEvm {
    type Error = Infallible;

    fn process_message_call(
        &mut self,
        message: Message,
        _env: &Env,
        _state: &mut S,
    ) -> Result<MessageCallOutput, Self::Error> {
        Ok(MessageCallOutput { gas_left: message.gas_limit, succeeded: true, ..MessageCallOutput::default() })
    }
}
