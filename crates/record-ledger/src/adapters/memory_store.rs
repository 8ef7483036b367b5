use crate::domain::{Account, Address, LedgerError, ProgramId, Pubkey, Record};
use crate::ports::AccountStore;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::trace;

/// In-memory implementation of AccountStore.
///
/// Every operation runs inside a single lock acquisition, which makes each
/// call atomic and gives concurrent creates on one address a single winner.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Address, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn exists(&self, address: &Address) -> Result<bool, LedgerError> {
        Ok(self.accounts.read().contains_key(address))
    }

    fn create(
        &self,
        address: Address,
        program_id: ProgramId,
        owner: Pubkey,
        record: Record,
    ) -> Result<Account, LedgerError> {
        let mut accounts = self.accounts.write();
        match accounts.entry(address) {
            Entry::Occupied(_) => Err(LedgerError::DuplicateAccount { address }),
            Entry::Vacant(slot) => {
                let account = Account {
                    address,
                    program_id,
                    owner,
                    record,
                };
                trace!(
                    %address,
                    kind = account.record.kind(),
                    bytes = account.record.encoded_len().ok(),
                    "account created"
                );
                Ok(slot.insert(account).clone())
            }
        }
    }

    fn fetch(&self, address: &Address) -> Result<Account, LedgerError> {
        self.accounts
            .read()
            .get(address)
            .cloned()
            .ok_or(LedgerError::AccountNotFound { address: *address })
    }

    fn update(&self, address: &Address, record: Record) -> Result<Account, LedgerError> {
        let mut accounts = self.accounts.write();
        let account = accounts
            .get_mut(address)
            .ok_or(LedgerError::AccountNotFound { address: *address })?;
        trace!(%address, bytes = record.encoded_len().ok(), "account updated");
        account.record = record;
        Ok(account.clone())
    }

    fn delete(&self, address: &Address) -> Result<Account, LedgerError> {
        let removed = self
            .accounts
            .write()
            .remove(address)
            .ok_or(LedgerError::AccountNotFound { address: *address })?;
        trace!(%address, "account deleted");
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.accounts.read().len()
    }

    fn snapshot(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.read().values().cloned().collect();
        accounts.sort_by_key(|account| account.address);
        accounts
    }
}
