use std::sync::Mutex;

use async_trait::async_trait;

use crate::accounts::{
    repo::{AccountStore, StoreError},
    repo_types::Account,
};

/// In-process store used by router tests.
#[derive(Default)]
pub struct MemoryAccountStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i32,
    rows: Vec<Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // a poisoned lock only means another test panicked mid-write
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_account(&self, mut account: Account) -> Result<Account, StoreError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        account.id = inner.next_id;
        inner.rows.push(account.clone());
        Ok(account)
    }

    async fn delete_account(&self, id: i32) -> Result<(), StoreError> {
        self.lock().rows.retain(|a| a.id != id);
        Ok(())
    }

    async fn update_account(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.lock().rows.clone())
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Account, StoreError> {
        self.lock()
            .rows
            .iter()
            .rev()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::AccountNotFound(id))
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, StoreError> {
        self.lock()
            .rows
            .iter()
            .rev()
            .find(|a| a.number == number)
            .cloned()
            .ok_or(StoreError::NumberNotFound(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::services::new_account;

    #[tokio::test]
    async fn duplicate_numbers_resolve_to_the_last_row() {
        let store = MemoryAccountStore::new();
        let mut first = new_account("A", "One", "pw").unwrap();
        let mut second = new_account("B", "Two", "pw").unwrap();
        first.number = 42;
        second.number = 42;
        store.create_account(first).await.unwrap();
        let second = store.create_account(second).await.unwrap();

        let found = store.get_account_by_number(42).await.unwrap();
        assert_eq!(found.id, second.id);
        assert_eq!(found.first_name, "B");
    }

    #[tokio::test]
    async fn ids_are_assigned_in_order() {
        let store = MemoryAccountStore::new();
        let a = store.create_account(new_account("A", "A", "pw").unwrap()).await.unwrap();
        let b = store.create_account(new_account("B", "B", "pw").unwrap()).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.get_accounts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn update_changes_nothing() {
        let store = MemoryAccountStore::new();
        let a = store.create_account(new_account("A", "A", "pw").unwrap()).await.unwrap();
        store.update_account().await.unwrap();
        assert_eq!(store.get_account_by_id(a.id).await.unwrap(), a);
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = MemoryAccountStore::new();
        let err = store.get_account_by_id(999).await.unwrap_err();
        assert!(matches!(err, StoreError::AccountNotFound(999)));
        assert_eq!(err.to_string(), "Account 999 not found");
    }

    #[tokio::test]
    async fn deleting_missing_id_succeeds() {
        let store = MemoryAccountStore::new();
        let a = store.create_account(new_account("A", "A", "pw").unwrap()).await.unwrap();
        store.delete_account(999).await.expect("delete of missing id");
        assert_eq!(store.get_accounts().await.unwrap(), vec![a]);
    }
}
