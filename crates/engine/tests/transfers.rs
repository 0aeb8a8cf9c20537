use std::sync::Arc;

use async_trait::async_trait;
use engine::{
    Engine, EngineError, Money, TransactionKind, TransactionStatus,
    store::{MemoryStore, Store, StoreError, WriteOp},
};

fn engine() -> Engine {
    Engine::builder().build()
}

async fn seed_pair(engine: &Engine, a_balance: i64, b_balance: i64) -> (String, String) {
    let a = engine
        .create_user_profile("Alice", "Doe", Money::new(a_balance))
        .await
        .unwrap();
    let b = engine
        .create_user_profile("Bob", "Ray", Money::new(b_balance))
        .await
        .unwrap();
    (a.id, b.id)
}

#[tokio::test]
async fn transfer_moves_balances_and_records_transaction() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;

    let tx = engine.transfer(&a, &b, Money::new(40_00)).await.unwrap();

    assert_eq!(tx.status, TransactionStatus::Success);
    assert_eq!(tx.kind, TransactionKind::Transfer);
    assert_eq!(tx.amount, Money::new(40_00));
    assert_eq!(tx.from_user_id, a);
    assert_eq!(tx.to_user_id, b);

    assert_eq!(engine.user(&a).await.unwrap().balance, Money::new(60_00));
    assert_eq!(engine.user(&b).await.unwrap().balance, Money::new(40_00));
}

#[tokio::test]
async fn report_reflects_single_transfer() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;
    engine.transfer(&a, &b, Money::new(40_00)).await.unwrap();

    let report = engine.report(&a).await.unwrap();
    assert_eq!(report.total_transactions, 1);
    assert_eq!(report.total_sent, Money::new(40_00));
    assert_eq!(report.total_received, Money::ZERO);
    assert_eq!(report.current_balance, Money::new(60_00));

    let report_b = engine.report(&b).await.unwrap();
    assert_eq!(report_b.total_received, Money::new(40_00));
    assert_eq!(report_b.current_balance, Money::new(40_00));
}

#[tokio::test]
async fn report_is_idempotent_without_intervening_writes() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;
    engine.transfer(&a, &b, Money::new(25_50)).await.unwrap();

    let first = engine.report(&a).await.unwrap();
    let second = engine.report(&a).await.unwrap();
    assert_eq!(first.total_sent, second.total_sent);
    assert_eq!(first.total_received, second.total_received);
    assert_eq!(first.total_transactions, second.total_transactions);
    assert_eq!(first.current_balance, second.current_balance);
}

#[tokio::test]
async fn report_for_unknown_user_is_not_found() {
    let engine = engine();
    assert!(matches!(
        engine.report("ghost@wirepay").await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn insufficient_funds_leaves_everything_untouched() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 60_00, 40_00).await;

    let err = engine.transfer(&a, &b, Money::new(150_00)).await.unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    assert_eq!(engine.user(&a).await.unwrap().balance, Money::new(60_00));
    assert_eq!(engine.user(&b).await.unwrap().balance, Money::new(40_00));
    assert_eq!(engine.report(&a).await.unwrap().total_transactions, 0);
    assert!(engine.notifications(&a).await.unwrap().is_empty());
}

#[tokio::test]
async fn self_transfer_is_rejected() {
    let engine = engine();
    let (a, _) = seed_pair(&engine, 100_00, 0).await;

    assert!(matches!(
        engine.transfer(&a, &a, Money::new(10_00)).await,
        Err(EngineError::InvalidTransfer(_))
    ));
    assert_eq!(engine.user(&a).await.unwrap().balance, Money::new(100_00));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;

    assert!(matches!(
        engine.transfer(&a, &b, Money::ZERO).await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine.transfer(&a, &b, Money::new(-5_00)).await,
        Err(EngineError::InvalidAmount(_))
    ));
}

#[tokio::test]
async fn missing_parties_map_to_sender_and_receiver_not_found() {
    let engine = engine();
    let (a, _) = seed_pair(&engine, 100_00, 0).await;

    assert!(matches!(
        engine.transfer("ghost@wirepay", &a, Money::new(1_00)).await,
        Err(EngineError::SenderNotFound(_))
    ));
    assert!(matches!(
        engine.transfer(&a, "ghost@wirepay", Money::new(1_00)).await,
        Err(EngineError::ReceiverNotFound(_))
    ));
}

#[tokio::test]
async fn conservation_across_a_sequence_of_transfers() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 100_00, 50_00).await;
    let c = engine
        .create_user_profile("Carol", "Lee", Money::new(25_00))
        .await
        .unwrap()
        .id;

    let total_before = Money::new(175_00);

    engine.transfer(&a, &b, Money::new(30_00)).await.unwrap();
    engine.transfer(&b, &c, Money::new(70_00)).await.unwrap();
    engine.transfer(&c, &a, Money::new(95_00)).await.unwrap();
    engine
        .transfer(&a, &c, Money::new(1_23))
        .await
        .unwrap();

    let total_after = engine
        .users()
        .await
        .unwrap()
        .into_iter()
        .fold(Money::ZERO, |acc, user| acc + user.balance);
    assert_eq!(total_after, total_before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_transfers_drain_to_exactly_zero() {
    let engine = Arc::new(engine());
    let (a, b) = seed_pair(&engine, 100_00, 0).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let engine = Arc::clone(&engine);
        let (a, b) = (a.clone(), b.clone());
        handles.push(tokio::spawn(async move {
            engine.transfer(&a, &b, Money::new(10_00)).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 10);
    assert_eq!(engine.user(&a).await.unwrap().balance, Money::ZERO);
    assert_eq!(engine.user(&b).await.unwrap().balance, Money::new(100_00));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn oversubscribed_concurrent_transfers_never_go_negative() {
    let engine = Arc::new(engine());
    let (a, b) = seed_pair(&engine, 50_00, 0).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let engine = Arc::clone(&engine);
        let (a, b) = (a.clone(), b.clone());
        handles.push(tokio::spawn(async move {
            engine.transfer(&a, &b, Money::new(10_00)).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    // Only five withdrawals fit; the rest must fail the sufficiency check.
    assert_eq!(successes, 5);
    let balance_a = engine.user(&a).await.unwrap().balance;
    assert!(!balance_a.is_negative());
    assert_eq!(balance_a, Money::ZERO);
    assert_eq!(engine.user(&b).await.unwrap().balance, Money::new(50_00));
}

#[tokio::test]
async fn transfer_notifies_both_parties() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;
    engine.transfer(&a, &b, Money::new(40_00)).await.unwrap();

    let sender_notes = engine.notifications(&a).await.unwrap();
    assert_eq!(sender_notes.len(), 1);
    assert!(sender_notes[0].message.contains("sent 40.00"));
    assert!(sender_notes[0].message.contains(&b));

    let receiver_notes = engine.notifications(&b).await.unwrap();
    assert_eq!(receiver_notes.len(), 1);
    assert!(receiver_notes[0].message.contains("Received 40.00"));
    assert!(receiver_notes[0].message.contains(&a));
}

#[tokio::test]
async fn account_transfers_run_on_the_account_ledger() {
    let engine = engine();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;

    let from = engine
        .create_account(&a, "0001", "First Bank", Money::new(500_00))
        .await
        .unwrap();
    let to = engine
        .create_account(&b, "0002", "First Bank", Money::new(10_00))
        .await
        .unwrap();

    let tx = engine
        .transfer_accounts(&from.id, &to.id, Money::new(200_00))
        .await
        .unwrap();
    assert_eq!(tx.from_user_id, a);
    assert_eq!(tx.to_user_id, b);

    let accounts = engine.accounts_for_user(&a).await.unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].balance, Money::new(300_00));

    // Notifications land on the owning users.
    let notes = engine.notifications(&a).await.unwrap();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("Sent 200.00"));

    // Account transfers surface in the owners' reports.
    let report = engine.report(&a).await.unwrap();
    assert_eq!(report.total_transactions, 1);
    assert_eq!(report.total_sent, Money::new(200_00));
}

#[tokio::test]
async fn account_creation_overwrites_owner_balance() {
    let engine = engine();
    let (a, _) = seed_pair(&engine, 100_00, 0).await;

    engine
        .create_account(&a, "0001", "First Bank", Money::new(9_99))
        .await
        .unwrap();

    assert_eq!(engine.user(&a).await.unwrap().balance, Money::new(9_99));
}

#[tokio::test]
async fn account_creation_without_owner_still_succeeds() {
    let engine = engine();
    let account = engine
        .create_account("ghost@wirepay", "0003", "First Bank", Money::new(1_00))
        .await
        .unwrap();

    assert_eq!(engine.accounts().await.unwrap().len(), 1);
    assert_eq!(account.user_id, "ghost@wirepay");
}

#[tokio::test]
async fn contacts_compose_display_names() {
    let engine = engine();
    seed_pair(&engine, 0, 0).await;

    let mut contacts = engine.contacts().await.unwrap();
    contacts.sort_by(|x, y| x.id.cmp(&y.id));
    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].name, "Alice Doe");
    assert_eq!(contacts[0].payment_id, contacts[0].id);
}

#[tokio::test]
async fn create_user_fails_closed_on_duplicates_and_blanks() {
    let engine = engine();

    assert!(engine.create_user("Dana", "dana@example.com", "pw").await.unwrap());
    assert!(!engine.create_user("Dana", "dana@example.com", "pw2").await.unwrap());
    assert!(!engine.create_user("", "x@example.com", "pw").await.unwrap());
    assert!(!engine.create_user("Eve", "", "pw").await.unwrap());
    assert!(!engine.create_user("Eve", "eve@example.com", "").await.unwrap());
}

#[tokio::test]
async fn authentication_is_exact_match() {
    let engine = engine();
    engine.create_user("Dana", "dana@example.com", "pw").await.unwrap();

    let user = engine
        .check_authentication("dana@example.com", "pw")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.first_name, "Dana");

    assert!(engine
        .check_authentication("dana@example.com", "wrong")
        .await
        .unwrap()
        .is_none());
    assert!(engine
        .check_authentication("nobody@example.com", "pw")
        .await
        .unwrap()
        .is_none());
    assert!(engine.user_exists("dana@example.com").await.unwrap());
    assert!(!engine.user_exists("nobody@example.com").await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registration_of_one_email_creates_one_user() {
    let engine = Arc::new(engine());

    let mut handles = Vec::new();
    for i in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .create_user(&format!("Dana{i}"), "dana@example.com", "pw")
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            created += 1;
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn duplicate_bank_routing_code_is_rejected() {
    let engine = engine();
    engine
        .register_bank("First Bank", "FB0001", "Main", "1 High St")
        .await
        .unwrap();

    assert!(matches!(
        engine.register_bank("Other Bank", "FB0001", "West", "2 Low St").await,
        Err(EngineError::ExistingKey(_))
    ));
    assert_eq!(engine.banks().await.unwrap().len(), 1);
}

/// Store wrapper that starts failing on command; read failures surface as
/// `StoreUnavailable`, batch failures as `PartialApplication`.
struct FlakyStore {
    inner: MemoryStore,
    fail_reads: std::sync::atomic::AtomicBool,
    fail_batches: std::sync::atomic::AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: std::sync::atomic::AtomicBool::new(false),
            fail_batches: std::sync::atomic::AtomicBool::new(false),
        }
    }

    fn unavailable() -> StoreError {
        StoreError::Unavailable("connection refused".to_string())
    }

    fn reads_down(&self) -> bool {
        self.fail_reads.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[async_trait]
impl Store for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.reads_down() {
            return Err(Self::unavailable());
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }

    async fn hash_get(&self, collection: &str, id: &str) -> Result<Option<String>, StoreError> {
        if self.reads_down() {
            return Err(Self::unavailable());
        }
        self.inner.hash_get(collection, id).await
    }

    async fn hash_set(&self, collection: &str, id: &str, value: &str) -> Result<(), StoreError> {
        self.inner.hash_set(collection, id, value).await
    }

    async fn hash_get_all(&self, collection: &str) -> Result<Vec<(String, String)>, StoreError> {
        if self.reads_down() {
            return Err(Self::unavailable());
        }
        self.inner.hash_get_all(collection).await
    }

    async fn list_push_front(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.list_push_front(key, value).await
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.inner.list_range(key).await
    }

    async fn apply(&self, batch: Vec<WriteOp>) -> Result<(), StoreError> {
        if self.fail_batches.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.inner.apply(batch).await
    }
}

#[tokio::test]
async fn unreachable_store_surfaces_as_store_unavailable() {
    let store = Arc::new(FlakyStore::new());
    let engine = Engine::builder().store(store.clone()).build();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;

    store
        .fail_reads
        .store(true, std::sync::atomic::Ordering::SeqCst);

    assert!(matches!(
        engine.transfer(&a, &b, Money::new(1_00)).await,
        Err(EngineError::StoreUnavailable(_))
    ));
    assert!(matches!(
        engine.users().await,
        Err(EngineError::StoreUnavailable(_))
    ));
}

#[tokio::test]
async fn failed_persistence_batch_surfaces_as_partial_application() {
    let store = Arc::new(FlakyStore::new());
    let engine = Engine::builder().store(store.clone()).build();
    let (a, b) = seed_pair(&engine, 100_00, 0).await;

    store
        .fail_batches
        .store(true, std::sync::atomic::Ordering::SeqCst);

    assert!(matches!(
        engine.transfer(&a, &b, Money::new(1_00)).await,
        Err(EngineError::PartialApplication(_))
    ));
}
