//! Integration tests for bank-ledger

use bank_ledger::{
    utils::MemoryStorage, Amount, CallerIdentity, Ledger, LedgerConfig, LedgerError,
    LedgerStorage, ParticipantId, TransferEvent, TransferObserver,
};
use bigdecimal::BigDecimal;
use std::sync::{Arc, Mutex};

fn participant(id: &str) -> ParticipantId {
    id.parse().unwrap()
}

fn caller(id: &str) -> CallerIdentity {
    CallerIdentity::authenticated(participant(id))
}

#[derive(Default)]
struct AuditTrail(Mutex<Vec<TransferEvent>>);

impl TransferObserver for AuditTrail {
    fn on_transfer(&self, event: &TransferEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

#[tokio::test]
async fn test_deposit_then_query() {
    let ledger = Ledger::new(MemoryStorage::new());
    let a = caller("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

    ledger.deposit(&a, Amount::from(1000)).await.unwrap();

    assert_eq!(ledger.balance(&a).await.unwrap(), Amount::from(1000));
}

#[tokio::test]
async fn test_transfer_emits_single_notification() {
    let audit = Arc::new(AuditTrail::default());
    let ledger = Ledger::new(MemoryStorage::new()).with_observer(audit.clone());
    let a = caller("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");
    let b = participant("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
    let mut rx = ledger.subscribe();

    ledger.deposit(&a, Amount::from(1000)).await.unwrap();
    ledger.transfer(&a, &b, Amount::from(500)).await.unwrap();

    assert_eq!(ledger.balance(&a).await.unwrap(), Amount::from(500));
    assert_eq!(ledger.balance_of(&b).await.unwrap(), Amount::from(500));

    let events = audit.0.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].from, *a.participant());
    assert_eq!(events[0].to, b);
    assert_eq!(events[0].amount, Amount::from(500));

    assert_eq!(rx.recv().await.unwrap(), events[0]);
}

#[tokio::test]
async fn test_overdraft_is_rejected() {
    let ledger = Ledger::new(MemoryStorage::new());
    let a = caller("alice");
    let b = participant("bob");

    ledger.deposit(&a, Amount::from(1000)).await.unwrap();
    let result = ledger.transfer(&a, &b, Amount::from(1500)).await;

    match result {
        Err(err @ LedgerError::InsufficientBalance { .. }) => {
            assert_eq!(err.to_string(), "Insufficient balance");
        }
        other => panic!("expected insufficient balance, got {other:?}"),
    }

    assert_eq!(ledger.balance(&a).await.unwrap(), Amount::from(1000));
    assert_eq!(ledger.balance_of(&b).await.unwrap(), Amount::zero());
}

#[tokio::test]
async fn test_transfer_of_entire_balance() {
    let ledger = Ledger::new(MemoryStorage::new());
    let a = caller("alice");
    let b = participant("bob");

    ledger.deposit(&a, Amount::from(1000)).await.unwrap();
    ledger.transfer(&a, &b, Amount::from(1000)).await.unwrap();

    assert_eq!(ledger.balance(&a).await.unwrap(), Amount::zero());
    assert_eq!(ledger.balance_of(&b).await.unwrap(), Amount::from(1000));
}

#[tokio::test]
async fn test_chain_of_transfers_conserves_supply() {
    let ledger = Ledger::new(MemoryStorage::new());
    let acc1 = caller("acc1");
    let acc2 = caller("acc2");
    let acc3 = participant("acc3");

    ledger.deposit(&acc1, Amount::from(1000)).await.unwrap();

    ledger
        .transfer(&acc1, acc2.participant(), Amount::from(300))
        .await
        .unwrap();
    ledger
        .transfer(&acc1, &acc3, Amount::from(400))
        .await
        .unwrap();
    ledger
        .transfer(&acc2, &acc3, Amount::from(100))
        .await
        .unwrap();

    assert_eq!(ledger.balance(&acc1).await.unwrap(), Amount::from(300));
    assert_eq!(ledger.balance(&acc2).await.unwrap(), Amount::from(200));
    assert_eq!(ledger.balance_of(&acc3).await.unwrap(), Amount::from(500));
    assert_eq!(ledger.total_supply().await.unwrap(), BigDecimal::from(1000));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_transfers_never_overspend() {
    let audit = Arc::new(AuditTrail::default());
    let ledger = Arc::new(Ledger::new(MemoryStorage::new()).with_observer(audit.clone()));
    let spender = caller("spender");

    ledger.deposit(&spender, Amount::from(500)).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..100 {
        let ledger = Arc::clone(&ledger);
        let spender = spender.clone();
        handles.push(tokio::spawn(async move {
            let recipient = ParticipantId::new(format!("recipient-{}", i % 7));
            ledger.transfer(&spender, &recipient, Amount::from(10)).await
        }));
    }

    let mut succeeded = 0;
    let mut insufficient = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(LedgerError::InsufficientBalance { .. }) => insufficient += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(succeeded, 50);
    assert_eq!(insufficient, 50);
    assert_eq!(ledger.balance(&spender).await.unwrap(), Amount::zero());
    assert_eq!(ledger.total_supply().await.unwrap(), BigDecimal::from(500));
    assert_eq!(audit.0.lock().unwrap().len(), 50);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deposits_and_cross_transfers() {
    let ledger = Arc::new(Ledger::new(MemoryStorage::new()));
    let names = ["p0", "p1", "p2", "p3"];

    for name in names {
        ledger.deposit(&caller(name), Amount::from(1000)).await.unwrap();
    }

    let mut handles = Vec::new();
    for round in 0..200usize {
        let ledger = Arc::clone(&ledger);
        let from = caller(names[round % 4]);
        let to = participant(names[(round + 1) % 4]);
        handles.push(tokio::spawn(async move {
            if round % 10 == 0 {
                ledger.deposit(&from, Amount::from(5)).await.map(|_| ())
            } else {
                ledger
                    .transfer(&from, &to, Amount::from((round % 13) as u64))
                    .await
                    .map(|_| ())
            }
        }));
    }

    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) | Err(LedgerError::InsufficientBalance { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    // 20 deposits of 5 on top of the initial 4000
    assert_eq!(ledger.total_supply().await.unwrap(), BigDecimal::from(4100));
}

#[tokio::test]
async fn test_snapshot_restores_into_new_store() {
    let ledger = Ledger::new(MemoryStorage::new());
    let a = caller("alice");

    ledger.deposit(&a, Amount::from(1000)).await.unwrap();
    ledger
        .transfer(&a, &participant("bob"), Amount::from(250))
        .await
        .unwrap();

    let snapshot = ledger.snapshot().await.unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored_storage = MemoryStorage::from_snapshot(serde_json::from_str(&json).unwrap());

    assert_eq!(
        restored_storage.balance(&participant("alice")).await.unwrap(),
        Amount::from(750)
    );
    assert_eq!(
        restored_storage.balance(&participant("bob")).await.unwrap(),
        Amount::from(250)
    );
    assert_eq!(snapshot.total(), BigDecimal::from(1000));
}

#[tokio::test]
async fn test_config_loaded_from_json() {
    let config = LedgerConfig::from_json_str(
        r#"{"allow_zero_amount_transfers": false, "event_channel_capacity": 16}"#,
    )
    .unwrap();
    let ledger = Ledger::with_config(MemoryStorage::new(), config).unwrap();

    let result = ledger
        .transfer(&caller("alice"), &participant("bob"), Amount::zero())
        .await;
    assert!(matches!(result, Err(LedgerError::Validation(_))));
    assert_eq!(ledger.config().event_channel_capacity, 16);
}
