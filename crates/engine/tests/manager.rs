use chrono::NaiveDate;

use engine::{
    Category, EngineError, Manager, Money, NewTransaction, TransactionKind,
    TransactionListFilter, TransactionUpdate,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Alice and Bob sharing a flat: one salary each, shared rent and internet.
fn flatmates() -> Manager {
    let mut manager = Manager::new();
    manager.create_person("Alice").unwrap();
    manager.create_person("Bob").unwrap();

    manager
        .create_transaction(
            NewTransaction::income("Salary Alice", Money::new(2500_00), date(2024, 1, 25))
                .person("alice"),
        )
        .unwrap();
    manager
        .create_transaction(
            NewTransaction::income("Salary Bob", Money::new(1800_00), date(2024, 1, 27))
                .person("bob"),
        )
        .unwrap();
    manager
        .create_transaction(
            NewTransaction::expense("Rent", Money::new(900_01), date(2024, 1, 1))
                .category(Category::Housing)
                .person("alice")
                .person("bob"),
        )
        .unwrap();
    manager
        .create_transaction(
            NewTransaction::expense("Internet", Money::new(30_00), date(2024, 1, 5))
                .category(Category::Utility)
                .person("bob")
                .person("alice"),
        )
        .unwrap();
    manager
}

fn assert_links_symmetric(manager: &Manager) {
    for person in manager.persons() {
        for tx_id in &person.transactions {
            let tx = manager.transaction(tx_id).unwrap();
            assert!(tx.persons.contains(&person.id), "{tx_id} -> {}", person.id);
        }
    }
    let all = manager.transactions(&TransactionListFilter::default()).unwrap();
    for tx in all {
        for person_id in &tx.persons {
            let person = manager.person(person_id).unwrap();
            assert!(person.transactions.contains(&tx.id), "{person_id} -> {}", tx.id);
        }
    }
}

#[test]
fn create_person_uses_slug_as_id() {
    let mut manager = Manager::new();
    let id = manager.create_person("  Zoë   Martin ").unwrap();
    assert_eq!(id, "zoe-martin");
    assert_eq!(manager.person(&id).unwrap().name, "Zoë Martin");
}

#[test]
fn create_person_rejects_duplicates_and_blank_names() {
    let mut manager = Manager::new();
    manager.create_person("Alice").unwrap();
    assert_eq!(
        manager.create_person("ALICE"),
        Err(EngineError::ExistingKey("alice".to_string()))
    );
    assert!(matches!(
        manager.create_person("  "),
        Err(EngineError::InvalidName(_))
    ));
}

#[test]
fn create_transaction_validates_before_inserting() {
    let mut manager = flatmates();
    let before = manager.clone();

    let negative = NewTransaction::expense("Gym", Money::new(-10_00), date(2024, 2, 1));
    assert!(matches!(
        manager.create_transaction(negative),
        Err(EngineError::InvalidAmount(_))
    ));

    let unknown = NewTransaction::expense("Gym", Money::new(10_00), date(2024, 2, 1))
        .person("alice")
        .person("carol");
    assert_eq!(
        manager.create_transaction(unknown),
        Err(EngineError::KeyNotFound("carol".to_string()))
    );

    let clash = NewTransaction::income("rent", Money::new(1), date(2024, 2, 1));
    assert_eq!(
        manager.create_transaction(clash),
        Err(EngineError::ExistingKey("rent".to_string()))
    );

    assert_eq!(manager, before);
}

#[test]
fn create_transaction_links_each_person_once() {
    let mut manager = flatmates();
    let id = manager
        .create_transaction(
            NewTransaction::expense("Pizza", Money::new(20_00), date(2024, 2, 2))
                .note("  friday  ")
                .person("bob")
                .person("bob"),
        )
        .unwrap();

    let tx = manager.transaction(&id).unwrap();
    assert_eq!(tx.persons, vec!["bob".to_string()]);
    assert_eq!(tx.note.as_deref(), Some("friday"));
    assert_eq!(manager.person("bob").unwrap().transactions.last(), Some(&id));
    assert_links_symmetric(&manager);
}

#[test]
fn zero_amount_is_accepted() {
    let mut manager = Manager::new();
    let id = manager
        .create_transaction(NewTransaction::income("Gift", Money::ZERO, date(2024, 3, 1)))
        .unwrap();
    assert_eq!(manager.transaction(&id).unwrap().amount, Money::ZERO);
}

#[test]
fn delete_person_unlinks_transactions() {
    let mut manager = flatmates();
    let bob = manager.delete_person("bob").unwrap();
    assert_eq!(bob.transactions.len(), 3);

    assert_eq!(
        manager.transaction("rent").unwrap().persons,
        vec!["alice".to_string()]
    );
    assert!(manager.transaction("salary-bob").unwrap().is_unallocated());
    assert_eq!(manager.summary().unwrap().unallocated, 1);
    assert_links_symmetric(&manager);

    assert_eq!(
        manager.delete_person("bob").unwrap_err(),
        EngineError::KeyNotFound("bob".to_string())
    );
}

#[test]
fn delete_transaction_unlinks_persons() {
    let mut manager = flatmates();
    let rent = manager.delete_transaction("rent").unwrap();
    assert_eq!(rent.persons.len(), 2);
    assert!(!manager.person("alice").unwrap().transactions.contains(&rent.id));
    assert!(!manager.person("bob").unwrap().transactions.contains(&rent.id));
    assert_links_symmetric(&manager);
}

#[test]
fn rename_person_rewrites_references() {
    let mut manager = flatmates();
    let new_id = manager.rename_person("bob", "Robert").unwrap();
    assert_eq!(new_id, "robert");
    assert!(manager.person("bob").is_err());
    assert_eq!(
        manager.transaction("internet").unwrap().persons,
        vec!["robert".to_string(), "alice".to_string()]
    );
    assert_links_symmetric(&manager);

    assert_eq!(
        manager.rename_person("robert", "alice"),
        Err(EngineError::ExistingKey("alice".to_string()))
    );
    // Same slug, different spelling.
    assert_eq!(manager.rename_person("alice", "ALICE").unwrap(), "alice");
    assert_eq!(manager.person("alice").unwrap().name, "ALICE");
}

#[test]
fn update_transaction_patches_and_rekeys() {
    let mut manager = flatmates();
    let new_id = manager
        .update_transaction(
            "rent",
            TransactionUpdate::new()
                .name("Rent January")
                .amount(Money::new(950_00))
                .category(None)
                .note(Some("landlord".to_string())),
        )
        .unwrap();
    assert_eq!(new_id, "rent-january");
    assert!(manager.transaction("rent").is_err());

    let tx = manager.transaction(&new_id).unwrap();
    assert_eq!(tx.amount, Money::new(950_00));
    assert_eq!(tx.category, None);
    assert_eq!(tx.note.as_deref(), Some("landlord"));
    assert_eq!(tx.date, date(2024, 1, 1));
    assert!(manager.person("alice").unwrap().transactions.contains(&new_id));
    assert_links_symmetric(&manager);
}

#[test]
fn update_transaction_failure_leaves_state_untouched() {
    let mut manager = flatmates();
    let before = manager.clone();

    assert_eq!(
        manager.update_transaction("rent", TransactionUpdate::new().name("Internet")),
        Err(EngineError::ExistingKey("internet".to_string()))
    );
    assert!(matches!(
        manager.update_transaction(
            "rent",
            TransactionUpdate::new()
                .date(date(2024, 6, 1))
                .amount(Money::new(-1))
        ),
        Err(EngineError::InvalidAmount(_))
    ));
    assert_eq!(
        manager.update_transaction("nope", TransactionUpdate::new()),
        Err(EngineError::KeyNotFound("nope".to_string()))
    );
    assert_eq!(manager, before);
}

#[test]
fn update_transaction_can_switch_kind() {
    let mut manager = flatmates();
    manager
        .update_transaction("internet", TransactionUpdate::new().kind(TransactionKind::Income))
        .unwrap();
    let tx = manager.transaction("internet").unwrap();
    assert_eq!(tx.value(), Money::new(30_00));
}

#[test]
fn assign_and_unassign() {
    let mut manager = flatmates();
    manager.assign("salary-bob", "alice").unwrap();
    assert_eq!(
        manager.assign("salary-bob", "alice"),
        Err(EngineError::ExistingKey("alice in salary-bob".to_string()))
    );
    assert_links_symmetric(&manager);

    manager.unassign("salary-bob", "alice").unwrap();
    assert_eq!(
        manager.unassign("salary-bob", "alice"),
        Err(EngineError::KeyNotFound("alice in salary-bob".to_string()))
    );
    assert_eq!(
        manager.assign("salary-bob", "carol"),
        Err(EngineError::KeyNotFound("carol".to_string()))
    );
    assert_links_symmetric(&manager);
}

#[test]
fn transactions_are_filtered_and_ordered_by_date() {
    let manager = flatmates();

    let all: Vec<_> = manager
        .transactions(&TransactionListFilter::default())
        .unwrap()
        .into_iter()
        .map(|tx| tx.id.as_str())
        .collect();
    assert_eq!(all, vec!["rent", "internet", "salary-alice", "salary-bob"]);

    let expenses = manager
        .transactions(&TransactionListFilter {
            kind: Some(TransactionKind::Expense),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(expenses.len(), 2);

    let bob_late = manager
        .transactions(&TransactionListFilter {
            person: Some("bob".to_string()),
            from: Some(date(2024, 1, 5)),
            to: Some(date(2024, 1, 31)),
            ..Default::default()
        })
        .unwrap();
    let ids: Vec<_> = bob_late.iter().map(|tx| tx.id.as_str()).collect();
    assert_eq!(ids, vec!["internet", "salary-bob"]);

    let housing = manager
        .transactions(&TransactionListFilter {
            category: Some(Category::Housing),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(housing.len(), 1);
}

#[test]
fn transactions_filter_rejects_bad_input() {
    let manager = flatmates();
    assert!(matches!(
        manager.transactions(&TransactionListFilter {
            from: Some(date(2024, 2, 1)),
            to: Some(date(2024, 1, 1)),
            ..Default::default()
        }),
        Err(EngineError::InvalidDate(_))
    ));
    assert_eq!(
        manager
            .transactions(&TransactionListFilter {
                person: Some("carol".to_string()),
                ..Default::default()
            })
            .unwrap_err(),
        EngineError::KeyNotFound("carol".to_string())
    );
}

#[test]
fn summary_totals() {
    let summary = flatmates().summary().unwrap();
    assert_eq!(summary.persons.len(), 2);
    assert_eq!(summary.incomes.len(), 2);
    assert_eq!(summary.expenses.len(), 2);
    assert_eq!(summary.total_incomes, Money::new(4300_00));
    assert_eq!(summary.total_expenses, Money::new(930_01));
    assert_eq!(summary.balance, Money::new(3369_99));
    assert_eq!(summary.unallocated, 0);
}

#[test]
fn person_report_uses_shares() {
    let manager = flatmates();

    let alice = manager.person_report("alice").unwrap();
    // Alice is first on rent and gets the odd cent.
    assert_eq!(alice.expenses[0].amount, Money::new(450_01));
    assert_eq!(alice.expenses[1].amount, Money::new(15_00));
    assert_eq!(alice.total_incomes, Money::new(2500_00));
    assert_eq!(alice.total_expenses, Money::new(465_01));
    assert_eq!(alice.profits, Money::new(2034_99));
    assert_eq!(alice.total_shared_incomes, Money::ZERO);
    assert_eq!(alice.total_shared_expenses, Money::new(465_01));

    let bob = manager.person_report("bob").unwrap();
    assert_eq!(bob.total_expenses, Money::new(465_00));
    assert_eq!(
        alice.total_expenses + bob.total_expenses,
        manager.summary().unwrap().total_expenses
    );
}

#[test]
fn person_report_for_unknown_person() {
    assert_eq!(
        flatmates().person_report("carol").unwrap_err(),
        EngineError::KeyNotFound("carol".to_string())
    );
}

#[test]
fn totals_out_of_range_are_errors() {
    let huge: Money = "92233720368547758".parse().unwrap();
    let mut manager = Manager::new();
    manager.create_person("Alice").unwrap();
    for name in ["Jackpot", "Second Jackpot"] {
        manager
            .create_transaction(NewTransaction::income(name, huge, date(2024, 3, 1)).person("alice"))
            .unwrap();
    }

    assert!(matches!(
        manager.summary(),
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        manager.person_report("alice"),
        Err(EngineError::InvalidAmount(_))
    ));

    manager.delete_transaction("second-jackpot").unwrap();
    assert_eq!(manager.summary().unwrap().balance, huge);
}
