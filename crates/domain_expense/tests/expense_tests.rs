//! Behavioral tests for the expense domain

use std::collections::HashMap;
use std::sync::Arc;

use core_kernel::{Cents, UserId};
use domain_expense::{
    compute_shares, ExpenseError, ExpenseService, ExpenseStatus, NewExpense, ShareSpec,
    SplitType, UpdateExpense,
};
use domain_household::{Caller, Household, User};
use proptest::prelude::*;
use test_utils::{
    fixtures, InMemoryExpenses, InMemoryHouseholds, InMemoryUserDirectory,
};

struct Env {
    service: ExpenseService,
    expenses: Arc<InMemoryExpenses>,
    household: Household,
    users: Vec<User>,
}

impl Env {
    fn with_members(n: usize) -> Self {
        let household = fixtures::household();
        let users = fixtures::ordered_users(n);

        let expenses = Arc::new(InMemoryExpenses::new());
        let directory = Arc::new(InMemoryUserDirectory::with_users(users.clone()));
        let households = Arc::new(InMemoryHouseholds::with_households(vec![
            household.clone()
        ]));

        let service = ExpenseService::new(expenses.clone(), directory, households);
        Self {
            service,
            expenses,
            household,
            users,
        }
    }

    fn caller(&self) -> Caller {
        Caller::new(self.users[0].id, self.household.id)
    }

    fn equal_request(&self, amount: i64) -> NewExpense {
        NewExpense {
            description: "Groceries".into(),
            amount_cents: Cents::new(amount),
            split_type: SplitType::Equal,
            shares: self
                .users
                .iter()
                .map(|u| ShareSpec {
                    user_id: u.id,
                    amount_cents: None,
                })
                .collect(),
        }
    }
}

mod create {
    use super::*;

    #[tokio::test]
    async fn equal_split_shares_sum_to_amount() {
        let env = Env::with_members(3);
        let view = env
            .service
            .create_expense(env.caller(), env.equal_request(1001))
            .await
            .unwrap();

        let total: i64 = view.shares.iter().map(|s| s.amount_cents.amount()).sum();
        assert_eq!(total, 1001);
        // base 333, remainder 2 -> the two lowest ids get 334
        let amounts: Vec<i64> = view.shares.iter().map(|s| s.amount_cents.amount()).collect();
        assert_eq!(amounts, vec![334, 334, 333]);
    }

    #[tokio::test]
    async fn view_reflects_payer_and_household() {
        let env = Env::with_members(2);
        let view = env
            .service
            .create_expense(env.caller(), env.equal_request(500))
            .await
            .unwrap();

        assert_eq!(view.payer.id, env.users[0].id);
        assert_eq!(view.household.household_id, env.household.id);
        assert_eq!(view.status, ExpenseStatus::Active);
        assert_eq!(env.expenses.len(), 1);
    }

    #[tokio::test]
    async fn fixed_split_uses_supplied_amounts() {
        let env = Env::with_members(2);
        let request = NewExpense {
            description: "Rent".into(),
            amount_cents: Cents::new(1000),
            split_type: SplitType::Fixed,
            shares: vec![
                ShareSpec {
                    user_id: env.users[0].id,
                    amount_cents: Some(Cents::new(700)),
                },
                ShareSpec {
                    user_id: env.users[1].id,
                    amount_cents: Some(Cents::new(300)),
                },
            ],
        };

        let view = env.service.create_expense(env.caller(), request).await.unwrap();
        let amounts: Vec<i64> = view.shares.iter().map(|s| s.amount_cents.amount()).collect();
        assert_eq!(amounts, vec![700, 300]);
    }

    #[tokio::test]
    async fn fixed_split_missing_amount_is_rejected() {
        let env = Env::with_members(2);
        let request = NewExpense {
            description: "Rent".into(),
            amount_cents: Cents::new(1000),
            split_type: SplitType::Fixed,
            shares: vec![
                ShareSpec {
                    user_id: env.users[0].id,
                    amount_cents: Some(Cents::new(700)),
                },
                ShareSpec {
                    user_id: env.users[1].id,
                    amount_cents: None,
                },
            ],
        };

        let result = env.service.create_expense(env.caller(), request).await;
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
        assert!(env.expenses.is_empty());
    }

    #[tokio::test]
    async fn empty_member_set_is_rejected() {
        let env = Env::with_members(2);
        let request = NewExpense {
            description: "Nothing".into(),
            amount_cents: Cents::new(100),
            split_type: SplitType::Equal,
            shares: vec![],
        };

        let result = env.service.create_expense(env.caller(), request).await;
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
    }

    #[tokio::test]
    async fn unresolved_member_is_rejected() {
        let env = Env::with_members(2);
        let mut request = env.equal_request(500);
        request.shares.push(ShareSpec {
            user_id: UserId::new(),
            amount_cents: None,
        });

        let result = env.service.create_expense(env.caller(), request).await;
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
        assert!(env.expenses.is_empty());
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn get_from_another_household_is_denied() {
        let env = Env::with_members(2);
        let view = env
            .service
            .create_expense(env.caller(), env.equal_request(500))
            .await
            .unwrap();

        let outsider = Caller::new(env.users[1].id, fixtures::household().id);
        let result = env.service.get_expense(outsider, view.id).await;
        assert!(matches!(result, Err(ExpenseError::AccessDenied(_))));
    }

    #[tokio::test]
    async fn deleted_expense_reads_as_not_found() {
        let env = Env::with_members(2);
        let view = env
            .service
            .create_expense(env.caller(), env.equal_request(500))
            .await
            .unwrap();

        env.service.delete_expense(env.caller(), view.id).await.unwrap();
        let result = env.service.get_expense(env.caller(), view.id).await;
        assert!(matches!(result, Err(ExpenseError::NotFound(_))));
        // still on record, just soft-deleted
        assert_eq!(env.expenses.len(), 1);
    }

    #[tokio::test]
    async fn list_returns_active_household_expenses() {
        let env = Env::with_members(2);
        let first = env
            .service
            .create_expense(env.caller(), env.equal_request(500))
            .await
            .unwrap();
        let second = env
            .service
            .create_expense(env.caller(), env.equal_request(700))
            .await
            .unwrap();

        env.service.delete_expense(env.caller(), first.id).await.unwrap();

        let listed = env.service.list_expenses(env.caller()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn update_replaces_shares_with_equal_split() {
        let env = Env::with_members(2);
        let request = NewExpense {
            description: "Rent".into(),
            amount_cents: Cents::new(1000),
            split_type: SplitType::Fixed,
            shares: vec![
                ShareSpec {
                    user_id: env.users[0].id,
                    amount_cents: Some(Cents::new(900)),
                },
                ShareSpec {
                    user_id: env.users[1].id,
                    amount_cents: Some(Cents::new(100)),
                },
            ],
        };
        let view = env.service.create_expense(env.caller(), request).await.unwrap();

        // Even a FIXED expense re-splits equally over its participants
        let updated = env
            .service
            .update_expense(
                env.caller(),
                view.id,
                UpdateExpense {
                    description: "Rent, corrected".into(),
                    amount_cents: Cents::new(1200),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description, "Rent, corrected");
        assert_eq!(updated.amount_cents, Cents::new(1200));
        let amounts: Vec<i64> = updated
            .shares
            .iter()
            .map(|s| s.amount_cents.amount())
            .collect();
        assert_eq!(amounts, vec![600, 600]);
    }

    #[tokio::test]
    async fn share_ids_change_on_replacement() {
        let env = Env::with_members(2);
        let view = env
            .service
            .create_expense(env.caller(), env.equal_request(500))
            .await
            .unwrap();
        let old_ids: Vec<_> = view.shares.iter().map(|s| s.share_id).collect();

        let updated = env
            .service
            .update_expense(
                env.caller(),
                view.id,
                UpdateExpense {
                    description: "Groceries".into(),
                    amount_cents: Cents::new(500),
                },
            )
            .await
            .unwrap();

        for share in &updated.shares {
            assert!(!old_ids.contains(&share.share_id));
        }
    }
}

proptest! {
    /// EQUAL splits conserve the amount for any member count, and every
    /// share is base or base + 1.
    #[test]
    fn prop_equal_split_is_exact(amount in 1_i64..10_000_000, n in 1_usize..12) {
        let members: Vec<UserId> = (0..n)
            .map(|i| UserId::from_uuid(uuid::Uuid::from_u128((i + 1) as u128)))
            .collect();

        let shares = compute_shares(Cents::new(amount), SplitType::Equal, &members, None).unwrap();

        let total: i64 = shares.iter().map(|(_, c)| c.amount()).sum();
        prop_assert_eq!(total, amount);

        let base = amount / n as i64;
        for (_, cents) in &shares {
            prop_assert!(cents.amount() == base || cents.amount() == base + 1);
        }
    }

    /// FIXED splits echo the supplied map exactly, re-keyed to sorted order.
    #[test]
    fn prop_fixed_split_echoes_input(amounts in proptest::collection::vec(0_i64..100_000, 1..8)) {
        let members: Vec<UserId> = (0..amounts.len())
            .map(|i| UserId::from_uuid(uuid::Uuid::from_u128((i + 1) as u128)))
            .collect();
        let fixed: HashMap<UserId, Cents> = members
            .iter()
            .zip(&amounts)
            .map(|(id, cents)| (*id, Cents::new(*cents)))
            .collect();

        let shares =
            compute_shares(Cents::new(1), SplitType::Fixed, &members, Some(&fixed)).unwrap();

        prop_assert_eq!(shares.len(), members.len());
        for (user_id, cents) in &shares {
            prop_assert_eq!(*cents, fixed[user_id]);
        }
    }
}
