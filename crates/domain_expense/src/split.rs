//! The expense split calculator
//!
//! Pure share computation: given a total amount and the participating
//! members, produce one share per member such that EQUAL splits sum
//! exactly to the total. Fully deterministic - members are processed in
//! ascending user-id order, and the remainder cents of an EQUAL split go
//! to the lowest ids.

use std::collections::{BTreeSet, HashMap};

use core_kernel::{Cents, UserId};

use crate::error::ExpenseError;
use crate::expense::SplitType;

/// Computes per-member share amounts for an expense
///
/// Members are deduplicated and sorted by user id; the output follows that
/// order with exactly one entry per distinct member.
///
/// For `Fixed` splits every member must have a non-negative entry in
/// `fixed_amounts`. The fixed amounts are deliberately not checked against
/// `amount_cents`; callers that need the exact-sum invariant for fixed
/// splits must verify it themselves.
///
/// # Errors
///
/// Returns `ExpenseError::Validation` if the amount is not positive, the
/// member set is empty, or a fixed amount is missing or negative.
pub fn compute_shares(
    amount_cents: Cents,
    split_type: SplitType,
    members: &[UserId],
    fixed_amounts: Option<&HashMap<UserId, Cents>>,
) -> Result<Vec<(UserId, Cents)>, ExpenseError> {
    if !amount_cents.is_positive() {
        return Err(ExpenseError::Validation(
            "Expense amount must be positive".into(),
        ));
    }

    let sorted: BTreeSet<UserId> = members.iter().copied().collect();
    if sorted.is_empty() {
        return Err(ExpenseError::Validation(
            "At least one member is required".into(),
        ));
    }

    match split_type {
        SplitType::Equal => Ok(equal_shares(amount_cents, &sorted)),
        SplitType::Fixed => {
            let fixed = fixed_amounts.ok_or_else(|| {
                ExpenseError::Validation("Fixed split requires per-member amounts".into())
            })?;
            fixed_shares(&sorted, fixed)
        }
    }
}

/// Even division with deterministic remainder placement
///
/// `base = amount / n` truncating; the first `amount % n` members in
/// sorted order receive one extra cent, so the shares always sum exactly
/// to the amount.
fn equal_shares(amount_cents: Cents, sorted: &BTreeSet<UserId>) -> Vec<(UserId, Cents)> {
    let n = sorted.len() as i64;
    let base = amount_cents.amount() / n;
    let remainder = amount_cents.amount() % n;

    sorted
        .iter()
        .enumerate()
        .map(|(i, user_id)| {
            let extra = if (i as i64) < remainder { 1 } else { 0 };
            (*user_id, Cents::new(base + extra))
        })
        .collect()
}

/// Caller-supplied amounts, one per member
fn fixed_shares(
    sorted: &BTreeSet<UserId>,
    fixed: &HashMap<UserId, Cents>,
) -> Result<Vec<(UserId, Cents)>, ExpenseError> {
    let mut shares = Vec::with_capacity(sorted.len());
    for user_id in sorted {
        let cents = fixed.get(user_id).copied().ok_or_else(|| {
            ExpenseError::Validation(format!("Missing fixed amount for member {user_id}"))
        })?;
        if cents.is_negative() {
            return Err(ExpenseError::Validation(
                "Negative amount cents not allowed".into(),
            ));
        }
        shares.push((*user_id, cents));
    }
    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn uid(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    #[test]
    fn test_equal_split_distributes_remainder_to_lowest_ids() {
        // amount=1001 over 3 members: base=333, remainder=2
        let members = vec![uid(7), uid(3), uid(9)];
        let shares =
            compute_shares(Cents::new(1001), SplitType::Equal, &members, None).unwrap();

        assert_eq!(
            shares,
            vec![
                (uid(3), Cents::new(334)),
                (uid(7), Cents::new(334)),
                (uid(9), Cents::new(333)),
            ]
        );
    }

    #[test]
    fn test_equal_split_exact_division_has_no_remainder() {
        let members = vec![uid(1), uid(2)];
        let shares =
            compute_shares(Cents::new(1000), SplitType::Equal, &members, None).unwrap();
        assert!(shares.iter().all(|(_, c)| *c == Cents::new(500)));
    }

    #[test]
    fn test_equal_split_is_deterministic() {
        let members = vec![uid(5), uid(1), uid(3)];
        let first =
            compute_shares(Cents::new(999), SplitType::Equal, &members, None).unwrap();
        let reordered = vec![uid(3), uid(5), uid(1)];
        let second =
            compute_shares(Cents::new(999), SplitType::Equal, &reordered, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_members_collapse_to_one_share() {
        let members = vec![uid(1), uid(1), uid(2)];
        let shares =
            compute_shares(Cents::new(100), SplitType::Equal, &members, None).unwrap();
        assert_eq!(shares.len(), 2);
    }

    #[test]
    fn test_empty_members_rejected() {
        let result = compute_shares(Cents::new(100), SplitType::Equal, &[], None);
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let members = vec![uid(1)];
        assert!(compute_shares(Cents::ZERO, SplitType::Equal, &members, None).is_err());
        assert!(compute_shares(Cents::new(-5), SplitType::Equal, &members, None).is_err());
    }

    #[test]
    fn test_fixed_split_returns_supplied_amounts_in_sorted_order() {
        let members = vec![uid(2), uid(1)];
        let fixed: HashMap<UserId, Cents> = [
            (uid(1), Cents::new(700)),
            (uid(2), Cents::new(300)),
        ]
        .into();

        let shares =
            compute_shares(Cents::new(1000), SplitType::Fixed, &members, Some(&fixed)).unwrap();
        assert_eq!(
            shares,
            vec![(uid(1), Cents::new(700)), (uid(2), Cents::new(300))]
        );
    }

    #[test]
    fn test_fixed_split_missing_amount_rejected() {
        let members = vec![uid(1), uid(2)];
        let fixed: HashMap<UserId, Cents> = [(uid(1), Cents::new(500))].into();

        let result =
            compute_shares(Cents::new(1000), SplitType::Fixed, &members, Some(&fixed));
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_fixed_split_negative_amount_rejected() {
        let members = vec![uid(1)];
        let fixed: HashMap<UserId, Cents> = [(uid(1), Cents::new(-1))].into();

        let result =
            compute_shares(Cents::new(1000), SplitType::Fixed, &members, Some(&fixed));
        assert!(matches!(result, Err(ExpenseError::Validation(_))));
    }

    #[test]
    fn test_fixed_split_sum_is_not_verified() {
        // Deliberately permissive: 300 + 300 != 1000 still succeeds.
        let members = vec![uid(1), uid(2)];
        let fixed: HashMap<UserId, Cents> = [
            (uid(1), Cents::new(300)),
            (uid(2), Cents::new(300)),
        ]
        .into();

        let shares =
            compute_shares(Cents::new(1000), SplitType::Fixed, &members, Some(&fixed)).unwrap();
        let total: Cents = shares.iter().map(|(_, c)| *c).sum();
        assert_eq!(total, Cents::new(600));
    }
}
