//! The debt simplifier
//!
//! Reduces a map of net balances to a small set of directed transfers that
//! would zero every balance. Greedy largest-to-largest matching: always
//! pairs the largest remaining creditor with the largest remaining debtor.
//! This is not a proven minimum-cardinality solution - true cash-flow
//! minimization is a harder combinatorial problem - but it terminates in
//! at most `creditors + debtors - 1` transfers and is fully deterministic.

use std::collections::HashMap;

use core_kernel::{Cents, UserId};

/// A proposed payment from a debtor to a creditor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProposal {
    pub from_user: UserId,
    pub to_user: UserId,
    pub amount_cents: Cents,
}

/// One party in the matching, tracking how much remains to settle
struct Party {
    user_id: UserId,
    remaining: Cents,
}

/// Computes the transfers that zero out a set of net balances
///
/// Zero-balance users never appear in the output. Output order follows
/// the matching order.
pub fn simplify(balances: &HashMap<UserId, Cents>) -> Vec<TransferProposal> {
    let mut creditors: Vec<Party> = Vec::new();
    let mut debtors: Vec<Party> = Vec::new();

    for (user_id, net_cents) in balances {
        if net_cents.is_positive() {
            creditors.push(Party {
                user_id: *user_id,
                remaining: *net_cents,
            });
        } else if net_cents.is_negative() {
            debtors.push(Party {
                user_id: *user_id,
                remaining: net_cents.abs(),
            });
        }
        // zero balances are dropped
    }

    // Largest magnitude first, ties broken by ascending user id
    let by_magnitude = |a: &Party, b: &Party| {
        b.remaining
            .cmp(&a.remaining)
            .then(a.user_id.cmp(&b.user_id))
    };
    creditors.sort_by(by_magnitude);
    debtors.sort_by(by_magnitude);

    let mut transfers = Vec::new();
    let mut creditor_idx = 0;
    let mut debtor_idx = 0;

    while creditor_idx < creditors.len() && debtor_idx < debtors.len() {
        let creditor = &creditors[creditor_idx];
        let debtor = &debtors[debtor_idx];

        let amount = creditor.remaining.min(debtor.remaining);
        if amount.is_positive() {
            transfers.push(TransferProposal {
                from_user: debtor.user_id,
                to_user: creditor.user_id,
                amount_cents: amount,
            });
        }

        creditors[creditor_idx].remaining -= amount;
        debtors[debtor_idx].remaining -= amount;

        // Both may reach zero in the same step; both advance
        if creditors[creditor_idx].remaining.is_zero() {
            creditor_idx += 1;
        }
        if debtors[debtor_idx].remaining.is_zero() {
            debtor_idx += 1;
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn uid(n: u128) -> UserId {
        UserId::from_uuid(Uuid::from_u128(n))
    }

    fn balances(entries: &[(UserId, i64)]) -> HashMap<UserId, Cents> {
        entries
            .iter()
            .map(|(id, cents)| (*id, Cents::new(*cents)))
            .collect()
    }

    /// Sums transfers per user: negative for senders, positive for receivers
    fn net_effect(transfers: &[TransferProposal]) -> HashMap<UserId, Cents> {
        let mut net: HashMap<UserId, Cents> = HashMap::new();
        for t in transfers {
            *net.entry(t.from_user).or_insert(Cents::ZERO) += t.amount_cents;
            *net.entry(t.to_user).or_insert(Cents::ZERO) -= t.amount_cents;
        }
        net
    }

    #[test]
    fn test_one_debtor_pays_two_creditors() {
        let (a, b, c) = (uid(1), uid(2), uid(3));
        let input = balances(&[(a, 500), (b, 300), (c, -800)]);

        let transfers = simplify(&input);
        assert_eq!(
            transfers,
            vec![
                TransferProposal {
                    from_user: c,
                    to_user: a,
                    amount_cents: Cents::new(500),
                },
                TransferProposal {
                    from_user: c,
                    to_user: b,
                    amount_cents: Cents::new(300),
                },
            ]
        );
    }

    #[test]
    fn test_zero_balances_produce_no_transfers() {
        let input = balances(&[(uid(1), 0), (uid(2), 0)]);
        assert!(simplify(&input).is_empty());

        assert!(simplify(&HashMap::new()).is_empty());
    }

    #[test]
    fn test_transfers_zero_every_balance() {
        let input = balances(&[
            (uid(1), 1000),
            (uid(2), -250),
            (uid(3), -250),
            (uid(4), -500),
            (uid(5), 0),
        ]);

        let transfers = simplify(&input);
        let net = net_effect(&transfers);

        for (user, balance) in &input {
            if balance.is_zero() {
                assert!(!net.contains_key(user));
            } else {
                // Applying the transfers flips the sign back to zero
                assert_eq!(net[user], -*balance);
            }
        }
    }

    #[test]
    fn test_transfer_count_bound() {
        let input = balances(&[(uid(1), 700), (uid(2), 300), (uid(3), -600), (uid(4), -400)]);
        let transfers = simplify(&input);
        // 2 creditors + 2 debtors - 1
        assert!(transfers.len() <= 3);
        assert!(transfers.iter().all(|t| t.amount_cents.is_positive()));
    }

    #[test]
    fn test_magnitude_ties_break_by_ascending_user_id() {
        let input = balances(&[(uid(2), 400), (uid(1), 400), (uid(3), -800)]);
        let transfers = simplify(&input);
        assert_eq!(transfers[0].to_user, uid(1));
        assert_eq!(transfers[1].to_user, uid(2));
    }
}
