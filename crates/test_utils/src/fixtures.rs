//! Common test fixtures

use uuid::Uuid;

use core_kernel::{HouseholdId, UserId};
use domain_household::{Household, User};

/// A household with a fixed display name
pub fn household() -> Household {
    Household::new(HouseholdId::new(), "Maple Street House")
}

/// A user with an email derived from the name
pub fn user(id: UserId, first_name: &str, last_name: &str) -> User {
    User::new(
        id,
        format!("{}.{}@example.com", first_name.to_lowercase(), last_name.to_lowercase()),
        first_name,
        last_name,
    )
}

/// `n` users with ids ascending in a known order
///
/// Useful when a test asserts on remainder placement or tie-breaking,
/// which both follow ascending user id.
pub fn ordered_users(n: usize) -> Vec<User> {
    const NAMES: [(&str, &str); 6] = [
        ("Ada", "Lovelace"),
        ("Ben", "Franklin"),
        ("Cleo", "Patra"),
        ("Dan", "Bernoulli"),
        ("Eva", "Noether"),
        ("Finn", "Euler"),
    ];

    (0..n)
        .map(|i| {
            let id = UserId::from_uuid(Uuid::from_u128((i + 1) as u128));
            let (first, last) = NAMES[i % NAMES.len()];
            user(id, first, last)
        })
        .collect()
}
