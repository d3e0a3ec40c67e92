//! Expense application service
//!
//! Orchestrates expense management over the persistence and directory
//! ports. Every operation takes the caller explicitly and enforces the
//! household-ownership check on the expenses it touches.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::{Cents, ExpenseId, UserId};
use domain_household::{Caller, Household, HouseholdPort, User, UserDirectoryPort};

use crate::error::ExpenseError;
use crate::expense::{Expense, ExpenseShare, ExpenseStatus, SplitType};
use crate::ports::ExpensePort;
use crate::split::compute_shares;
use crate::views::{ExpenseView, HouseholdView, ShareView, UserView};

/// One member's entry in a new expense request
///
/// `amount_cents` is required for FIXED splits and ignored for EQUAL ones.
#[derive(Debug, Clone)]
pub struct ShareSpec {
    pub user_id: UserId,
    pub amount_cents: Option<Cents>,
}

/// Request to record a new expense
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub description: String,
    pub amount_cents: Cents,
    pub split_type: SplitType,
    pub shares: Vec<ShareSpec>,
}

/// Request to mutate an expense's amount and description
#[derive(Debug, Clone)]
pub struct UpdateExpense {
    pub description: String,
    pub amount_cents: Cents,
}

/// Application service for expense management
pub struct ExpenseService {
    expenses: Arc<dyn ExpensePort>,
    users: Arc<dyn UserDirectoryPort>,
    households: Arc<dyn HouseholdPort>,
}

impl ExpenseService {
    /// Creates the service over its ports
    pub fn new(
        expenses: Arc<dyn ExpensePort>,
        users: Arc<dyn UserDirectoryPort>,
        households: Arc<dyn HouseholdPort>,
    ) -> Self {
        Self {
            expenses,
            users,
            households,
        }
    }

    /// Records a new expense paid by the caller and splits it among the
    /// requested members
    #[instrument(skip(self, request), fields(household_id = %caller.household_id))]
    pub async fn create_expense(
        &self,
        caller: Caller,
        request: NewExpense,
    ) -> Result<ExpenseView, ExpenseError> {
        let household = self.households.find_household(caller.household_id).await?;

        let member_ids: Vec<UserId> = request.shares.iter().map(|s| s.user_id).collect();
        if member_ids.is_empty() {
            return Err(ExpenseError::Validation(
                "At least one member required".into(),
            ));
        }

        // Every requested member must resolve to a real user.
        let distinct: BTreeSet<UserId> = member_ids.iter().copied().collect();
        let resolved = self.users.find_users(&member_ids).await?;
        if resolved.len() != distinct.len() {
            return Err(ExpenseError::Validation(
                "At least one member wasn't found".into(),
            ));
        }

        let fixed_amounts = match request.split_type {
            SplitType::Equal => None,
            SplitType::Fixed => Some(fixed_amounts_from(&request.shares)?),
        };

        let share_amounts = compute_shares(
            request.amount_cents,
            request.split_type,
            &member_ids,
            fixed_amounts.as_ref(),
        )?;
        let shares = share_amounts
            .into_iter()
            .map(|(user_id, cents)| ExpenseShare::new(user_id, cents))
            .collect();

        let payer = self.users.find_user(caller.user_id).await?;
        let expense = Expense::new(
            household.id,
            caller.user_id,
            request.amount_cents,
            request.description,
            request.split_type,
            shares,
        );
        self.expenses.insert(expense.clone()).await?;

        debug!(expense_id = %expense.id, "Expense recorded");
        Ok(build_view(&expense, &household, &payer))
    }

    /// Retrieves one expense belonging to the caller's household
    ///
    /// A soft-deleted expense reads as not found.
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn get_expense(
        &self,
        caller: Caller,
        expense_id: ExpenseId,
    ) -> Result<ExpenseView, ExpenseError> {
        let expense = self.expenses.find_by_id(expense_id).await?;
        self.authorize(&caller, &expense)?;
        if expense.status == ExpenseStatus::Deleted {
            return Err(ExpenseError::NotFound(format!(
                "Expense {expense_id} not found"
            )));
        }

        let household = self.households.find_household(caller.household_id).await?;
        let payer = self.users.find_user(expense.payer_id).await?;
        Ok(build_view(&expense, &household, &payer))
    }

    /// Lists the household's active expenses, newest first
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn list_expenses(&self, caller: Caller) -> Result<Vec<ExpenseView>, ExpenseError> {
        let household = self.households.find_household(caller.household_id).await?;
        let expenses = self
            .expenses
            .active_by_household(household.id, None)
            .await?;
        self.build_views(&expenses, &household).await
    }

    /// Lists the active expenses the caller paid for, newest first
    #[instrument(skip(self), fields(user_id = %caller.user_id))]
    pub async fn list_expenses_by_payer(
        &self,
        caller: Caller,
    ) -> Result<Vec<ExpenseView>, ExpenseError> {
        let household = self.households.find_household(caller.household_id).await?;
        let expenses = self.expenses.active_by_payer(caller.user_id).await?;
        self.build_views(&expenses, &household).await
    }

    /// Mutates an expense's amount and description and replaces its shares
    ///
    /// Shares are recomputed as an equal split over the existing
    /// participants, regardless of the expense's split type, and replaced
    /// wholesale.
    #[instrument(skip(self, request), fields(household_id = %caller.household_id))]
    pub async fn update_expense(
        &self,
        caller: Caller,
        expense_id: ExpenseId,
        request: UpdateExpense,
    ) -> Result<ExpenseView, ExpenseError> {
        let mut expense = self.expenses.find_by_id(expense_id).await?;
        self.authorize(&caller, &expense)?;
        if expense.status == ExpenseStatus::Deleted {
            return Err(ExpenseError::NotFound(format!(
                "Expense {expense_id} not found"
            )));
        }

        expense.amount_cents = request.amount_cents;
        expense.description = request.description;

        let members: Vec<UserId> = expense.shares.iter().map(|s| s.user_id).collect();
        let share_amounts =
            compute_shares(request.amount_cents, SplitType::Equal, &members, None)?;
        expense.replace_shares(
            share_amounts
                .into_iter()
                .map(|(user_id, cents)| ExpenseShare::new(user_id, cents))
                .collect(),
        );
        self.expenses.update(expense.clone()).await?;

        debug!(expense_id = %expense.id, "Expense updated, shares replaced");
        let household = self.households.find_household(caller.household_id).await?;
        let payer = self.users.find_user(expense.payer_id).await?;
        Ok(build_view(&expense, &household, &payer))
    }

    /// Soft-deletes an expense belonging to the caller's household
    #[instrument(skip(self), fields(household_id = %caller.household_id))]
    pub async fn delete_expense(
        &self,
        caller: Caller,
        expense_id: ExpenseId,
    ) -> Result<(), ExpenseError> {
        let mut expense = self.expenses.find_by_id(expense_id).await?;
        self.authorize(&caller, &expense)?;

        expense.soft_delete();
        self.expenses.update(expense).await?;
        debug!(%expense_id, "Expense soft-deleted");
        Ok(())
    }

    /// Household-ownership check every read and write relies on
    fn authorize(&self, caller: &Caller, expense: &Expense) -> Result<(), ExpenseError> {
        if expense.household_id != caller.household_id {
            return Err(ExpenseError::AccessDenied(
                "You are not allowed to view this expense".into(),
            ));
        }
        Ok(())
    }

    /// Renders a batch of expenses, resolving payers in bulk
    async fn build_views(
        &self,
        expenses: &[Expense],
        household: &Household,
    ) -> Result<Vec<ExpenseView>, ExpenseError> {
        let payer_ids: Vec<UserId> = expenses.iter().map(|e| e.payer_id).collect();
        let payers: HashMap<UserId, User> = self
            .users
            .find_users(&payer_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        expenses
            .iter()
            .map(|expense| {
                let payer = payers.get(&expense.payer_id).ok_or_else(|| {
                    ExpenseError::NotFound(format!("User {} not found", expense.payer_id))
                })?;
                Ok(build_view(expense, household, payer))
            })
            .collect()
    }
}

/// Extracts the per-member fixed amounts from a request
fn fixed_amounts_from(shares: &[ShareSpec]) -> Result<HashMap<UserId, Cents>, ExpenseError> {
    let mut fixed = HashMap::with_capacity(shares.len());
    for spec in shares {
        let cents = spec
            .amount_cents
            .ok_or_else(|| ExpenseError::Validation("Missing fixed amount".into()))?;
        if cents.is_negative() {
            return Err(ExpenseError::Validation(
                "Negative amount cents not allowed".into(),
            ));
        }
        fixed.insert(spec.user_id, cents);
    }
    Ok(fixed)
}

/// Assembles the response model for one expense
fn build_view(expense: &Expense, household: &Household, payer: &User) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        household: HouseholdView {
            household_id: household.id,
            name: household.name.clone(),
        },
        payer: UserView {
            id: payer.id,
            email: payer.email.clone(),
            first_name: payer.first_name.clone(),
            last_name: payer.last_name.clone(),
        },
        amount_cents: expense.amount_cents,
        description: expense.description.clone(),
        split_type: expense.split_type,
        status: expense.status,
        created_at: expense.created_at,
        shares: expense
            .shares
            .iter()
            .map(|s| ShareView {
                share_id: s.id,
                user_id: s.user_id,
                amount_cents: s.amount_cents,
            })
            .collect(),
    }
}
