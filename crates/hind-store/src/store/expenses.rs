//! # Expense Book
//!
//! Admin bookkeeping entries. Expenses feed the monthly profit summary in
//! `reports`; nothing else in the store reads them.

use tracing::debug;

use hind_core::new_entity_id;
use hind_core::types::{Expense, ExpenseCategory};
use hind_core::validation::{self, validate_expense_amount};
use hind_core::Money;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

impl Store {
    /// Records an expense. Amount must be strictly positive.
    pub fn add_expense(
        &mut self,
        description: &str,
        amount: Money,
        category: ExpenseCategory,
    ) -> StoreResult<Expense> {
        validation::require(description, "description")?;
        validate_expense_amount(amount)?;

        let expense = Expense {
            id: new_entity_id(),
            date: chrono::Utc::now(),
            description: description.trim().to_string(),
            amount,
            category,
        };
        self.expenses.push(expense.clone());

        debug!(expense_id = %expense.id, %amount, ?category, "Expense recorded");
        Ok(expense)
    }

    /// Full replace-by-id edit of an expense.
    pub fn update_expense(&mut self, edited: Expense) -> StoreResult<()> {
        validation::require(&edited.description, "description")?;
        validate_expense_amount(edited.amount)?;

        let stored = self
            .expenses
            .iter_mut()
            .find(|e| e.id == edited.id)
            .ok_or_else(|| StoreError::not_found("Expense", &edited.id))?;

        *stored = edited;
        Ok(())
    }

    /// Deletes an expense entry.
    pub fn delete_expense(&mut self, expense_id: &str) -> StoreResult<()> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != expense_id);
        if self.expenses.len() == before {
            return Err(StoreError::not_found("Expense", expense_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;

    fn store() -> Store {
        Store::with_seed(SeedData::demo())
    }

    #[test]
    fn test_add_and_delete_expense() {
        let mut store = store();
        let expense = store
            .add_expense("Shop repainting", Money::from_rupees(3_500), ExpenseCategory::Other)
            .unwrap();

        assert!(store.expenses().iter().any(|e| e.id == expense.id));

        store.delete_expense(&expense.id).unwrap();
        assert!(matches!(
            store.delete_expense(&expense.id),
            Err(StoreError::NotFound { entity: "Expense", .. })
        ));
    }

    #[test]
    fn test_expense_amount_must_be_positive() {
        let mut store = store();
        assert!(store
            .add_expense("Free lunch", Money::zero(), ExpenseCategory::Other)
            .is_err());
        assert!(store
            .add_expense("Negative rent", Money::from_rupees(-100), ExpenseCategory::Rent)
            .is_err());
    }

    #[test]
    fn test_update_expense_replaces_by_id() {
        let mut store = store();
        let mut edited = store.expenses()[0].clone();
        edited.amount = Money::from_rupees(8_500);

        store.update_expense(edited.clone()).unwrap();
        assert_eq!(store.expenses()[0].amount, Money::from_rupees(8_500));

        edited.id = "ghost".to_string();
        assert!(matches!(
            store.update_expense(edited),
            Err(StoreError::NotFound { entity: "Expense", .. })
        ));
    }
}
