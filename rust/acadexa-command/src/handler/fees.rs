use acadexa_intent::{SlotName, Slots};
use serde::Serialize;

use super::id;
use crate::envelope::{Reply, ResultsType};
use crate::error::DispatchError;
use crate::records::{FeeAccount, FeeTransaction, TransactionType};
use crate::store::RecordStore;

#[derive(Debug, Serialize)]
struct FeeStatus {
    student_id: i64,
    total_fee: f64,
    paid: f64,
    pending: f64,
    transactions: Vec<FeeTransaction>,
}

impl FeeStatus {
    /// Payments and scholarships reduce the balance; fines and adjustments
    /// add to it. The pending balance never goes negative.
    fn settle(account: FeeAccount, transactions: Vec<FeeTransaction>) -> Self {
        let mut credits = 0.0;
        let mut charges = 0.0;
        for transaction in &transactions {
            match transaction.txn_type {
                TransactionType::Payment | TransactionType::Scholarship => {
                    credits += transaction.amount
                }
                TransactionType::Fine | TransactionType::Adjustment => {
                    charges += transaction.amount
                }
            }
        }
        Self {
            student_id: account.student_id,
            total_fee: account.total_fee,
            paid: credits,
            pending: (account.total_fee + charges - credits).max(0.0),
            transactions,
        }
    }
}

pub(super) async fn status(slots: &Slots, store: &dyn RecordStore) -> Result<Reply, DispatchError> {
    let Some(student_id) = id(slots, SlotName::StudentId) else {
        return Ok(Reply::missing_id(ResultsType::FeeStatus, "student"));
    };
    let Some(account) = store.fee_account(student_id).await? else {
        return Ok(Reply::empty(
            Some(ResultsType::FeeStatus),
            format!("No fee account found for student {student_id}."),
        ));
    };

    let transactions = store.fee_transactions(student_id).await?;
    let status = FeeStatus::settle(account, transactions);
    let info = format!(
        "Student {student_id} has paid {} of {} with {} pending.",
        status.paid, status.total_fee, status.pending
    );
    Ok(Reply::object(ResultsType::FeeStatus, info, &status)?)
}
