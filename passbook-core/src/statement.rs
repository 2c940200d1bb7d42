//! Statement documents produced by the parsers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit,
}

/// One row of a credit-card statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTransaction {
    pub date: NaiveDate,
    pub description: String,
    /// Always a non-negative magnitude; see `kind` for direction.
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub reference_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditCardStatement {
    pub statement_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Masked card number with whitespace removed, e.g. `123456XXXXXX7890`.
    pub card_number: Option<String>,
    pub card_holder_name: Option<String>,
    pub credit_limit: Option<Decimal>,
    pub available_credit: Option<Decimal>,
    pub total_dues: Option<Decimal>,
    pub minimum_amount_due: Option<Decimal>,
    pub transactions: Vec<CardTransaction>,
}

impl CreditCardStatement {
    /// Sum of debit amounts, or `None` if it does not fit in a `Decimal`.
    pub fn total_debits(&self) -> Option<Decimal> {
        self.sum_of(TransactionType::Debit)
    }

    pub fn total_credits(&self) -> Option<Decimal> {
        self.sum_of(TransactionType::Credit)
    }

    fn sum_of(&self, kind: TransactionType) -> Option<Decimal> {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.amount))
    }
}

/// One row of a savings-account statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub reference_number: Option<String>,
    pub withdrawal_amount: Decimal,
    pub deposit_amount: Decimal,
    /// Running balance exactly as printed on the row.
    pub closing_balance: Decimal,
}

impl SavingsTransaction {
    pub fn kind(&self) -> TransactionType {
        if self.withdrawal_amount > Decimal::ZERO {
            TransactionType::Debit
        } else {
            TransactionType::Credit
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsStatement {
    pub account_number: Option<String>,
    pub account_holder_name: Option<String>,
    pub ifsc_code: Option<String>,
    pub branch_name: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub opening_balance: Option<Decimal>,
    pub closing_balance: Option<Decimal>,
    pub transactions: Vec<SavingsTransaction>,
}

impl SavingsStatement {
    /// Balance before the first row: its closing balance plus its withdrawal
    /// minus its deposit.
    ///
    /// `None` when there are no rows or the result overflows a `Decimal`.
    pub fn derived_opening_balance(&self) -> Option<Decimal> {
        let t = self.transactions.first()?;
        t.closing_balance
            .checked_add(t.withdrawal_amount)?
            .checked_sub(t.deposit_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StatementDocument {
    CreditCard(CreditCardStatement),
    Savings(SavingsStatement),
}

impl StatementDocument {
    pub fn transaction_count(&self) -> usize {
        match self {
            StatementDocument::CreditCard(s) => s.transactions.len(),
            StatementDocument::Savings(s) => s.transactions.len(),
        }
    }

    pub fn as_credit_card(&self) -> Option<&CreditCardStatement> {
        match self {
            StatementDocument::CreditCard(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_savings(&self) -> Option<&SavingsStatement> {
        match self {
            StatementDocument::Savings(s) => Some(s),
            _ => None,
        }
    }
}
