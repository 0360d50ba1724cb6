use serde::{Deserialize, Serialize};

/// What the transaction pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Subscription,
    #[default]
    OneTime,
    Refund,
    Chargeback,
    Adjustment,
}

/// Payment instrument used by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    BankTransfer,
    DigitalWallet,
    MobilePayment,
    Crypto,
    Cash,
}
