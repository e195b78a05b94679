//! Domain values the samplers populate.
//!
//! Only the slice of the transaction model the engine touches lives here:
//! currencies and money (for amount scaling), merchants (for category
//! lookup), and the categorical types drawn by the factory distributions.

use crate::error::{DistError, DistResult};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ── Money ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Cny,
    Inr,
    Btc,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
            Self::Cny => "CNY",
            Self::Inr => "INR",
            Self::Btc => "BTC",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Jpy => "Japanese Yen",
            Self::Cad => "Canadian Dollar",
            Self::Aud => "Australian Dollar",
            Self::Cny => "Chinese Yuan",
            Self::Inr => "Indian Rupee",
            Self::Btc => "Bitcoin",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy | Self::Cny => "¥",
            Self::Cad => "C$",
            Self::Aud => "A$",
            Self::Inr => "₹",
            Self::Btc => "₿",
        }
    }

    /// Digits after the decimal point in the minor unit.
    pub fn fraction_digits(&self) -> u32 {
        match self {
            Self::Jpy => 0,
            Self::Btc => 8,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount always carried at its currency's scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Rescale to the currency's fraction digits, rounding half away from zero.
    /// Fails when the integer part leaves no room for those digits.
    pub fn new(amount: Decimal, currency: Currency) -> DistResult<Self> {
        let digits = currency.fraction_digits();
        let mut scaled = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
        scaled.rescale(digits);
        if scaled.scale() != digits {
            return Err(DistError::AmountNotRepresentable {
                amount: amount.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { amount: scaled, currency })
    }

    /// Converts through the float's shortest decimal form, so 12.99 stays
    /// 12.99 rather than its binary expansion.
    pub fn from_f64(amount: f64, currency: Currency) -> DistResult<Self> {
        if !amount.is_finite() {
            return Err(DistError::AmountNotRepresentable { amount });
        }
        let decimal: Decimal = amount
            .to_string()
            .parse()
            .map_err(|_| DistError::AmountNotRepresentable { amount })?;
        Self::new(decimal, currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::new(0, currency.fraction_digits()),
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn checked_add(&self, other: &Money) -> DistResult<Money> {
        if self.currency != other.currency {
            return Err(DistError::invalid(format!(
                "cannot add {} to {}",
                other.currency, self.currency
            )));
        }
        let sum = self.amount.checked_add(other.amount).ok_or_else(|| {
            DistError::invalid(format!("{} + {} overflows", self.amount, other.amount))
        })?;
        Money::new(sum, self.currency)
    }

    pub fn formatted(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

// ── Parties ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Merchant {
    pub id:   Uuid,
    pub name: String,
    /// Merchant category code.
    pub mcc:  String,
}

impl Merchant {
    pub fn new(name: impl Into<String>, mcc: impl Into<String>) -> Self {
        Self {
            id:   Uuid::new_v4(),
            name: name.into(),
            mcc:  mcc.into(),
        }
    }
}

// ── Payment instruments ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Credit,
    Debit,
    Prepaid,
    Gift,
    Fleet,
    Hsa,
    Ebt,
}

impl CardType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Credit  => "Credit Card",
            Self::Debit   => "Debit Card",
            Self::Prepaid => "Prepaid Card",
            Self::Gift    => "Gift Card",
            Self::Fleet   => "Fleet Card",
            Self::Hsa     => "Health Savings Account Card",
            Self::Ebt     => "Electronic Benefit Transfer Card",
        }
    }
}

// ── Transaction types ────────────────────────────────────────────────────────

/// How a payment moved. Equality is structural: two ecommerce VISA
/// card types built separately are the same key in a weight table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionType {
    Card(CardTransaction),
    Transfer(TransferTransaction),
}

impl TransactionType {
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::Card(_) => "CARD",
            Self::Transfer(_) => "TRANSFER",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::Card(card) => card.display_name().to_string(),
            Self::Transfer(transfer) => transfer.display_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTransaction {
    pub network:          String,
    pub contactless:      bool,
    pub ecommerce:        bool,
    pub international:    bool,
}

impl CardTransaction {
    pub fn standard(network: impl Into<String>) -> Self {
        Self { network: network.into(), contactless: false, ecommerce: false, international: false }
    }

    pub fn ecommerce(network: impl Into<String>) -> Self {
        Self { network: network.into(), contactless: false, ecommerce: true, international: false }
    }

    pub fn contactless(network: impl Into<String>) -> Self {
        Self { network: network.into(), contactless: true, ecommerce: false, international: false }
    }

    pub fn display_name(&self) -> &'static str {
        if self.ecommerce {
            "Card Online Payment"
        } else if self.contactless {
            "Card Contactless Payment"
        } else {
            "Card Payment"
        }
    }
}

impl From<CardTransaction> for TransactionType {
    fn from(card: CardTransaction) -> Self {
        Self::Card(card)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferTransaction {
    /// "ACH" | "WIRE" | "SEPA" | "INTERNAL"
    pub method:        String,
    pub international: bool,
    pub purpose_code:  String,
    pub reference:     String,
    pub recurring:     bool,
    pub scheduled:     bool,
}

impl TransferTransaction {
    fn domestic(method: &str, purpose_code: &str, reference: impl Into<String>) -> Self {
        Self {
            method:        method.to_string(),
            international: false,
            purpose_code:  purpose_code.to_string(),
            reference:     reference.into(),
            recurring:     false,
            scheduled:     false,
        }
    }

    pub fn ach(reference: impl Into<String>) -> Self {
        Self::domestic("ACH", "PAYMENT", reference)
    }

    pub fn wire(international: bool, purpose_code: impl Into<String>) -> Self {
        Self {
            international,
            purpose_code: purpose_code.into(),
            ..Self::domestic("WIRE", "", "")
        }
    }

    pub fn sepa(reference: impl Into<String>) -> Self {
        Self::domestic("SEPA", "PAYMENT", reference)
    }

    pub fn recurring_ach(reference: impl Into<String>) -> Self {
        Self {
            recurring: true,
            scheduled: true,
            ..Self::domestic("ACH", "RECURRING_PAYMENT", reference)
        }
    }

    pub fn internal(reference: impl Into<String>) -> Self {
        Self::domestic("INTERNAL", "TRANSFER", reference)
    }

    pub fn display_name(&self) -> String {
        if self.international {
            format!("International {}", self.method)
        } else {
            self.method.clone()
        }
    }
}

impl From<TransferTransaction> for TransactionType {
    fn from(transfer: TransferTransaction) -> Self {
        Self::Transfer(transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn money_rounds_half_up_to_currency_scale() {
        let usd = Money::new(Decimal::from_str("12.345").unwrap(), Currency::Usd).unwrap();
        assert_eq!(usd.amount().to_string(), "12.35");

        let jpy = Money::from_f64(12.5, Currency::Jpy).unwrap();
        assert_eq!(jpy.amount().to_string(), "13");
        assert_eq!(jpy.amount().scale(), 0);
    }

    #[test]
    fn money_pads_to_currency_scale() {
        let btc = Money::from_f64(1.5, Currency::Btc).unwrap();
        assert_eq!(btc.amount().to_string(), "1.50000000");
        let usd = Money::from_f64(7.0, Currency::Usd).unwrap();
        assert_eq!(usd.formatted(), "$7.00");
    }

    #[test]
    fn price_endings_survive_float_conversion() {
        let money = Money::from_f64(12.0 + 0.99, Currency::Usd).unwrap();
        assert_eq!(money.amount().to_string(), "12.99");
    }

    #[test]
    fn amount_too_large_for_currency_scale_rejected() {
        let err = Money::from_f64(1e22, Currency::Btc).unwrap_err();
        assert!(matches!(err, DistError::AmountNotRepresentable { .. }), "got {err:?}");
        // Same magnitude fits once fewer fraction digits are needed.
        assert_eq!(Money::from_f64(1e22, Currency::Jpy).unwrap().amount().scale(), 0);
    }

    #[test]
    fn zero_carries_currency_scale() {
        assert_eq!(Money::zero(Currency::Usd).amount().to_string(), "0.00");
        assert_eq!(Money::zero(Currency::Btc).formatted(), "₿0.00000000");
    }

    #[test]
    fn currency_labels() {
        assert_eq!(Currency::Jpy.name(), "Japanese Yen");
        assert_eq!(Currency::Gbp.symbol(), "£");
        assert_eq!(Currency::Inr.code(), "INR");
    }

    #[test]
    fn non_finite_amount_rejected() {
        assert!(Money::from_f64(f64::NAN, Currency::Usd).is_err());
        assert!(Money::from_f64(f64::INFINITY, Currency::Usd).is_err());
    }

    #[test]
    fn adding_mixed_currencies_fails() {
        let a = Money::from_f64(1.0, Currency::Usd).unwrap();
        let b = Money::from_f64(1.0, Currency::Eur).unwrap();
        assert!(a.checked_add(&b).is_err());
        assert_eq!(a.checked_add(&a).unwrap().amount().to_string(), "2.00");
    }

    #[test]
    fn transaction_types_compare_structurally() {
        let a: TransactionType = CardTransaction::ecommerce("VISA").into();
        let b: TransactionType = CardTransaction::ecommerce("VISA").into();
        let c: TransactionType = CardTransaction::contactless("VISA").into();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.display_name(), "Card Online Payment");
        assert_eq!(
            TransactionType::from(TransferTransaction::wire(true, "PAYMENT")).display_name(),
            "International WIRE"
        );
    }
}
