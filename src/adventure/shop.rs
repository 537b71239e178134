use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purchase {
    pub purchased: u32,
    pub leftover: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("item price must be positive, got {0}")]
    NonPositivePrice(i64),
    #[error("starting funds cannot be negative, got {0}")]
    NegativeFunds(i64),
    #[error("cannot afford {requested} at {price} each with {funds} gold (at most {affordable})")]
    InsufficientFunds { requested: u32, affordable: i64, price: i64, funds: i64 },
}

/// Buys `quantity` items at `price` each out of `funds`.
///
/// Rejects the purchase outright instead of buying fewer items.
pub fn purchase_item(price: i64, funds: i64, quantity: u32) -> Result<Purchase, PurchaseError> {
    if price <= 0 {
        return Err(PurchaseError::NonPositivePrice(price));
    }
    if funds < 0 {
        return Err(PurchaseError::NegativeFunds(funds));
    }
    let affordable = funds / price;
    if i64::from(quantity) > affordable {
        return Err(PurchaseError::InsufficientFunds { requested: quantity, affordable, price, funds });
    }
    Ok(Purchase { purchased: quantity, leftover: funds - price * i64::from(quantity) })
}
