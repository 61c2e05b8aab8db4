use serde_json::Value;

/// Picks the amount of the first price whose currency matches.
///
/// Price entries look like `{"value": {"currencyCode": "EUR", "centAmount": 1299}}`.
/// Returns `None` when `prices` is not an array or no entry matches.
pub fn select_price(prices: &Value, currency: &str) -> Option<Value> {
    prices
        .as_array()?
        .iter()
        .filter_map(|price| price.get("value"))
        .find(|value| value.get("currencyCode").and_then(Value::as_str) == Some(currency))
        .and_then(|value| value.get("centAmount"))
        .filter(|amount| !amount.is_null())
        .cloned()
}
