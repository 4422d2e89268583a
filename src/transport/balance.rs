use serde::Deserialize;
use serde::de::Error as DeError;

use super::TransportError;
use crate::domain::Balance;

/// Money-like value returned by MsgGate as either JSON string or JSON number.
///
/// For numbers, the raw JSON token is preserved to avoid formatting drift
/// (`10.00` remains `"10.00"` instead of becoming `"10.0"`).
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawMoney(String);

impl<'de> Deserialize<'de> for RawMoney {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom(
                "expected money field to be JSON string or number",
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct BalanceJsonResponse {
    #[serde(default)]
    balance: Option<RawMoney>,
    #[serde(default)]
    point: Option<RawMoney>,
}

pub fn decode_balance_response(json: &str) -> Result<Balance, TransportError> {
    let parsed: BalanceJsonResponse = serde_json::from_str(json)?;
    Ok(Balance {
        balance: money_or_zero(parsed.balance),
        point: money_or_zero(parsed.point),
    })
}

fn money_or_zero(value: Option<RawMoney>) -> String {
    value.map_or_else(|| "0".to_owned(), |money| money.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_preserves_number_tokens_verbatim() {
        let balance = decode_balance_response(r#"{"balance": 10.00, "point": 3}"#).unwrap();
        assert_eq!(balance.balance, "10.00");
        assert_eq!(balance.point, "3");
    }

    #[test]
    fn decode_accepts_string_tokens() {
        let balance = decode_balance_response(r#"{"balance": "250.50", "point": "0.00"}"#).unwrap();
        assert_eq!(balance.balance, "250.50");
        assert_eq!(balance.point, "0.00");
    }

    #[test]
    fn decode_defaults_missing_fields_to_zero() {
        let balance = decode_balance_response("{}").unwrap();
        assert_eq!(balance.balance, "0");
        assert_eq!(balance.point, "0");
    }

    #[test]
    fn decode_rejects_non_money_tokens() {
        assert!(matches!(
            decode_balance_response(r#"{"balance": true}"#),
            Err(TransportError::Json(_))
        ));
    }
}
