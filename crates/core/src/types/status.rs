//! Status enums used by checkout and form submissions.

use serde::{Deserialize, Serialize};

/// How the customer chose to pay at checkout.
///
/// Payment is not captured by the storefront; the method is relayed to the
/// order sheet so the studio can follow up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    /// Bank transfer via a QR code shown at checkout.
    Qr,
}

impl PaymentMethod {
    /// Value written to the order sheet's card column.
    ///
    /// Only the last four digits of a card number ever leave the server.
    #[must_use]
    pub fn card_summary(&self, card_number: Option<&str>) -> String {
        match self {
            Self::Card => {
                let digits: Vec<char> = card_number
                    .unwrap_or_default()
                    .chars()
                    .filter(char::is_ascii_digit)
                    .collect();
                let last4: String = digits
                    .iter()
                    .skip(digits.len().saturating_sub(4))
                    .collect();
                format!("****-****-****-{last4}")
            }
            Self::Qr => "QR Code Payment".to_string(),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Card => write!(f, "card"),
            Self::Qr => write!(f, "qr"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "qr" => Ok(Self::Qr),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_summary_masks_all_but_last_four() {
        let summary = PaymentMethod::Card.card_summary(Some("4242 4242 4242 1881"));
        assert_eq!(summary, "****-****-****-1881");
    }

    #[test]
    fn test_card_summary_short_input() {
        assert_eq!(PaymentMethod::Card.card_summary(Some("12")), "****-****-****-12");
        assert_eq!(PaymentMethod::Card.card_summary(None), "****-****-****-");
    }

    #[test]
    fn test_qr_summary() {
        assert_eq!(
            PaymentMethod::Qr.card_summary(Some("4242424242424242")),
            "QR Code Payment"
        );
    }

    #[test]
    fn test_round_trip_str() {
        assert_eq!("qr".parse::<PaymentMethod>(), Ok(PaymentMethod::Qr));
        assert_eq!(PaymentMethod::Card.to_string(), "card");
        assert!("cash".parse::<PaymentMethod>().is_err());
    }
}
