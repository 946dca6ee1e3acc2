//! Form input and the rows relayed to the spreadsheet web apps.
//!
//! Incoming forms are validated into submissions; a submission serializes to
//! exactly the JSON object its sheet expects (camelCase keys).

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wildlife_prints_core::{Cart, Email, EmailError, OrderId, PaymentMethod, Product, ProductId};

/// Asia/Bangkok is UTC+7 with no daylight saving.
const BANGKOK_OFFSET_HOURS: i64 = 7;

/// Validation failures for submitted forms.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Your cart is empty")]
    EmptyCart,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail(#[from] EmailError),
}

/// Order timestamp as the studio reads it: Bangkok local time,
/// `MM/DD/YYYY, HH:MM:SS`.
#[must_use]
pub fn bangkok_timestamp(now: DateTime<Utc>) -> String {
    (now.naive_utc() + TimeDelta::hours(BANGKOK_OFFSET_HOURS))
        .format("%m/%d/%Y, %H:%M:%S")
        .to_string()
}

/// ISO 8601 UTC timestamp with milliseconds.
#[must_use]
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

// =============================================================================
// Checkout
// =============================================================================

/// Billing details and payment choice posted to `/api/checkout`.
///
/// Card expiry and security code are never accepted; only the card number
/// is read, and only its last four digits are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub company: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub card_number: Option<String>,
}

/// One row of the order sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub order_id: OrderId,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub country: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub phone: String,
    pub email: Email,
    pub notes: String,
    pub items: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub card_number: String,
}

impl OrderSubmission {
    /// Validate `form` against `cart` and build the order row.
    ///
    /// # Errors
    ///
    /// [`FormError::EmptyCart`] for an empty cart, otherwise the first
    /// missing required field or an invalid email.
    pub fn new(form: &CheckoutForm, cart: &Cart, now: DateTime<Utc>) -> Result<Self, FormError> {
        if cart.is_empty() {
            return Err(FormError::EmptyCart);
        }

        let first_name = required(&form.first_name, "First name")?;
        let last_name = required(&form.last_name, "Last name")?;
        let country = required(&form.country, "Country")?;
        let address = required(&form.address, "Address")?;
        let city = required(&form.city, "City")?;
        let postcode = required(&form.postcode, "Postcode")?;
        let phone = required(&form.phone, "Phone")?;
        let email = Email::parse(&form.email)?;

        if form.payment_method == PaymentMethod::Card {
            required(form.card_number.as_deref().unwrap_or_default(), "Card number")?;
        }

        Ok(Self {
            timestamp: bangkok_timestamp(now),
            kind: "Store Order",
            order_id: OrderId::from_unix_millis(now.timestamp_millis()),
            first_name,
            last_name,
            company: optional(form.company.as_deref()),
            country,
            address,
            city,
            state: optional(form.state.as_deref()),
            postcode,
            phone,
            email,
            notes: optional(form.notes.as_deref()),
            items: cart.summary(),
            total: cart.total().amount(),
            payment_method: form.payment_method,
            card_number: form
                .payment_method
                .card_summary(form.card_number.as_deref()),
        })
    }
}

// =============================================================================
// Contact
// =============================================================================

/// Message posted to `/api/contact`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// One row of the contact sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub timestamp: String,
    pub name: String,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactSubmission {
    /// # Errors
    ///
    /// The first missing required field or an invalid email.
    pub fn new(form: &ContactForm, now: DateTime<Utc>) -> Result<Self, FormError> {
        let name = required(&form.name, "Name")?;
        let email = Email::parse(&form.email)?;
        let message = required(&form.message, "Message")?;

        Ok(Self {
            timestamp: iso_timestamp(now),
            name,
            email,
            subject: form
                .subject
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            message,
        })
    }
}

// =============================================================================
// Limited edition inquiry
// =============================================================================

/// Purchase inquiry for one limited edition print.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryForm {
    pub product_id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub location: String,
    pub message: Option<String>,
    #[serde(default)]
    pub newsletter: bool,
}

/// One row of the inquiry sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquirySubmission {
    pub timestamp: String,
    pub product_title: String,
    pub product_id: ProductId,
    pub name: String,
    pub email: Email,
    pub location: String,
    pub message: String,
    pub newsletter: &'static str,
}

impl InquirySubmission {
    /// Build the inquiry row for `product`, which must be the print the
    /// form refers to.
    ///
    /// # Errors
    ///
    /// The first missing required field or an invalid email.
    pub fn new(form: &InquiryForm, product: &Product, now: DateTime<Utc>) -> Result<Self, FormError> {
        let name = required(&form.name, "Name")?;
        let email = Email::parse(&form.email)?;
        let location = required(&form.location, "Location")?;

        Ok(Self {
            timestamp: iso_timestamp(now),
            product_title: product.name.clone(),
            product_id: product.id.clone(),
            name,
            email,
            location,
            message: optional(form.message.as_deref()),
            newsletter: if form.newsletter { "Yes" } else { "No" },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;
    use wildlife_prints_core::{CartAction, Price};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 20, 5, 9).unwrap()
    }

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            country: "Thailand".to_string(),
            address: "1 Sukhumvit Rd".to_string(),
            city: "Bangkok".to_string(),
            postcode: "10110".to_string(),
            phone: "+66 2 000 0000".to_string(),
            email: "Ada@Example.com".to_string(),
            payment_method: PaymentMethod::Card,
            card_number: Some("4111 1111 1111 1234".to_string()),
            ..CheckoutForm::default()
        }
    }

    fn cart() -> Cart {
        let tiger = Product::new("3", "Bengal Tiger Portrait", Price::whole(420), "/t.jpg");
        let whale = Product::new("4", "Humpback Whale Breach", Price::whole(380), "/w.jpg");
        Cart::new()
            .reduce(CartAction::AddItem(tiger.clone()))
            .reduce(CartAction::AddItem(tiger))
            .reduce(CartAction::AddItem(whale))
    }

    #[test]
    fn test_bangkok_timestamp_crosses_midnight() {
        assert_eq!(bangkok_timestamp(now()), "03/15/2025, 03:05:09");
    }

    #[test]
    fn test_iso_timestamp_has_millis() {
        assert_eq!(iso_timestamp(now()), "2025-03-14T20:05:09.000Z");
    }

    #[test]
    fn test_order_payload_shape() {
        let order = OrderSubmission::new(&checkout_form(), &cart(), now()).unwrap();
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["type"], "Store Order");
        assert_eq!(value["orderId"], format!("ORDER-{}", now().timestamp_millis()));
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(
            value["items"],
            "Bengal Tiger Portrait (Qty: 2), Humpback Whale Breach (Qty: 1)"
        );
        assert_eq!(value["total"], json!(1220.0));
        assert_eq!(value["paymentMethod"], "card");
        assert_eq!(value["cardNumber"], "****-****-****-1234");
        assert_eq!(value["company"], "");
        assert!(value.get("cardExpiry").is_none());
    }

    #[test]
    fn test_qr_order_needs_no_card() {
        let form = CheckoutForm {
            payment_method: PaymentMethod::Qr,
            card_number: None,
            ..checkout_form()
        };
        let order = OrderSubmission::new(&form, &cart(), now()).unwrap();
        assert_eq!(order.card_number, "QR Code Payment");
    }

    #[test]
    fn test_order_validation() {
        assert!(matches!(
            OrderSubmission::new(&checkout_form(), &Cart::new(), now()),
            Err(FormError::EmptyCart)
        ));

        let form = CheckoutForm {
            city: "   ".to_string(),
            ..checkout_form()
        };
        assert!(matches!(
            OrderSubmission::new(&form, &cart(), now()),
            Err(FormError::MissingField("City"))
        ));

        let form = CheckoutForm {
            email: "not-an-email".to_string(),
            ..checkout_form()
        };
        assert!(matches!(
            OrderSubmission::new(&form, &cart(), now()),
            Err(FormError::InvalidEmail(_))
        ));

        let form = CheckoutForm {
            card_number: None,
            ..checkout_form()
        };
        assert!(matches!(
            OrderSubmission::new(&form, &cart(), now()),
            Err(FormError::MissingField("Card number"))
        ));
    }

    #[test]
    fn test_contact_payload() {
        let form = ContactForm {
            name: "Jo".to_string(),
            email: "jo@example.org".to_string(),
            subject: Some("  ".to_string()),
            message: "Do you ship to Norway?".to_string(),
        };
        let value = serde_json::to_value(ContactSubmission::new(&form, now()).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "timestamp": "2025-03-14T20:05:09.000Z",
                "name": "Jo",
                "email": "jo@example.org",
                "message": "Do you ship to Norway?",
            })
        );
    }

    #[test]
    fn test_contact_requires_message() {
        let form = ContactForm {
            name: "Jo".to_string(),
            email: "jo@example.org".to_string(),
            ..ContactForm::default()
        };
        assert!(matches!(
            ContactSubmission::new(&form, now()),
            Err(FormError::MissingField("Message"))
        ));
    }

    #[test]
    fn test_inquiry_payload() {
        let product = Product::new("le-002", "Tiger Portrait", Price::whole(520), "/2.jpg");
        let form = InquiryForm {
            product_id: ProductId::new("le-002"),
            name: "Sam".to_string(),
            email: "sam@example.net".to_string(),
            location: "Chiang Mai".to_string(),
            message: None,
            newsletter: true,
        };
        let value =
            serde_json::to_value(InquirySubmission::new(&form, &product, now()).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "timestamp": "2025-03-14T20:05:09.000Z",
                "productTitle": "Tiger Portrait",
                "productId": "le-002",
                "name": "Sam",
                "email": "sam@example.net",
                "location": "Chiang Mai",
                "message": "",
                "newsletter": "Yes",
            })
        );
    }
}
