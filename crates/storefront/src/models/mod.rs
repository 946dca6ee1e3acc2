//! Request and payload types for the storefront API.

pub mod session;
pub mod submission;

pub use session::keys as session_keys;
pub use submission::{
    CheckoutForm, ContactForm, ContactSubmission, FormError, InquiryForm, InquirySubmission,
    OrderSubmission,
};
