pub mod mailer;
pub mod templates;

pub use mailer::Mailer;
pub use templates::{BillEmail, BookingEmail, ForgotPasswordEmail, NewBookingEmail};
