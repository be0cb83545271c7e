mod mailer;

pub use mailer::{Mailer, NoopMailer, SmtpMailer};
