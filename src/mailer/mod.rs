mod compose;
mod error;
mod transport;

use std::path::Path;

use crate::config::Email;

pub use error::DeliveryError;

use compose::compose_message;
use transport::{build_transport, send_message};

/// Sends one message with `attachments` to every configured recipient. No retry.
pub fn send_report(email: &Email, attachments: &[&Path]) -> Result<(), DeliveryError> {
    let message = compose_message(email, attachments)?;
    let transport = build_transport(email)?;
    send_message(&transport, email, &message)?;

    log::info!(
        "report_mailed server={}:{} recipients={} attachments={}",
        email.smtp_server,
        email.smtp_port,
        email.to_email.len(),
        attachments.len()
    );
    Ok(())
}
