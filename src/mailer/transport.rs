use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::{Email, SmtpSecurity};

use super::error::DeliveryError;

pub(super) fn build_transport(email: &Email) -> Result<SmtpTransport, DeliveryError> {
    let smtp_error = |source| DeliveryError::Smtp {
        server: format!("{}:{}", email.smtp_server, email.smtp_port),
        source,
    };

    let builder = match email.security {
        SmtpSecurity::None => SmtpTransport::builder_dangerous(email.smtp_server.as_str()),
        SmtpSecurity::Starttls => {
            SmtpTransport::starttls_relay(&email.smtp_server).map_err(smtp_error)?
        }
        SmtpSecurity::Tls => SmtpTransport::relay(&email.smtp_server).map_err(smtp_error)?,
    };

    let mut builder = builder
        .port(email.smtp_port)
        .timeout(Some(Duration::from_secs(email.timeout_secs)));
    if let (Some(username), Some(password)) = (&email.username, &email.password) {
        builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
    }

    Ok(builder.build())
}

pub(super) fn send_message(
    transport: &SmtpTransport,
    email: &Email,
    message: &Message,
) -> Result<(), DeliveryError> {
    let response = transport
        .send(message)
        .map_err(|source| DeliveryError::Smtp {
            server: format!("{}:{}", email.smtp_server, email.smtp_port),
            source,
        })?;

    log::debug!("smtp_response code={}", response.code());
    Ok(())
}
