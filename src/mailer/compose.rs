use std::fs;
use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::config::Email;

use super::error::DeliveryError;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub(super) fn compose_message(
    email: &Email,
    attachments: &[&Path],
) -> Result<Message, DeliveryError> {
    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(email.body.clone()));
    for path in attachments {
        multipart = multipart.singlepart(attachment_part(path)?);
    }

    let builder = Message::builder()
        .from(parse_mailbox(&email.from_email)?)
        .subject(email.subject.as_str());
    let builder = email
        .to_email
        .iter()
        .try_fold(builder, |builder, recipient| {
            parse_mailbox(recipient).map(|mailbox| builder.to(mailbox))
        })?;

    Ok(builder.multipart(multipart)?)
}

fn attachment_part(path: &Path) -> Result<SinglePart, DeliveryError> {
    let body = fs::read(path).map_err(|source| DeliveryError::Attachment {
        path: path.display().to_string(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "attachment".to_string());
    let mime = content_type_for(path);
    let content_type =
        ContentType::parse(mime).map_err(|_| DeliveryError::ContentType(mime.to_string()))?;

    Ok(Attachment::new(file_name).body(body, content_type))
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("xlsx") => XLSX_MIME,
        Some("csv") => "text/csv",
        Some("txt") | Some("log") => "text/plain",
        _ => "application/octet-stream",
    }
}

fn parse_mailbox(value: &str) -> Result<Mailbox, DeliveryError> {
    value.parse::<Mailbox>().map_err(|source| DeliveryError::Address {
        value: value.to_string(),
        source,
    })
}
