pub mod transport;

use crate::config::MailSettings;
use lettre::message::Mailbox;
use lettre::message::header::{ContentTransferEncoding, ContentType};
use lettre::{AsyncTransport, Message};
use thiserror::Error;
use tracing::{debug, info};

pub use transport::MailTransport;

pub const SENDER: &str = "ANIC <no-reply@anic.live>";

#[derive(Error, Debug)]
pub enum MailError {
    #[error("invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("stub transport rejected the message: {0}")]
    Stub(#[from] lettre::transport::stub::Error),
}

/// Outcome of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the SMTP relay with the given reply code.
    Relayed { code: String },
    /// Kept by the stub transport, nothing left the process.
    Recorded,
}

/// Sends plain-text notifications from the fixed sender to one recipient.
pub struct Mailer {
    transport: MailTransport,
    from: Mailbox,
    to: Mailbox,
}

impl Mailer {
    pub fn new(transport: MailTransport, to: Mailbox) -> Result<Self, MailError> {
        Ok(Mailer {
            transport,
            from: SENDER.parse()?,
            to,
        })
    }

    pub fn from_settings(settings: &MailSettings) -> Result<Self, MailError> {
        let transport = MailTransport::select(settings.smtp.as_ref())?;
        Self::new(transport, settings.to.clone())
    }

    pub fn transport(&self) -> &MailTransport {
        &self.transport
    }

    pub fn recipient(&self) -> &Mailbox {
        &self.to
    }

    /// One delivery attempt. Errors are returned as-is, nothing is retried.
    pub async fn send(&self, subject: &str, body: String) -> Result<Delivery, MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .header(ContentTransferEncoding::Base64)
            .body(body.clone())?;

        match &self.transport {
            MailTransport::Smtp(smtp) => {
                let response = smtp.send(message).await?;
                let code = response.code().to_string();
                debug!("SMTP relay answered {} for {:?}", code, subject);
                Ok(Delivery::Relayed { code })
            }
            MailTransport::Stub(stub) => {
                stub.send(message).await?;
                info!(
                    to = %self.to,
                    subject,
                    "SMTP not configured, message recorded without delivery:\n{}",
                    body
                );
                Ok(Delivery::Recorded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::*;
    use lettre::transport::stub::AsyncStubTransport;

    fn recipient() -> Mailbox {
        "duvidas@anic.live".parse().unwrap()
    }

    #[actix_web::test]
    async fn stub_records_message_for_recipient() {
        let stub = AsyncStubTransport::new_ok();
        let mailer = Mailer::new(MailTransport::Stub(stub.clone()), recipient()).unwrap();

        let delivery = mailer
            .send("Contato ANIC - Mensagem", "hello".to_string())
            .await
            .unwrap();

        assert_eq!(delivery, Delivery::Recorded);

        let messages = stub.messages().await;
        assert_eq!(messages.len(), 1);

        let (envelope, raw) = &messages[0];
        assert_eq!(envelope.to()[0].to_string(), "duvidas@anic.live");
        assert_eq!(
            envelope.from().map(|from| from.to_string()).as_deref(),
            Some("no-reply@anic.live")
        );
        assert!(raw.contains("Subject: Contato ANIC - Mensagem"));
        assert!(raw.contains("Content-Transfer-Encoding: base64"));

        let (_, encoded) = raw.split_once("\r\n\r\n").unwrap();
        let encoded: String = encoded.split_whitespace().collect();
        assert_eq!(BASE64_STANDARD.decode(encoded).unwrap(), b"hello");
    }

    #[actix_web::test]
    async fn transport_error_is_returned() {
        let stub = AsyncStubTransport::new_error();
        let mailer = Mailer::new(MailTransport::Stub(stub), recipient()).unwrap();

        let result = mailer.send("subject", "body".to_string()).await;

        assert!(matches!(result, Err(MailError::Stub(_))));
    }

    #[test]
    fn from_settings_uses_stub_without_smtp() {
        let settings = MailSettings {
            to: recipient(),
            smtp: None,
        };
        let mailer = Mailer::from_settings(&settings).unwrap();

        assert_eq!(mailer.transport().name(), "stub");
        assert_eq!(mailer.recipient().email.to_string(), "duvidas@anic.live");
    }
}
