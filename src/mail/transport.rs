use crate::config::SmtpSettings;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::stub::AsyncStubTransport;
use lettre::{AsyncSmtpTransport, Tokio1Executor};

/// Port on which SMTP expects TLS from the first byte.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// How outgoing mail leaves the process.
pub enum MailTransport {
    /// Live SMTP relay.
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    /// No network I/O. Messages are only kept in the stub's log.
    Stub(AsyncStubTransport),
}

impl MailTransport {
    /// Picks the transport from configuration alone: SMTP when it is configured, the stub otherwise.
    pub fn select(smtp: Option<&SmtpSettings>) -> Result<Self, lettre::transport::smtp::Error> {
        match smtp {
            Some(settings) => Self::smtp(settings),
            None => Ok(MailTransport::Stub(AsyncStubTransport::new_ok())),
        }
    }

    pub fn smtp(settings: &SmtpSettings) -> Result<Self, lettre::transport::smtp::Error> {
        let builder = if settings.port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?
        } else {
            let tls = TlsParameters::new(settings.host.clone())?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
                .tls(Tls::Opportunistic(tls))
        };

        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout));

        if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(MailTransport::Smtp(builder.build()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            MailTransport::Smtp(_) => "smtp",
            MailTransport::Stub(_) => "stub",
        }
    }
}
