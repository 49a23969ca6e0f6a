use crate::mail::{Delivery, MailError, Mailer};
use crate::models::submission::Submission;
use tracing::info;

/// Renders the submission and makes exactly one delivery attempt.
pub async fn relay<S: Submission>(mailer: &Mailer, submission: &S) -> Result<Delivery, MailError> {
    let body = submission.render();
    let delivery = mailer.send(S::SUBJECT, body).await?;

    info!(
        "Relayed {} submission to {} ({:?})",
        S::KIND,
        mailer.recipient(),
        delivery
    );

    Ok(delivery)
}
