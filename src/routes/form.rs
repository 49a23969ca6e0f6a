use crate::handlers::form::relay;
use crate::mail::Mailer;
use crate::models::body::decode;
use crate::models::response::{FormResponse, INVALID_BODY, SEND_FAILED};
use crate::models::submission::{ContactSubmission, RegistrationSubmission, Submission};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, post, web};
use tracing::{error, warn};

#[post("/cadastro")]
async fn cadastro(mailer: web::Data<Mailer>, req: HttpRequest, body: web::Bytes) -> impl Responder {
    submit::<RegistrationSubmission>(&mailer, &req, &body).await
}

#[post("/contato")]
async fn contato(mailer: web::Data<Mailer>, req: HttpRequest, body: web::Bytes) -> impl Responder {
    submit::<ContactSubmission>(&mailer, &req, &body).await
}

async fn submit<S: Submission>(mailer: &Mailer, req: &HttpRequest, body: &[u8]) -> HttpResponse {
    let submission = match decode::<S>(req.content_type(), body) {
        Ok(submission) => submission,
        Err(e) => {
            warn!("Rejected {} submission: {}", S::KIND, e);
            return HttpResponse::BadRequest().json(FormResponse::failure(INVALID_BODY));
        }
    };

    match relay(mailer, &submission).await {
        Ok(_) => HttpResponse::Ok().json(FormResponse::success()),
        Err(e) => {
            error!("Failed to send {} email: {:?}", S::KIND, e);
            HttpResponse::InternalServerError().json(FormResponse::failure(SEND_FAILED))
        }
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(cadastro).service(contato);
}
