pub mod form;
pub mod health;
pub mod site;

use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::init))
        .service(web::scope("/api/form").configure(form::init));
}
