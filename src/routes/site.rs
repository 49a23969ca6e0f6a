use actix_files::{Files, NamedFile};
use actix_web::dev::{ServiceRequest, ServiceResponse, fn_service};
use actix_web::web;
use std::path::Path;

pub const INDEX_FILE: &str = "index.html";

/// Serves the built front end. Paths without a matching file get `index.html`
/// so the client-side router can handle them. Must be registered last.
pub fn init(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    let index = static_dir.join(INDEX_FILE);

    cfg.service(
        Files::new("/", static_dir)
            .index_file(INDEX_FILE)
            .default_handler(fn_service(move |req: ServiceRequest| {
                let index = index.clone();
                async move {
                    let (req, _) = req.into_parts();
                    let file = NamedFile::open_async(index).await?;
                    let res = file.into_response(&req);
                    Ok(ServiceResponse::new(req, res))
                }
            })),
    );
}
