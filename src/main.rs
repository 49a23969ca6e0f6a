use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use anic_relay::{Mailer, Settings, logger, routes};
use anyhow::Context;
use dotenv::dotenv;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logger::init();

    let settings = Settings::from_env().context("Invalid configuration")?;
    let mailer = Mailer::from_settings(&settings.mail).context("Failed to build mail transport")?;

    match &settings.mail.smtp {
        Some(smtp) => info!(
            "Relaying mail to {} through {}:{}",
            settings.mail.to, smtp.host, smtp.port
        ),
        None => warn!("SMTP_HOST/SMTP_PORT not set, emails will only be logged"),
    }

    let mailer = web::Data::new(mailer);
    let static_dir = settings.static_dir.clone();

    info!(
        "ANIC server listening on http://{}:{}",
        settings.host, settings.port
    );

    HttpServer::new(move || {
        let static_dir = static_dir.clone();
        App::new()
            .app_data(mailer.clone())
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::init)
            .configure(move |cfg| routes::site::init(cfg, &static_dir))
    })
    .bind((settings.host.as_str(), settings.port))
    .with_context(|| format!("Failed to bind {}:{}", settings.host, settings.port))?
    .run()
    .await?;

    Ok(())
}
