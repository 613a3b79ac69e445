use std::sync::Arc;

use tracing::info;

use hd_core::{
    chat::ChatService,
    config::Config,
    notify::{dispatch::NotificationDispatcher, notifier::Notifier},
    resolver::Resolver,
};
use hd_mail::SmtpRelay;
use hd_openai::OpenAiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Arc::new(Config::load()?);
    let _log_guard = hd_core::logging::init("hd", cfg.log_file.as_deref())?;

    let faq = Arc::new(cfg.faq_catalog()?);
    let mut languages: Vec<&str> = faq.languages().collect();
    languages.sort_unstable();
    info!(
        languages = ?languages,
        default_language = faq.default_language(),
        "FAQ catalog loaded"
    );

    let provider = Arc::new(
        OpenAiClient::new(cfg.openai_api_key.clone(), cfg.openai_timeout)?
            .with_base_url(cfg.openai_base_url.clone()),
    );
    let resolver = Resolver::new(faq.clone(), provider)
        .with_model(cfg.openai_model.clone())
        .with_system_prompt(cfg.system_prompt.clone());

    let dispatcher = if cfg.notify.enabled {
        let relay = Arc::new(SmtpRelay::new(
            cfg.notify.smtp_host.clone(),
            cfg.notify.smtp_port,
            cfg.notify.smtp_username.clone(),
            cfg.notify.smtp_password.clone(),
        ));
        NotificationDispatcher::new(Arc::new(Notifier::new(relay, cfg.notify.envelope())))
    } else {
        info!("email notifications disabled");
        NotificationDispatcher::disabled()
    };

    let chat = Arc::new(ChatService::new(resolver, dispatcher));

    info!(version = env!("CARGO_PKG_VERSION"), model = %cfg.openai_model, "hd starting");
    hd_http::router::run_server(cfg, chat).await
}
