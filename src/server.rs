use std::{net::TcpListener, sync::Arc};

use actix_web::{
    dev::Server as ActixServer,
    http::Method,
    middleware::DefaultHeaders,
    web::{get, method, post, Data, JsonConfig},
    App, HttpServer,
};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::{dispatcher::MailDispatcher, routes::*, Config, EmailClient};

pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub struct Server {
    port: u16,
    server: ActixServer,
}

impl Server {
    pub fn build(config: Config) -> anyhow::Result<Self> {
        let email_client =
            EmailClient::new(config.email_client).context("Failed to build the email client")?;
        let dispatcher = MailDispatcher::new(Arc::new(email_client), config.newsletter.site_url());
        let addr = format!("{}:{}", config.application.host, config.application.port);
        let listener = TcpListener::bind(addr)?;
        let port = listener.local_addr()?.port();
        let json_config = JsonConfig::default()
            .limit(config.application.max_payload_bytes)
            .error_handler(json_error_handler);
        let server = Self::http_server(listener, dispatcher, json_config)?;
        Ok(Self { port, server })
    }

    pub async fn run(self) -> std::io::Result<()> {
        self.server.await
    }

    fn http_server(
        listener: TcpListener,
        dispatcher: MailDispatcher,
        json_config: JsonConfig,
    ) -> std::io::Result<ActixServer> {
        let dispatcher = Data::new(dispatcher);
        HttpServer::new(move || {
            App::new()
                .wrap(
                    DefaultHeaders::new()
                        .add(("Access-Control-Allow-Origin", "*"))
                        .add(("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS)),
                )
                .wrap(TracingLogger::default())
                .app_data(json_config.clone())
                .route("/health_check", get().to(health_check))
                .route("/send-newsletter", post().to(send_newsletter))
                .route(
                    "/send-newsletter",
                    method(Method::OPTIONS).to(send_newsletter_preflight),
                )
                .app_data(dispatcher.clone())
        })
        .listen(listener)
        .map(|s| s.run())
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
