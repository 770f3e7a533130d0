use dotenvy::dotenv;
use newsletter_dispatch::{configuration::DispatcherConfig, telemetry, Config, DispatcherClient, Server};
use once_cell::sync::Lazy;
use reqwest::{Client, Response, Url};
use wiremock::{
    matchers::{method, path},
    Mock, MockBuilder, MockServer, ResponseTemplate,
};

pub const SITE_URL: &str = "https://blog.example.com";

static FAILED_TO_EXECUTE: &str = "Failed to execute request";

pub static TELEMETRY: Lazy<Result<(), String>> = Lazy::new(|| {
    let (name, filter) = ("test", "debug");
    let result = if std::env::var("TEST_LOG")
        .unwrap_or_default()
        .parse::<bool>()
        .unwrap_or_default()
    {
        telemetry::init(name, filter, std::io::stdout)
    } else {
        telemetry::init(name, filter, std::io::sink)
    };
    result.map_err(|e| e.to_string())
});

pub struct TestServer {
    pub addr: String,
    pub port: u16,
    pub email_server: MockServer,
    pub http_client: Client,
}

impl TestServer {
    pub async fn spawn() -> Self {
        dotenv().ok();
        Lazy::force(&TELEMETRY)
            .as_ref()
            .expect("Failed to initialize telemetry");

        let email_server = MockServer::start().await;
        let config = {
            let mut c = Config::init().expect("Failed to initialize config");
            c.application.port = 0;
            c.email_client.timeout_milliseconds = 200;
            c.email_client.base_url = Url::parse(&email_server.uri()).unwrap();
            c.newsletter.site_url = Some(SITE_URL.into());
            c
        };
        let host = config.application.host.clone();
        let server = Server::build(config).expect("Failed to build server");
        let port = server.port();
        let _ = tokio::spawn(server.run());
        Self {
            addr: format!("http://{}:{}", host, port),
            port,
            email_server,
            http_client: Client::new(),
        }
    }

    pub fn send_newsletter_url(&self) -> String {
        format!("{}/send-newsletter", self.addr)
    }

    pub async fn get_health_check(&self) -> Response {
        self.http_client
            .get(format!("{}/health_check", self.addr))
            .send()
            .await
            .expect(FAILED_TO_EXECUTE)
    }

    pub async fn post_send_newsletter(&self, body: &serde_json::Value) -> Response {
        self.http_client
            .post(self.send_newsletter_url())
            .json(body)
            .send()
            .await
            .expect(FAILED_TO_EXECUTE)
    }

    pub async fn post_send_newsletter_raw(&self, body: &'static str) -> Response {
        self.http_client
            .post(self.send_newsletter_url())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect(FAILED_TO_EXECUTE)
    }

    pub async fn options_send_newsletter(&self) -> Response {
        self.http_client
            .request(reqwest::Method::OPTIONS, self.send_newsletter_url())
            .header("Origin", "https://admin.example.com")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .expect(FAILED_TO_EXECUTE)
    }

    pub async fn mock_email_server(&self, response: ResponseTemplate, expect: Option<u64>) {
        let builder = email_endpoint().respond_with(response);
        if let Some(requests) = expect {
            builder.expect(requests)
        } else {
            builder
        }
        .mount(&self.email_server)
        .await
    }

    /// Bodies of every request the email provider received, in arrival order.
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect()
    }

    /// A client invoking this server the way the trigger does.
    pub fn dispatcher_client(&self) -> DispatcherClient {
        DispatcherClient::new(DispatcherConfig {
            url: Url::parse(&self.send_newsletter_url()).unwrap(),
            api_key: None,
            timeout_milliseconds: 5_000,
        })
        .expect("Failed to build the dispatcher client")
    }
}

pub fn email_endpoint() -> MockBuilder {
    Mock::given(path("/emails")).and(method("POST"))
}
