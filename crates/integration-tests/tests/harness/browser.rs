//! Minimal browser stand-in that keeps the session cookie between requests

use reqwest::header;

use super::server::TestServer;

/// One user's session against a [`TestServer`]
pub struct Browser<'a> {
    server: &'a TestServer,
    cookie: Option<String>,
}

impl<'a> Browser<'a> {
    pub fn new(server: &'a TestServer) -> Self {
        Self { server, cookie: None }
    }

    /// The `name=value` pair currently sent as the session cookie
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// Load the page and return its HTML
    pub async fn page(&mut self) -> String {
        let request = self.server.client().get(self.server.url("/"));
        let response = self.send(request).await;
        assert_eq!(response.status(), 200);
        response.text().await.unwrap()
    }

    /// Submit the prompt form, returning the redirect response
    pub async fn submit(&mut self, prompt: &str) -> reqwest::Response {
        let request = self
            .server
            .client()
            .post(self.server.url("/"))
            .form(&[("prompt", prompt)]);
        self.send(request).await
    }

    /// Press the clear button, returning the redirect response
    pub async fn reset(&mut self) -> reqwest::Response {
        let request = self.server.client().post(self.server.url("/reset"));
        self.send(request).await
    }

    /// Follow a download link
    pub async fn download(&mut self, index: usize) -> reqwest::Response {
        let request = self.server.client().get(self.server.url(&format!("/images/{index}")));
        self.send(request).await
    }

    async fn send(&mut self, mut request: reqwest::RequestBuilder) -> reqwest::Response {
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_owned());
        }

        response
    }
}
