use url::Url;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
}

impl HttpRequest {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}
