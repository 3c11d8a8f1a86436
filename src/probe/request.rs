use std::sync::Arc;

/// One (URL, payload) pair of the cross product.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url_index: usize,
    pub payload_index: usize,
    pub url: Arc<str>,
    pub payload: Arc<str>,
    pub cookie: Option<Arc<str>>,
}

impl ProbeRequest {
    /// The request target: URL and payload concatenated with no separator.
    /// Query syntax (`?`, `&`, `=`) has to be part of the URL or the payload.
    pub fn target(&self) -> String {
        let mut t = String::with_capacity(self.url.len() + self.payload.len());
        t.push_str(&self.url);
        t.push_str(&self.payload);
        t
    }

    /// The cookie to put on the wire. The cookie always travels with the
    /// request but is only attached when `send_cookie` is set.
    pub fn cookie_header(&self, send_cookie: bool) -> Option<&str> {
        if !send_cookie {
            return None;
        }
        self.cookie.as_deref().filter(|c| !c.is_empty())
    }
}
