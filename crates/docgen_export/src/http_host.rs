use std::time::Duration;

use bytes::{Bytes, BytesMut};
use docgen_logging::docgen_trace;
use futures_util::StreamExt;
use url::Url;

use crate::{FailureKind, FetchError, Host, HostResponse};

#[derive(Debug, Clone)]
pub struct HttpHostSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
}

impl Default for HttpHostSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
        }
    }
}

/// A [`Host`] backed by a site already listening on `base_url`.
#[derive(Debug, Clone)]
pub struct HttpHost {
    base: Url,
    paths: Vec<String>,
    client: reqwest::Client,
}

impl HttpHost {
    pub fn new(
        base_url: &str,
        paths: Vec<String>,
        settings: HttpHostSettings,
    ) -> Result<Self, FetchError> {
        let mut base = Url::parse(base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        // Keep a trailing slash so `base_url` reads as a directory.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            base,
            paths,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build the request URL for a route. Each segment is percent-encoded, so
    /// `#`, `?` and `%` in file names reach the host literally.
    pub fn url_for(&self, route: &str) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                FetchError::new(FailureKind::InvalidUrl, format!("{} has no path", self.base))
            })?;
            segments
                .pop_if_empty()
                .extend(route.split('/').filter(|segment| !segment.is_empty()));
            if route.is_empty() || route.ends_with('/') {
                segments.push("");
            }
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Host for HttpHost {
    fn paths(&self) -> Vec<String> {
        self.paths.clone()
    }

    async fn fetch(&self, path: &str) -> Result<HostResponse, FetchError> {
        let url = self.url_for(path)?;
        docgen_trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status().as_u16();

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk: Bytes = chunk.map_err(map_reqwest_error)?;
            body.extend_from_slice(&chunk);
        }

        Ok(HostResponse::new(status, body.freeze()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
