use bytes::Bytes;

use crate::FetchError;

/// Status and body returned by a host for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HostResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A running site that can list its exportable routes and serve each of them.
#[async_trait::async_trait]
pub trait Host: Send + Sync {
    /// Every statically exportable route, each starting with `/`.
    fn paths(&self) -> Vec<String>;

    async fn fetch(&self, path: &str) -> Result<HostResponse, FetchError>;
}
