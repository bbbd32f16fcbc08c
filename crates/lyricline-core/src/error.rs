//! Error types for remote lyrics lookups

/// HTTP status the remote source uses to signal "slow down".
pub const RATE_LIMIT_STATUS: u16 = 429;

/// A single failed call against the remote source.
#[derive(Debug)]
pub enum SourceError {
    /// HTTP error with optional status code
    Http {
        status: Option<u16>,
        message: String,
    },
    /// Response arrived but could not be understood
    Decode(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http {
                status: Some(s),
                message,
            } => write!(f, "HTTP {s}: {message}"),
            Self::Http {
                status: None,
                message,
            } => write!(f, "HTTP error: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

impl SourceError {
    /// Create HTTP error from reqwest error.
    ///
    /// The URL is stripped so API tokens passed as query parameters never reach the logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        Self::Http {
            status: e.status().map(|s| s.as_u16()),
            message: e.without_url().to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            Self::Decode(_) => None,
        }
    }

    /// Whether the source asked us to back off (HTTP 429)
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(RATE_LIMIT_STATUS)
    }

    /// Transient transport failures: timeouts, dropped connections, 5xx.
    ///
    /// Rate limiting is excluded; the backoff executor handles it.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { status: None, .. } => true,
            Self::Http {
                status: Some(s), ..
            } => (500..=599).contains(s),
            Self::Decode(_) => false,
        }
    }
}

/// Failure of a remote operation after the backoff executor gave up.
#[derive(Debug)]
pub enum RemoteError {
    /// Non-rate-limit failure; surfaced on the first occurrence
    Failed { cause: SourceError, attempts: u32 },
    /// Still rate limited after the whole retry budget was spent
    RetriesExhausted { cause: SourceError, attempts: u32 },
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed { cause, .. } => write!(f, "{cause}"),
            Self::RetriesExhausted { cause, attempts } => {
                write!(f, "rate limited after {attempts} attempts: {cause}")
            }
        }
    }
}

impl std::error::Error for RemoteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause())
    }
}

impl RemoteError {
    pub fn cause(&self) -> &SourceError {
        match self {
            Self::Failed { cause, .. } | Self::RetriesExhausted { cause, .. } => cause,
        }
    }

    /// Total number of calls made, including the one that failed
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Failed { attempts, .. } | Self::RetriesExhausted { attempts, .. } => *attempts,
        }
    }

    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self, Self::RetriesExhausted { .. })
    }
}
