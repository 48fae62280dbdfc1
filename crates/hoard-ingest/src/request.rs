use bytes::Bytes;
use hoard_types::CallerIdentity;

/// One upload as handed over by the transport layer.
#[derive(Clone, Debug)]
pub struct IngestRequest {
    /// Verified by the authentication layer; recorded, never authorized on.
    pub caller: CallerIdentity,
    /// The id exactly as it appeared in the request path.
    pub claimed_id: String,
    pub payload: Bytes,
}

impl IngestRequest {
    pub fn new(caller: CallerIdentity, claimed_id: impl Into<String>, payload: impl Into<Bytes>) -> Self {
        Self {
            caller,
            claimed_id: claimed_id.into(),
            payload: payload.into(),
        }
    }

    /// The claimed id with control characters escaped, safe for one log line.
    /// The transport percent-decodes the path, so it may hold `\n` or `\r`.
    pub fn loggable_id(&self) -> String {
        self.claimed_id.escape_debug().to_string()
    }

    /// The uploader name, escaped like [`Self::loggable_id`].
    pub fn loggable_uploader(&self) -> String {
        self.caller.name.escape_debug().to_string()
    }
}
