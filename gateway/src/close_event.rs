#[derive(Debug, Clone)]
pub struct CloseEvent {
    pub status_code: u16,
    pub error: String,
}

impl CloseEvent {
    pub fn new(status_code: u16, error: String) -> Self {
        Self { status_code, error }
    }

    /// Authentication failures, bad shard config and disallowed intents never recover
    pub fn should_reconnect(&self) -> bool {
        !matches!(self.status_code, 4004 | 4010 | 4011 | 4012 | 4013 | 4014)
    }

    /// Whether the session survives this close and can be RESUMEd
    pub fn can_resume(&self) -> bool {
        !matches!(self.status_code, 1000 | 1001 | 4007 | 4009)
    }
}
