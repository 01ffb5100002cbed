use std::fmt;
use std::time::Duration;

/// How a single call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The server answered 200.
    Success(u16),
    /// The server answered with any other status.
    FailedStatus(u16),
    /// No response was produced: refused, timed out, DNS, TLS, ...
    FailedTransport(String),
}

impl CallOutcome {
    /// Status code for the error breakdown, 0 when no response arrived.
    pub fn status_code(&self) -> u16 {
        match self {
            CallOutcome::Success(code) | CallOutcome::FailedStatus(code) => *code,
            CallOutcome::FailedTransport(_) => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallResult {
    pub worker_id: usize,
    pub call_index: u64,
    pub elapsed: Duration,
    pub outcome: CallOutcome,
    /// Bytes read while draining the body, 0 when it was left unread.
    pub body_bytes: u64,
    /// Requests sent for this call, 1 plus any connection retries.
    pub attempts: u32,
}

impl CallResult {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thread {:>2}.{:<6} - ", self.worker_id, self.call_index)?;
        match &self.outcome {
            CallOutcome::Success(code) => write!(f, "Success: {}", code)?,
            CallOutcome::FailedStatus(code) => write!(f, "Failed with status code: {}", code)?,
            CallOutcome::FailedTransport(err) => write!(f, "Request failed: {}", err)?,
        }
        write!(f, " - Response time: {:.2} ms", self.elapsed_ms())
    }
}
