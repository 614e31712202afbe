use alloy::primitives::{Bytes, LogData};

/// Result of a successful operation: ABI encoded return data plus the
/// events it emitted, not yet attributed to an address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Execution {
    pub output: Bytes,
    pub logs: Vec<LogData>,
}

impl Execution {
    pub fn output(output: Vec<u8>) -> Self {
        Self {
            output: Bytes::from(output),
            logs: Vec::new(),
        }
    }

    pub fn logged(log: LogData) -> Self {
        Self {
            output: Bytes::new(),
            logs: vec![log],
        }
    }
}
