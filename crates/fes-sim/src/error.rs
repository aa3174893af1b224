use fes_core::{QueueError, VirtualTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("event queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("cannot schedule at {requested}: current time is already {now}")]
    Causality {
        now:       VirtualTime,
        requested: VirtualTime,
    },
}

pub type SimResult<T> = Result<T, SimError>;
