//! Fluent builder for constructing a [`Sim`].

use fes_core::{EventId, VirtualTime};
use fes_observe::{NoopListener, ObservableQueue, QueueListener};
use fes_queue::{AnyQueue, build_queue};

use crate::handler::EventHandler;
use crate::{Sim, SimConfig, SimError, SimResult};

/// Boxed listener accepted by [`SimBuilder::listener`].
pub type BoxListener = Box<dyn QueueListener<EventId, VirtualTime>>;

/// Fluent builder for [`Sim<H>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: end time, step limit, seed, queue selection
/// - `H: EventHandler`: the model logic
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                       |
/// |-----------------|-----------------------------------------------|
/// | `.queue(q)`     | `build_queue(&config.queue)`                  |
/// | `.listener(l)`  | None; `config.queue.observe` uses a no-op one |
///
/// Supplying a listener implies observation.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, HoldModel::new(seed, 1.0))
///     .listener(Box::new(CsvTraceListener::from_path(path)?))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<H: EventHandler> {
    config:   SimConfig,
    handler:  H,
    queue:    Option<AnyQueue<EventId, VirtualTime>>,
    listener: Option<BoxListener>,
}

impl<H: EventHandler> SimBuilder<H> {
    pub fn new(config: SimConfig, handler: H) -> Self {
        Self {
            config,
            handler,
            queue:    None,
            listener: None,
        }
    }

    /// Use `queue` instead of building one from `config.queue`.
    ///
    /// When observation is on, `build` rejects a queue that is not empty.
    pub fn queue(mut self, queue: AnyQueue<EventId, VirtualTime>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Observe the queue and report every change to `listener`.
    pub fn listener(mut self, listener: BoxListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Validate the config, build (and optionally wrap) the queue, and return
    /// a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<H>> {
        self.config.validate()?;

        let queue = match self.queue {
            Some(q) => q,
            None => build_queue(&self.config.queue)?,
        };

        let observe = self.config.queue.observe || self.listener.is_some();
        if observe && !queue.is_empty() {
            return Err(SimError::Config(format!(
                "cannot observe a queue that already holds {} events",
                queue.len()
            )));
        }

        let queue = if observe {
            let listener = self.listener.unwrap_or_else(|| Box::new(NoopListener));
            tracing::debug!(strategy = queue.name(), "observing event queue");
            observed(queue, listener)
        } else {
            queue
        };

        Ok(Sim::new(self.config, queue, self.handler))
    }
}

fn observed(queue: AnyQueue<EventId, VirtualTime>, listener: BoxListener) -> AnyQueue<EventId, VirtualTime> {
    Box::new(ObservableQueue::observing(queue, listener))
}

