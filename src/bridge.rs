use log::{error, trace, warn};
use tracker_core::{
    InputError, InputSource, OutputError, OutputSink, Tracker, TrackerConfig, UpdateError,
};

/// A bridge that feeds orientation updates from an input source through a
/// [`Tracker`] and forwards the resulting events to an output sink.
///
/// # Error Handling
///
/// Malformed or rejected updates are dropped and reported; the tracker state is
/// left as it was. Only a disconnected input ends [`run`](Self::run).
pub struct TrackerBridge<I, O> {
    input: I,
    output: O,
    tracker: Tracker,
}

impl<I: InputSource, O: OutputSink> TrackerBridge<I, O> {
    /// Create a new bridge with the default tracker configuration.
    pub fn new(input: I, output: O) -> Self {
        Self::with_config(input, output, TrackerConfig::default())
    }

    pub fn with_config(input: I, output: O, config: TrackerConfig) -> Self {
        Self {
            input,
            output,
            tracker: Tracker::new(config),
        }
    }

    /// Forward updates until the input disconnects.
    pub async fn run(&mut self) {
        loop {
            match self.process_one().await {
                Ok(()) => {}
                Err(BridgeError::Input(InputError::Disconnected)) => {
                    warn!("input disconnected, stopping");
                    return;
                }
                Err(e) => error!("bridge error: {}", e),
            }
        }
    }

    /// Receive one update, apply it and forward every event it produces, in order.
    ///
    /// Stops at the first output error; the remaining events of that update are
    /// not sent.
    pub async fn process_one(&mut self) -> Result<(), BridgeError> {
        let update = self.input.receive().await?;
        let events = self.tracker.apply(update)?;
        trace!("{} events", events.len());
        for event in &events {
            self.output.send(event).await?;
        }
        Ok(())
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut Tracker {
        &mut self.tracker
    }

    /// Get a reference to the input source.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Get a mutable reference to the input source.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Get a reference to the output sink.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output sink.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Decompose the bridge into its input and output components.
    pub fn into_parts(self) -> (I, O) {
        (self.input, self.output)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the input source.
    Input(InputError),
    /// Error from the output sink.
    Output(OutputError),
    /// Update rejected by the tracker.
    Update(UpdateError),
}

impl From<InputError> for BridgeError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl From<OutputError> for BridgeError {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

impl From<UpdateError> for BridgeError {
    fn from(e: UpdateError) -> Self {
        Self::Update(e)
    }
}

impl core::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input: {}", e),
            Self::Output(e) => write!(f, "output: {}", e),
            Self::Update(e) => write!(f, "update: {}", e),
        }
    }
}
