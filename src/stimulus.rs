//! External stimuli that drive anchor shaking.
//!
//! Events arrive from outside the step loop (a relay, a UI, a test) and are
//! queued; the web drains them only at the start of a step. On the wire a
//! stimulus looks like:
//!
//! ```json
//! { "kind": "perturb", "targetIndex": 3, "amplitude": 4.0, "durationMs": 1500 }
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discrete external event.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Stimulus {
    /// Shake the position constraint at `target_index`.
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Perturb {
        target_index: usize,
        amplitude: f64,
        duration_ms: f64,
    },
}

impl Stimulus {
    pub fn perturb(target_index: usize, amplitude: f64, duration_ms: f64) -> Self {
        Stimulus::Perturb { target_index, amplitude, duration_ms }
    }
}

#[cfg(feature = "std")]
pub use channel::StimulusSender;

#[cfg(feature = "std")]
mod channel {
    use super::Stimulus;
    use std::sync::mpsc;

    /// Cloneable, `Send` handle for delivering stimuli from another thread.
    ///
    /// Obtained from [`crate::Web::stimulus_sender`]. Sending never blocks;
    /// events wait until the web's next step.
    #[derive(Clone, Debug)]
    pub struct StimulusSender {
        tx: mpsc::Sender<Stimulus>,
    }

    impl StimulusSender {
        pub(crate) fn new(tx: mpsc::Sender<Stimulus>) -> Self {
            StimulusSender { tx }
        }

        /// Returns `false` if the web has been dropped.
        pub fn send(&self, stimulus: Stimulus) -> bool {
            self.tx.send(stimulus).is_ok()
        }
    }
}
