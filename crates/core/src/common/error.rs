//! Simulator error definitions.
//!
//! Every fallible operation in the engine reports a [`SimError`]. All of them
//! are validation failures raised before a simulation starts: once a
//! [`Simulator`](crate::sim::Simulator) exists, a run always completes.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while validating parameters or parsing input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    /// The reference string contains no page references.
    #[error("reference string is empty")]
    EmptyReferenceString,

    /// The frame capacity is zero.
    #[error("frame count must be positive (got {0})")]
    InvalidFrameCount(usize),

    /// The TLB is enabled with zero entries.
    #[error("TLB capacity must be positive (got {0})")]
    InvalidTlbCapacity(usize),

    /// The working-set window holds zero accesses.
    #[error("working-set window must be positive (got {0})")]
    InvalidWindow(usize),

    /// A ratio threshold or step lies outside `[0, 1]` or is not finite.
    #[error("threshold must lie within [0, 1] (got {0})")]
    InvalidThreshold(f64),

    /// The predictor pattern depth is zero or exceeds its history window.
    #[error("pattern depth {depth} must be positive and fit a history window of {window}")]
    InvalidPatternDepth {
        /// Requested pattern length.
        depth: usize,
        /// Length of the access history the pattern is taken from.
        window: usize,
    },

    /// The predictor needs more verified predictions before adapting than its
    /// rolling window holds.
    #[error("{samples} samples required before adapting exceed an accuracy window of {window}")]
    InvalidAccuracySamples {
        /// Required verified predictions.
        samples: usize,
        /// Rolling accuracy window length.
        window: usize,
    },

    /// A reference-string token is not a non-negative integer.
    #[error("invalid page number {token:?}: {source}")]
    ParsePage {
        /// The offending token, trimmed.
        token: String,
        /// The underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },

    /// A configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A result bundle could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// An algorithm name did not match any known policy.
    #[error("unknown algorithm {0:?} (expected FIFO, LRU, LFU, Optimal or Clock)")]
    UnknownAlgorithm(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
