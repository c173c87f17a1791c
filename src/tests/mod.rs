//! Crate-level tests which exercise the public surface end to end. Unit tests for a single
//! module live next to that module instead.

mod encoding;
mod multiplicity;
mod recording;
