//! End-to-end tests for the aural service live under `tests/`.
