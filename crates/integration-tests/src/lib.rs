//! Integration tests for errata live under `tests/`
