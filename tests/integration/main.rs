//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against mock adapters and the in-memory loopback broker.  All tests run
//! on the host (x86_64) with no real hardware required.

mod actuator_tests;
mod end_to_end_tests;
mod link_tests;
mod mock_hw;
mod sensor_tests;
