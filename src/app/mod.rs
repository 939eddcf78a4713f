//! Application core: pure domain logic, zero I/O.
//!
//! The two node services live here: [`actuator::ActuatorService`] runs the
//! display/alert controller and [`sensor::SensorService`] runs the sensor
//! fusion stage.  All interaction with hardware and the broker happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod actuator;
pub mod events;
pub mod ports;
pub mod sensor;

pub use actuator::ActuatorService;
pub use sensor::SensorService;
