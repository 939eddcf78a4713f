//! Peripheral drivers and one-shot hardware initialisation.
//!
//! Drivers are generic over `embedded-hal` traits; the node binaries hand
//! them `esp-idf-hal` pins and buses, tests hand them recording mocks.

pub mod hw_init;
pub mod indicator;
pub mod joystick;
pub mod lcd1602;
pub mod tm1637;
