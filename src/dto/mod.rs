pub mod aircraft;
pub mod state_vector;

pub use aircraft::{AircraftRecord, AIRCRAFT_FIELDS};
pub use state_vector::StateVector;
