use serde::Serialize;
use serde_json::Number;

use super::StateVector;

/// Column names of an [`AircraftRecord`], in output order.
pub const AIRCRAFT_FIELDS: [&str; 12] = [
    "tail_number",
    "callsign",
    "origin_country",
    "time_position",
    "last_contact",
    "longitude",
    "latitude",
    "baro_altitude",
    "on_ground",
    "velocity",
    "heading",
    "vertical_rate",
];

/// Named projection of a [`StateVector`]. Values are passed through untouched,
/// absent ones serialize as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AircraftRecord {
    pub tail_number: Option<String>,
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
    pub time_position: Option<Number>,
    pub last_contact: Option<Number>,
    pub longitude: Option<Number>,
    pub latitude: Option<Number>,
    pub baro_altitude: Option<Number>,
    pub on_ground: Option<bool>,
    pub velocity: Option<Number>,
    pub heading: Option<Number>,
    pub vertical_rate: Option<Number>,
}

impl From<&StateVector> for AircraftRecord {
    fn from(state: &StateVector) -> Self {
        AircraftRecord {
            tail_number: state.icao24.clone(),
            callsign: state.callsign.clone(),
            origin_country: state.origin_country.clone(),
            time_position: state.time_position.clone(),
            last_contact: state.last_contact.clone(),
            longitude: state.longitude.clone(),
            latitude: state.latitude.clone(),
            baro_altitude: state.baro_altitude.clone(),
            on_ground: state.on_ground,
            velocity: state.velocity.clone(),
            heading: state.true_track.clone(),
            vertical_rate: state.vertical_rate.clone(),
        }
    }
}
