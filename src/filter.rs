use tracing::debug;

use crate::{
    dto::{AircraftRecord, StateVector},
    gulf::{is_gulf_country, Location},
};

/// Keeps the states whose origin is a Gulf country, optionally narrowed to one
/// country and to airborne or grounded aircraft. Input order is preserved.
pub fn filter_gulf_aircraft(
    states: &[StateVector],
    country: Option<&str>,
    location: Option<Location>,
) -> Vec<AircraftRecord> {
    let filtered: Vec<AircraftRecord> = states
        .iter()
        .filter(|state| {
            let origin_country = state.trimmed_origin_country();
            if !is_gulf_country(origin_country) {
                return false;
            }
            if country.is_some_and(|c| c != origin_country) {
                return false;
            }

            let on_ground = state.effectively_on_ground();
            if location.is_some_and(|l| !l.admits(on_ground)) {
                return false;
            }

            debug!(
                "Matched aircraft: {}, Country: {}, On Ground: {}",
                state.trimmed_callsign(),
                origin_country,
                on_ground
            );
            true
        })
        .map(AircraftRecord::from)
        .collect();

    debug!(
        "Filtered {} aircraft for country: {}, location: {}",
        filtered.len(),
        country.filter(|c| !c.is_empty()).unwrap_or("All"),
        location
            .map(|l| l.as_str())
            .filter(|l| !l.is_empty())
            .unwrap_or("All")
    );

    filtered
}
