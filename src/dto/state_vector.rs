use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Number;
use std::fmt;

/// Number of leading positions of an upstream state row that are read.
pub const STATE_FIELD_COUNT: usize = 12;

/// One upstream aircraft state, decoded from its positional array form.
///
/// The upstream source sends each state as a JSON array; only the first
/// [`STATE_FIELD_COUNT`] positions are read and any trailing positions are ignored.
/// Numbers are kept as decoded so they re-serialize exactly as received.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateVector {
    pub icao24: Option<String>,
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
    pub time_position: Option<Number>,
    pub last_contact: Option<Number>,
    pub longitude: Option<Number>,
    pub latitude: Option<Number>,
    pub baro_altitude: Option<Number>,
    pub on_ground: Option<bool>,
    pub velocity: Option<Number>,
    pub true_track: Option<Number>,
    pub vertical_rate: Option<Number>,
}

impl StateVector {
    /// Origin country with surrounding whitespace removed, empty when absent.
    pub fn trimmed_origin_country(&self) -> &str {
        self.origin_country.as_deref().map(str::trim).unwrap_or_default()
    }

    pub fn trimmed_callsign(&self) -> &str {
        self.callsign.as_deref().map(str::trim).unwrap_or_default()
    }

    /// An absent on-ground flag counts as airborne.
    pub fn effectively_on_ground(&self) -> bool {
        self.on_ground.unwrap_or(false)
    }
}

struct StateVectorVisitor;

fn next_field<'de, A, T>(seq: &mut A, position: usize) -> Result<Option<T>, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element::<Option<T>>()?
        .ok_or_else(|| de::Error::invalid_length(position, &StateVectorVisitor))
}

impl<'de> Visitor<'de> for StateVectorVisitor {
    type Value = StateVector;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "an array with at least {} state fields",
            STATE_FIELD_COUNT
        )
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<StateVector, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let state = StateVector {
            icao24: next_field(&mut seq, 0)?,
            callsign: next_field(&mut seq, 1)?,
            origin_country: next_field(&mut seq, 2)?,
            time_position: next_field(&mut seq, 3)?,
            last_contact: next_field(&mut seq, 4)?,
            longitude: next_field(&mut seq, 5)?,
            latitude: next_field(&mut seq, 6)?,
            baro_altitude: next_field(&mut seq, 7)?,
            on_ground: next_field(&mut seq, 8)?,
            velocity: next_field(&mut seq, 9)?,
            true_track: next_field(&mut seq, 10)?,
            vertical_rate: next_field(&mut seq, 11)?,
        };

        // sensors, geo_altitude, squawk, spi, position_source, category
        while seq.next_element::<IgnoredAny>()?.is_some() {}

        Ok(state)
    }
}

impl<'de> Deserialize<'de> for StateVector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(StateVectorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_positional_row() {
        let state: StateVector = serde_json::from_value(json!([
            "4ca7b1", "OMA123 ", "Oman", 1700000000, 1700000005, 58.3, 23.6, 10972.8, false, 250,
            90.5, -1.2
        ]))
        .unwrap();

        assert_eq!(state.icao24.as_deref(), Some("4ca7b1"));
        assert_eq!(state.callsign.as_deref(), Some("OMA123 "));
        assert_eq!(state.trimmed_callsign(), "OMA123");
        assert_eq!(state.time_position, Some(Number::from(1700000000)));
        assert_eq!(state.velocity, Some(Number::from(250)));
        assert_eq!(state.on_ground, Some(false));
        assert_eq!(state.vertical_rate, Number::from_f64(-1.2));
    }

    #[test]
    fn nulls_become_absent_fields() {
        let state: StateVector = serde_json::from_value(json!([
            "abc123", null, null, null, null, null, null, null, null, null, null, null
        ]))
        .unwrap();

        assert_eq!(state.trimmed_origin_country(), "");
        assert_eq!(state.trimmed_callsign(), "");
        assert_eq!(state.on_ground, None);
        assert!(!state.effectively_on_ground());
    }

    #[test]
    fn ignores_trailing_positions() {
        let state: StateVector = serde_json::from_value(json!([
            "710104", "SVA21   ", " Saudi Arabia ", 1, 2, 46.7, 24.7, 0.0, true, 0.0, 0.0, null,
            null, 12.5, "1200", false, 0, 4
        ]))
        .unwrap();

        assert_eq!(state.trimmed_origin_country(), "Saudi Arabia");
        assert!(state.effectively_on_ground());
    }

    #[test]
    fn rejects_short_rows() {
        let result = serde_json::from_value::<StateVector>(json!(["4ca7b1", "OMA123", "Oman"]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_strings_in_numeric_positions() {
        let result = serde_json::from_value::<StateVector>(json!([
            "4ca7b1", "OMA123", "Oman", "0", 0, 0, 0, 0, null, 0, 0, 0
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_mistyped_fields() {
        let result = serde_json::from_value::<StateVector>(json!([
            "4ca7b1", "OMA123", "Oman", 0, 0, 0, 0, 0, "yes", 0, 0, 0
        ]));
        assert!(result.is_err());
    }
}
