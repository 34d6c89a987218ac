// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The material/energy stream that flows along the connections of a route,
//! and the algebra for merging streams.

use serde::{Deserialize, Serialize};

use crate::TemperatureMixing;

/// Temperature of a stream that nothing has heated or cooled, in °C.
pub const DEFAULT_TEMPERATURE: f64 = 35.0;

/// Pressure of a stream that nothing has compressed, in bar.
pub const DEFAULT_PRESSURE: f64 = 1.0;

/// A material/energy stream.
///
/// All flow and content fields are per-day accumulators and add up when
/// streams merge.  Temperature and pressure are intensive: merging averages
/// the temperatures and keeps the lowest pressure.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stream {
    /// kg/day
    pub mass_flow: f64,
    /// m³/day for liquids, Nm³/day for gases
    pub volume_flow: f64,
    /// MJ/day
    pub energy_content: f64,
    /// Nm³ CH4/day
    pub methane_content: f64,
    /// kg COD/day
    pub cod: f64,
    /// kg VS/day
    pub vs_content: f64,
    /// °C
    pub temperature: f64,
    /// bar
    pub pressure: f64,
}

impl Default for Stream {
    fn default() -> Self {
        Self {
            mass_flow: 0.0,
            volume_flow: 0.0,
            energy_content: 0.0,
            methane_content: 0.0,
            cod: 0.0,
            vs_content: 0.0,
            temperature: DEFAULT_TEMPERATURE,
            pressure: DEFAULT_PRESSURE,
        }
    }
}

impl Stream {
    /// Returns a stream that carries nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if all flow and content fields are zero.
    pub fn is_empty(&self) -> bool {
        self.mass_flow == 0.0
            && self.volume_flow == 0.0
            && self.energy_content == 0.0
            && self.methane_content == 0.0
            && self.cod == 0.0
            && self.vs_content == 0.0
    }

    /// Returns the first flow or content field that is negative or not
    /// finite, with its value.
    pub(crate) fn invalid_field(&self) -> Option<(&'static str, f64)> {
        [
            ("mass_flow", self.mass_flow),
            ("volume_flow", self.volume_flow),
            ("energy_content", self.energy_content),
            ("methane_content", self.methane_content),
            ("cod", self.cod),
            ("vs_content", self.vs_content),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }

    /// Merges any number of streams into one.
    ///
    /// No streams give the empty stream and a single stream is returned as is.
    /// Flow and content fields are summed and the pressure is the minimum
    /// regardless of `mixing`, which only decides how temperatures combine.
    pub fn merge<'a>(
        streams: impl IntoIterator<Item = &'a Stream>,
        mixing: TemperatureMixing,
    ) -> Stream {
        let mut iter = streams.into_iter();
        let Some(first) = iter.next() else {
            return Stream::empty();
        };

        let mut merged = *first;
        let mut temperature_sum = first.temperature;
        let mut count = 1usize;
        for stream in iter {
            merged = merged + *stream;
            temperature_sum += stream.temperature;
            count += 1;
        }

        if mixing == TemperatureMixing::RunningMean {
            merged.temperature = temperature_sum / count as f64;
        }
        merged
    }
}

impl std::ops::Add for Stream {
    type Output = Self;

    /// Pairwise merge of two streams.
    fn add(self, rhs: Self) -> Self {
        Self {
            mass_flow: self.mass_flow + rhs.mass_flow,
            volume_flow: self.volume_flow + rhs.volume_flow,
            energy_content: self.energy_content + rhs.energy_content,
            methane_content: self.methane_content + rhs.methane_content,
            cod: self.cod + rhs.cod,
            vs_content: self.vs_content + rhs.vs_content,
            temperature: (self.temperature + rhs.temperature) / 2.0,
            pressure: self.pressure.min(rhs.pressure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn with_mass(mass_flow: f64) -> Stream {
        Stream {
            mass_flow,
            ..Stream::empty()
        }
    }

    #[test]
    fn test_merge_sums_flows() {
        let merged = Stream::merge(
            &[with_mass(100.0), with_mass(200.0)],
            TemperatureMixing::PairwiseFold,
        );
        assert_eq!(merged.mass_flow, 300.0);
        assert_eq!(merged.volume_flow, 0.0);
        assert_eq!(merged.cod, 0.0);
    }

    #[test]
    fn test_merge_identity() {
        let merged = Stream::merge(std::iter::empty(), TemperatureMixing::PairwiseFold);
        assert_eq!(merged, Stream::empty());
        assert!(merged.is_empty());

        let single = Stream {
            cod: 25000.0,
            vs_content: 17500.0,
            temperature: 80.0,
            ..Stream::empty()
        };
        assert_eq!(Stream::merge(&[single], TemperatureMixing::PairwiseFold), single);
        assert!(!single.is_empty());
    }

    #[test]
    fn test_invalid_field() {
        assert_eq!(Stream::empty().invalid_field(), None);
        assert_eq!(with_mass(f64::INFINITY).invalid_field(), Some(("mass_flow", f64::INFINITY)));

        let stream = Stream {
            cod: -1.0,
            vs_content: f64::NAN,
            ..Stream::empty()
        };
        assert_eq!(stream.invalid_field(), Some(("cod", -1.0)));

        let stream = Stream {
            vs_content: f64::NAN,
            ..Stream::empty()
        };
        assert!(stream.invalid_field().is_some_and(|(field, value)| field == "vs_content" && value.is_nan()));
    }

    #[test]
    fn test_merge_intensive_properties() {
        let hot = Stream {
            temperature: 80.0,
            pressure: 2.0,
            ..Stream::empty()
        };
        let cold = Stream {
            temperature: 20.0,
            pressure: 1.5,
            ..Stream::empty()
        };
        let warm = Stream {
            temperature: 50.0,
            pressure: 3.0,
            ..Stream::empty()
        };

        let merged = hot + cold;
        assert_eq!(merged.temperature, 50.0);
        assert_eq!(merged.pressure, 1.5);

        // ((80 + 20) / 2 + 50) / 2 = 50, but ((20 + 50) / 2 + 80) / 2 = 57.5
        let streams = [hot, cold, warm];
        let folded = Stream::merge(&streams, TemperatureMixing::PairwiseFold);
        assert_eq!(folded.temperature, 50.0);
        let reordered = Stream::merge(&[cold, warm, hot], TemperatureMixing::PairwiseFold);
        assert_eq!(reordered.temperature, 57.5);
        assert_eq!(reordered.pressure, 1.5);

        let mean = Stream::merge(&[cold, warm, hot], TemperatureMixing::RunningMean);
        assert_eq!(mean.temperature, 50.0);
        assert_eq!(mean.pressure, 1.5);
    }

    fn arb_stream() -> impl Strategy<Value = Stream> {
        (
            0u32..1_000_000,
            0u32..1_000_000,
            0u32..1_000_000,
            0u32..1_000_000,
            0u32..1_000_000,
            0u32..1_000_000,
            0.5f64..10.0,
        )
            .prop_map(|(m, v, e, ch4, cod, vs, pressure)| Stream {
                mass_flow: m as f64,
                volume_flow: v as f64,
                energy_content: e as f64,
                methane_content: ch4 as f64,
                cod: cod as f64,
                vs_content: vs as f64,
                temperature: DEFAULT_TEMPERATURE,
                pressure,
            })
    }

    fn flows(s: &Stream) -> [f64; 6] {
        [
            s.mass_flow,
            s.volume_flow,
            s.energy_content,
            s.methane_content,
            s.cod,
            s.vs_content,
        ]
    }

    proptest! {
        #[test]
        fn prop_merge_is_commutative(a in arb_stream(), b in arb_stream()) {
            prop_assert_eq!(flows(&(a + b)), flows(&(b + a)));
            prop_assert_eq!((a + b).pressure, (b + a).pressure);
        }

        #[test]
        fn prop_merge_is_associative(a in arb_stream(), b in arb_stream(), c in arb_stream()) {
            prop_assert_eq!(flows(&((a + b) + c)), flows(&(a + (b + c))));
            prop_assert_eq!(((a + b) + c).pressure, (a + (b + c)).pressure);
        }
    }
}
