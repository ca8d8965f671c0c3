//! Movement domain: sampled velocity curves for dash and wall-jump arcs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

impl Keyframe {
    pub const fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Interpolation {
    #[default]
    Linear,
    /// Hold each key's value until the next key
    Step,
}

/// Time-indexed velocity profile. Time is measured in fixed ticks.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SampledCurve {
    keys: Vec<Keyframe>,
    interpolation: Interpolation,
}

impl SampledCurve {
    pub fn new(mut keys: Vec<Keyframe>, interpolation: Interpolation) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self {
            keys,
            interpolation,
        }
    }

    pub fn linear(keys: &[(f32, f32)]) -> Self {
        Self::new(
            keys.iter().map(|&(t, v)| Keyframe::new(t, v)).collect(),
            Interpolation::Linear,
        )
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Time of the last key; zero for an empty curve.
    pub fn end_time(&self) -> f32 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    /// Evaluate the curve at `t`, holding the first/last value outside the key range.
    pub fn sample(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; guaranteed to exist and be > 0 by the checks above
        let next = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[next - 1];
        let b = self.keys[next];

        match self.interpolation {
            Interpolation::Step => a.value,
            Interpolation::Linear => {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    b.value
                } else {
                    a.value + (b.value - a.value) * ((t - a.time) / span)
                }
            }
        }
    }
}

#[derive(Deserialize)]
struct RawCurve {
    keys: Vec<Keyframe>,
    #[serde(default)]
    interpolation: Interpolation,
}

// Route deserialization through `new` so keys loaded from data are always sorted
impl<'de> Deserialize<'de> for SampledCurve {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawCurve::deserialize(deserializer)?;
        Ok(SampledCurve::new(raw.keys, raw.interpolation))
    }
}
