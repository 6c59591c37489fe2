//! Strongly typed parameter identities with stable string keys.

use core::fmt;

/// One of the three frequency bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Band::Low => 0,
            Band::Mid => 1,
            Band::High => 2,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Band::Low => "low",
            Band::Mid => "mid",
            Band::High => "high",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Band::Low => "Low Band",
            Band::Mid => "Mid Band",
            Band::High => "High Band",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compressor setting that exists once per band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandParam {
    Threshold,
    Attack,
    Release,
    Ratio,
    Bypassed,
}

impl BandParam {
    pub const ALL: [BandParam; 5] = [
        BandParam::Threshold,
        BandParam::Attack,
        BandParam::Release,
        BandParam::Ratio,
        BandParam::Bypassed,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            BandParam::Threshold => "threshold",
            BandParam::Attack => "attack",
            BandParam::Release => "release",
            BandParam::Ratio => "ratio",
            BandParam::Bypassed => "bypassed",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BandParam::Threshold => "Threshold",
            BandParam::Attack => "Attack",
            BandParam::Release => "Release",
            BandParam::Ratio => "Ratio",
            BandParam::Bypassed => "Bypassed",
        }
    }
}

/// Identity of every host-visible parameter.
///
/// String keys are only for the persistence and host boundary. The audio path
/// reaches parameters through typed handles resolved once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Band(Band, BandParam),
    LowMidCrossover,
    MidHighCrossover,
}

const fn band_id(band: Band, param: BandParam) -> ParamId {
    ParamId::Band(band, param)
}

impl ParamId {
    /// Every parameter, in the order a generic editor lists them.
    pub const ALL: [ParamId; 17] = [
        band_id(Band::Low, BandParam::Threshold),
        band_id(Band::Low, BandParam::Attack),
        band_id(Band::Low, BandParam::Release),
        band_id(Band::Low, BandParam::Ratio),
        band_id(Band::Low, BandParam::Bypassed),
        band_id(Band::Mid, BandParam::Threshold),
        band_id(Band::Mid, BandParam::Attack),
        band_id(Band::Mid, BandParam::Release),
        band_id(Band::Mid, BandParam::Ratio),
        band_id(Band::Mid, BandParam::Bypassed),
        band_id(Band::High, BandParam::Threshold),
        band_id(Band::High, BandParam::Attack),
        band_id(Band::High, BandParam::Release),
        band_id(Band::High, BandParam::Ratio),
        band_id(Band::High, BandParam::Bypassed),
        ParamId::LowMidCrossover,
        ParamId::MidHighCrossover,
    ];

    /// Stable identifier, e.g. `threshold_low` or `low_mid_crossover`.
    pub const fn key(self) -> &'static str {
        use BandParam::*;
        match self {
            ParamId::Band(band, param) => match (param, band) {
                (Threshold, Band::Low) => "threshold_low",
                (Threshold, Band::Mid) => "threshold_mid",
                (Threshold, Band::High) => "threshold_high",
                (Attack, Band::Low) => "attack_low",
                (Attack, Band::Mid) => "attack_mid",
                (Attack, Band::High) => "attack_high",
                (Release, Band::Low) => "release_low",
                (Release, Band::Mid) => "release_mid",
                (Release, Band::High) => "release_high",
                (Ratio, Band::Low) => "ratio_low",
                (Ratio, Band::Mid) => "ratio_mid",
                (Ratio, Band::High) => "ratio_high",
                (Bypassed, Band::Low) => "bypassed_low",
                (Bypassed, Band::Mid) => "bypassed_mid",
                (Bypassed, Band::High) => "bypassed_high",
            },
            ParamId::LowMidCrossover => "low_mid_crossover",
            ParamId::MidHighCrossover => "mid_high_crossover",
        }
    }

    /// Resolve a stable key. Host and persistence boundary only.
    pub fn from_key(key: &str) -> Option<ParamId> {
        ParamId::ALL.iter().copied().find(|id| id.key() == key)
    }

    /// Human-readable name for a generic editor.
    pub fn name(self) -> String {
        match self {
            ParamId::Band(band, param) => format!("{} {}", param.name(), band.name()),
            ParamId::LowMidCrossover => "Low-Mid Crossover Freq".to_string(),
            ParamId::MidHighCrossover => "Mid-High Crossover Freq".to_string(),
        }
    }

    /// Position in [`ParamId::ALL`].
    pub fn index(self) -> usize {
        match self {
            ParamId::Band(band, param) => {
                let offset = match param {
                    BandParam::Threshold => 0,
                    BandParam::Attack => 1,
                    BandParam::Release => 2,
                    BandParam::Ratio => 3,
                    BandParam::Bypassed => 4,
                };
                band.index() * BandParam::ALL.len() + offset
            }
            ParamId::LowMidCrossover => 15,
            ParamId::MidHighCrossover => 16,
        }
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
