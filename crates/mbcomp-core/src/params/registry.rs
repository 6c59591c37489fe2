//! Typed parameter registry: the bridge between the host's parameter list and
//! the engine's per-band settings.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::params::band::{BandParams, CrossoverParams};
use crate::params::id::{Band, BandParam, ParamId};
use crate::params::types::{BoolParam, ChoiceParam, FloatParam};
use crate::{Error, Result};

/// Bumped whenever the snapshot layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Borrowed parameter with its concrete type.
#[derive(Debug, Clone, Copy)]
pub enum ParamRef<'a> {
    Float(&'a FloatParam),
    Choice(&'a ChoiceParam),
    Bool(&'a BoolParam),
}

impl ParamRef<'_> {
    /// Current value in plain units. Choices report the chosen value,
    /// bools report 0.0 or 1.0.
    pub fn plain(&self) -> f32 {
        match self {
            ParamRef::Float(p) => p.get(),
            ParamRef::Choice(p) => p.value(),
            ParamRef::Bool(p) => {
                if p.get() {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn set_plain(&self, value: f32) {
        match self {
            ParamRef::Float(p) => {
                p.set(value);
            }
            ParamRef::Choice(p) => {
                p.set_value(value);
            }
            ParamRef::Bool(p) => p.set(value >= 0.5),
        }
    }

    pub fn normalized(&self) -> f32 {
        match self {
            ParamRef::Float(p) => p.get_normalized(),
            ParamRef::Choice(p) => p.get_normalized(),
            ParamRef::Bool(p) => p.get_normalized(),
        }
    }

    pub fn set_normalized(&self, normalized: f32) {
        match self {
            ParamRef::Float(p) => {
                p.set_normalized(normalized);
            }
            ParamRef::Choice(p) => {
                p.set_normalized(normalized);
            }
            ParamRef::Bool(p) => {
                p.set_normalized(normalized);
            }
        }
    }

    pub fn reset(&self) {
        match self {
            ParamRef::Float(p) => p.reset(),
            ParamRef::Choice(p) => p.reset(),
            ParamRef::Bool(p) => p.reset(),
        }
    }
}

/// What a generic parameter editor needs to draw one row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    pub id: ParamId,
    pub key: &'static str,
    pub name: String,
    pub unit: &'static str,
    pub kind: ParamKind,
}

/// Shape of a parameter's value space.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    Float {
        min: f32,
        max: f32,
        step: f32,
        default: f32,
    },
    Choice {
        labels: Vec<String>,
        default_index: usize,
    },
    Bool {
        default: bool,
    },
}

/// Serializable copy of every parameter, keyed by stable parameter key.
///
/// Values are plain units; choices store the chosen value rather than the
/// index so a reordered choice list still restores correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSnapshot {
    pub version: u32,
    pub values: BTreeMap<String, f32>,
}

/// The complete parameter set of the multiband compressor.
///
/// Shared between the control side (writes) and the engine (block-start reads)
/// behind an `Arc`. Band and crossover groups are individually shareable so a
/// compressor can hold just its own band.
#[derive(Debug)]
pub struct MultibandParams {
    bands: [Arc<BandParams>; 3],
    crossover: Arc<CrossoverParams>,
}

impl MultibandParams {
    pub fn new() -> Self {
        Self {
            bands: Band::ALL.map(|band| Arc::new(BandParams::new(band))),
            crossover: Arc::new(CrossoverParams::new()),
        }
    }

    pub fn band(&self, band: Band) -> &Arc<BandParams> {
        &self.bands[band.index()]
    }

    pub fn crossover(&self) -> &Arc<CrossoverParams> {
        &self.crossover
    }

    /// Typed lookup. Every `ParamId` resolves; there is no failure path.
    pub fn param(&self, id: ParamId) -> ParamRef<'_> {
        match id {
            ParamId::Band(band, param) => {
                let params = self.band(band);
                match param {
                    BandParam::Threshold => ParamRef::Float(&params.threshold),
                    BandParam::Attack => ParamRef::Float(&params.attack),
                    BandParam::Release => ParamRef::Float(&params.release),
                    BandParam::Ratio => ParamRef::Choice(&params.ratio),
                    BandParam::Bypassed => ParamRef::Bool(&params.bypassed),
                }
            }
            ParamId::LowMidCrossover => ParamRef::Float(&self.crossover.low_mid),
            ParamId::MidHighCrossover => ParamRef::Float(&self.crossover.mid_high),
        }
    }

    /// Lookup by stable key, for the host boundary.
    pub fn param_by_key(&self, key: &str) -> Result<ParamRef<'_>> {
        ParamId::from_key(key)
            .map(|id| self.param(id))
            .ok_or_else(|| Error::UnknownParameter(key.to_string()))
    }

    pub fn info(&self, id: ParamId) -> ParamInfo {
        let (unit, kind) = match self.param(id) {
            ParamRef::Float(p) => {
                let range = p.range();
                (
                    p.unit(),
                    ParamKind::Float {
                        min: range.min,
                        max: range.max,
                        step: range.step,
                        default: range.default,
                    },
                )
            }
            ParamRef::Choice(p) => (
                "",
                ParamKind::Choice {
                    labels: (0..p.choices().len()).filter_map(|i| p.label(i)).collect(),
                    default_index: p.default_index(),
                },
            ),
            ParamRef::Bool(p) => (
                "",
                ParamKind::Bool {
                    default: p.default_value(),
                },
            ),
        };

        ParamInfo {
            id,
            key: id.key(),
            name: id.name(),
            unit,
            kind,
        }
    }

    /// Descriptions of every parameter in editor order.
    pub fn infos(&self) -> Vec<ParamInfo> {
        ParamId::ALL.iter().map(|&id| self.info(id)).collect()
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        let values = ParamId::ALL
            .iter()
            .map(|&id| (id.key().to_string(), self.param(id).plain()))
            .collect();

        ParamSnapshot {
            version: SNAPSHOT_VERSION,
            values,
        }
    }

    /// Replace every parameter from `snapshot`.
    ///
    /// Parameters missing from the snapshot return to their defaults, unknown
    /// keys are skipped. Values pass through the usual clamping. A snapshot
    /// from a newer format version is rejected without touching anything.
    pub fn restore(&self, snapshot: &ParamSnapshot) -> Result<()> {
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(Error::InvalidState(format!(
                "snapshot version {} is newer than supported version {}",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        for id in ParamId::ALL {
            let param = self.param(id);
            match snapshot.values.get(id.key()) {
                Some(&value) => {
                    if let ParamRef::Float(p) = param {
                        if !p.range().contains(value) {
                            tracing::debug!("Clamping {} = {} from snapshot", id, value);
                        }
                    }
                    param.set_plain(value);
                }
                None => {
                    tracing::debug!("Parameter {} missing from snapshot, using default", id);
                    param.reset();
                }
            }
        }

        for key in snapshot.values.keys() {
            if ParamId::from_key(key).is_none() {
                tracing::debug!("Ignoring unknown parameter {} in snapshot", key);
            }
        }

        Ok(())
    }

    /// Return every parameter to its default.
    pub fn reset(&self) {
        for band in &self.bands {
            band.reset();
        }
        self.crossover.reset();
    }
}

impl Default for MultibandParams {
    fn default() -> Self {
        Self::new()
    }
}
