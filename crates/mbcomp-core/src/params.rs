//! Parameter bridge: typed identities, clamping parameter objects, the
//! registry that maps them onto per-band settings, and state snapshots.

mod band;
mod id;
mod registry;
mod types;

pub use band::{
    BandParams, CompressorSettings, CrossoverParams, DEFAULT_ATTACK_MS, DEFAULT_LOW_MID_HZ,
    DEFAULT_MID_HIGH_HZ, DEFAULT_RATIO_INDEX, DEFAULT_RELEASE_MS, DEFAULT_THRESHOLD_DB,
    LOW_MID_MAX_HZ, LOW_MID_MIN_HZ, MID_HIGH_MAX_HZ, MID_HIGH_MIN_HZ, RATIO_CHOICES,
    THRESHOLD_MAX_DB, THRESHOLD_MIN_DB, TIME_MAX_MS, TIME_MIN_MS,
};
pub use id::{Band, BandParam, ParamId};
pub use registry::{
    MultibandParams, ParamInfo, ParamKind, ParamRef, ParamSnapshot, SNAPSHOT_VERSION,
};
pub use types::{BoolParam, ChoiceParam, FloatParam};
