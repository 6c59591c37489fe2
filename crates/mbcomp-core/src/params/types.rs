//! Concrete parameter objects: float, choice and bool.
//!
//! Each object owns its atomic value and its range. Writes from any thread
//! are clamped before they are stored; the audio thread only ever loads.

use crate::lockfree::{AtomicFlag, AtomicFloat, AtomicIndex};
use crate::parameter::ParameterRange;

/// Continuous parameter with a stepped range (threshold, attack, crossover...).
#[derive(Debug)]
pub struct FloatParam {
    range: ParameterRange,
    unit: &'static str,
    value: AtomicFloat,
}

impl FloatParam {
    pub fn new(range: ParameterRange, unit: &'static str) -> Self {
        let value = AtomicFloat::new(range.default);
        Self { range, unit, value }
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.value.get()
    }

    /// Store `value` after clamping and step snapping. Returns the stored value.
    pub fn set(&self, value: f32) -> f32 {
        let value = self.range.constrain(value);
        self.value.set(value);
        value
    }

    pub fn get_normalized(&self) -> f32 {
        self.range.normalize(self.get())
    }

    pub fn set_normalized(&self, normalized: f32) -> f32 {
        self.set(self.range.denormalize(normalized))
    }

    pub fn reset(&self) {
        self.value.set(self.range.default);
    }

    pub fn range(&self) -> &ParameterRange {
        &self.range
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }
}

/// Discrete choice between fixed numeric values (the ratio list).
#[derive(Debug)]
pub struct ChoiceParam {
    choices: &'static [f32],
    default_index: usize,
    index: AtomicIndex,
}

impl ChoiceParam {
    pub fn new(choices: &'static [f32], default_index: usize) -> Self {
        debug_assert!(!choices.is_empty(), "choice parameter needs at least one choice");
        let default_index = default_index.min(choices.len().saturating_sub(1));
        Self {
            choices,
            default_index,
            index: AtomicIndex::new(default_index),
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Value of the current choice.
    #[inline]
    pub fn value(&self) -> f32 {
        self.choices[self.index().min(self.choices.len() - 1)]
    }

    /// Select a choice, clamped to the list. Returns the stored index.
    pub fn set_index(&self, index: usize) -> usize {
        let index = index.min(self.choices.len() - 1);
        self.index.set(index);
        index
    }

    /// Select the choice closest to `value`.
    pub fn set_value(&self, value: f32) -> usize {
        self.set_index(self.nearest_index(value))
    }

    pub fn nearest_index(&self, value: f32) -> usize {
        if !value.is_finite() {
            return self.default_index;
        }
        self.choices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - value).abs().total_cmp(&(*b - value).abs()))
            .map(|(i, _)| i)
            .unwrap_or(self.default_index)
    }

    pub fn get_normalized(&self) -> f32 {
        self.index_range().normalize(self.index() as f32)
    }

    pub fn set_normalized(&self, normalized: f32) -> usize {
        let index = self.index_range().denormalize(normalized) as usize;
        self.set_index(index)
    }

    pub fn reset(&self) {
        self.index.set(self.default_index);
    }

    pub fn choices(&self) -> &'static [f32] {
        self.choices
    }

    pub fn default_index(&self) -> usize {
        self.default_index
    }

    /// Display label for a choice, e.g. `1.5` or `4.0`.
    pub fn label(&self, index: usize) -> Option<String> {
        self.choices.get(index).map(|v| format!("{:.1}", v))
    }

    fn index_range(&self) -> ParameterRange {
        let last = self.choices.len().saturating_sub(1).max(1) as i32;
        ParameterRange::integer(0, last, self.default_index as i32)
    }
}

/// On/off parameter.
#[derive(Debug)]
pub struct BoolParam {
    default: bool,
    value: AtomicFlag,
}

impl BoolParam {
    pub fn new(default: bool) -> Self {
        Self {
            default,
            value: AtomicFlag::new(default),
        }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.value.get()
    }

    pub fn set(&self, value: bool) {
        self.value.set(value);
    }

    pub fn get_normalized(&self) -> f32 {
        if self.get() {
            1.0
        } else {
            0.0
        }
    }

    pub fn set_normalized(&self, normalized: f32) -> bool {
        let on = ParameterRange::toggle(self.default).denormalize(normalized) >= 0.5;
        self.set(on);
        on
    }

    pub fn reset(&self) {
        self.value.set(self.default);
    }

    pub fn default_value(&self) -> bool {
        self.default
    }
}
