//! Band-sum invariant: with every compressor bypassed the three bands add up
//! to the input through the crossover allpass cascade.
//!
//! Run with:
//! ```bash
//! cargo test -p mbcomp --test band_sum_tests
//! ```

#[path = "helpers/mod.rs"]
mod helpers;

use helpers::tolerances::*;
use helpers::{
    allpass_reference, bypass_all, generate_noise, generate_sine, process_mono, rms,
    test_processor, TEST_BLOCK_SIZE, TEST_SAMPLE_RATE,
};
use mbcomp::prelude::*;
use proptest::prelude::*;

fn assert_matches_reference(output: &[f32], reference: &[f32], tolerance: f32) {
    assert_eq!(output.len(), reference.len());
    for (i, (a, b)) in output.iter().zip(reference).enumerate() {
        assert!(
            (a - b).abs() <= tolerance,
            "sample {}: output {} vs reference {}",
            i,
            a,
            b
        );
    }
}

#[test]
fn test_bypassed_bands_sum_to_allpass_cascade() {
    let mut processor = test_processor(1);
    bypass_all(processor.params());

    let input = generate_noise(TEST_BLOCK_SIZE * 8, 42);
    let mut output = input.clone();
    process_mono(&mut processor, &mut output, TEST_BLOCK_SIZE);

    let frequencies = processor.engine().crossover().frequencies();
    let reference = allpass_reference(&input, frequencies, TEST_SAMPLE_RATE);
    assert_matches_reference(&output, &reference, DSP_EPSILON);
}

#[test]
fn test_band_sum_independent_of_block_size() {
    let input = generate_noise(3000, 7);

    let mut outputs = Vec::new();
    for block_size in [1, 64, 333, TEST_BLOCK_SIZE] {
        let mut processor = test_processor(1);
        bypass_all(processor.params());
        let mut output = input.clone();
        process_mono(&mut processor, &mut output, block_size);
        outputs.push(output);
    }

    for output in &outputs[1..] {
        assert_matches_reference(output, &outputs[0], FLOAT_EPSILON);
    }
}

#[test]
fn test_stereo_channels_follow_reference_independently() {
    let mut processor = test_processor(2);
    bypass_all(processor.params());

    let left_in = generate_noise(TEST_BLOCK_SIZE * 4, 1);
    let right_in = generate_sine(880.0, 0.5, TEST_SAMPLE_RATE, TEST_BLOCK_SIZE * 4);
    let mut left = left_in.clone();
    let mut right = right_in.clone();

    for (l, r) in left
        .chunks_mut(TEST_BLOCK_SIZE)
        .zip(right.chunks_mut(TEST_BLOCK_SIZE))
    {
        processor.process(&mut [l, r]);
    }

    let frequencies = processor.engine().crossover().frequencies();
    assert_matches_reference(
        &left,
        &allpass_reference(&left_in, frequencies, TEST_SAMPLE_RATE),
        DSP_EPSILON,
    );
    assert_matches_reference(
        &right,
        &allpass_reference(&right_in, frequencies, TEST_SAMPLE_RATE),
        DSP_EPSILON,
    );
}

#[test]
fn test_interleaved_matches_planar() {
    let mut planar = test_processor(2);
    let mut interleaved = test_processor(2);

    let left = generate_noise(TEST_BLOCK_SIZE * 2, 3);
    let right = generate_noise(TEST_BLOCK_SIZE * 2, 4);

    let mut l = left.clone();
    let mut r = right.clone();
    for (lb, rb) in l
        .chunks_mut(TEST_BLOCK_SIZE)
        .zip(r.chunks_mut(TEST_BLOCK_SIZE))
    {
        planar.process(&mut [lb, rb]);
    }

    let mut frames: Vec<f32> = left
        .iter()
        .zip(&right)
        .flat_map(|(&a, &b)| [a, b])
        .collect();
    for block in frames.chunks_mut(TEST_BLOCK_SIZE * 2) {
        interleaved.process_interleaved(block);
    }

    for i in 0..l.len() {
        assert!((frames[2 * i] - l[i]).abs() <= FLOAT_EPSILON);
        assert!((frames[2 * i + 1] - r[i]).abs() <= FLOAT_EPSILON);
    }
}

#[test]
fn test_flat_magnitude_away_from_crossovers() {
    let mut processor = test_processor(1);
    bypass_all(processor.params());

    for freq in [60.0, 1000.0, 8000.0] {
        processor.reset();
        let mut signal = generate_sine(freq, 0.5, TEST_SAMPLE_RATE, 48000);
        process_mono(&mut processor, &mut signal, TEST_BLOCK_SIZE);

        // Whole periods for every test frequency
        let settled = rms(&signal[24000..]);
        assert!(
            (settled - 0.5 / 2.0_f32.sqrt()).abs() < 0.005,
            "{} Hz: settled RMS {}",
            freq,
            settled
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_band_sum_holds_for_any_crossover(
        low_mid in 20.0f32..999.0,
        mid_high in 1000.0f32..20000.0,
        seed in any::<u64>(),
    ) {
        let mut processor = test_processor(1);
        bypass_all(processor.params());
        processor.params().crossover().low_mid.set(low_mid);
        processor.params().crossover().mid_high.set(mid_high);

        let input = generate_noise(1024, seed);
        let mut output = input.clone();
        process_mono(&mut processor, &mut output, 256);

        let frequencies = processor.engine().crossover().frequencies();
        let reference = allpass_reference(&input, frequencies, TEST_SAMPLE_RATE);
        for (a, b) in output.iter().zip(&reference) {
            prop_assert!((a - b).abs() <= PERCEPTUAL_EPSILON);
        }
    }
}
