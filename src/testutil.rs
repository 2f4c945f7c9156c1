//! Fixtures shared by the unit tests.

use std::path::Path;

/// Write a 440 Hz 16-bit PCM WAV of exactly `millis` milliseconds.
///
/// Fixtures are produced on the fly so the repository carries no binary
/// assets while the decode path still sees real audio.
pub fn write_tone(path: &Path, sample_rate: u32, channels: u16, millis: u64) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();

    let frames = u64::from(sample_rate) * millis / 1_000;
    for n in 0..frames {
        let theta = (n as f32 / sample_rate as f32) * 2.0 * std::f32::consts::PI * 440.0;
        let sample = (theta.sin() * 0.25 * f32::from(i16::MAX)) as i16;
        for _ in 0..channels {
            writer.write_sample(sample).unwrap();
        }
    }
    writer.finalize().unwrap();
}

/// Mono 8 kHz tone, enough for timing tests.
pub fn write_seconds(path: &Path, seconds: u64) {
    write_tone(path, 8_000, 1, seconds * 1_000);
}
