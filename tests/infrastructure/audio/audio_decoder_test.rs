use std::path::PathBuf;

use hound::{SampleFormat, WavSpec, WavWriter};
use oratio::application::ports::AudioDecoder;
use oratio::domain::PcmAudio;
use oratio::infrastructure::audio::SymphoniaAudioDecoder;
use oratio::infrastructure::audio::audio_decoder::{WHISPER_SAMPLE_RATE, resample};
use tempfile::TempDir;

fn write_wav(
    dir: &TempDir,
    name: &str,
    sample_rate: u32,
    channels: u16,
    samples: &[i16],
) -> PathBuf {
    let path = dir.path().join(name);
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
    path
}

#[test]
fn given_mono_wav_when_decoding_then_returns_samples_at_source_rate() {
    let dir = TempDir::new().unwrap();
    let samples = [0, i16::MAX / 2, i16::MIN / 2, 0].repeat(200);
    let path = write_wav(&dir, "mono.wav", 8_000, 1, &samples);

    let pcm = SymphoniaAudioDecoder.decode_file(&path).unwrap();

    assert_eq!(pcm.sample_rate, 8_000);
    assert_eq!(pcm.samples.len(), 800);
    assert!((pcm.samples[1] - 0.5).abs() < 0.01);
}

#[test]
fn given_stereo_wav_when_decoding_then_downmixes_by_average() {
    let dir = TempDir::new().unwrap();
    let frames: Vec<i16> = [i16::MAX / 2, 0].repeat(400);
    let path = write_wav(&dir, "stereo.wav", 16_000, 2, &frames);

    let pcm = SymphoniaAudioDecoder.decode_file(&path).unwrap();

    assert_eq!(pcm.samples.len(), 400);
    assert!(pcm.samples.iter().all(|s| (s - 0.25).abs() < 0.01));
}

#[test]
fn given_wav_file_on_disk_when_decoding_then_uses_extension_hint() {
    let dir = TempDir::new().unwrap();
    let path = write_wav(&dir, "clip.wav", 16_000, 1, &vec![1000; 1600]);

    let pcm = SymphoniaAudioDecoder.decode_file(&path).unwrap();

    assert!((pcm.duration_secs() - 0.1).abs() < 1e-6);
}

#[test]
fn given_missing_file_when_decoding_then_returns_io_error() {
    let dir = TempDir::new().unwrap();

    let result = SymphoniaAudioDecoder.decode_file(&dir.path().join("missing.wav"));

    assert!(matches!(
        result,
        Err(oratio::application::ports::AudioDecoderError::Io(_))
    ));
}

#[test]
fn given_garbage_file_when_decoding_then_returns_decoding_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("noise.bin");
    std::fs::write(&path, b"definitely not audio").unwrap();

    let result = SymphoniaAudioDecoder.decode_file(&path);

    assert!(matches!(
        result,
        Err(oratio::application::ports::AudioDecoderError::DecodingFailed(_))
    ));
}

#[test]
fn given_8khz_audio_when_resampling_to_whisper_rate_then_length_doubles() {
    let pcm = PcmAudio::new(vec![0.1; 8_000], 8_000);

    let resampled = resample(pcm, WHISPER_SAMPLE_RATE).unwrap();

    assert_eq!(resampled.sample_rate, WHISPER_SAMPLE_RATE);
    assert_eq!(resampled.samples.len(), 16_000);
}

#[test]
fn given_audio_already_at_target_rate_when_resampling_then_unchanged() {
    let pcm = PcmAudio::new(vec![0.3; 100], WHISPER_SAMPLE_RATE);

    let resampled = resample(pcm.clone(), WHISPER_SAMPLE_RATE).unwrap();

    assert_eq!(resampled, pcm);
}
