use oratio::application::ports::AudioDecoder;
use oratio::domain::PcmAudio;
use oratio::infrastructure::audio::{SymphoniaAudioDecoder, encode_wav_pcm16};
use tempfile::TempDir;

fn read_back(wav: Vec<u8>) -> (hound::WavSpec, Vec<i16>) {
    let reader = hound::WavReader::new(std::io::Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    let samples = reader.into_samples::<i16>().map(Result::unwrap).collect();
    (spec, samples)
}

#[test]
fn given_pcm_when_encoding_then_writes_mono_16_bit_wav() {
    let wav = encode_wav_pcm16(&PcmAudio::new(vec![0.0; 10], 16_000)).unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    let (spec, samples) = read_back(wav);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 16_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(samples.len(), 10);
}

#[test]
fn given_out_of_range_samples_when_encoding_then_clamps_to_full_scale() {
    let wav = encode_wav_pcm16(&PcmAudio::new(vec![2.0, -2.0], 8_000)).unwrap();

    let (_, samples) = read_back(wav);
    assert_eq!(samples, vec![i16::MAX, -i16::MAX]);
}

#[test]
fn given_encoded_wav_when_decoded_with_symphonia_then_samples_survive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("encoded.wav");
    let original = PcmAudio::new((0..1600).map(|i| (i as f32 / 1600.0) - 0.5).collect(), 16_000);
    std::fs::write(&path, encode_wav_pcm16(&original).unwrap()).unwrap();

    let decoded = SymphoniaAudioDecoder.decode_file(&path).unwrap();

    assert_eq!(decoded.sample_rate, 16_000);
    assert_eq!(decoded.samples.len(), original.samples.len());
    assert!((decoded.samples[800] - original.samples[800]).abs() < 0.001);
}
