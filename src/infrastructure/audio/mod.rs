pub mod audio_decoder;
mod blocking_inference;
mod candle_whisper_engine;
mod languages;
mod mock_transcription_engine;
mod openai_whisper_engine;
mod transcription_engine_factory;
mod wav_encoder;

pub use audio_decoder::SymphoniaAudioDecoder;
pub use blocking_inference::{cancelled, ensure_active, run_cancellable};
pub use candle_whisper_engine::CandleWhisperEngine;
pub use languages::WHISPER_LANGUAGES;
pub use mock_transcription_engine::MockTranscriptionEngine;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
pub use wav_encoder::encode_wav_pcm16;
