use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    AudioDecoder, AudioInput, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{PcmAudio, TranscriptSegment, TranscriptionResult};

use super::audio_decoder::{SymphoniaAudioDecoder, WHISPER_SAMPLE_RATE, resample};
use super::blocking_inference::{cancelled, ensure_active, run_cancellable};
use super::languages::WHISPER_LANGUAGES;

const WINDOW_SECS: f64 = 30.0;
const MAX_DECODE_TOKENS: usize = 224;
const MULTILINGUAL_MIN_VOCAB: usize = 51_865;
const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";

/// Local Whisper inference on candle.
///
/// The decoder keeps a KV cache inside the model, so inference is serialized
/// behind one mutex: concurrent requests queue here instead of corrupting each
/// other's decoding state. Audio decoding and mel extraction happen before the
/// lock is taken. All of it runs on the blocking pool, and an abandoned request
/// stops at the next window instead of holding the model to the end.
pub struct CandleWhisperEngine {
    runtime: Arc<WhisperRuntime>,
}

struct WhisperRuntime {
    model_id: String,
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

impl CandleWhisperEngine {
    /// Downloads (or reuses the hub cache for) the model files. Blocking.
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing Candle Whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let mel_file = match config.num_mel_bins {
            128 => "melfilters128.bytes",
            _ => "melfilters.bytes",
        };
        let mel_bytes_path = api
            .repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model))
            .get(mel_file)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", mel_file, e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(model = model_id, "Candle Whisper engine loaded successfully");

        Ok(Self {
            runtime: Arc::new(WhisperRuntime {
                model_id: model_id.to_string(),
                model: Mutex::new(model),
                tokenizer,
                config,
                device,
                mel_filters,
            }),
        })
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        input: AudioInput,
        language: Option<&str>,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let runtime = Arc::clone(&self.runtime);
        let language = language.map(str::to_string);

        run_cancellable(move |token| {
            let pcm = match input {
                AudioInput::File(path) => load_file(&path)?,
                AudioInput::Samples(pcm) => pcm,
            };
            runtime.transcribe_pcm(pcm, language.as_deref(), token)
        })
        .await
    }

    fn model_name(&self) -> &str {
        &self.runtime.model_id
    }
}

fn load_file(path: &Path) -> Result<PcmAudio, TranscriptionError> {
    SymphoniaAudioDecoder
        .decode_file(path)
        .map_err(|e| TranscriptionError::DecodingFailed(e.to_string()))
}

impl WhisperRuntime {
    fn transcribe_pcm(
        &self,
        pcm: PcmAudio,
        language: Option<&str>,
        token: &CancellationToken,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let pcm = resample(pcm, WHISPER_SAMPLE_RATE)
            .map_err(|e| TranscriptionError::DecodingFailed(e.to_string()))?;
        let duration = pcm.duration_secs();

        let mut windows = Vec::new();
        for (i, chunk) in pcm.samples.chunks(m::N_SAMPLES).enumerate() {
            let start = i as f64 * WINDOW_SECS;
            let end = (start + chunk.len() as f64 / WHISPER_SAMPLE_RATE as f64).min(duration);
            windows.push((start, end, self.mel_tensor(chunk)?));
        }

        let multilingual = self.config.vocab_size >= MULTILINGUAL_MIN_VOCAB;

        let mut model = self.model.lock().map_err(|_| {
            TranscriptionError::TranscriptionFailed("model lock poisoned".to_string())
        })?;
        // The caller may have given up while this request queued for the model.
        ensure_active(token)?;

        let language = match (language, multilingual, windows.first()) {
            (Some(code), _, _) => Some(code.to_lowercase()),
            (None, true, Some((_, _, mel))) => self.detect_language(&mut model, mel)?,
            _ => None,
        };
        let language_token = match (&language, multilingual) {
            (Some(code), true) => Some(self.language_token(code)?),
            _ => None,
        };

        let mut segments = Vec::new();
        for (i, (start, end, mel)) in windows.iter().enumerate() {
            if token.is_cancelled() {
                tracing::info!(window = i, "Inference abandoned, releasing model");
                return Err(cancelled());
            }
            tracing::debug!(window = i, start, end, "Transcribing audio window");
            let text = self.decode_window(&mut model, mel, language_token)?;
            if !text.trim().is_empty() {
                segments.push(TranscriptSegment::new(*start, *end, text));
            }
        }
        drop(model);

        let text = segments
            .iter()
            .map(|s| s.text.trim())
            .collect::<Vec<_>>()
            .join(" ");

        tracing::info!(
            segments = segments.len(),
            chars = text.len(),
            language = language.as_deref().unwrap_or("-"),
            "Audio transcription completed"
        );

        Ok(TranscriptionResult {
            text,
            language: language.or_else(|| (!multilingual).then(|| "en".to_string())),
            segments,
        })
    }

    fn mel_tensor(&self, chunk: &[f32]) -> Result<Tensor, TranscriptionError> {
        let mut samples = chunk.to_vec();
        samples.resize(m::N_SAMPLES, 0.0);

        let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel_data.len() / n_mel;

        Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e)))
    }

    fn language_token(&self, code: &str) -> Result<u32, TranscriptionError> {
        self.tokenizer
            .token_to_id(&format!("<|{}|>", code))
            .ok_or_else(|| TranscriptionError::UnsupportedFormat(format!("language {}", code)))
    }

    fn detect_language(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
    ) -> Result<Option<String>, TranscriptionError> {
        let sot_token = token_id(&self.tokenizer, m::SOT_TOKEN)?;

        let audio_features = model.encoder.forward(mel, true).map_err(failed("encoder"))?;
        let tokens = Tensor::new(&[[sot_token]], &self.device).map_err(failed("tokens"))?;
        let decoder_output = model
            .decoder
            .forward(&tokens, &audio_features, true)
            .map_err(failed("decoder"))?;
        let logits = model
            .decoder
            .final_linear(&decoder_output.squeeze(0).map_err(failed("squeeze"))?)
            .map_err(failed("linear"))?
            .get(0)
            .map_err(failed("logits"))?
            .to_dtype(DType::F32)
            .map_err(failed("dtype"))?
            .to_vec1::<f32>()
            .map_err(failed("logits"))?;

        model.reset_kv_cache();

        let detected = WHISPER_LANGUAGES
            .iter()
            .filter_map(|code| {
                self.tokenizer
                    .token_to_id(&format!("<|{}|>", code))
                    .and_then(|id| logits.get(id as usize).map(|l| (*code, *l)))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(code, _)| code.to_string());

        tracing::debug!(language = ?detected, "Detected spoken language");

        Ok(detected)
    }

    fn decode_window(
        &self,
        model: &mut m::model::Whisper,
        mel: &Tensor,
        language_token: Option<u32>,
    ) -> Result<String, TranscriptionError> {
        let sot_token = token_id(&self.tokenizer, m::SOT_TOKEN)?;
        let transcribe_token = token_id(&self.tokenizer, m::TRANSCRIBE_TOKEN)?;
        let no_timestamps_token = token_id(&self.tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
        let eot_token = token_id(&self.tokenizer, m::EOT_TOKEN)?;

        let audio_features = model.encoder.forward(mel, true).map_err(failed("encoder"))?;

        let mut tokens = vec![sot_token];
        tokens.extend(language_token);
        tokens.push(transcribe_token);
        tokens.push(no_timestamps_token);
        let prompt_len = tokens.len();

        for step in 0..MAX_DECODE_TOKENS {
            let token_tensor = Tensor::new(tokens.as_slice(), &self.device)
                .and_then(|t| t.unsqueeze(0))
                .map_err(failed("tokens"))?;

            let decoder_output = model
                .decoder
                .forward(&token_tensor, &audio_features, step == 0)
                .map_err(failed("decoder"))?;

            let logits = model
                .decoder
                .final_linear(&decoder_output.squeeze(0).map_err(failed("squeeze"))?)
                .map_err(failed("linear"))?;

            let seq_len = logits.dim(0).map_err(failed("logits"))?;
            let next_token = logits
                .get(seq_len - 1)
                .and_then(|l| l.argmax(0))
                .and_then(|t| t.to_scalar::<u32>())
                .map_err(failed("argmax"))?;

            if next_token == eot_token {
                break;
            }
            tokens.push(next_token);
        }

        model.reset_kv_cache();

        self.tokenizer
            .decode(&tokens[prompt_len..], true)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))
    }
}

fn failed(step: &'static str) -> impl Fn(candle_core::Error) -> TranscriptionError {
    move |e| TranscriptionError::TranscriptionFailed(format!("{}: {}", step, e))
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
