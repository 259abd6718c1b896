//! Candle-based inference backend for sentiment classification checkpoints.
//!
//! Pure-Rust ML runtime using candle with Metal GPU acceleration on macOS.
//! Provides [`SequenceClassifier`] for single-label sentiment models
//! (XLM-RoBERTa heads with negative / neutral / positive labels).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{LayerNorm, Module, VarBuilder};
use candle_transformers::models::xlm_roberta::{
    Config as XLMRobertaConfig, XLMRobertaForSequenceClassification,
};
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Longest token sequence fed to the model.
const MAX_SEQUENCE_LEN: usize = 512;

/// Source of `tokenizer.json` for checkpoints that ship only a sentencepiece
/// model. XLM-RoBERTa fine-tunes share this vocabulary.
pub const FALLBACK_TOKENIZER_REPO: &str = "FacebookAI/xlm-roberta-base";

/// Weight files tried in order.
const WEIGHT_FILES: [&str; 2] = ["model.safetensors", "pytorch_model.bin"];

/// Paths to downloaded model files from HuggingFace Hub.
pub struct ModelFiles {
    pub config_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub weights_path: PathBuf,
}

/// Download model files from HuggingFace Hub.
///
/// Uses `hf_hub::api::sync::Api` which caches at `~/.cache/huggingface/hub/`
/// unless `cache_dir` is given. Performs synchronous I/O.
pub fn download_model(repo_id: &str, cache_dir: Option<&Path>) -> Result<ModelFiles> {
    let api = match cache_dir {
        Some(dir) => hf_hub::api::sync::ApiBuilder::new()
            .with_cache_dir(dir.to_path_buf())
            .build(),
        None => hf_hub::api::sync::Api::new(),
    }
    .context("Failed to initialize HuggingFace Hub API")?;
    let repo = api.model(repo_id.to_string());

    let config_path = repo
        .get("config.json")
        .context("Failed to download config.json")?;
    let tokenizer_path = match repo.get("tokenizer.json") {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(
                "{} has no tokenizer.json ({}), using the one from {}",
                repo_id,
                e,
                FALLBACK_TOKENIZER_REPO
            );
            api.model(FALLBACK_TOKENIZER_REPO.to_string())
                .get("tokenizer.json")
                .context("Failed to download fallback tokenizer.json")?
        }
    };

    let mut last_error = None;
    let mut weights_path = None;
    for file in WEIGHT_FILES {
        match repo.get(file) {
            Ok(path) => {
                weights_path = Some(path);
                break;
            }
            Err(e) => last_error = Some(format!("{}: {}", file, e)),
        }
    }
    let weights_path = weights_path.with_context(|| {
        format!(
            "No weights found in {} ({})",
            repo_id,
            last_error.unwrap_or_default()
        )
    })?;

    Ok(ModelFiles {
        config_path,
        tokenizer_path,
        weights_path,
    })
}

/// PyTorch pickles (`.bin`, `.pt`, `.pth`) rather than safetensors.
fn is_pickle_weights(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("bin" | "pt" | "pth")
    )
}

/// Select the best available compute device.
///
/// Tries Metal (macOS) or CUDA if the corresponding feature is enabled. Probes
/// layer-norm support since RoBERTa requires it; falls back to CPU if the GPU
/// backend lacks the kernel.
pub fn select_device() -> Device {
    #[cfg(target_os = "macos")]
    {
        if let Ok(device) = Device::new_metal(0) {
            if probe_layer_norm(&device) {
                tracing::info!("Using Metal GPU for inference");
                return device;
            }
            tracing::warn!("Metal GPU available but layer-norm not supported, falling back to CPU");
        }
    }
    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            if probe_layer_norm(&device) {
                tracing::info!("Using CUDA GPU for inference");
                return device;
            }
            tracing::warn!("CUDA GPU available but layer-norm not supported, falling back to CPU");
        }
    }
    tracing::info!("Using CPU for inference");
    Device::Cpu
}

/// Probe whether a device supports layer-norm.
#[allow(dead_code)]
fn probe_layer_norm(device: &Device) -> bool {
    (|| -> candle_core::Result<()> {
        let weight = Tensor::ones(4, DType::F32, device)?;
        let bias = Tensor::zeros(4, DType::F32, device)?;
        let ln = LayerNorm::new(weight, bias, 1e-5);
        let input = Tensor::randn(0f32, 1.0, (1, 4), device)?;
        let _ = ln.forward(&input)?;
        Ok(())
    })()
    .is_ok()
}

/// Indices of the polarity-bearing labels in a checkpoint's `id2label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarityLabels {
    pub positive: usize,
    pub negative: usize,
}

impl PolarityLabels {
    /// Locate positive/negative labels by name.
    ///
    /// Accepts "positive"/"negative", "POS"/"NEG", and the unnamed
    /// `LABEL_0`..`LABEL_2` of three-way checkpoints (0 = negative, 2 = positive).
    pub fn from_labels(labels: &[String]) -> Option<Self> {
        let find = |prefix: &str| {
            labels
                .iter()
                .position(|l| l.to_lowercase().starts_with(prefix))
        };

        if let (Some(positive), Some(negative)) = (find("pos"), find("neg")) {
            return Some(Self { positive, negative });
        }

        if labels.len() == 3 && labels.iter().all(|l| l.starts_with("LABEL_")) {
            return Some(Self {
                positive: 2,
                negative: 0,
            });
        }

        None
    }

    /// Polarity in [-1, 1] from a softmax distribution: P(positive) - P(negative).
    pub fn polarity(&self, probabilities: &[f32]) -> f64 {
        let pos = probabilities.get(self.positive).copied().unwrap_or(0.0) as f64;
        let neg = probabilities.get(self.negative).copied().unwrap_or(0.0) as f64;
        (pos - neg).clamp(-1.0, 1.0)
    }
}

/// Single-label sentiment classifier using XLM-RoBERTa.
///
/// Classifies text with a softmax over the checkpoint's labels and reduces the
/// distribution to a polarity score.
pub struct SequenceClassifier {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
    labels: Vec<String>,
    polarity_labels: PolarityLabels,
}

impl SequenceClassifier {
    /// Load a classifier from downloaded model files.
    ///
    /// Parses `id2label` from config.json to determine label names and count.
    pub fn new(files: &ModelFiles, device: Device) -> Result<Self> {
        let config_str = std::fs::read_to_string(&files.config_path)
            .context("Failed to read classifier config")?;
        let config: XLMRobertaConfig =
            serde_json::from_str(&config_str).context("Failed to parse XLM-RoBERTa config")?;

        let config_json: serde_json::Value =
            serde_json::from_str(&config_str).context("Failed to parse config as JSON")?;
        let labels = parse_id2label(&config_json)?;

        let polarity_labels = PolarityLabels::from_labels(&labels).with_context(|| {
            format!(
                "Cannot find positive/negative labels among {:?}",
                labels
            )
        })?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load classifier tokenizer: {}", e))?;

        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LEN,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        let vb = if is_pickle_weights(&files.weights_path) {
            VarBuilder::from_pth(&files.weights_path, DType::F32, &device)
                .context("Failed to load classifier weights")?
        } else {
            // SAFETY: mmap'd safetensors file, safe as long as the file is not modified
            // while the model is in use.
            unsafe {
                VarBuilder::from_mmaped_safetensors(&[&files.weights_path], DType::F32, &device)
                    .context("Failed to load classifier weights")?
            }
        };
        let model = XLMRobertaForSequenceClassification::new(labels.len(), &config, vb)
            .context("Failed to construct classifier model")?;

        Ok(Self {
            model,
            tokenizer,
            device,
            labels,
            polarity_labels,
        })
    }

    /// Polarity score per input text, each in [-1, 1].
    pub fn polarities(&self, texts: &[String]) -> Result<Vec<f64>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let str_refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let encodings = self
            .tokenizer
            .encode_batch(str_refs, true)
            .map_err(|e| anyhow::anyhow!("Classifier tokenization failed: {}", e))?;

        let batch_size = encodings.len();
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let input_ids: Vec<u32> = encodings
            .iter()
            .flat_map(|e| e.get_ids().to_vec())
            .collect();
        let attention_mask: Vec<u32> = encodings
            .iter()
            .flat_map(|e| e.get_attention_mask().to_vec())
            .collect();

        let input_ids = Tensor::from_vec(input_ids, (batch_size, max_len), &self.device)?;
        let attention_mask = Tensor::from_vec(attention_mask, (batch_size, max_len), &self.device)?;
        // XLM-RoBERTa doesn't use token_type_ids; pass zeros
        let token_type_ids = input_ids.zeros_like()?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)?;

        // Labels are mutually exclusive: softmax over the label axis.
        let probabilities = candle_nn::ops::softmax_last_dim(&logits)?;
        let rows = probabilities.to_vec2::<f32>()?;

        Ok(rows
            .iter()
            .map(|row| self.polarity_labels.polarity(row))
            .collect())
    }

    /// Get the label names in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Ordered label list from `{"id2label": {"0": "negative", ...}}`.
fn parse_id2label(config: &serde_json::Value) -> Result<Vec<String>> {
    let id2label = config
        .get("id2label")
        .and_then(|v| v.as_object())
        .context("config.json missing id2label mapping")?;

    let mut entries: Vec<(usize, String)> = id2label
        .iter()
        .filter_map(|(k, v)| {
            let idx: usize = k.parse().ok()?;
            let label = v.as_str()?.to_string();
            Some((idx, label))
        })
        .collect();
    entries.sort_by_key(|(idx, _)| *idx);
    let labels: Vec<String> = entries.into_iter().map(|(_, label)| label).collect();

    if labels.is_empty() {
        anyhow::bail!("id2label is empty, cannot determine label count");
    }
    Ok(labels)
}
