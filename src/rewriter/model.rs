//! Paraphrase generation using Candle
//!
//! Loads a pretrained T5 paraphrasing model from the Hugging Face hub and
//! runs sampled conditional generation on the CPU or GPU. The model is
//! loaded once at startup and owned by the rewriter instance; there is no
//! global state.

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5;
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::config::ModelConfig;
use crate::error::RewriteError;
use crate::rewriter::{build_prompt, finalize_post, truncate_excerpt, Rewrite};

/// Penalty applied to recently generated tokens to damp repetition
const REPEAT_PENALTY: f32 = 1.1;

/// Window of trailing tokens the repeat penalty looks at
const REPEAT_LAST_N: usize = 64;

/// T5-based paraphraser
pub struct T5Rewriter {
    /// T5 encoder-decoder model
    model: t5::T5ForConditionalGeneration,

    /// Tokenizer
    tokenizer: Tokenizer,

    /// Model architecture config (token ids, cache behavior)
    model_config: t5::Config,

    /// Device (CPU or GPU)
    device: Device,

    /// Generation options
    options: ModelConfig,
}

impl T5Rewriter {
    /// Download and load the paraphrasing model from the Hugging Face hub
    pub fn from_pretrained(options: &ModelConfig) -> Result<Self> {
        let device = if options.use_gpu {
            Device::cuda_if_available(0).unwrap_or(Device::Cpu)
        } else {
            Device::Cpu
        };

        let device_name = match &device {
            Device::Cpu => "cpu",
            Device::Cuda(_) => "cuda",
            Device::Metal(_) => "metal",
        };

        tracing::info!(
            model = %options.model_id,
            device = device_name,
            "Loading paraphrasing model"
        );

        let api = Api::new().context("Failed to create HuggingFace API")?;
        let repo = api.repo(Repo::new(options.model_id.clone(), RepoType::Model));

        let tokenizer_path = repo
            .get("tokenizer.json")
            .context("Failed to download tokenizer")?;

        let config_path = repo
            .get("config.json")
            .context("Failed to download config")?;

        let weights_path = repo
            .get("model.safetensors")
            .or_else(|_| repo.get("pytorch_model.bin"))
            .context("Failed to download model weights")?;

        Self::from_files(
            tokenizer_path,
            config_path,
            weights_path,
            options.clone(),
            device,
        )
    }

    /// Load the model from local files
    pub fn from_files(
        tokenizer_path: PathBuf,
        config_path: PathBuf,
        weights_path: PathBuf,
        options: ModelConfig,
        device: Device,
    ) -> Result<Self> {
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {e}"))?;

        let model_config: t5::Config = serde_json::from_str(
            &std::fs::read_to_string(&config_path).context("Failed to read config file")?,
        )
        .context("Failed to parse config")?;

        let vb = if weights_path
            .extension()
            .map(|e| e == "safetensors")
            .unwrap_or(false)
        {
            unsafe {
                VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                    .context("Failed to load safetensors")?
            }
        } else {
            // For .bin files (PyTorch format)
            VarBuilder::from_pth(&weights_path, DType::F32, &device)
                .context("Failed to load PyTorch weights")?
        };

        let model = t5::T5ForConditionalGeneration::load(vb, &model_config)
            .context("Failed to build T5 model")?;

        Ok(Self {
            model,
            tokenizer,
            model_config,
            device,
            options,
        })
    }

    /// Run sampled generation for one prompt and return the decoded text
    fn generate(&mut self, prompt: &str) -> Result<String, RewriteError> {
        self.model.clear_kv_cache();

        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| RewriteError::Tokenizer(e.to_string()))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;
        let encoder_output = self.model.encode(&input_ids)?;

        let start_token = self
            .model_config
            .decoder_start_token_id
            .unwrap_or(self.model_config.pad_token_id) as u32;
        let mut output_token_ids = vec![start_token];

        let seed = self.options.seed.unwrap_or_else(rand::random);
        let mut logits_processor =
            LogitsProcessor::new(seed, Some(self.options.temperature), self.options.top_p);

        for index in 0..self.options.max_new_tokens {
            let decoder_token_ids = if index == 0 || !self.model_config.use_cache {
                Tensor::new(output_token_ids.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last_token = *output_token_ids.last().unwrap();
                Tensor::new(&[last_token], &self.device)?.unsqueeze(0)?
            };

            let logits = self
                .model
                .decode(&decoder_token_ids, &encoder_output)?
                .squeeze(0)?;

            let logits = if REPEAT_PENALTY == 1.0 {
                logits
            } else {
                let start_at = output_token_ids.len().saturating_sub(REPEAT_LAST_N);
                candle_transformers::utils::apply_repeat_penalty(
                    &logits,
                    REPEAT_PENALTY,
                    &output_token_ids[start_at..],
                )?
            };

            let next_token_id = logits_processor.sample(&logits)?;
            if next_token_id as usize == self.model_config.eos_token_id {
                break;
            }

            output_token_ids.push(next_token_id);
        }

        if output_token_ids.len() <= 1 {
            return Err(RewriteError::EmptyGeneration);
        }

        self.tokenizer
            .decode(&output_token_ids[1..], true)
            .map_err(|e| RewriteError::Tokenizer(e.to_string()))
    }
}

impl Rewrite for T5Rewriter {
    fn rewrite(&mut self, title: &str, excerpt: &str) -> Result<String, RewriteError> {
        let prompt = build_prompt(title, &truncate_excerpt(excerpt));
        let generated = self.generate(&prompt)?;

        if generated.trim().is_empty() {
            return Err(RewriteError::EmptyGeneration);
        }

        Ok(finalize_post(&generated))
    }
}
