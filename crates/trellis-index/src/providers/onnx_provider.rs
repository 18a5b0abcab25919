//! Local ONNX embedding provider (feature `onnx`).
//!
//! Loads a sentence-embedding model via the `ort` crate, mean-pools the
//! output tensor, and L2-normalizes. Used for air-gapped deployments that
//! still want neural embeddings.

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tracing::debug;

use trellis_core::errors::IndexError;
use trellis_core::traits::IEmbeddingProvider;

/// ONNX-based embedding provider.
pub struct OnnxProvider {
    /// `Session::run` needs `&mut self`; the mutex satisfies the `&self`
    /// trait surface.
    session: Mutex<Session>,
    dimensions: usize,
    model_name: String,
}

// Safety: Session is Send but not Sync by default. The Mutex provides Sync.
unsafe impl Sync for OnnxProvider {}

impl OnnxProvider {
    /// Load an ONNX model from the given path.
    pub fn load(model_path: &str, dimensions: usize) -> Result<Self, IndexError> {
        let path = Path::new(model_path);
        if !path.exists() {
            return Err(IndexError::ModelLoadFailed {
                path: model_path.to_string(),
                reason: "model file not found".to_string(),
            });
        }

        let load_err = |reason: String| IndexError::ModelLoadFailed {
            path: model_path.to_string(),
            reason,
        };
        let session = Session::builder()
            .map_err(|e| load_err(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e| load_err(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| load_err(e.to_string()))?;

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx-model")
            .to_string();

        debug!(model = %model_name, dims = dimensions, "ONNX model loaded");

        Ok(Self {
            session: Mutex::new(session),
            dimensions,
            model_name,
        })
    }

    fn infer(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        let infer_err = |reason: String| IndexError::Embedding {
            provider: "onnx".to_string(),
            reason,
        };

        let token_ids = Self::hash_tokenize(text);
        let seq_len = token_ids.len();
        let input_ids: Vec<i64> = token_ids.iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = vec![1i64; seq_len];

        let ids_tensor = Tensor::from_array((vec![1i64, seq_len as i64], input_ids))
            .map_err(|e| infer_err(format!("tensor creation error: {e}")))?;
        let mask_tensor = Tensor::from_array((vec![1i64, seq_len as i64], attention_mask))
            .map_err(|e| infer_err(format!("tensor creation error: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| infer_err(format!("session lock poisoned: {e}")))?;

        let outputs = session
            .run(ort::inputs![ids_tensor, mask_tensor])
            .map_err(|e| infer_err(e.to_string()))?;

        let (_name, output) = outputs
            .iter()
            .next()
            .ok_or_else(|| infer_err("no output tensor".to_string()))?;
        let (shape, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| infer_err(format!("tensor extraction failed: {e}")))?;

        // Mean pool across the sequence dimension when the model returns
        // per-token states; 2-D outputs are already pooled.
        let mut embedding = if shape.len() == 3 {
            let seq = shape[1] as usize;
            let dims = shape[2] as usize;
            let mut pooled = vec![0.0f32; dims];
            for s in 0..seq {
                for d in 0..dims {
                    pooled[d] += data[s * dims + d];
                }
            }
            for v in &mut pooled {
                *v /= seq as f32;
            }
            pooled
        } else if shape.len() == 2 {
            let dims = shape[1] as usize;
            data[..dims].to_vec()
        } else {
            return Err(infer_err(format!("unexpected output shape: {shape:?}")));
        };

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut embedding {
                *v /= norm;
            }
        }
        embedding.resize(self.dimensions, 0.0);
        Ok(embedding)
    }

    /// Hash words into a bounded vocab range, with BERT-style marker ids.
    fn hash_tokenize(text: &str) -> Vec<u32> {
        if text.is_empty() {
            return vec![101, 102]; // [CLS] [SEP]
        }
        let mut ids = vec![101u32];
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            let mut h: u32 = 0x811c9dc5;
            for b in word.to_lowercase().as_bytes() {
                h ^= *b as u32;
                h = h.wrapping_mul(0x01000193);
            }
            ids.push(1 + (h % 29999));
        }
        ids.push(102);
        ids
    }
}

impl IEmbeddingProvider for OnnxProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, IndexError> {
        self.infer(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn is_available(&self) -> bool {
        true
    }
}
