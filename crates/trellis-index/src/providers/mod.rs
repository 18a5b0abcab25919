//! Embedding providers and chain assembly.

pub mod hashed_fallback;
#[cfg(feature = "onnx")]
pub mod onnx_provider;
pub mod remote_provider;

use tracing::warn;

use trellis_core::config::{IndexConfig, ProviderKind};

use crate::degradation::DegradationChain;

pub use hashed_fallback::HashedTermFallback;
#[cfg(feature = "onnx")]
pub use onnx_provider::OnnxProvider;
pub use remote_provider::RemoteProvider;

/// Assemble the provider chain from config. The hashed fallback is always
/// the terminal rung, so the chain can never be empty or fully unavailable.
pub fn create_chain(config: &IndexConfig) -> DegradationChain {
    let mut chain = DegradationChain::new();

    match config.provider {
        ProviderKind::Remote => match RemoteProvider::from_config(&config.remote, config.dimensions)
        {
            Ok(provider) => chain.push(Box::new(provider)),
            Err(e) => warn!(error = %e, "remote provider construction failed, skipping"),
        },
        ProviderKind::Onnx => {
            #[cfg(feature = "onnx")]
            match config.onnx_model_path.as_deref() {
                Some(path) => match OnnxProvider::load(path, config.dimensions) {
                    Ok(provider) => chain.push(Box::new(provider)),
                    Err(e) => warn!(error = %e, "onnx provider load failed, skipping"),
                },
                None => warn!("provider = onnx but no onnx_model_path configured"),
            }
            #[cfg(not(feature = "onnx"))]
            warn!("provider = onnx but trellis-index was built without the onnx feature");
        }
        ProviderKind::Hashed => {}
    }

    chain.push(Box::new(HashedTermFallback::new(config.dimensions)));
    chain
}
