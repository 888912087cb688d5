//! ProtoAI — Core library.
//! Turns a free-text business idea into a website blueprint: name extraction,
//! template assembly, and the hosted text-generation client.

pub mod blueprint;
pub mod config;
pub mod generation;
pub mod name_extractor;

pub use crate::blueprint::{assemble_blueprint, create_design_prompt, derive_description, Blueprint, Section, SectionKind};
pub use crate::config::{ConfigError, GatewayConfig};
pub use crate::generation::{GenerationError, GenerationParams, Generator, HuggingFaceClient};
pub use crate::name_extractor::{extract_business_name, FALLBACK_BUSINESS_NAME};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
