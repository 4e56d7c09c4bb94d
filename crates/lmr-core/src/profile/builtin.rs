use crate::error::LmrError;
use crate::profile::schema::ExtractionProfile;
use crate::profile::{parse_profile_str, CompiledProfile};

pub const LMR_DEFAULT_TOML: &str = include_str!("../../../../profiles/lmr-default.toml");

/// Available predefined profiles.
pub const PRESETS: &[&str] = &["lmr"];

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<ExtractionProfile, LmrError> {
    match name {
        "lmr" => parse_profile_str(LMR_DEFAULT_TOML),
        _ => Err(LmrError::UnknownPreset(format!(
            "{}. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The builtin Limited Morning Report profile, compiled.
pub fn default_profile() -> Result<CompiledProfile, LmrError> {
    CompiledProfile::compile(load_preset("lmr")?)
}
