mod settings;

pub use settings::{BrandVoiceConfig, CONFIG_FILE};
