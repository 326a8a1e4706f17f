mod key;
mod language;
mod ocr_options;
mod settings;

pub use key::{OptionKey, OptionKind, OptionValue};
pub use language::{COMMON_LANGUAGES, DEFAULT_LANGUAGE, is_valid_language, language_codes};
pub use ocr_options::OcrOptions;
pub use settings::{DEFAULT_SETTINGS_FILE, SettingsStore};
