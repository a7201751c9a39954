pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "qrgen";
pub const APP_NAME: &str = "qrgen";

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "qrgen.log";
// Console only.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
// The log file records everything from our own crates and nothing from the image codecs.
pub const FILE_LOG_DIRECTIVES: &str = "warn,qrgen=trace,qrgen_cli=trace,qrgen_core=trace";
