/// Reserved name of the configuration component
pub const CONFIG_COMPONENT_NAME: &str = "config";

/// Component directories scanned when none are configured
pub const DEFAULT_COMPONENT_DIRS: &[&str] = &["./components"];

/// Default base directory
pub const DEFAULT_BASE_DIR: &str = ".";

/// Manifest file read from every component directory
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Shared module directory searched in the base directory and its ancestors
pub const MODULES_DIR_NAME: &str = "framing_modules";

/// Version written to and expected from plan files
pub const PLAN_FORMAT_VERSION: u32 = 1;
