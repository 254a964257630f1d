// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    catalog: CatalogLimits,
    scanner: ScannerLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct CatalogLimits {
    max_catalog_file_size: u64,
    max_controls: usize,
}

#[derive(serde::Deserialize)]
struct ScannerLimits {
    max_file_size: u64,
    max_files_per_scan: usize,
    max_reported_matches: usize,
    max_excerpt_length: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CCF_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=CCF_CONFIG_DIR");

    let profile = env::var("CCF_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("CCF_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of ccf_core directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_security_constraints(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_security_constraints(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_CONTROLS: usize = 1_000_000;

    if config.catalog.max_catalog_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: max_catalog_file_size exceeds absolute maximum");
    }

    if config.scanner.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: scanner max_file_size exceeds absolute maximum");
    }

    if config.catalog.max_controls > ABSOLUTE_MAX_CONTROLS {
        panic!("SECURITY: max_controls exceeds absolute maximum");
    }

    if config.scanner.max_reported_matches == 0 {
        panic!("CONFIG: max_reported_matches must be at least 1");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if profile == "production" && config.scanner.max_file_size > 50_000_000 {
        panic!("PRODUCTION: scanner max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod catalog {{
        pub const MAX_CATALOG_FILE_SIZE: u64 = {};
        pub const MAX_CONTROLS: usize = {};
    }}

    pub mod scanner {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const MAX_FILES_PER_SCAN: usize = {};
        pub const MAX_REPORTED_MATCHES: usize = {};
        pub const MAX_EXCERPT_LENGTH: usize = {};
    }}

    pub mod logging {{
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        config.catalog.max_catalog_file_size,
        config.catalog.max_controls,
        config.scanner.max_file_size,
        config.scanner.max_files_per_scan,
        config.scanner.max_reported_matches,
        config.scanner.max_excerpt_length,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
