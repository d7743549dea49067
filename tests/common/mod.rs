// Shared test helpers for integration tests
use sample_runner::core::config::{RunnerConfig, TestSpec};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// A runner configuration with two known streams and a small environment,
/// matching what a real setup for the sample tools looks like.
pub fn sample_config() -> RunnerConfig {
    let toml_text = r#"
language = "en"
samples_folder = "samples"

[environment]
LIBVA_DRIVER_NAME = "iHD"
DISPLAY = ":0"

[streams.foreman_cif]
path = "foreman_cif.yuv"
width = 352
height = 288

[streams.bbb_1080p_h264]
path = "bbb_1080p.264"
codec = "h264"
width = 1920
height = 1080
"#;
    toml::from_str(toml_text).expect("sample config must parse")
}

/// Parses a specification from inline JSON, panicking on malformed input.
pub fn spec(text: &str) -> TestSpec {
    TestSpec::parse(text).expect("test specification must parse")
}

/// A fresh base directory for streams, par files and results.
pub fn base_dir() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes a minimal par file into the base directory and returns its path.
pub fn write_par_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "-i::h264 input.264 -o::h265 output.265\n")
        .expect("Failed to write par file");
    path
}
