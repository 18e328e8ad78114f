//! Host platform detection and release-target mapping
//!
//! Release archives are published per target triple; this module maps the
//! host's OS and CPU architecture to the triple used in archive names.

use thiserror::Error;

/// Where to point people whose platform has no prebuilt archive.
pub const MANUAL_DOWNLOAD_URL: &str = "https://github.com/starship-jj/starship-jj/releases";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Unsupported architecture: {arch}. Prebuilt binaries exist for x86_64 and aarch64 only.")]
    UnsupportedArchitecture { arch: String },

    #[error(
        "Unsupported platform: {os}. Download a binary for your platform manually from {url}",
        url = MANUAL_DOWNLOAD_URL
    )]
    UnsupportedPlatform { os: String },
}

/// Map an OS name and machine architecture to the release target triple.
///
/// Accepts both `uname` spellings (`Darwin`, `arm64`) and the values from
/// `std::env::consts` (`macos`, `aarch64`). Any pair outside the published
/// matrix is an error.
pub fn target_triple(os: &str, arch: &str) -> Result<&'static str, PlatformError> {
    match os.to_ascii_lowercase().as_str() {
        "linux" => match arch {
            "x86_64" => Ok("x86_64-unknown-linux-gnu"),
            "aarch64" => Ok("aarch64-unknown-linux-gnu"),
            other => Err(PlatformError::UnsupportedArchitecture {
                arch: other.to_string(),
            }),
        },
        "darwin" | "macos" => match arch {
            "x86_64" => Ok("x86_64-apple-darwin"),
            "arm64" | "aarch64" => Ok("aarch64-apple-darwin"),
            other => Err(PlatformError::UnsupportedArchitecture {
                arch: other.to_string(),
            }),
        },
        other => Err(PlatformError::UnsupportedPlatform {
            os: other.to_string(),
        }),
    }
}

/// Resolve the target triple for the machine we are running on.
pub fn detect_target() -> Result<&'static str, PlatformError> {
    target_triple(std::env::consts::OS, std::env::consts::ARCH)
}
