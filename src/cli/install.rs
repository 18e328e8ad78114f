//! The install pipeline
//!
//! A linear sequence with no retries: resolve target, resolve version, build
//! the URL, download and extract inside a scoped temp directory, then move the
//! binary into place. The first failure aborts the run; the destination is
//! only touched after a successful extraction.

use crate::cli::Cli;
use crate::download;
use crate::paths;
use crate::platform;
use crate::release::{self, ReleaseSource};
use crate::util::ui;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

const VERSION_ENV: &str = "VERSION";

pub fn run(cli: &Cli) -> Result<()> {
    let triple = platform::detect_target()?;

    let source = ReleaseSource::from_env();
    let version = resolve_version(cli, &source)?;
    let url = source.download_url(&version, triple);
    let install_dir = paths::install_dir(cli.install_dir.as_deref());
    let dest = install_dir.join(release::BINARY);

    ui::info(&format!("Installing {} {} ({})", release::BINARY, version, triple));

    if cli.dry_run {
        ui::info(&format!("Would download {}", url));
        ui::info(&format!("Would install to {}", dest.display()));
        return Ok(());
    }

    // Everything downloaded or unpacked lives here; the directory is removed
    // when this scope ends, on success and on error alike.
    let temp = tempfile::tempdir().context("Failed to create temporary directory")?;
    remove_temp_dir_on_interrupt(temp.path());

    let archive_path = temp.path().join(release::archive_name(&version, triple));
    ui::info(&format!("Downloading {}", url));
    download::fetch(&url, &archive_path)?;

    download::extract_tarball(&archive_path, temp.path())?;

    let extracted = temp.path().join(release::BINARY);
    if !extracted.is_file() {
        bail!(
            "Archive did not contain a {} binary: {}",
            release::BINARY,
            archive_path.display()
        );
    }

    fs::create_dir_all(&install_dir).with_context(|| {
        format!(
            "Failed to create install directory: {}",
            install_dir.display()
        )
    })?;
    install_binary(&extracted, &dest)?;

    ui::success(&format!("Installed {}", dest.display()));
    warn_if_shadowed(&install_dir);
    Ok(())
}

/// Version precedence: --tag flag, then a non-empty VERSION environment
/// variable (used verbatim, no metadata request), then the latest release.
fn resolve_version(cli: &Cli, source: &ReleaseSource) -> Result<String> {
    if let Some(tag) = &cli.tag {
        return Ok(tag.clone());
    }
    if let Ok(version) = std::env::var(VERSION_ENV) {
        if !version.is_empty() {
            return Ok(version);
        }
    }
    ui::info("Resolving latest release...");
    Ok(source.latest_version()?)
}

/// Temp-dir drops don't run when a signal terminates the process, so Ctrl-C
/// gets its own cleanup hook.
fn remove_temp_dir_on_interrupt(temp: &Path) {
    let temp = temp.to_path_buf();
    let _ = ctrlc::set_handler(move || {
        let _ = fs::remove_dir_all(&temp);
        std::process::exit(130);
    });
}

/// Move the binary into place and mark it executable.
fn install_binary(src: &Path, dest: &Path) -> Result<()> {
    if fs::rename(src, dest).is_err() {
        // The temp dir is often on a different filesystem (tmpfs); fall back
        // to a copy. The source is inside the temp dir and goes away with it.
        fs::copy(src, dest)
            .with_context(|| format!("Failed to install binary to {}", dest.display()))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dest, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to set permissions on {}", dest.display()))?;
    }

    Ok(())
}

/// Warn when the installed binary won't be the one a shell finds.
fn warn_if_shadowed(install_dir: &Path) {
    match which::which(release::BINARY) {
        Ok(found) if found.parent() == Some(install_dir) => {}
        Ok(found) => ui::warn(&format!(
            "{} on your PATH resolves to {}, not the copy just installed",
            release::BINARY,
            found.display()
        )),
        Err(_) => ui::warn(&format!(
            "{} is not on your PATH; add it to use {}",
            install_dir.display(),
            release::BINARY
        )),
    }
}
