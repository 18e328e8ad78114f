//! HTTP download with a progress bar and in-process tar.gz extraction
//!
//! Uses ureq for synchronous HTTP; no external curl or tar is required.

use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tar::Archive;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Failed to download {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to open archive {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to extract archive {path}: {source}")]
    Unpack {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Download `url` into `dest`, streaming through a progress bar.
///
/// Non-success HTTP statuses are errors; ureq reports them as such.
pub fn fetch(url: &str, dest: &Path) -> Result<(), DownloadError> {
    let response = ureq::get(url)
        .set("User-Agent", "starship-jj-install")
        .call()
        .map_err(|e| DownloadError::Request {
            url: url.to_string(),
            source: Box::new(e),
        })?;

    let content_length: u64 = response
        .header("Content-Length")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let pb = progress_bar(content_length);

    let file = File::create(dest).map_err(|e| DownloadError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;
    let mut writer = pb.wrap_write(file);

    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer).map_err(|e| DownloadError::Body {
            url: url.to_string(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        writer
            .write_all(&buffer[..n])
            .map_err(|e| DownloadError::Write {
                path: dest.to_path_buf(),
                source: e,
            })?;
    }

    pb.finish_and_clear();
    Ok(())
}

fn progress_bar(content_length: u64) -> ProgressBar {
    if content_length > 0 {
        let pb = ProgressBar::new(content_length);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        pb
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {bytes}")
                .expect("Invalid spinner template"),
        );
        pb
    }
}

/// Unpack a gzip-compressed tarball into `dest_dir`.
pub fn extract_tarball(tarball: &Path, dest_dir: &Path) -> Result<(), ExtractionError> {
    let file = File::open(tarball).map_err(|e| ExtractionError::Open {
        path: tarball.to_path_buf(),
        source: e,
    })?;

    let decoder = GzDecoder::new(BufReader::new(file));
    let mut archive = Archive::new(decoder);

    fs::create_dir_all(dest_dir).map_err(|e| ExtractionError::Unpack {
        path: tarball.to_path_buf(),
        source: e,
    })?;

    archive
        .unpack(dest_dir)
        .map_err(|e| ExtractionError::Unpack {
            path: tarball.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    /// Build a gzipped tarball holding a single `name` file with `contents`.
    fn make_tarball(name: &str, contents: &[u8]) -> Vec<u8> {
        let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, name, contents).unwrap();
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn fetch_writes_body_to_dest() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/file.tar.gz")
            .with_status(200)
            .with_body("payload")
            .create();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("file.tar.gz");
        fetch(&format!("{}/file.tar.gz", server.url()), &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn fetch_fails_on_404() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/missing.tar.gz").with_status(404).create();

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("missing.tar.gz");
        let err = fetch(&format!("{}/missing.tar.gz", server.url()), &dest).unwrap_err();

        assert!(matches!(err, DownloadError::Request { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn extract_unpacks_single_binary() {
        let dir = tempfile::tempdir().unwrap();
        let tarball = dir.path().join("starship-jj.tar.gz");
        fs::write(&tarball, make_tarball("starship-jj", b"#!/bin/sh\n")).unwrap();

        extract_tarball(&tarball, dir.path()).unwrap();

        let extracted = dir.path().join("starship-jj");
        assert_eq!(fs::read(&extracted).unwrap(), b"#!/bin/sh\n");
    }

    #[test]
    fn extract_fails_on_truncated_archive() {
        let dir = tempfile::tempdir().unwrap();
        let tarball = dir.path().join("broken.tar.gz");
        let full = make_tarball("starship-jj", &[0u8; 4096]);
        fs::write(&tarball, &full[..full.len() / 2]).unwrap();

        let err = extract_tarball(&tarball, dir.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::Unpack { .. }));
    }

    #[test]
    fn extract_fails_on_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let tarball = dir.path().join("garbage.tar.gz");
        fs::write(&tarball, b"this is not gzip data").unwrap();

        assert!(extract_tarball(&tarball, dir.path()).is_err());
    }

    #[test]
    fn extract_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_tarball(&dir.path().join("nope.tar.gz"), dir.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::Open { .. }));
    }
}
