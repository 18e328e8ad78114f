use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "starship-jj-install")]
#[command(about = "Install the prebuilt starship-jj binary from GitHub releases")]
#[command(version)]
pub struct Cli {
    /// Release tag to install (default: latest release; the VERSION
    /// environment variable works too)
    #[arg(long)]
    pub tag: Option<String>,

    /// Directory to install into (default: ~/.local/bin; the INSTALL_DIR
    /// environment variable works too)
    #[arg(long)]
    pub install_dir: Option<PathBuf>,

    /// Resolve the target, version and URL but download nothing
    #[arg(long)]
    pub dry_run: bool,
}

pub mod install;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_without_args() {
        let cli = Cli::try_parse_from(["starship-jj-install"]).expect("should parse bare invocation");
        assert!(cli.tag.is_none());
        assert!(cli.install_dir.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn parses_tag_and_install_dir() {
        let cli = Cli::try_parse_from([
            "starship-jj-install",
            "--tag",
            "v1.2.3",
            "--install-dir",
            "/opt/bin",
            "--dry-run",
        ])
        .expect("should parse flags");

        assert_eq!(cli.tag.as_deref(), Some("v1.2.3"));
        assert_eq!(cli.install_dir.as_deref(), Some(std::path::Path::new("/opt/bin")));
        assert!(cli.dry_run);
    }
}
