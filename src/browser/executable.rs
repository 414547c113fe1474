use crate::{Result, ScrapeError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// Finds a Chrome/Chromium executable
///
/// Lookup order:
/// 1. `configured`, when set (must exist)
/// 2. the `CHROMIUM_PATH` environment variable
/// 3. well-known install locations for the current platform
/// 4. `which` on Unix systems
pub fn find_browser_executable(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(ScrapeError::BrowserSetup(format!(
            "configured browser executable does not exist: {}",
            path.display()
        )));
    }

    if let Ok(path) = std::env::var("CHROMIUM_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Using browser from CHROMIUM_PATH: {}", path.display());
            return Ok(path);
        }
        warn!(
            "CHROMIUM_PATH points to non-existent file: {}",
            path.display()
        );
    }

    if let Some(path) = known_locations().into_iter().map(PathBuf::from).find(|p| p.exists()) {
        info!("Found browser at: {}", path.display());
        return Ok(path);
    }

    if !cfg!(target_os = "windows") {
        for cmd in ["chromium", "chromium-browser", "google-chrome", "chrome"] {
            let Ok(output) = Command::new("which").arg(cmd).output() else {
                continue;
            };

            if output.status.success() {
                let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path_str.is_empty() {
                    info!("Found browser using 'which': {}", path_str);
                    return Ok(PathBuf::from(path_str));
                }
            }
        }
    }

    Err(ScrapeError::BrowserSetup(
        "Chrome/Chromium executable not found; set [browser] executable or CHROMIUM_PATH"
            .to_string(),
    ))
}

fn known_locations() -> Vec<&'static str> {
    if cfg!(target_os = "windows") {
        vec![
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files\Chromium\Application\chrome.exe",
        ]
    } else if cfg!(target_os = "macos") {
        vec![
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/opt/homebrew/bin/chromium",
        ]
    } else {
        vec![
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
            "/usr/local/bin/chromium",
            "/opt/google/chrome/chrome",
        ]
    }
}
