use std::env;
use std::path::PathBuf;

use crate::storage::LOGO_SUBDIR;

/// Media configuration, read once at startup and passed explicitly to the
/// handlers that build logo URLs.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Public base address of this server, without a trailing slash.
    pub base_url: String,
    /// Directory holding uploaded media.
    pub media_root: PathBuf,
}

impl MediaConfig {
    /// Read `MEDIA_BASE_URL` and `MEDIA_ROOT` from the environment, falling
    /// back to local defaults.
    pub fn from_env() -> Self {
        let base_url = env::var("MEDIA_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
            .trim_end_matches('/')
            .to_string();
        let media_root = env::var("MEDIA_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./media"));

        Self {
            base_url,
            media_root,
        }
    }

    /// Public URL of a stored clinic logo.
    pub fn logo_url(&self, stored_filename: &str) -> String {
        format!("{}/media/{}/{}", self.base_url, LOGO_SUBDIR, stored_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_url_joins_base_subdir_and_name() {
        let config = MediaConfig {
            base_url: "http://clinic.example.com".to_string(),
            media_root: PathBuf::from("/var/media"),
        };
        assert_eq!(
            config.logo_url("abc_logo.png"),
            "http://clinic.example.com/media/clinic_logos/abc_logo.png"
        );
    }

}
