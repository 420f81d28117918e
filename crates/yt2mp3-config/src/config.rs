use std::path::PathBuf;

pub const OUTPUT_FOLDER_KEY: &str = "OUTPUT_FOLDER";
pub const FFMPEG_LOCATION_KEY: &str = "FFMPEG_LOCATION";
pub const YT_DLP_PATH_KEY: &str = "YT_DLP_PATH";

pub const KNOWN_KEYS: [&str; 3] = [OUTPUT_FOLDER_KEY, FFMPEG_LOCATION_KEY, YT_DLP_PATH_KEY];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub output_folder: Option<PathBuf>,
    pub ffmpeg_location: Option<PathBuf>,
    pub yt_dlp_path: Option<String>,
}

impl AppConfig {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = Self::default();
        for (key, value) in entries {
            if value.trim().is_empty() {
                continue;
            }
            match key.as_str() {
                OUTPUT_FOLDER_KEY => config.output_folder = Some(PathBuf::from(value)),
                FFMPEG_LOCATION_KEY => config.ffmpeg_location = Some(PathBuf::from(value)),
                YT_DLP_PATH_KEY => config.yt_dlp_path = Some(value),
                _ => {}
            }
        }
        config
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            OUTPUT_FOLDER_KEY => self
                .output_folder
                .as_ref()
                .map(|path| path.display().to_string()),
            FFMPEG_LOCATION_KEY => self
                .ffmpeg_location
                .as_ref()
                .map(|path| path.display().to_string()),
            YT_DLP_PATH_KEY => self.yt_dlp_path.clone(),
            _ => None,
        }
    }
}
