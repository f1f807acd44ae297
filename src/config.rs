pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_STORAGE_KEY: &str = "workouts";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"http://openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Settings for the controller. The binary fills this from CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Element id the map is mounted into.
    pub map_container: String,
    /// Zoom used both for the initial view and for recentring.
    pub zoom: u8,
    pub storage_key: String,
    pub tile_url: String,
    pub attribution: String,
    pub popup: PopupOptions,
    pub pan_duration_secs: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            map_container: "map".to_string(),
            zoom: DEFAULT_ZOOM,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            popup: PopupOptions::default(),
            pan_duration_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}
