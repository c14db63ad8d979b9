//! Names and fixed values shared across the crate

// Directory service
pub const DIRECTORY_SOURCE: &str = "meetup_directory";
pub const DEFAULT_DIRECTORY_URL: &str = "https://api.meetup.com";
pub const DEFAULT_SEARCH_PATH: &str = "find/groups";
pub const DEFAULT_RESULTS_KEY: &str = "results";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Search radius in miles used when the caller gives none
pub const DEFAULT_RADIUS: u32 = 20;

/// Postal code searched when the page is opened without one
pub const DEFAULT_LOCATION: &str = "98105";

// Display
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;
pub const ELLIPSIS: &str = "...";

// Marker rendering hints
pub const MARKER_SYMBOL: &str = "circle";
pub const MARKER_SIZE: u32 = 10;

// Map layout defaults
pub const MAP_TITLE: &str = "Find Meetups";
pub const DEFAULT_MAP_STYLE: &str = "dark";
pub const DEFAULT_MAP_ZOOM: u32 = 10;
pub const DEFAULT_BACKGROUND_COLOR: &str = "#202020";

// Environment variables
pub const API_KEY_ENV: &str = "MEETUP_API_KEY";
pub const MAP_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";
pub const CONFIG_PATH_ENV: &str = "MEETUP_MAP_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub const DEFAULT_PORT: u16 = 3000;
