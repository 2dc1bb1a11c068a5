// src/config/consts.rs

// Net config
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5001/crawl";
pub const USER_AGENT: &str = "fc_ranking/0.1";

// Local store (stand-in for the browser's localStorage)
pub const STORE_DIR: &str = ".store";
pub const RESULTS_KEY: &str = "fconline_crawl_results";
pub const LAST_UPDATED_KEY: &str = "fconline_last_updated";
pub const LOG_FILE: &str = "debug.log";

// Settings file, looked up in the working directory
pub const SETTINGS_FILE: &str = "fc_ranking.toml";

// Leagues, in display order
pub const LEAGUE_1: &str = "1부리그";
pub const LEAGUE_2: &str = "2부리그";

// Render
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_HTML_FILE: &str = "results_table.html";

// Export
pub const DEFAULT_EXPORT_FILE: &str = "rankings";
