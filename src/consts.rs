pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Defaults for the refresh loops, the alert policy and the HTTP client,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Capacity of the controller -> surface event channel.
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Capacity of the surface -> controller navigation channel.
    pub const COMMAND_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // DASHBOARD LAYOUT
    // =============================================================================

    /// Number of on-screen quadrants, one per box.
    pub const QUADRANT_COUNT: usize = 4;

    /// Readings older than this many minutes put their quadrant in alert.
    pub const ALERT_THRESHOLD_MINUTES: i64 = 5;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    /// Refresh loop timing
    pub mod refresh {
        /// Interval between data refreshes of the current field (seconds)
        pub const DATA_INTERVAL_SECS: u64 = 10;

        /// Interval between label discoveries (seconds)
        /// Labels change far less often than readings.
        pub const LABEL_INTERVAL_SECS: u64 = 120;
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client configuration
    pub mod http {
        /// Default base URL of the data source
        pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

        /// Default path of the data endpoint
        pub const DEFAULT_DATA_PATH: &str = "/get_data";

        /// Environment variable overriding the base URL
        pub const BASE_URL_ENV: &str = "QUADRANT_DASH_URL";

        /// Connect and request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    }
}
