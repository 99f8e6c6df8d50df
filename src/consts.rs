pub mod admin_consts {
    //! Admin Console Configuration Constants
    //!
    //! Table names, setting keys and demo-mode timing shared across the
    //! command handlers and the data access shim.

    /// Backend tables consumed by the console.
    ///
    /// The shim itself is schema-agnostic; these constants only keep the
    /// callers from scattering string literals.
    pub mod tables {
        /// Lead/inquiry submissions from the public site form.
        pub const INQUIRIES: &str = "client_inquiries";

        /// Keyed singleton configuration rows.
        pub const SETTINGS: &str = "app_settings";

        /// Vlog posts shown on the public site.
        pub const VLOGS: &str = "vlogs";

        /// Open job postings.
        pub const JOBS: &str = "jobs";

        /// Promotional deals.
        pub const DEALS: &str = "deals";
    }

    /// Keys of the singleton rows in the settings table.
    pub mod setting_keys {
        /// The shared staff access code checked at login.
        pub const MASTER_SECURITY_CODE: &str = "master_security_code";

        /// The live stream embed configuration document.
        pub const STREAM_CONFIG: &str = "stream_config";
    }

    /// Artificial latency injected by the demo backend so caller-side
    /// loading behavior is exercised the same way it is against the live
    /// backend.
    pub mod demo_latency {
        use std::time::Duration;

        /// Delay before a list or count read resolves (milliseconds).
        pub const READ_DELAY_MS: u64 = 800;

        /// Delay before a `single()` read resolves (milliseconds).
        pub const SINGLE_DELAY_MS: u64 = 500;

        /// Delay before a write resolves (milliseconds).
        pub const WRITE_DELAY_MS: u64 = 1000;

        /// Helper function to get the list-read delay
        pub const fn read_delay() -> Duration {
            Duration::from_millis(READ_DELAY_MS)
        }

        /// Helper function to get the single-read delay
        pub const fn single_delay() -> Duration {
            Duration::from_millis(SINGLE_DELAY_MS)
        }

        /// Helper function to get the write delay
        pub const fn write_delay() -> Duration {
            Duration::from_millis(WRITE_DELAY_MS)
        }
    }
}
