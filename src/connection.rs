use std::env;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Environment variable carrying the backend base URL.
pub const URL_ENV_VAR: &str = "WELUX_SUPABASE_URL";

/// Environment variable carrying the backend access key.
pub const KEY_ENV_VAR: &str = "WELUX_SUPABASE_ANON_KEY";

/// Fallback URL used when no real project URL is configured.
pub const PLACEHOLDER_URL: &str = "https://placeholder-project.supabase.co";

/// Fallback key used when no real access key is configured.
pub const PLACEHOLDER_KEY: &str = "placeholder-key";

/// The two connection values for the hosted backend, read once at startup.
///
/// Their shape alone decides whether the console runs against the live
/// backend or against canned demo data; see [`ConnectionSettings::mode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub url: String,
    pub key: String,
}

impl ConnectionSettings {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        ConnectionSettings {
            url: url.into(),
            key: key.into(),
        }
    }

    /// Reads the connection values from the environment, falling back to
    /// recognizable placeholders when a variable is unset or blank.
    pub fn from_env() -> Self {
        let url = env::var(URL_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_URL.to_string());
        let key = env::var(KEY_ENV_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| PLACEHOLDER_KEY.to_string());
        ConnectionSettings { url, key }
    }

    /// Whether either value still looks like a placeholder rather than a
    /// real project credential.
    pub fn is_placeholder(&self) -> bool {
        self.url.contains("placeholder")
            || self.url.contains("TU_SUPABASE")
            || self.key.contains("placeholder")
    }

    /// The operating mode these settings select. Purely a function of the
    /// two configured strings.
    pub fn mode(&self) -> Mode {
        if self.is_placeholder() {
            Mode::Demo
        } else {
            Mode::Live
        }
    }
}

/// Represents the two operating modes of the console.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Connected to the hosted backend.
    Live,
    /// Serving canned in-memory data; nothing leaves the process.
    #[default]
    Demo,
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(Mode::Live),
            "demo" => Ok(Mode::Demo),
            _ => Err(()),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Live => write!(f, "Live"),
            Mode::Demo => write!(f, "Demo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Placeholder-shaped values must select demo mode.
    fn placeholder_values_select_demo_mode() {
        let settings = ConnectionSettings::new(PLACEHOLDER_URL, PLACEHOLDER_KEY);
        assert!(settings.is_placeholder());
        assert_eq!(settings.mode(), Mode::Demo);

        // The legacy scaffold marker counts as a placeholder too.
        let settings = ConnectionSettings::new("https://TU_SUPABASE.supabase.co", "real-key");
        assert_eq!(settings.mode(), Mode::Demo);
    }

    #[test]
    // Real-looking values must select live mode with no other change.
    fn real_values_select_live_mode() {
        let settings = ConnectionSettings::new(
            "https://qwzx.supabase.co",
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.anon",
        );
        assert!(!settings.is_placeholder());
        assert_eq!(settings.mode(), Mode::Live);
    }

    #[test]
    // A placeholder key alone is enough to stay in demo mode.
    fn placeholder_key_alone_selects_demo_mode() {
        let settings = ConnectionSettings::new("https://qwzx.supabase.co", PLACEHOLDER_KEY);
        assert_eq!(settings.mode(), Mode::Demo);
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("live".parse::<Mode>(), Ok(Mode::Live));
        assert_eq!("Demo".parse::<Mode>(), Ok(Mode::Demo));
        assert!("staging".parse::<Mode>().is_err());
    }
}
