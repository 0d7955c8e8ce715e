use std::time::Duration;

/// Configuration shared by every grid rendered through one `PropertyGrid`.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Group that collects properties without an explicit group. Always rendered last.
    pub default_group: String,
    /// Prefix of allocated grid ids (`pg0`, `pg1`, ...).
    pub id_prefix: String,
    /// How long a transient warning stays visible before it is dismissed.
    pub warning_duration: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            default_group: "Other".to_string(),
            id_prefix: "pg".to_string(),
            warning_duration: Duration::from_secs(2),
        }
    }
}

impl GridConfig {
    /// Override the default group name.
    pub fn with_default_group(mut self, name: impl Into<String>) -> Self {
        self.default_group = name.into();
        self
    }

    /// Override the grid id prefix.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Override the transient warning duration.
    pub fn with_warning_duration(mut self, duration: Duration) -> Self {
        self.warning_duration = duration;
        self
    }
}
