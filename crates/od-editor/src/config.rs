//! Editor configuration.

/// Startup settings for a `SyncEngine`.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Outline color token for new shapes until the user picks one.
    pub default_outline: String,

    /// Fill color token for new shapes until the user picks one.
    pub default_fill: String,

    /// Outline thickness of new shapes.
    pub default_outline_thickness: f64,

    /// Text-area tag applied to lines that are not shapes.
    pub incorrect_tag: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_outline: "black".to_string(),
            default_fill: "white".to_string(),
            default_outline_thickness: 1.0,
            incorrect_tag: "incorrect".to_string(),
        }
    }
}
