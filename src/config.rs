/// Default share of drawn baseline factions converted to a variant.
pub const DEFAULT_VARIANT_CONVERSION_PERCENT: u8 = 20;

/// Settings supplied by the host's settings layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Percent chance (0–100) that a mostly-baseline faction is swapped for a
    /// single-variant derivation of itself.
    pub variant_conversion_percent: u8,
    /// Whether the optional variant content expansion is installed.
    pub variant_content_enabled: bool,
}

impl GenerationConfig {
    /// Build a config, clamping the percent into `0..=100`.
    pub fn new(variant_conversion_percent: i32, variant_content_enabled: bool) -> Self {
        Self {
            variant_conversion_percent: variant_conversion_percent.clamp(0, 100) as u8,
            variant_content_enabled,
        }
    }

    /// The percent actually applied: zero without variant content.
    pub fn effective_percent(&self) -> u8 {
        if self.variant_content_enabled {
            self.variant_conversion_percent.min(100)
        } else {
            0
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            variant_conversion_percent: DEFAULT_VARIANT_CONVERSION_PERCENT,
            variant_content_enabled: true,
        }
    }
}
