use serde::Deserialize;

use crate::error::{Result, SiteError};
use crate::operator::{DISTORTION_RANGE, SPEED_RANGE};
use crate::threshold::ENERGY_RANGE;

/// Tunables for one page. Every field may be overridden from the JSON in the
/// page's `data-config` attribute; missing fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Fraction of a section that must be visible before it becomes active.
    pub visibility_threshold: f64,
    pub distortion_default: f64,
    pub speed_default: f64,
    pub energy_default: f64,
    pub partition_interval_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: 0.5,
            distortion_default: 30.0,
            speed_default: 50.0,
            energy_default: 25.0,
            partition_interval_ms: crate::integral::TICK_MS,
        }
    }
}

impl SiteConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// What the page mounts with. Never fails: malformed JSON falls back to
    /// the defaults and out-of-range fields are clamped, with a warning each time.
    pub fn load(raw: Option<&str>) -> Self {
        let json = match raw.map(str::trim) {
            None | Some("") => return Self::default(),
            Some(json) => json,
        };
        match serde_json::from_str::<SiteConfig>(json) {
            Ok(config) => {
                if let Err(err) = config.validate() {
                    log::warn!("data-config: {err}; clamping");
                }
                config.clamped()
            }
            Err(err) => {
                log::warn!("{}; using defaults", SiteError::from(err));
                Self::default()
            }
        }
    }

    fn clamped(self) -> Self {
        let defaults = Self::default();
        let clamp = |v: f64, (min, max): (f64, f64)| v.clamp(min, max);
        Self {
            visibility_threshold: if self.visibility_threshold > 0.0 {
                self.visibility_threshold.min(1.0)
            } else {
                defaults.visibility_threshold
            },
            distortion_default: clamp(self.distortion_default, DISTORTION_RANGE),
            speed_default: clamp(self.speed_default, SPEED_RANGE),
            energy_default: clamp(self.energy_default, ENERGY_RANGE),
            partition_interval_ms: if self.partition_interval_ms > 0 {
                self.partition_interval_ms
            } else {
                defaults.partition_interval_ms
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        let t = self.visibility_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(SiteError::OutOfRange {
                field: "visibility_threshold",
                value: t,
                min: 0.0,
                max: 1.0,
            });
        }
        check("distortion_default", self.distortion_default, DISTORTION_RANGE)?;
        check("speed_default", self.speed_default, SPEED_RANGE)?;
        check("energy_default", self.energy_default, ENERGY_RANGE)?;
        if self.partition_interval_ms == 0 {
            return Err(SiteError::OutOfRange {
                field: "partition_interval_ms",
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            });
        }
        Ok(())
    }
}

fn check(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SiteError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
