//! Positioning quality: alias lookup and the degraded-sample rule.

use crate::config::GpsConfig;
use crate::normalize::{Fields, NormalizedRecord};

/// Quality readings of one positioning report
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GpsQuality {
    pub satellites: Option<f64>,
    pub fix: Option<i64>,
}

/// First alias holding a numeric reading, in priority order
pub fn first_reading(fields: &Fields, aliases: &[String]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|alias| fields.get(alias).and_then(|v| v.as_f64()))
}

pub struct GpsRule {
    config: GpsConfig,
}

impl GpsRule {
    pub fn new(config: GpsConfig) -> Self {
        Self { config }
    }

    /// Quality readings, or `None` when the record is not a positioning report
    pub fn read(&self, record: &NormalizedRecord) -> Option<GpsQuality> {
        if !self.config.message_types.iter().any(|t| *t == record.msg_type) {
            return None;
        }
        Some(GpsQuality {
            satellites: first_reading(&record.fields, &self.config.satellite_fields),
            fix: first_reading(&record.fields, &self.config.fix_fields).map(|f| f.trunc() as i64),
        })
    }

    /// Degraded if too few satellites OR too weak a fix; either reading alone suffices.
    pub fn is_degraded(&self, q: &GpsQuality) -> bool {
        q.satellites.is_some_and(|n| n < self.config.min_satellites)
            || q.fix.is_some_and(|f| f < self.config.min_fix_quality)
    }

    pub fn is_degraded_record(&self, record: &NormalizedRecord) -> bool {
        self.read(record).is_some_and(|q| self.is_degraded(&q))
    }
}
