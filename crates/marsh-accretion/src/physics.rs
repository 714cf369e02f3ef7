//! Seasonal accretion rate law.

use crate::AccretionError;
use marsh_common::{DataError, TideRecord};

/// Forcing of one season: sediment supply and trapping, and the loss terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalForcing {
    /// Suspended sediment concentration of the flooding water (kg/m³).
    pub c_flood: f64,
    /// Deposition fraction.
    pub fd: f64,
    /// Dry bulk density of deposits (kg/m³).
    pub rho_deposit: f64,
    /// Subsidence rate (m/yr).
    pub s_subsidence: f64,
    /// SLR increment of the year (m/yr).
    pub slr: f64,
    /// Share of the annual loss charged to this season.
    pub loss_fraction: f64,
}

impl SeasonalForcing {
    /// Sediment mass deposited per unit area by the given flooding events.
    ///
    /// Only events whose high water plus SLR exceeds the marsh surface `z`
    /// contribute; the contribution is proportional to the flooding depth.
    pub fn deposit(&self, z: f64, high_water_height: &[f64], num_tides: &[u32]) -> Result<f64, AccretionError> {
        if high_water_height.len() != num_tides.len() {
            return Err(DataError::InputLengthMismatch {
                left: high_water_height.len(),
                right: num_tides.len(),
            }
            .into());
        }
        let flooded: f64 = high_water_height
            .iter()
            .zip(num_tides)
            .map(|(&h, &n)| f64::from(n) * self.c_flood * (h + self.slr - z).max(0.0))
            .sum();
        Ok(self.fd * flooded)
    }

    /// Number of tidal events whose high water plus SLR floods the surface `z`.
    pub fn inundation_events(&self, z: f64, high_water_height: &[f64], num_tides: &[u32]) -> u64 {
        high_water_height
            .iter()
            .zip(num_tides)
            .filter(|(&h, _)| h + self.slr > z)
            .map(|(_, &n)| u64::from(n))
            .sum()
    }

    /// Net elevation change contributed by one season.
    ///
    /// `dz_dt = deposit / rho_deposit - (s_subsidence + slr) * loss_fraction`
    pub fn elevation_rate(&self, z: f64, high_water_height: &[f64], num_tides: &[u32]) -> Result<f64, AccretionError> {
        let deposit = self.deposit(z, high_water_height, num_tides)?;
        Ok(deposit / self.rho_deposit - self.annual_loss() * self.loss_fraction)
    }

    /// Elevation rate over the events of a tide record.
    pub fn record_rate(&self, z: f64, record: &TideRecord) -> Result<f64, AccretionError> {
        self.elevation_rate(z, record.high_water_height(), record.num_tides())
    }

    /// Subsidence plus SLR over a full year.
    pub fn annual_loss(&self) -> f64 {
        self.s_subsidence + self.slr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn forcing() -> SeasonalForcing {
        SeasonalForcing {
            c_flood: 0.03,
            fd: 0.5,
            rho_deposit: 500.0,
            s_subsidence: 0.002,
            slr: 0.004,
            loss_fraction: 0.25,
        }
    }

    #[test]
    fn test_inundating_events_deposit() {
        let f = forcing();
        // Depths 0.3 + 0.004 and 0.1 + 0.004.
        let deposit = f.deposit(1.0, &[1.3, 1.1], &[10, 4]).unwrap();
        let expected = 0.5 * (10.0 * 0.03 * 0.304 + 4.0 * 0.03 * 0.104);
        assert_relative_eq!(deposit, expected, epsilon = 1e-12);

        let rate = f.elevation_rate(1.0, &[1.3, 1.1], &[10, 4]).unwrap();
        assert_relative_eq!(rate, expected / 500.0 - 0.006 * 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_dry_events_contribute_nothing() {
        let f = forcing();
        assert_eq!(f.deposit(2.0, &[1.0, 1.5, 1.996], &[5, 5, 5]).unwrap(), 0.0);
        let rate = f.elevation_rate(2.0, &[1.0], &[100]).unwrap();
        assert_relative_eq!(rate, -0.0015, epsilon = 1e-15);
    }

    #[test]
    fn test_inundation_events() {
        let f = forcing();
        assert_eq!(f.inundation_events(2.0, &[1.0, 2.1, 1.9, 2.5], &[5, 7, 11, 2]), 9);
        assert_eq!(f.inundation_events(3.0, &[1.0, 2.1], &[5, 7]), 0);
        assert_eq!(f.inundation_events(0.0, &[], &[]), 0);
    }

    #[test]
    fn test_no_events() {
        let rate = forcing().elevation_rate(0.0, &[], &[]).unwrap();
        assert_relative_eq!(rate, -0.0015, epsilon = 1e-15);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            forcing().deposit(0.0, &[1.0, 2.0], &[1]),
            Err(AccretionError::Data(DataError::InputLengthMismatch { left: 2, right: 1 }))
        );
    }
}
