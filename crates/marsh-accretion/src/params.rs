//! Typed model configuration extracted from resolved properties.
//!
//! This module provides:
//! - [`AccretionParams`] - physical parameters of the marsh and its forcing
//! - [`SeasonalCoefficients`] - per-season deposition and nourishment multipliers
//! - [`EstimatorConstants`] - fitting window and fallback values of the critical state estimator
//! - [`ScenarioConfig`] - all of the above plus the SLR variant

use crate::AccretionError;
use marsh_common::{Season, SlrVariant};
use marsh_model::properties::*;

// ============================================================================
// Physical parameters
// ============================================================================

/// Physical parameters of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccretionParams {
    /// Marsh surface elevation at the start year (m).
    pub z_init: f64,
    /// Suspended sediment concentration of flooding water (kg/m³).
    pub c_flood: f64,
    /// Extra concentration in nourishment years (kg/m³).
    pub c_flood_nourishment: f64,
    /// Deposition fraction.
    pub fd: f64,
    /// Dry bulk density of deposits (kg/m³).
    pub rho_deposit: f64,
    /// Subsidence rate (m/yr).
    pub s_subsidence: f64,
    /// Years between nourishment events.
    pub nourishment_frequency: u32,
}

impl Default for AccretionParams {
    fn default() -> Self {
        Self {
            z_init: 1.2,
            c_flood: 0.03,
            c_flood_nourishment: 0.05,
            fd: 0.5,
            rho_deposit: 500.0,
            s_subsidence: 0.002,
            nourishment_frequency: 5,
        }
    }
}

/// Read an integer property into a narrower type, rejecting values that do not fit.
fn integer<T: TryFrom<i64>>(props: &ResolvedProperties, prop: &Property<i64>) -> Result<T, AccretionError> {
    let value = props.get(prop);
    T::try_from(value).map_err(|_| AccretionError::invalid(prop.name(), format!("{} is out of range", value)))
}

impl AccretionParams {
    /// Extract the physical parameters from resolved properties.
    pub fn from_properties(props: &ResolvedProperties) -> Result<Self, AccretionError> {
        Ok(Self {
            z_init: props.get(&ACCRETION_Z_INIT),
            c_flood: props.get(&ACCRETION_C_FLOOD),
            c_flood_nourishment: props.get(&ACCRETION_C_FLOOD_NOURISHMENT),
            fd: props.get(&ACCRETION_FD),
            rho_deposit: props.get(&ACCRETION_RHO_DEPOSIT),
            s_subsidence: props.get(&ACCRETION_S_SUBSIDENCE),
            nourishment_frequency: integer(props, &ACCRETION_NOURISHMENT_FREQUENCY)?,
        })
    }

    /// Check that every parameter is finite and in range.
    pub fn validate(&self) -> Result<(), AccretionError> {
        let finite = [
            ("z_init", self.z_init),
            ("c_flood", self.c_flood),
            ("c_flood_nourishment", self.c_flood_nourishment),
            ("fd", self.fd),
            ("rho_deposit", self.rho_deposit),
            ("s_subsidence", self.s_subsidence),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(AccretionError::invalid(name, format!("{} is not finite", value)));
            }
        }
        if self.rho_deposit <= 0.0 {
            return Err(AccretionError::invalid(
                "rho_deposit",
                format!("must be positive, got {}", self.rho_deposit),
            ));
        }
        if self.nourishment_frequency == 0 {
            return Err(AccretionError::invalid(
                "nourishment_frequency",
                "must be a positive number of years",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Seasonal coefficients
// ============================================================================

/// Per-season calibration coefficients.
///
/// Indexed by [`Season::index`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeasonalCoefficients {
    /// Multiplier on the deposition fraction (trapping efficiency of the vegetation).
    pub fd_scale: [f64; 4],
    /// Share of the nourishment increment still in suspension.
    pub nourishment_scale: [f64; 4],
    /// Share of the annual subsidence and SLR loss charged to one season.
    pub loss_fraction: f64,
}

impl Default for SeasonalCoefficients {
    fn default() -> Self {
        Self::from_properties(&ResolvedProperties::new())
    }
}

impl SeasonalCoefficients {
    pub fn from_properties(props: &ResolvedProperties) -> Self {
        Self {
            fd_scale: [
                props.get(&SEASON_FD_SCALE_SPRING),
                props.get(&SEASON_FD_SCALE_SUMMER),
                props.get(&SEASON_FD_SCALE_AUTUMN),
                props.get(&SEASON_FD_SCALE_WINTER),
            ],
            nourishment_scale: [
                props.get(&SEASON_NOURISHMENT_SCALE_SPRING),
                props.get(&SEASON_NOURISHMENT_SCALE_SUMMER),
                props.get(&SEASON_NOURISHMENT_SCALE_AUTUMN),
                props.get(&SEASON_NOURISHMENT_SCALE_WINTER),
            ],
            loss_fraction: props.get(&SEASON_LOSS_FRACTION),
        }
    }

    pub fn fd_scale(&self, season: Season) -> f64 {
        self.fd_scale[season.index()]
    }

    pub fn nourishment_scale(&self, season: Season) -> f64 {
        self.nourishment_scale[season.index()]
    }

    /// The part of the annual loss not charged by a single season.
    ///
    /// The first simulated year uses one full-year rate, which only carries
    /// one season's share of the loss; this is the remainder it must absorb.
    pub fn remaining_loss_fraction(&self) -> f64 {
        1.0 - self.loss_fraction
    }

    pub fn validate(&self) -> Result<(), AccretionError> {
        let all_finite = self
            .fd_scale
            .iter()
            .chain(&self.nourishment_scale)
            .chain(std::iter::once(&self.loss_fraction))
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(AccretionError::invalid(
                "season",
                "seasonal coefficients must be finite",
            ));
        }
        if !(0.0..=1.0).contains(&self.loss_fraction) {
            return Err(AccretionError::invalid(
                "season/loss_fraction",
                format!("must be within [0, 1], got {}", self.loss_fraction),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Estimator constants
// ============================================================================

/// Constants of the critical state estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorConstants {
    /// Samples in the trend fitting window.
    pub window_len: usize,
    /// Distance of the window start from the end of the non-critical years.
    pub window_offset: usize,
    /// Time to submergence of a marsh keeping pace with SLR ("Class IV").
    pub stable_horizon_years: f64,
    /// Reference year of the no-window fallback estimate.
    pub fallback_reference_year: i32,
    /// Critical year reported when the critical state is never reached.
    pub horizon_sentinel_year: i32,
    /// Slope reported when no window fits.
    pub fallback_slope: f64,
}

impl Default for EstimatorConstants {
    fn default() -> Self {
        Self {
            window_len: 10,
            window_offset: 20,
            stable_horizon_years: 70.0,
            fallback_reference_year: 2041,
            horizon_sentinel_year: 2101,
            fallback_slope: f64::EPSILON,
        }
    }
}

impl EstimatorConstants {
    pub fn from_properties(props: &ResolvedProperties) -> Result<Self, AccretionError> {
        Ok(Self {
            window_len: integer(props, &ESTIMATE_WINDOW_LEN)?,
            window_offset: integer(props, &ESTIMATE_WINDOW_OFFSET)?,
            stable_horizon_years: props.get(&ESTIMATE_STABLE_HORIZON_YEARS),
            fallback_reference_year: integer(props, &ESTIMATE_FALLBACK_REFERENCE_YEAR)?,
            horizon_sentinel_year: integer(props, &ESTIMATE_HORIZON_SENTINEL_YEAR)?,
            fallback_slope: props.get(&ESTIMATE_FALLBACK_SLOPE),
        })
    }

    pub fn validate(&self) -> Result<(), AccretionError> {
        if self.window_len < 2 {
            return Err(AccretionError::invalid(
                "estimate/window_len",
                format!("needs at least 2 samples, got {}", self.window_len),
            ));
        }
        // The sample following the window must exist.
        if self.window_offset <= self.window_len {
            return Err(AccretionError::invalid(
                "estimate/window_offset",
                format!(
                    "must exceed the window length ({}), got {}",
                    self.window_len, self.window_offset
                ),
            ));
        }
        if !self.stable_horizon_years.is_finite() || !self.fallback_slope.is_finite() {
            return Err(AccretionError::invalid(
                "estimate",
                "fallback values must be finite",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Scenario configuration
// ============================================================================

/// Everything needed to run one scenario besides the input tables.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioConfig {
    pub params: AccretionParams,
    pub seasons: SeasonalCoefficients,
    pub estimator: EstimatorConstants,
    pub slr_variant: SlrVariantSelect,
}

/// Newtype so that the default variant is the mean projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlrVariantSelect(pub SlrVariant);

impl Default for SlrVariantSelect {
    fn default() -> Self {
        SlrVariantSelect(SlrVariant::Mean)
    }
}

impl ScenarioConfig {
    /// Extract and validate a full scenario configuration.
    pub fn from_properties(props: &ResolvedProperties) -> Result<Self, AccretionError> {
        let config = Self {
            params: AccretionParams::from_properties(props)?,
            seasons: SeasonalCoefficients::from_properties(props),
            estimator: EstimatorConstants::from_properties(props)?,
            slr_variant: SlrVariantSelect(SlrVariant::from_select(props.get(&SCENARIO_SLR_SELECT))?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_variant(mut self, variant: SlrVariant) -> Self {
        self.slr_variant = SlrVariantSelect(variant);
        self
    }

    pub fn variant(&self) -> SlrVariant {
        self.slr_variant.0
    }

    pub fn validate(&self) -> Result<(), AccretionError> {
        self.params.validate()?;
        self.seasons.validate()?;
        self.estimator.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marsh_common::DataError;

    #[test]
    fn test_default_coefficients() {
        let seasons = SeasonalCoefficients::default();
        assert_eq!(seasons.fd_scale(Season::Spring), 0.6);
        assert_eq!(seasons.fd_scale(Season::Summer), 1.0);
        assert_eq!(seasons.fd_scale(Season::Autumn), 0.5);
        assert_eq!(seasons.fd_scale(Season::Winter), 0.2);
        assert_eq!(seasons.nourishment_scale(Season::Spring), 1.0);
        assert_eq!(seasons.nourishment_scale(Season::Summer), 1.0);
        assert_eq!(seasons.nourishment_scale(Season::Autumn), 0.6);
        assert_eq!(seasons.nourishment_scale(Season::Winter), 0.0);
        assert_eq!(seasons.loss_fraction, 0.25);
        assert_eq!(seasons.remaining_loss_fraction(), 0.75);
    }

    #[test]
    fn test_default_estimator_constants() {
        let constants = EstimatorConstants::default();
        assert_eq!(constants.window_len, 10);
        assert_eq!(constants.window_offset, 20);
        assert_eq!(constants.stable_horizon_years, 70.0);
        assert_eq!(constants.fallback_reference_year, 2041);
        assert_eq!(constants.horizon_sentinel_year, 2101);
        assert_eq!(constants.fallback_slope, f64::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_from_properties_overrides() {
        let props = ResolvedProperties::from_yaml_str(
            "z_init: 0.5\nnourishment_frequency: 3\nslr_select: 3\nseason/fd_scale_winter: 0.1\n",
        )
        .unwrap();
        let config = ScenarioConfig::from_properties(&props).unwrap();
        assert_eq!(config.params.z_init, 0.5);
        assert_eq!(config.params.nourishment_frequency, 3);
        assert_eq!(config.variant(), SlrVariant::Max);
        assert_eq!(config.seasons.fd_scale(Season::Winter), 0.1);
    }

    #[test]
    fn test_invalid_selector() {
        let props = ResolvedProperties::from_yaml_str("slr_select: 0").unwrap();
        assert_eq!(
            ScenarioConfig::from_properties(&props),
            Err(AccretionError::Data(DataError::InvalidSlrSelect(0)))
        );
    }

    #[test]
    fn test_invalid_params() {
        let mut params = AccretionParams::default();
        params.nourishment_frequency = 0;
        assert!(matches!(
            params.validate(),
            Err(AccretionError::InvalidParameter { name: "nourishment_frequency", .. })
        ));

        let mut params = AccretionParams::default();
        params.rho_deposit = 0.0;
        assert!(matches!(
            params.validate(),
            Err(AccretionError::InvalidParameter { name: "rho_deposit", .. })
        ));

        let mut params = AccretionParams::default();
        params.c_flood = f64::NAN;
        assert!(params.validate().is_err());

        let props = ResolvedProperties::from_yaml_str("nourishment_frequency: -5").unwrap();
        assert!(matches!(
            AccretionParams::from_properties(&props),
            Err(AccretionError::InvalidParameter { name: "accretion/nourishment_frequency", .. })
        ));
    }

    #[test]
    fn test_defaults_match_properties() {
        let props = ResolvedProperties::new();
        assert_eq!(AccretionParams::from_properties(&props), Ok(AccretionParams::default()));
        assert_eq!(EstimatorConstants::from_properties(&props), Ok(EstimatorConstants::default()));
        assert_eq!(SeasonalCoefficients::from_properties(&props), SeasonalCoefficients::default());
        assert_eq!(ScenarioConfig::from_properties(&props), Ok(ScenarioConfig::default()));
    }

    #[test]
    fn test_out_of_range_years_rejected() {
        for (key, value) in [
            ("estimate/fallback_reference_year", "-2147483649"),
            ("estimate/fallback_reference_year", "99999999999"),
            ("estimate/horizon_sentinel_year", "2147483648"),
            ("estimate/window_len", "-3"),
        ] {
            let mut props = ResolvedProperties::new();
            props.apply_override(&format!("{}={}", key, value)).unwrap();
            assert!(
                matches!(
                    ScenarioConfig::from_properties(&props),
                    Err(AccretionError::InvalidParameter { name, .. }) if name == key
                ),
                "{}={} accepted",
                key,
                value
            );
        }
    }

    #[test]
    fn test_invalid_window() {
        let constants = EstimatorConstants {
            window_offset: 10,
            ..EstimatorConstants::default()
        };
        assert!(constants.validate().is_err());
    }
}
