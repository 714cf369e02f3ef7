//! Property definitions for the accretion model.
//!
//! Names are namespaced (`accretion/`, `scenario/`, `season/`, `estimate/`).
//! Physical parameters and the scenario selector also accept their bare
//! keyword names (`z_init`, `c_flood`, `slr_select`, ...) as aliases.

use super::types::{Property, PropertyDef, PropertyDefault};

// ============================================================================
// Physical parameters
// ============================================================================

/// Initial marsh surface elevation.
pub const ACCRETION_Z_INIT: Property<f64> = Property::new(
    "accretion/z_init",
    "Marsh surface elevation at the start year",
    PropertyDefault::Float(1.2),
)
.with_unit("m")
.with_aliases(&["z_init"]);

/// Suspended sediment concentration of flooding water.
pub const ACCRETION_C_FLOOD: Property<f64> = Property::new(
    "accretion/c_flood",
    "Suspended sediment concentration of flooding water",
    PropertyDefault::Float(0.03),
)
.with_unit("kg/m^3")
.with_aliases(&["c_flood"]);

/// Additional concentration available in a nourishment year.
pub const ACCRETION_C_FLOOD_NOURISHMENT: Property<f64> = Property::new(
    "accretion/c_flood_nourishment",
    "Extra sediment concentration supplied by a nourishment event",
    PropertyDefault::Float(0.05),
)
.with_unit("kg/m^3")
.with_aliases(&["c_flood_nourishment"]);

/// Fraction of the suspended sediment that settles on the marsh.
pub const ACCRETION_FD: Property<f64> = Property::new(
    "accretion/fd",
    "Fraction of suspended sediment deposited during a flooding event",
    PropertyDefault::Float(0.5),
)
.with_aliases(&["fd"]);

/// Dry bulk density of freshly deposited sediment.
pub const ACCRETION_RHO_DEPOSIT: Property<f64> = Property::new(
    "accretion/rho_deposit",
    "Dry bulk density of deposited sediment",
    PropertyDefault::Float(500.0),
)
.with_unit("kg/m^3")
.with_aliases(&["rho_deposit"]);

/// Autocompaction and subsidence rate.
pub const ACCRETION_S_SUBSIDENCE: Property<f64> = Property::new(
    "accretion/s_subsidence",
    "Annual subsidence rate of the marsh surface",
    PropertyDefault::Float(0.002),
)
.with_unit("m/yr")
.with_aliases(&["s_subsidence"]);

/// Years between sediment nourishment events.
pub const ACCRETION_NOURISHMENT_FREQUENCY: Property<i64> = Property::new(
    "accretion/nourishment_frequency",
    "Years between nourishment events, counted from the start year",
    PropertyDefault::Integer(5),
)
.with_unit("yr")
.with_aliases(&["nourishment_frequency"]);

// ============================================================================
// Scenario selection
// ============================================================================

/// SLR projection variant (1 = min, 2 = mean, 3 = max).
pub const SCENARIO_SLR_SELECT: Property<i64> = Property::new(
    "scenario/slr_select",
    "SLR projection variant: 1 = min, 2 = mean, 3 = max",
    PropertyDefault::Integer(2),
)
.with_aliases(&["slr_select"]);

// ============================================================================
// Seasonal coefficients
// ============================================================================

/// Deposition fraction multiplier in spring.
pub const SEASON_FD_SCALE_SPRING: Property<f64> = Property::new(
    "season/fd_scale_spring",
    "Multiplier on the deposition fraction in spring",
    PropertyDefault::Float(0.6),
);

/// Deposition fraction multiplier in summer.
pub const SEASON_FD_SCALE_SUMMER: Property<f64> = Property::new(
    "season/fd_scale_summer",
    "Multiplier on the deposition fraction in summer",
    PropertyDefault::Float(1.0),
);

/// Deposition fraction multiplier in autumn.
pub const SEASON_FD_SCALE_AUTUMN: Property<f64> = Property::new(
    "season/fd_scale_autumn",
    "Multiplier on the deposition fraction in autumn",
    PropertyDefault::Float(0.5),
);

/// Deposition fraction multiplier in winter.
pub const SEASON_FD_SCALE_WINTER: Property<f64> = Property::new(
    "season/fd_scale_winter",
    "Multiplier on the deposition fraction in winter",
    PropertyDefault::Float(0.2),
);

/// Share of the nourishment increment available in spring.
pub const SEASON_NOURISHMENT_SCALE_SPRING: Property<f64> = Property::new(
    "season/nourishment_scale_spring",
    "Share of the nourishment concentration available in spring",
    PropertyDefault::Float(1.0),
);

/// Share of the nourishment increment available in summer.
pub const SEASON_NOURISHMENT_SCALE_SUMMER: Property<f64> = Property::new(
    "season/nourishment_scale_summer",
    "Share of the nourishment concentration available in summer",
    PropertyDefault::Float(1.0),
);

/// Share of the nourishment increment available in autumn.
pub const SEASON_NOURISHMENT_SCALE_AUTUMN: Property<f64> = Property::new(
    "season/nourishment_scale_autumn",
    "Share of the nourishment concentration available in autumn",
    PropertyDefault::Float(0.6),
);

/// Share of the nourishment increment available in winter.
pub const SEASON_NOURISHMENT_SCALE_WINTER: Property<f64> = Property::new(
    "season/nourishment_scale_winter",
    "Share of the nourishment concentration available in winter",
    PropertyDefault::Float(0.0),
);

/// Share of annual subsidence and SLR charged to each season.
pub const SEASON_LOSS_FRACTION: Property<f64> = Property::new(
    "season/loss_fraction",
    "Share of annual subsidence and SLR loss charged to one season",
    PropertyDefault::Float(0.25),
);

// ============================================================================
// Critical state estimation
// ============================================================================

/// Number of years in the trend fitting window.
pub const ESTIMATE_WINDOW_LEN: Property<i64> = Property::new(
    "estimate/window_len",
    "Number of years in the norm_diff trend window",
    PropertyDefault::Integer(10),
)
.with_unit("yr");

/// Offset of the fitting window from the end of the non-critical years.
pub const ESTIMATE_WINDOW_OFFSET: Property<i64> = Property::new(
    "estimate/window_offset",
    "Years between the window start and the last non-critical year",
    PropertyDefault::Integer(20),
)
.with_unit("yr");

/// Time to submergence assigned to marshes keeping pace with SLR.
pub const ESTIMATE_STABLE_HORIZON_YEARS: Property<f64> = Property::new(
    "estimate/stable_horizon_years",
    "Estimated time to submergence when the trend is non-negative (Class IV)",
    PropertyDefault::Float(70.0),
)
.with_unit("yr");

/// Reference year for the no-window fallback estimate.
pub const ESTIMATE_FALLBACK_REFERENCE_YEAR: Property<i64> = Property::new(
    "estimate/fallback_reference_year",
    "Reference year subtracted from the critical year when no trend window fits",
    PropertyDefault::Integer(2041),
);

/// Critical year reported when the marsh never drops below mean sea level.
pub const ESTIMATE_HORIZON_SENTINEL_YEAR: Property<i64> = Property::new(
    "estimate/horizon_sentinel_year",
    "Critical year reported when the critical state is not reached",
    PropertyDefault::Integer(2101),
);

/// Slope reported when no trend window fits.
pub const ESTIMATE_FALLBACK_SLOPE: Property<f64> = Property::new(
    "estimate/fallback_slope",
    "Slope reported when no trend window fits",
    PropertyDefault::Float(f64::EPSILON),
);

/// Every property, in listing order.
pub const ALL_PROPERTIES: &[PropertyDef] = &[
    ACCRETION_Z_INIT.def,
    ACCRETION_C_FLOOD.def,
    ACCRETION_C_FLOOD_NOURISHMENT.def,
    ACCRETION_FD.def,
    ACCRETION_RHO_DEPOSIT.def,
    ACCRETION_S_SUBSIDENCE.def,
    ACCRETION_NOURISHMENT_FREQUENCY.def,
    SCENARIO_SLR_SELECT.def,
    SEASON_FD_SCALE_SPRING.def,
    SEASON_FD_SCALE_SUMMER.def,
    SEASON_FD_SCALE_AUTUMN.def,
    SEASON_FD_SCALE_WINTER.def,
    SEASON_NOURISHMENT_SCALE_SPRING.def,
    SEASON_NOURISHMENT_SCALE_SUMMER.def,
    SEASON_NOURISHMENT_SCALE_AUTUMN.def,
    SEASON_NOURISHMENT_SCALE_WINTER.def,
    SEASON_LOSS_FRACTION.def,
    ESTIMATE_WINDOW_LEN.def,
    ESTIMATE_WINDOW_OFFSET.def,
    ESTIMATE_STABLE_HORIZON_YEARS.def,
    ESTIMATE_FALLBACK_REFERENCE_YEAR.def,
    ESTIMATE_HORIZON_SENTINEL_YEAR.def,
    ESTIMATE_FALLBACK_SLOPE.def,
];
