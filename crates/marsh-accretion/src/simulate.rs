//! Year-by-year marsh elevation simulation.
//!
//! The driver walks the years of a [`ForcedTideDataset`] in order, carrying the
//! marsh surface elevation from one year to the next:
//!
//! - the first year uses a single full-year rate over all of its flooding
//!   events, then absorbs the rest of the annual subsidence and SLR loss
//! - every later year sums four seasonal rates with per-season deposition
//!   scaling, boosted by nourishment in scheduled years

use crate::assemble::ForcedTideDataset;
use crate::params::{AccretionParams, SeasonalCoefficients};
use crate::physics::SeasonalForcing;
use crate::AccretionError;
use marsh_common::Season;
use marsh_metrics::metric_defs;
use tracing::{debug, trace};

// ============================================================================
// Trajectory
// ============================================================================

/// Marsh state at the end of one simulated year.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationTrajectoryPoint {
    pub year: i32,
    /// Marsh surface elevation after the year's change (m).
    pub elevation: f64,
    /// Net elevation change during the year (m/yr).
    pub dz_dt: f64,
    /// Whether a nourishment boost was applied this year.
    pub nourished: bool,
    /// Tidal events that flooded the surface during the year.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inundation_events: u64,
}

/// Ordered elevation trajectory of one run, one point per year.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ElevationTrajectory {
    points: Vec<ElevationTrajectoryPoint>,
}

impl ElevationTrajectory {
    /// Points in increasing year order.
    pub fn points(&self) -> &[ElevationTrajectoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&ElevationTrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ElevationTrajectoryPoint> {
        self.points.last()
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().map(|p| p.year)
    }

    /// Sum of the annual elevation changes.
    pub fn growth_total(&self) -> f64 {
        self.points.iter().map(|p| p.dz_dt).sum()
    }

    /// Years in which nourishment was applied.
    pub fn nourished_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().filter(|p| p.nourished).map(|p| p.year)
    }

    /// Flooding tidal events summed over every year.
    pub fn inundation_events(&self) -> u64 {
        self.points.iter().map(|p| p.inundation_events).sum()
    }

    fn push(&mut self, point: ElevationTrajectoryPoint) {
        self.points.push(point);
    }
}

impl FromIterator<ElevationTrajectoryPoint> for ElevationTrajectory {
    fn from_iter<I: IntoIterator<Item = ElevationTrajectoryPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ElevationTrajectory {
    type Item = ElevationTrajectoryPoint;
    type IntoIter = std::vec::IntoIter<ElevationTrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

// ============================================================================
// Nourishment schedule
// ============================================================================

/// Years `start_year + k * frequency` for `k >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NourishmentSchedule {
    start_year: i32,
    frequency: u32,
}

impl NourishmentSchedule {
    pub fn new(start_year: i32, frequency: u32) -> Result<Self, AccretionError> {
        if frequency == 0 {
            return Err(AccretionError::invalid(
                "nourishment_frequency",
                "must be a positive number of years",
            ));
        }
        Ok(Self {
            start_year,
            frequency,
        })
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start_year
            && (i64::from(year) - i64::from(self.start_year)) % i64::from(self.frequency) == 0
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Runs the accretion physics over every year of a forced tide dataset.
#[derive(Debug, Clone, Copy)]
pub struct AnnualSimulationDriver<'a> {
    params: &'a AccretionParams,
    seasons: &'a SeasonalCoefficients,
}

impl<'a> AnnualSimulationDriver<'a> {
    pub fn new(params: &'a AccretionParams, seasons: &'a SeasonalCoefficients) -> Self {
        Self { params, seasons }
    }

    /// Simulate every year of `forced`, starting at `z_init`.
    ///
    /// # Errors
    ///
    /// - [`AccretionError::InvalidParameter`] if the parameters do not validate
    /// - [`DataError::MissingSeasonData`](marsh_common::DataError::MissingSeasonData)
    ///   if a year after the first lacks one of the four seasons
    /// - [`DataError::MissingSlrYear`](marsh_common::DataError::MissingSlrYear)
    ///   if a year has no SLR forcing
    pub fn run(&self, forced: &ForcedTideDataset) -> Result<ElevationTrajectory, AccretionError> {
        self.params.validate()?;
        self.seasons.validate()?;

        let tides = forced.tides();
        let start_year = tides.start_year();
        let schedule = NourishmentSchedule::new(start_year, self.params.nourishment_frequency)?;

        let mut z = self.params.z_init;
        let mut trajectory = ElevationTrajectory::default();

        for year in tides.years() {
            let slr = forced.slr(year)?.delta_slr;
            let (dz_dt, inundation_events, nourished) = if year == start_year {
                let (dz_dt, events) = self.first_year_rate(forced, year, z, slr)?;
                (dz_dt, events, false)
            } else {
                let nourished = schedule.contains(year);
                let (dz_dt, events) = self.seasonal_year_rate(forced, year, z, slr, nourished)?;
                (dz_dt, events, nourished)
            };
            z += dz_dt;

            trace!(year, z, dz_dt, nourished, inundation_events, "Simulated year");
            metrics::histogram!(metric_defs::SIM_ANNUAL_DZ_DT.name).record(dz_dt * 1000.0);

            trajectory.push(ElevationTrajectoryPoint {
                year,
                elevation: z,
                dz_dt,
                nourished,
                inundation_events,
            });
        }

        let nourishments = trajectory.nourished_years().count();
        metrics::counter!(metric_defs::SIM_YEARS.name).increment(trajectory.len() as u64);
        metrics::counter!(metric_defs::SIM_NOURISHMENT_EVENTS.name).increment(nourishments as u64);
        metrics::counter!(metric_defs::SIM_INUNDATION_EVENTS.name).increment(trajectory.inundation_events());
        metrics::gauge!(metric_defs::SIM_FINAL_ELEVATION.name).set(z);

        debug!(
            start_year,
            end_year = tides.end_year(),
            final_elevation = z,
            growth_total = trajectory.growth_total(),
            nourishments,
            "Simulation complete"
        );
        Ok(trajectory)
    }

    /// Forcing of one season of a year after the first.
    pub fn season_forcing(&self, season: Season, slr: f64, nourished: bool) -> SeasonalForcing {
        let boost = if nourished {
            self.params.c_flood_nourishment * self.seasons.nourishment_scale(season)
        } else {
            0.0
        };
        SeasonalForcing {
            c_flood: self.params.c_flood + boost,
            fd: self.params.fd * self.seasons.fd_scale(season),
            ..self.base_forcing(slr)
        }
    }

    fn base_forcing(&self, slr: f64) -> SeasonalForcing {
        SeasonalForcing {
            c_flood: self.params.c_flood,
            fd: self.params.fd,
            rho_deposit: self.params.rho_deposit,
            s_subsidence: self.params.s_subsidence,
            slr,
            loss_fraction: self.seasons.loss_fraction,
        }
    }

    fn first_year_rate(
        &self,
        forced: &ForcedTideDataset,
        year: i32,
        z: f64,
        slr: f64,
    ) -> Result<(f64, u64), AccretionError> {
        let (heights, counts): (Vec<f64>, Vec<u32>) = forced
            .tides()
            .year_records(year)
            .flat_map(|record| {
                record
                    .high_water_height()
                    .iter()
                    .copied()
                    .zip(record.num_tides().iter().copied())
            })
            .unzip();

        let forcing = self.base_forcing(slr);
        let rate = forcing.elevation_rate(z, &heights, &counts)?;
        let events = forcing.inundation_events(z, &heights, &counts);
        Ok((rate - self.seasons.remaining_loss_fraction() * forcing.annual_loss(), events))
    }

    fn seasonal_year_rate(
        &self,
        forced: &ForcedTideDataset,
        year: i32,
        z: f64,
        slr: f64,
        nourished: bool,
    ) -> Result<(f64, u64), AccretionError> {
        let mut dz_dt = 0.0;
        let mut events = 0;
        for season in Season::ALL {
            let record = forced.tides().season(year, season)?;
            let forcing = self.season_forcing(season, slr, nourished);
            dz_dt += forcing.record_rate(z, record)?;
            events += forcing.inundation_events(z, record.high_water_height(), record.num_tides());
        }
        Ok((dz_dt, events))
    }
}
