//! Configuration types for the cloth grid and the simulation.

use crate::float::Float;
use crate::integrator::IntegratorKind;

/// Layout of a new cloth.
///
/// Particle `(x, y)` starts at `origin + (x * spacing, -y * spacing * 0.01, y * spacing)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig<F: Float> {
    pub width: usize,
    pub height: usize,
    pub spacing: F,
}

impl<F: Float> GridConfig<F> {
    pub fn new(width: usize, height: usize, spacing: F) -> Self {
        GridConfig { width, height, spacing }
    }
}

/// Live-tunable simulation parameters.
///
/// The cloth re-reads every field on each `update`, so callers may edit them
/// between frames. `current_steps_per_frame` and `current_step_size` are
/// written back by the cloth after each frame and are read-only from outside.
///
/// # Builder Pattern
/// ```
/// use softcloth::{IntegratorKind, SimulationOptions};
///
/// let options: SimulationOptions<f32> = SimulationOptions::new()
///     .with_toughness(800.0)
///     .with_gravity(9.8)
///     .with_integrator(IntegratorKind::RungeKutta4)
///     .with_adaptive_step_size(true)
///     .with_max_steps_per_frame(20);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationOptions<F: Float> {
    /// Mass of every unpinned particle. Default: 1.0.
    pub particle_mass: F,
    /// Stiffness shared by all springs that reference it. Default: 800.
    pub toughness: F,
    /// Rest distance between structural neighbors. Default: 0.1.
    pub spacing: F,
    /// Downward gravitational force per particle. Default: 9.8.
    pub gravity: F,
    /// Quadratic drag coefficient. Default: 10.
    pub air_resistance: F,
    /// Apply wind pressure along the local surface normal. Default: off.
    pub wind_enabled: bool,
    /// Peak wind magnitude. Default: 1.0.
    pub wind_strength: F,
    /// Integrator used for every sub-step. Default: Euler.
    pub integrator: IntegratorKind,
    /// Choose the sub-step count by step doubling. Default: off.
    pub adaptive_step_size: bool,
    /// Tolerated step-doubling error per frame. Default: 0.001.
    pub max_error: F,
    /// Upper bound on sub-steps per frame (fixed count when not adaptive). Default: 10.
    pub max_steps_per_frame: usize,
    pub(crate) current_steps_per_frame: usize,
    pub(crate) current_step_size: F,
}

impl<F: Float> SimulationOptions<F> {
    /// Create options with default values.
    pub fn new() -> Self {
        SimulationOptions {
            particle_mass: F::one(),
            toughness: F::from_f32(800.0),
            spacing: F::from_f32(0.1),
            gravity: F::from_f32(9.8),
            air_resistance: F::from_f32(10.0),
            wind_enabled: false,
            wind_strength: F::one(),
            integrator: IntegratorKind::Euler,
            adaptive_step_size: false,
            max_error: F::from_f32(1e-3),
            max_steps_per_frame: 10,
            current_steps_per_frame: 0,
            current_step_size: F::zero(),
        }
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    pub fn with_toughness(mut self, toughness: F) -> Self {
        self.toughness = toughness;
        self
    }

    pub fn with_spacing(mut self, spacing: F) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_air_resistance(mut self, air_resistance: F) -> Self {
        self.air_resistance = air_resistance;
        self
    }

    /// Enable wind with the given peak strength.
    pub fn with_wind(mut self, strength: F) -> Self {
        self.wind_enabled = true;
        self.wind_strength = strength;
        self
    }

    pub fn with_integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_adaptive_step_size(mut self, adaptive: bool) -> Self {
        self.adaptive_step_size = adaptive;
        self
    }

    pub fn with_max_error(mut self, max_error: F) -> Self {
        self.max_error = max_error;
        self
    }

    /// Set the sub-step ceiling. Clamped to at least 1.
    pub fn with_max_steps_per_frame(mut self, steps: usize) -> Self {
        self.max_steps_per_frame = steps.max(1);
        self
    }

    /// Sub-steps taken during the most recent frame.
    pub fn current_steps_per_frame(&self) -> usize {
        self.current_steps_per_frame
    }

    /// Sub-step size (seconds) used during the most recent frame.
    pub fn current_step_size(&self) -> F {
        self.current_step_size
    }

    /// The sub-step ceiling as the controller sees it; a zero set through the
    /// public field still yields one step.
    pub(crate) fn step_ceiling(&self) -> usize {
        self.max_steps_per_frame.max(1)
    }
}

impl<F: Float> Default for SimulationOptions<F> {
    fn default() -> Self {
        Self::new()
    }
}
