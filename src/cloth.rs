//! The cloth: state, options and working buffers behind one handle.

use crate::config::{GridConfig, SimulationOptions};
use crate::controller::{StepController, StepPlan};
use crate::derivative::Derivative;
use crate::error::ClothError;
use crate::float::Float;
use crate::integrator::{integrate, IntegratorKind, Workspace};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::spring::{SpringFamily, SpringTopology};
use crate::state::ClothState;
use crate::vec::{Vec, Vec3};
use alloc::vec::Vec as AllocVec;

/// One spring between two particles, as seen from `from`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringLink<F: Float> {
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub family: SpringFamily,
    /// Index of the descriptor in the topology.
    pub descriptor: usize,
    /// Current length over rest length: above 1 is stretched, below 1 squeezed.
    pub strain: F,
}

/// A simulated cloth.
///
/// Owns its particle grid, pin mask, options and all scratch buffers; several
/// cloths never share state.
///
/// ```
/// use softcloth::{Cloth, GridConfig, SimulationOptions, Vec3};
///
/// let mut cloth = Cloth::new(
///     Vec3::new(0.0f32, 2.0, 0.0),
///     &GridConfig::new(8, 8, 0.1),
///     SimulationOptions::new(),
/// ).unwrap();
/// cloth.set_anchor(0, 0).unwrap();
/// cloth.set_anchor(7, 0).unwrap();
/// cloth.update(16.0);
/// assert_eq!(cloth.options().current_steps_per_frame(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct Cloth<F: Float> {
    state: ClothState<F>,
    options: SimulationOptions<F>,
    topology: SpringTopology<F>,
    controller: StepController<F>,
    workspace: Workspace<F>,
}

impl<F: Float> Cloth<F> {
    /// Create a cloth with the full structural/shear/bend topology.
    pub fn new(
        origin: Vec3<F>,
        config: &GridConfig<F>,
        options: SimulationOptions<F>,
    ) -> Result<Self, ClothError> {
        Self::with_topology(origin, config, options, SpringTopology::full())
    }

    pub fn with_topology(
        origin: Vec3<F>,
        config: &GridConfig<F>,
        options: SimulationOptions<F>,
        topology: SpringTopology<F>,
    ) -> Result<Self, ClothError> {
        if config.width == 0 || config.height == 0 {
            return Err(ClothError::InvalidGridDimensions {
                width: config.width,
                height: config.height,
            });
        }
        let state = ClothState::new(origin, config);
        let controller = StepController::for_state(&state);
        let workspace = Workspace::for_state(&state);
        Ok(Cloth { state, options, topology, controller, workspace })
    }

    /// Advance by `dt_millis` milliseconds of wall time.
    pub fn update(&mut self, dt_millis: F) -> StepPlan<F> {
        self.update_observed(dt_millis, &mut NoOpStepObserver)
    }

    pub fn update_observed<O: StepObserver>(&mut self, dt_millis: F, observer: &mut O) -> StepPlan<F> {
        self.step(dt_millis / F::from_f32(1000.0), observer)
    }

    /// Advance by `dt` seconds: plan the sub-steps, record them in the
    /// options' telemetry, then integrate the live state.
    pub fn step<O: StepObserver>(&mut self, dt: F, observer: &mut O) -> StepPlan<F> {
        let plan = self.controller.plan(
            &self.state,
            &self.options,
            &self.topology,
            dt,
            &mut self.workspace,
        );
        self.options.current_steps_per_frame = plan.steps;
        self.options.current_step_size = plan.step_size;
        observer.on_plan(plan.steps, plan.step_size.to_f64());

        for i in 0..plan.steps {
            integrate(
                &mut self.state,
                &self.options,
                &self.topology,
                plan.step_size,
                &mut self.workspace,
            );
            observer.on_sub_step(i);
        }

        observer.on_frame_complete();
        plan
    }

    pub fn width(&self) -> usize { self.state.width() }
    pub fn height(&self) -> usize { self.state.height() }
    pub fn particle_count(&self) -> usize { self.state.particle_count() }

    /// Position of particle `(x, y)`. Panics when out of bounds.
    pub fn position_at(&self, x: usize, y: usize) -> Vec3<F> {
        self.state.position(x, y)
    }

    pub fn velocity_at(&self, x: usize, y: usize) -> Vec3<F> {
        self.state.velocity(x, y)
    }

    /// All positions, row-major: `(x, y)` is at `y * width + x`.
    pub fn positions(&self) -> &[Vec3<F>] {
        self.state.positions()
    }

    pub fn velocities(&self) -> &[Vec3<F>] {
        self.state.velocities()
    }

    pub fn is_pinned(&self, x: usize, y: usize) -> bool {
        self.state.is_pinned(x, y)
    }

    /// Virtual time simulated so far, in seconds.
    pub fn elapsed(&self) -> F {
        self.state.time()
    }

    pub fn state(&self) -> &ClothState<F> {
        &self.state
    }

    pub fn options(&self) -> &SimulationOptions<F> {
        &self.options
    }

    /// Options are re-read on every update; edit freely between frames.
    pub fn options_mut(&mut self) -> &mut SimulationOptions<F> {
        &mut self.options
    }

    pub fn topology(&self) -> &SpringTopology<F> {
        &self.topology
    }

    /// Place a particle at a world position (anchor placement, dragging).
    pub fn set_particle_position(&mut self, x: usize, y: usize, pos: Vec3<F>) -> Result<(), ClothError> {
        self.check_bounds(x, y)?;
        self.state.set_position(x, y, pos);
        Ok(())
    }

    /// Pin a particle in place and stop it.
    pub fn set_anchor(&mut self, x: usize, y: usize) -> Result<(), ClothError> {
        self.check_bounds(x, y)?;
        self.state.pin(x, y);
        Ok(())
    }

    pub fn release_anchor(&mut self, x: usize, y: usize) -> Result<(), ClothError> {
        self.check_bounds(x, y)?;
        self.state.unpin(x, y);
        Ok(())
    }

    /// Pin a particle and move it to `pos`, as a pointer drag does each frame.
    pub fn drag_anchor(&mut self, x: usize, y: usize, pos: Vec3<F>) -> Result<(), ClothError> {
        self.check_bounds(x, y)?;
        self.state.pin(x, y);
        self.state.set_position(x, y, pos);
        Ok(())
    }

    /// Select the integrator by UI index (0 = Euler, 1 = RK4).
    pub fn set_integrator(&mut self, index: usize) -> Result<(), ClothError> {
        self.options.integrator = IntegratorKind::from_index(index)?;
        Ok(())
    }

    /// Un-scaled derivative of the current state.
    pub fn derivative(&self) -> Derivative<F> {
        self.state.derive(&self.options, &self.topology)
    }

    /// `|acceleration|` per particle, row-major.
    pub fn acceleration_magnitudes(&self) -> AllocVec<F> {
        self.derivative().velocity_rates().iter().map(|a| a.length()).collect()
    }

    /// Every spring whose neighbor is in bounds, once from each end.
    pub fn spring_links(&self) -> impl Iterator<Item = SpringLink<F>> + '_ {
        let width = self.width();
        let height = self.height();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y))).flat_map(move |(x, y)| {
            self.topology
                .descriptors()
                .iter()
                .enumerate()
                .filter_map(move |(i, spring)| {
                    let (nx, ny) = spring.neighbor(x, y, width, height)?;
                    let length = self.state.position(x, y).distance(self.state.position(nx, ny));
                    let rest = spring.rest_length(&self.options);
                    let strain = if rest.is_near_zero(F::from_f32(1e-12)) {
                        F::one()
                    } else {
                        length / rest
                    };
                    Some(SpringLink {
                        from: (x, y),
                        to: (nx, ny),
                        family: spring.family,
                        descriptor: i,
                        strain,
                    })
                })
        })
    }

    /// Triangle list for a surface mesh whose vertex `y * width + x` is
    /// particle `(x, y)`: two triangles per grid quad.
    pub fn surface_indices(&self) -> AllocVec<u32> {
        let width = self.width();
        let height = self.height();
        let quads = width.saturating_sub(1) * height.saturating_sub(1);
        let mut indices = AllocVec::with_capacity(quads * 6);
        for y in 0..height.saturating_sub(1) {
            for x in 0..width.saturating_sub(1) {
                let a = (y * width + x) as u32;
                let b = ((y + 1) * width + x) as u32;
                let c = ((y + 1) * width + x + 1) as u32;
                let d = (y * width + x + 1) as u32;
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
        indices
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), ClothError> {
        if self.state.contains(x, y) {
            Ok(())
        } else {
            Err(ClothError::ParticleOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloth(width: usize, height: usize) -> Cloth<f64> {
        Cloth::new(
            Vec3::new(0.0, 2.0, 0.0),
            &GridConfig::new(width, height, 0.1),
            SimulationOptions::new(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_empty_grid() {
        let err = Cloth::<f32>::new(Vec3::new(0.0, 1.0, 0.0), &GridConfig::new(0, 3, 0.1), SimulationOptions::new())
            .unwrap_err();
        assert_eq!(err, ClothError::InvalidGridDimensions { width: 0, height: 3 });
    }

    #[test]
    fn out_of_bounds_anchor_is_an_error() {
        let mut c = cloth(3, 3);
        assert_eq!(
            c.set_anchor(3, 0),
            Err(ClothError::ParticleOutOfBounds { x: 3, y: 0, width: 3, height: 3 })
        );
        assert!(c.set_anchor(2, 2).is_ok());
    }

    #[test]
    fn set_integrator_by_index() {
        let mut c = cloth(2, 2);
        c.set_integrator(1).unwrap();
        assert_eq!(c.options().integrator, IntegratorKind::RungeKutta4);
        assert!(c.set_integrator(5).is_err());
        assert_eq!(c.options().integrator, IntegratorKind::RungeKutta4);
    }

    #[test]
    fn update_converts_millis_and_records_telemetry() {
        let mut c = cloth(3, 3);
        c.options_mut().max_steps_per_frame = 8;
        let plan = c.update(16.0);
        assert_eq!(plan.steps, 8);
        assert_eq!(c.options().current_steps_per_frame(), 8);
        assert!((c.options().current_step_size() - 0.002).abs() < 1e-15);
        assert!((c.elapsed() - 0.016).abs() < 1e-12);
    }

    #[test]
    fn drag_anchor_pins_and_moves() {
        let mut c = cloth(3, 3);
        let target = Vec3::new(1.0, 3.0, -1.0);
        c.drag_anchor(1, 1, target).unwrap();
        assert!(c.is_pinned(1, 1));
        c.update(16.0);
        assert_eq!(c.position_at(1, 1), target);
    }

    #[test]
    fn surface_indices_cover_each_quad() {
        let c = cloth(3, 2);
        let indices = c.surface_indices();
        assert_eq!(indices.len(), 2 * 6);
        assert_eq!(&indices[..6], &[0, 3, 4, 0, 4, 1]);
    }

    #[test]
    fn spring_links_at_rest_have_unit_strain() {
        let mut c = cloth(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                let p = Vec3::new(x as f64 * 0.1, 2.0, y as f64 * 0.1);
                c.set_particle_position(x, y, p).unwrap();
            }
        }
        let links: AllocVec<_> = c.spring_links().collect();
        // structural 24, shear 16, bend 12 (each pair seen from both ends)
        assert_eq!(links.len(), 52);
        for link in &links {
            assert!((link.strain - 1.0).abs() < 1e-9, "{:?}", link);
        }
    }

    #[test]
    fn acceleration_magnitudes_cover_grid() {
        let mut c = cloth(2, 2);
        c.set_anchor(0, 0).unwrap();
        let acc = c.acceleration_magnitudes();
        assert_eq!(acc.len(), 4);
        assert_eq!(acc[0], 0.0);
        assert!(acc[3] > 0.0);
    }
}
