//! Force model: gravity, quadratic drag, springs and wind.

use crate::config::SimulationOptions;
use crate::derivative::Derivative;
use crate::float::Float;
use crate::spring::SpringTopology;
use crate::state::ClothState;
use crate::vec::{Vec, Vec3};

/// Evaluates the net force on every particle for one state.
///
/// Borrows the options and topology for a single evaluation, so any change the
/// caller makes between frames is picked up on the next call.
pub struct ForceModel<'a, F: Float> {
    options: &'a SimulationOptions<F>,
    topology: &'a SpringTopology<F>,
}

impl<'a, F: Float> ForceModel<'a, F> {
    pub fn new(options: &'a SimulationOptions<F>, topology: &'a SpringTopology<F>) -> Self {
        ForceModel { options, topology }
    }

    /// Write the un-scaled derivative of `state` into `out`.
    ///
    /// Pinned particles receive a zero derivative; their mass is never used.
    pub fn derive_into(&self, state: &ClothState<F>, out: &mut Derivative<F>) {
        let width = state.width();
        let height = state.height();
        let positions = state.positions();
        let velocities = state.velocities();
        let pinned = state.pin_mask();
        debug_assert_eq!(out.d_pos.len(), positions.len());

        let options = self.options;
        let inv_mass = F::one() / options.particle_mass;
        let wind = if options.wind_enabled {
            Some(wind_vector(options.wind_strength, state.time()))
        } else {
            None
        };

        for y in 0..height {
            for x in 0..width {
                let idx = y * width + x;
                if pinned[idx] {
                    out.d_pos[idx] = Vec3::zero();
                    out.d_vel[idx] = Vec3::zero();
                    continue;
                }

                let pos = positions[idx];
                let vel = velocities[idx];

                let mut force = Vec3::new(F::zero(), -options.gravity, F::zero());
                force = force + drag_force(vel, options.air_resistance);

                for spring in self.topology.descriptors() {
                    if let Some((nx, ny)) = spring.neighbor(x, y, width, height) {
                        force = force + spring_force(
                            pos,
                            positions[ny * width + nx],
                            spring.stiffness(options),
                            spring.rest_length(options),
                        );
                    }
                }

                if let Some(wind) = wind {
                    if let Some(normal) = surface_normal(positions, width, height, x, y) {
                        force = force + normal.scale(normal.dot(wind));
                    }
                }

                out.d_pos[idx] = vel;
                out.d_vel[idx] = force.scale(inv_mass);
            }
        }
    }
}

/// `-|v|^2 * c * normalize(v)`, zero for a particle at rest.
pub fn drag_force<F: Float>(velocity: Vec3<F>, air_resistance: F) -> Vec3<F> {
    let speed = velocity.length();
    if speed.is_near_zero(F::from_f32(1e-12)) {
        return Vec3::zero();
    }
    // |v|^2 * normalize(v) == |v| * v
    velocity.scale(-speed * air_resistance)
}

/// Hookean pull on the particle at `pos` toward (stretched) or away from
/// (compressed) `other`. Coincident particles exert nothing.
pub fn spring_force<F: Float>(pos: Vec3<F>, other: Vec3<F>, stiffness: F, rest_length: F) -> Vec3<F> {
    let direction = other - pos;
    let length = direction.length();
    if length.is_near_zero(F::from_f32(1e-12)) {
        return Vec3::zero();
    }
    let displacement = length - rest_length;
    direction.scale(stiffness * displacement / length)
}

/// Gusting wind at virtual time `t`: a slowly turning horizontal direction
/// whose magnitude swings between zero and `strength`.
pub fn wind_vector<F: Float>(strength: F, t: F) -> Vec3<F> {
    let heading = t * F::from_f32(0.1);
    let direction = Vec3::new(heading.cos(), F::zero(), heading.sin());
    let magnitude = strength * (F::one() + t.cos()) * F::half();
    direction.scale(magnitude)
}

/// Unit normal at `(x, y)` from the structural neighbors.
///
/// Uses `right x up` and `left x down` (both wind the same way), averaged
/// when both pairs exist. `None` when neither pair exists or the cross
/// products cancel.
pub fn surface_normal<F: Float>(
    positions: &[Vec3<F>],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
) -> Option<Vec3<F>> {
    let at = |x: usize, y: usize| positions[y * width + x];
    let center = at(x, y);
    let mut sum = Vec3::zero();
    let mut pairs = 0;

    if x + 1 < width && y + 1 < height {
        sum = sum + (at(x + 1, y) - center).cross(at(x, y + 1) - center);
        pairs += 1;
    }
    if x > 0 && y > 0 {
        sum = sum + (at(x - 1, y) - center).cross(at(x, y - 1) - center);
        pairs += 1;
    }

    if pairs == 0 {
        return None;
    }
    let normal = sum.normalize();
    if normal == Vec3::zero() {
        None
    } else {
        Some(normal)
    }
}
