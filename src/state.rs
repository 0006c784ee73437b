//! Cloth state: particle grid, pin mask and the virtual clock.

use crate::config::{GridConfig, SimulationOptions};
use crate::derivative::Derivative;
use crate::float::Float;
use crate::force::ForceModel;
use crate::spring::SpringTopology;
use crate::vec::{Vec, Vec3};
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// Vertical offset per row, as a fraction of spacing, applied to the initial
/// lattice so the sheet never starts perfectly planar.
const ROW_TILT: f32 = 0.01;

/// Positions and velocities for a `width x height` grid of point masses.
///
/// Storage is row-major: particle `(x, y)` lives at index `y * width + x`,
/// the same index a surface mesh uses for that vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct ClothState<F: Float> {
    width: usize,
    height: usize,
    positions: AllocVec<Vec3<F>>,
    velocities: AllocVec<Vec3<F>>,
    pinned: AllocVec<bool>,
    time: F,
}

impl<F: Float> ClothState<F> {
    /// Lay out a resting lattice in the XZ plane starting at `origin`.
    pub fn new(origin: Vec3<F>, config: &GridConfig<F>) -> Self {
        let width = config.width;
        let height = config.height;
        let spacing = config.spacing;
        let tilt = spacing * F::from_f32(ROW_TILT);
        let mut positions = AllocVec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                let fx = F::from_usize(x);
                let fy = F::from_usize(y);
                positions.push(origin + Vec3::new(fx * spacing, -fy * tilt, fy * spacing));
            }
        }

        ClothState {
            width,
            height,
            positions,
            velocities: vec![Vec3::zero(); width * height],
            pinned: vec![false; width * height],
            time: F::zero(),
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn particle_count(&self) -> usize { self.positions.len() }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn position(&self, x: usize, y: usize) -> Vec3<F> {
        self.positions[self.index(x, y)]
    }

    pub fn velocity(&self, x: usize, y: usize) -> Vec3<F> {
        self.velocities[self.index(x, y)]
    }

    pub fn is_pinned(&self, x: usize, y: usize) -> bool {
        self.pinned[self.index(x, y)]
    }

    pub fn positions(&self) -> &[Vec3<F>] { &self.positions }
    pub fn velocities(&self) -> &[Vec3<F>] { &self.velocities }
    pub(crate) fn pin_mask(&self) -> &[bool] { &self.pinned }

    /// Virtual time in seconds, advanced by the integrators.
    pub fn time(&self) -> F { self.time }

    pub(crate) fn set_time(&mut self, time: F) {
        self.time = time;
    }

    /// Overwrite a particle position. Velocity is left alone.
    pub fn set_position(&mut self, x: usize, y: usize, pos: Vec3<F>) {
        let idx = self.index(x, y);
        self.positions[idx] = pos;
    }

    pub fn set_velocity(&mut self, x: usize, y: usize, vel: Vec3<F>) {
        let idx = self.index(x, y);
        self.velocities[idx] = vel;
    }

    /// Treat the particle as infinitely heavy and stop it.
    pub fn pin(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.pinned[idx] = true;
        self.velocities[idx] = Vec3::zero();
    }

    pub fn unpin(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        self.pinned[idx] = false;
    }

    /// Apply `derivative * h` to every unpinned particle.
    ///
    /// A particle pushed below `y = 0` is put back on the floor and loses its
    /// vertical velocity. Pinned particles are left untouched.
    pub fn add(&mut self, derivative: &Derivative<F>, h: F) {
        debug_assert_eq!(derivative.d_pos.len(), self.positions.len());
        for idx in 0..self.positions.len() {
            if self.pinned[idx] {
                continue;
            }
            let pos = self.positions[idx].mul_add(derivative.d_pos[idx], h);
            let vel = self.velocities[idx].mul_add(derivative.d_vel[idx], h);
            self.positions[idx] = pos;
            self.velocities[idx] = vel;
            if pos.y < F::zero() {
                self.positions[idx].y = F::zero();
                self.velocities[idx].y = F::zero();
            }
        }
    }

    /// Evaluate the force model into a fresh derivative.
    pub fn derive(&self, options: &SimulationOptions<F>, topology: &SpringTopology<F>) -> Derivative<F> {
        let mut out = Derivative::zeroed(self.width, self.height);
        ForceModel::new(options, topology).derive_into(self, &mut out);
        out
    }

    /// Copy `other` into `self`, reusing this state's buffers.
    pub fn copy_from(&mut self, other: &ClothState<F>) {
        self.width = other.width;
        self.height = other.height;
        self.positions.clone_from(&other.positions);
        self.velocities.clone_from(&other.velocities);
        self.pinned.clone_from(&other.pinned);
        self.time = other.time;
    }

    /// Summed Euclidean distance between the two states' positions and
    /// velocities, the step-doubling error metric.
    pub fn distance(&self, other: &ClothState<F>) -> F {
        let mut total = F::zero();
        for (a, b) in self.positions.iter().zip(other.positions.iter()) {
            total = total + a.distance(*b);
        }
        for (a, b) in self.velocities.iter().zip(other.velocities.iter()) {
            total = total + a.distance(*b);
        }
        total
    }
}
