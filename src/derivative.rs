//! Whole-grid time derivatives produced by the force model.

use crate::float::Float;
use crate::vec::{Vec, Vec3};
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// Rates of change for every particle: `d_pos` is velocity, `d_vel` is
/// acceleration. Un-scaled; integrators multiply by the step size.
///
/// Both arrays always cover the full grid (row-major, `y * width + x`);
/// pinned particles carry zeros rather than being omitted.
#[derive(Clone, Debug, PartialEq)]
pub struct Derivative<F: Float> {
    width: usize,
    height: usize,
    pub(crate) d_pos: AllocVec<Vec3<F>>,
    pub(crate) d_vel: AllocVec<Vec3<F>>,
}

impl<F: Float> Derivative<F> {
    /// A zeroed derivative for a `width x height` grid.
    pub fn zeroed(width: usize, height: usize) -> Self {
        let count = width * height;
        Derivative {
            width,
            height,
            d_pos: vec![Vec3::zero(); count],
            d_vel: vec![Vec3::zero(); count],
        }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn position_rate(&self, x: usize, y: usize) -> Vec3<F> {
        self.d_pos[y * self.width + x]
    }

    pub fn velocity_rate(&self, x: usize, y: usize) -> Vec3<F> {
        self.d_vel[y * self.width + x]
    }

    pub fn position_rates(&self) -> &[Vec3<F>] { &self.d_pos }
    pub fn velocity_rates(&self) -> &[Vec3<F>] { &self.d_vel }

    /// Multiply every entry by `factor`.
    pub fn scale(&mut self, factor: F) {
        for v in self.d_pos.iter_mut().chain(self.d_vel.iter_mut()) {
            *v = v.scale(factor);
        }
    }

    /// `self += other * factor`, entry by entry.
    pub fn accumulate(&mut self, other: &Derivative<F>, factor: F) {
        debug_assert_eq!(self.d_pos.len(), other.d_pos.len());
        for (a, b) in self.d_pos.iter_mut().zip(other.d_pos.iter()) {
            *a = a.mul_add(*b, factor);
        }
        for (a, b) in self.d_vel.iter_mut().zip(other.d_vel.iter()) {
            *a = a.mul_add(*b, factor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_covers_grid() {
        let d: Derivative<f32> = Derivative::zeroed(3, 2);
        assert_eq!(d.position_rates().len(), 6);
        assert_eq!(d.velocity_rates().len(), 6);
        assert!(d.velocity_rates().iter().all(|v| *v == Vec3::zero()));
    }

    #[test]
    fn accumulate_then_scale() {
        let mut a: Derivative<f64> = Derivative::zeroed(1, 1);
        let mut b: Derivative<f64> = Derivative::zeroed(1, 1);
        a.d_pos[0] = Vec3::new(1.0, 0.0, 0.0);
        b.d_pos[0] = Vec3::new(0.0, 1.0, 0.0);
        b.d_vel[0] = Vec3::new(0.0, 0.0, 4.0);

        a.accumulate(&b, 2.0);
        a.scale(0.5);

        assert_eq!(a.position_rate(0, 0), Vec3::new(0.5, 1.0, 0.0));
        assert_eq!(a.velocity_rate(0, 0), Vec3::new(0.0, 0.0, 4.0));
    }
}
