//! Spring topology: relative-offset springs shared by every grid cell.

use crate::config::SimulationOptions;
use crate::float::Float;
use alloc::vec::Vec as AllocVec;

/// Which family a spring belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringFamily {
    /// Direct horizontal/vertical neighbor.
    Structural,
    /// Diagonal neighbor.
    Shear,
    /// Skip-one horizontal/vertical neighbor.
    Bend,
}

/// Where a spring reads its stiffness from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Stiffness<F: Float> {
    /// `SimulationOptions::toughness`, read on every force evaluation.
    Toughness,
    /// A constant stiffness.
    Fixed(F),
}

/// Where a spring reads its rest length from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RestLength<F: Float> {
    /// A multiple of `SimulationOptions::spacing`, read on every force evaluation.
    Spacing(F),
    /// A constant length.
    Fixed(F),
}

/// One spring family member: the neighbor at `(x + dx, y + dy)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringDescriptor<F: Float> {
    pub dx: isize,
    pub dy: isize,
    pub family: SpringFamily,
    pub stiffness: Stiffness<F>,
    pub rest_length: RestLength<F>,
}

impl<F: Float> SpringDescriptor<F> {
    /// A spring whose stiffness and rest length follow the live options.
    pub fn new(dx: isize, dy: isize, family: SpringFamily, rest_factor: F) -> Self {
        SpringDescriptor {
            dx,
            dy,
            family,
            stiffness: Stiffness::Toughness,
            rest_length: RestLength::Spacing(rest_factor),
        }
    }

    pub fn with_stiffness(mut self, stiffness: Stiffness<F>) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_rest_length(mut self, rest_length: RestLength<F>) -> Self {
        self.rest_length = rest_length;
        self
    }

    pub fn stiffness(&self, options: &SimulationOptions<F>) -> F {
        match self.stiffness {
            Stiffness::Toughness => options.toughness,
            Stiffness::Fixed(k) => k,
        }
    }

    pub fn rest_length(&self, options: &SimulationOptions<F>) -> F {
        match self.rest_length {
            RestLength::Spacing(factor) => factor * options.spacing,
            RestLength::Fixed(length) => length,
        }
    }

    /// Neighbor coordinates of `(x, y)`, or `None` when they fall off the grid.
    pub fn neighbor(&self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(self.dx)?;
        let ny = y.checked_add_signed(self.dy)?;
        if nx < width && ny < height {
            Some((nx, ny))
        } else {
            None
        }
    }
}

/// The fixed list of springs applied relative to every cell.
#[derive(Clone, Debug, PartialEq)]
pub struct SpringTopology<F: Float> {
    descriptors: AllocVec<SpringDescriptor<F>>,
}

impl<F: Float> SpringTopology<F> {
    /// The full 12-spring cloth topology, in this order:
    /// - Structural: `(0,1) (1,0) (0,-1) (-1,0)`, rest = spacing
    /// - Shear: `(-1,-1) (-1,1) (1,-1) (1,1)`, rest = spacing * sqrt(2)
    /// - Bend: `(2,0) (0,2) (-2,0) (0,-2)`, rest = spacing * 2
    pub fn full() -> Self {
        let mut topology = Self::structural();
        let diagonal = F::two().sqrt();
        for (dx, dy) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
            topology.push(SpringDescriptor::new(dx, dy, SpringFamily::Shear, diagonal));
        }
        for (dx, dy) in [(2, 0), (0, 2), (-2, 0), (0, -2)] {
            topology.push(SpringDescriptor::new(dx, dy, SpringFamily::Bend, F::two()));
        }
        topology
    }

    /// Only the four direct neighbors.
    pub fn structural() -> Self {
        let mut topology = Self::empty();
        for (dx, dy) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
            topology.push(SpringDescriptor::new(dx, dy, SpringFamily::Structural, F::one()));
        }
        topology
    }

    pub fn empty() -> Self {
        SpringTopology { descriptors: AllocVec::new() }
    }

    pub fn push(&mut self, descriptor: SpringDescriptor<F>) {
        self.descriptors.push(descriptor);
    }

    pub fn descriptors(&self) -> &[SpringDescriptor<F>] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<F: Float> Default for SpringTopology<F> {
    fn default() -> Self {
        Self::full()
    }
}
