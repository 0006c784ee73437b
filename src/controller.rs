//! Adaptive step controller: picks the sub-step count for one frame.

use crate::config::SimulationOptions;
use crate::float::Float;
use crate::force::ForceModel;
use crate::integrator::Workspace;
use crate::spring::SpringTopology;
use crate::state::ClothState;

/// Error estimates below this are treated as "well within tolerance".
const MIN_ERROR: f32 = 1e-12;

/// How a frame will be subdivided.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepPlan<F: Float> {
    pub steps: usize,
    pub step_size: F,
}

impl<F: Float> StepPlan<F> {
    /// No work: zero steps of size zero.
    pub fn idle() -> Self {
        StepPlan { steps: 0, step_size: F::zero() }
    }

    /// `steps` equal sub-steps covering `dt`.
    pub fn uniform(dt: F, steps: usize) -> Self {
        StepPlan { steps, step_size: dt / F::from_usize(steps) }
    }
}

/// Chooses sub-steps by step doubling, keeping its two trial states between
/// frames so no grid is allocated per frame.
#[derive(Clone, Debug)]
pub struct StepController<F: Float> {
    single: ClothState<F>,
    double: ClothState<F>,
}

impl<F: Float> StepController<F> {
    /// Trial buffers shaped like `state`.
    pub fn for_state(state: &ClothState<F>) -> Self {
        StepController { single: state.clone(), double: state.clone() }
    }

    /// Plan the sub-steps for a frame of `dt` seconds.
    ///
    /// Never returns more than `options.max_steps_per_frame` steps. A zero,
    /// negative or non-finite `dt` yields the idle plan.
    pub fn plan(
        &mut self,
        state: &ClothState<F>,
        options: &SimulationOptions<F>,
        topology: &SpringTopology<F>,
        dt: F,
        workspace: &mut Workspace<F>,
    ) -> StepPlan<F> {
        let max_steps = options.step_ceiling();
        if !dt.is_finite() || dt <= F::zero() {
            return StepPlan::idle();
        }
        if !options.adaptive_step_size {
            return StepPlan::uniform(dt, max_steps);
        }
        let error = self.estimate_error(state, options, topology, dt, workspace);
        plan_from_error(dt, error, options.max_error, options.integrator.order(), max_steps)
    }

    /// Distance between one step of `dt` and two steps of `dt / 2`, both
    /// taken from copies of `state`.
    pub fn estimate_error(
        &mut self,
        state: &ClothState<F>,
        options: &SimulationOptions<F>,
        topology: &SpringTopology<F>,
        dt: F,
        workspace: &mut Workspace<F>,
    ) -> F {
        let forces = ForceModel::new(options, topology);
        let integrator = options.integrator;
        let half_dt = dt * F::half();

        self.single.copy_from(state);
        integrator.step(&mut self.single, &forces, dt, workspace);

        self.double.copy_from(state);
        integrator.step(&mut self.double, &forces, half_dt, workspace);
        integrator.step(&mut self.double, &forces, half_dt, workspace);

        self.single.distance(&self.double)
    }
}

/// Turn a step-doubling error estimate into a plan.
///
/// `h' = dt * (max_error / error)^(1 / order)`, `steps = ceil(dt / h')`,
/// clamped to `[1, max_steps]`; the step size is then `dt / steps`.
pub fn plan_from_error<F: Float>(
    dt: F,
    error: F,
    max_error: F,
    order: u32,
    max_steps: usize,
) -> StepPlan<F> {
    let max_steps = max_steps.max(1);
    if !error.is_finite() || !(max_error > F::zero()) {
        return StepPlan::uniform(dt, max_steps);
    }
    if error < F::from_f32(MIN_ERROR) {
        return StepPlan::uniform(dt, 1);
    }

    let exponent = F::one() / F::from_f32(order.max(1) as f32);
    let new_h = dt * (max_error / error).powf(exponent);
    let wanted = (dt / new_h).ceil();
    let steps = if !wanted.is_finite() || wanted.to_f64() >= max_steps as f64 {
        max_steps
    } else {
        (wanted.to_f64() as usize).max(1)
    };
    StepPlan::uniform(dt, steps)
}
