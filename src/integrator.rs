//! Explicit integrators that advance a cloth state in place.

use crate::config::SimulationOptions;
use crate::derivative::Derivative;
use crate::error::ClothError;
use crate::float::Float;
use crate::force::ForceModel;
use crate::spring::SpringTopology;
use crate::state::ClothState;

/// Available integrators, selectable by index from a UI.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IntegratorKind {
    /// Forward Euler. Cheap, first order.
    #[default]
    Euler,
    /// Classical four-stage Runge-Kutta.
    RungeKutta4,
}

impl IntegratorKind {
    pub const ALL: [IntegratorKind; 2] = [IntegratorKind::Euler, IntegratorKind::RungeKutta4];

    pub fn from_index(index: usize) -> Result<Self, ClothError> {
        Self::ALL.get(index).copied().ok_or(ClothError::UnknownIntegrator { index })
    }

    pub fn index(self) -> usize {
        match self {
            IntegratorKind::Euler => 0,
            IntegratorKind::RungeKutta4 => 1,
        }
    }

    /// Exponent denominator used by the adaptive step controller.
    ///
    /// These are tuning constants, not textbook orders: RK4 uses 5, which
    /// grows the step more cautiously than 4 would.
    pub fn order(self) -> u32 {
        match self {
            IntegratorKind::Euler => 2,
            IntegratorKind::RungeKutta4 => 5,
        }
    }

    /// Advance `state` by `h` seconds.
    pub fn step<F: Float>(
        self,
        state: &mut ClothState<F>,
        forces: &ForceModel<'_, F>,
        h: F,
        workspace: &mut Workspace<F>,
    ) {
        let t0 = state.time();
        match self {
            IntegratorKind::Euler => {
                let k1 = &mut workspace.k[0];
                forces.derive_into(state, k1);
                state.add(k1, h);
            }
            IntegratorKind::RungeKutta4 => {
                let half_h = h * F::half();
                let [k1, k2, k3, k4] = &mut workspace.k;
                let stage = &mut workspace.stage;

                forces.derive_into(state, k1);

                stage.copy_from(state);
                stage.add(k1, half_h);
                stage.set_time(t0 + half_h);
                forces.derive_into(stage, k2);

                stage.copy_from(state);
                stage.add(k2, half_h);
                stage.set_time(t0 + half_h);
                forces.derive_into(stage, k3);

                stage.copy_from(state);
                stage.add(k3, h);
                stage.set_time(t0 + h);
                forces.derive_into(stage, k4);

                // k1 + 2 k2 + 2 k3 + k4, applied once with weight h / 6
                k1.accumulate(k2, F::two());
                k1.accumulate(k3, F::two());
                k1.accumulate(k4, F::one());
                state.add(k1, h / F::from_f32(6.0));
            }
        }
        state.set_time(t0 + h);
    }
}

/// Scratch buffers for integrator stages, allocated once per cloth.
#[derive(Clone, Debug)]
pub struct Workspace<F: Float> {
    k: [Derivative<F>; 4],
    stage: ClothState<F>,
}

impl<F: Float> Workspace<F> {
    /// Buffers shaped like `state`.
    pub fn for_state(state: &ClothState<F>) -> Self {
        let (w, h) = (state.width(), state.height());
        Workspace {
            k: [
                Derivative::zeroed(w, h),
                Derivative::zeroed(w, h),
                Derivative::zeroed(w, h),
                Derivative::zeroed(w, h),
            ],
            stage: state.clone(),
        }
    }
}

/// Advance `state` by `h` with the integrator selected in `options`.
pub fn integrate<F: Float>(
    state: &mut ClothState<F>,
    options: &SimulationOptions<F>,
    topology: &SpringTopology<F>,
    h: F,
    workspace: &mut Workspace<F>,
) {
    let forces = ForceModel::new(options, topology);
    options.integrator.step(state, &forces, h, workspace);
}
