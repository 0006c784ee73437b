//! Step observer trait for tracing a cloth frame.

/// Hooks called while `Cloth::update_observed` runs a frame.
///
/// Implement this to trace, profile or plot the simulation. All methods have
/// default no-op implementations.
pub trait StepObserver {
    /// Called once the controller has decided how to split the frame.
    /// `step_size` is in seconds.
    fn on_plan(&mut self, _steps: usize, _step_size: f64) {}

    /// Called after each sub-step has been integrated.
    fn on_sub_step(&mut self, _index: usize) {}

    /// Called when the frame is fully complete.
    fn on_frame_complete(&mut self) {}
}

/// A no-op observer that does nothing. Used by `Cloth::update`.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
