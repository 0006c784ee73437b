//! Mass-spring-damper cloth simulation for games and interactive demos.
//!
//! `softcloth` simulates a rectangular grid of point masses joined by
//! structural, shear and bend springs, and advances it with explicit Euler or
//! classical RK4, optionally under step-doubling adaptive step control.
//!
//! # Features
//!
//! - **Force model**: gravity, quadratic air drag, Hookean springs, gusting wind on the local surface normal
//! - **Integrators**: explicit Euler and RK4 over whole-grid derivatives
//! - **Adaptive sub-stepping**: step doubling, clamped to a per-frame maximum
//! - **Anchors**: pin, release and drag particles; pinned particles never move
//! - **Floor**: inelastic collision with the plane `y = 0`
//! - **Live options**: every parameter is re-read each frame; telemetry is written back
//! - **Observable**: trace frames via the `StepObserver` trait
//! - **`no_std` compatible**: works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod spring;
pub mod derivative;
pub mod state;
pub mod force;
pub mod integrator;
pub mod controller;
pub mod cloth;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec3};
pub use spring::{RestLength, SpringDescriptor, SpringFamily, SpringTopology, Stiffness};
pub use derivative::Derivative;
pub use state::ClothState;
pub use force::ForceModel;
pub use integrator::{IntegratorKind, Workspace};
pub use controller::{StepController, StepPlan};
pub use cloth::{Cloth, SpringLink};
pub use config::{GridConfig, SimulationOptions};
pub use observer::{StepObserver, NoOpStepObserver};
pub use error::ClothError;
