//! axum HTTP surface.
//!
//! ```text
//! /api/home/*, /api/neo/*   -> neo::NeoClient       (pass-through)
//! /api/ai/predict-impact    -> pipeline (narrative, degrades to demo mode)
//! /api/ai/plan-intercept    -> pipeline (typed plan, fails loudly)
//! /api/ai/impact-examples, /api/health -> static / config-derived
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
