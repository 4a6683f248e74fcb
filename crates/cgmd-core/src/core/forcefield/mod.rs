//! Force-field mathematics: pure potential energy functions with their
//! analytic derivatives, and the typed potential terms that own pre-scaled
//! coefficients.

pub mod potentials;
pub mod term;
