//! Simulation parameters for both populations.
//!
//! Defaults carry the reference constants. Parameters are validated once,
//! when a world is constructed or a file is loaded; the banded neighbor
//! selection in the prey model silently mis-classifies neighbors if the
//! radius nesting is violated, so validation fails fast instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters of the prey force model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreyParams {
    /// Radius of the separation neighbor query.
    pub separation_radius: f32,
    /// Radius of the alignment neighbor query. Alignment only considers the
    /// band strictly between the separation and alignment radii.
    pub alignment_radius: f32,
    /// Radius of the attraction neighbor query and of predator detection.
    /// Attraction only considers the band strictly between the alignment and
    /// attraction radii.
    pub attraction_radius: f32,
    /// Scale applied to the summed separation springs.
    pub separation_force_multiplier: f32,
    /// Scale applied to the velocity-matching steer.
    pub alignment_force_multiplier: f32,
    /// Scale applied to the averaged attraction pull.
    pub attraction_force_multiplier: f32,
    /// Quadratic drag coefficient.
    pub friction_coefficient: f32,
    /// Body diameter; twice this is the separation spring's rest length.
    pub body_diameter: f32,
    /// Cruise propulsion gain.
    pub beta: f32,
    /// Escape thrust gain while a predator is in range.
    pub beta_escape: f32,
    /// Cruise speed damping; equilibrium speed is `beta / alpha`.
    pub alpha: f32,
    /// Velocity-squared damping of the escape thrust.
    pub gamma: f32,
}

impl Default for PreyParams {
    fn default() -> Self {
        Self {
            separation_radius: 2.0,
            alignment_radius: 15.0,
            attraction_radius: 80.0,
            separation_force_multiplier: 5.0,
            alignment_force_multiplier: 1.0,
            attraction_force_multiplier: 0.5,
            friction_coefficient: 0.1,
            body_diameter: 0.5,
            beta: 1.0,
            beta_escape: 20.0,
            alpha: 0.1,
            gamma: 0.1,
        }
    }
}

impl PreyParams {
    /// Equilibrium speed of the cruise propulsion term.
    pub fn cruise_speed(&self) -> f32 {
        self.beta / self.alpha
    }
}

/// Parameters of the predator force model.
///
/// `beta`, `beta_escape`, `alpha` and `gamma` are carried in configuration
/// but unused by the current force model; they are reserved for the
/// unauthored pursuit propulsion (see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredatorParams {
    /// Radius within which prey switch the predator into pursuit mode.
    /// Generates no force in the current model.
    pub detection_radius: f32,
    /// Radius of the predator-predator separation query. Also the trigger
    /// distance for external kill logic, which lives outside this core.
    pub kill_radius: f32,
    /// Scale applied to the summed separation springs.
    pub separation_force_multiplier: f32,
    /// Quadratic drag coefficient.
    pub friction_coefficient: f32,
    /// Body diameter; twice this is the separation spring's rest length.
    pub body_diameter: f32,
    /// Reserved pursuit propulsion gain.
    pub beta: f32,
    /// Reserved pursuit thrust gain.
    pub beta_escape: f32,
    /// Reserved pursuit speed damping.
    pub alpha: f32,
    /// Reserved pursuit velocity-squared damping.
    pub gamma: f32,
}

impl Default for PredatorParams {
    fn default() -> Self {
        Self {
            detection_radius: 80.0,
            kill_radius: 3.0,
            separation_force_multiplier: 5.0,
            friction_coefficient: 0.1,
            body_diameter: 0.5,
            beta: 1.0,
            beta_escape: 20.0,
            alpha: 0.1,
            gamma: 0.1,
        }
    }
}

/// Combined parameter bundle for a world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimParams {
    /// Prey force model parameters.
    pub prey: PreyParams,
    /// Predator force model parameters.
    pub predator: PredatorParams,
}

/// Errors raised when validating simulation parameters.
#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    /// The prey radii are not strictly nested.
    #[error(
        "prey radii must be strictly nested: separation {separation} < alignment {alignment} < attraction {attraction}"
    )]
    RadiusOrdering {
        /// Configured separation radius.
        separation: f32,
        /// Configured alignment radius.
        alignment: f32,
        /// Configured attraction radius.
        attraction: f32,
    },
    /// A length parameter that must be positive is zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending parameter.
        name: &'static str,
        /// Configured value.
        value: f32,
    },
}

impl SimParams {
    /// Validates the parameter bundle.
    ///
    /// Checks the strict nesting of the prey radii and positivity of all
    /// lengths. Called once at world construction and after file loads; the
    /// per-tick force code assumes parameters are already well-formed.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let positive = [
            ("prey.separation_radius", self.prey.separation_radius),
            ("prey.alignment_radius", self.prey.alignment_radius),
            ("prey.attraction_radius", self.prey.attraction_radius),
            ("prey.body_diameter", self.prey.body_diameter),
            ("predator.detection_radius", self.predator.detection_radius),
            ("predator.kill_radius", self.predator.kill_radius),
            ("predator.body_diameter", self.predator.body_diameter),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ParamsError::NonPositive { name, value });
            }
        }

        if self.prey.separation_radius >= self.prey.alignment_radius
            || self.prey.alignment_radius >= self.prey.attraction_radius
        {
            return Err(ParamsError::RadiusOrdering {
                separation: self.prey.separation_radius,
                alignment: self.prey.alignment_radius,
                attraction: self.prey.attraction_radius,
            });
        }

        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
