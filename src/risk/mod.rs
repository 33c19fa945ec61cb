/// Risk classification of findings
pub mod scorer;

pub use scorer::{
    classify_environment, CoOccurrencePolicy, EnvMultipliers, Environment, RiskScorer,
    RiskThresholds,
};
