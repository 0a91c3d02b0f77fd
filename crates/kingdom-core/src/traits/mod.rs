mod estimator;
mod policy;
mod regressor;

pub use estimator::IEstimator;
pub use policy::IEscalationPolicy;
pub use regressor::IRegressor;
