pub mod geometric;
pub mod scripted;

pub use geometric::GeometricJudge;
pub use scripted::ScriptedJudge;
