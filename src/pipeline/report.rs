use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Open,
    Cameras,
    Materials,
    Meshes,
    Instances,
    Close,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Open => "open",
            Stage::Cameras => "cameras",
            Stage::Materials => "materials",
            Stage::Meshes => "meshes",
            Stage::Instances => "instances",
            Stage::Close => "close",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageTiming {
    pub stage: Stage,
    pub duration: Duration,
    /// Entities the stage produced.
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedObject {
    pub name: String,
    pub reason: String,
}

/// What a pass did: per-stage timings and counts, plus every object it had
/// to leave out.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    pub stages: Vec<StageTiming>,
    pub skipped: Vec<SkippedObject>,
}

impl PassReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a per-object failure. The pass carries on.
    pub fn skip(&mut self, name: impl Into<String>, reason: impl fmt::Display) {
        let name = name.into();
        let reason = reason.to_string();
        log::warn!("Skipping {}: {}", name, reason);
        self.skipped.push(SkippedObject { name, reason });
    }

    /// Runs one stage, logging and recording how long it took. `run` returns
    /// the number of entities it produced.
    pub fn time_stage<T>(&mut self, stage: Stage, run: impl FnOnce(&mut Self) -> (T, usize)) -> T {
        let start = Instant::now();
        let (value, count) = run(self);
        let duration = start.elapsed();

        log::info!(
            "Stage {}: {} in {:.3} sec",
            stage,
            count,
            duration.as_secs_f64()
        );
        self.stages.push(StageTiming {
            stage,
            duration,
            count,
        });
        value
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageTiming> {
        self.stages.iter().find(|timing| timing.stage == stage)
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.stage(stage).map_or(0, |timing| timing.count)
    }

    pub fn ran(&self, stage: Stage) -> bool {
        self.stage(stage).is_some()
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|timing| timing.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_stage_counts_and_skips() {
        let mut report = PassReport::new();
        let value = report.time_stage(Stage::Meshes, |report| {
            report.skip("broken", "bad indices");
            ("done", 3)
        });

        assert_eq!(value, "done");
        assert_eq!(report.count(Stage::Meshes), 3);
        assert!(report.ran(Stage::Meshes));
        assert!(!report.ran(Stage::Cameras));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, "bad indices");
    }
}
