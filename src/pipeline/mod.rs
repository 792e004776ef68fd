// src/pipeline/mod.rs

//! Explicit recipe lifecycle
//!
//! A [`Pipeline`] is an ordered list of [`StageKind`]s validated at
//! construction: every stage's prerequisites must appear before it and no
//! stage may repeat. Running the pipeline threads the recipe, options and
//! settings through each stage explicitly and stops at the first failure.

mod stage;

pub use stage::StageKind;

use crate::error::{Error, Result};
use crate::recipe::kitchen::{
    BuildOptions, BuildResult, Kitchen, PackageArtifact, PackageId, TestOutcome, package_id,
};
use crate::recipe::Recipe;
use crate::settings::PlatformTriple;
use std::time::Instant;
use tracing::{debug, info};

/// Inputs shared by every stage of one run
pub struct PipelineContext<'a> {
    pub recipe: &'a Recipe,
    pub options: &'a BuildOptions,
    /// Settings the package is built for
    pub settings: &'a PlatformTriple,
    /// Settings of the machine running the pipeline
    pub host: &'a PlatformTriple,
}

/// What a pipeline run produced
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub completed: Vec<StageKind>,
    pub build: Option<BuildResult>,
    pub test: Option<TestOutcome>,
    pub artifact: Option<PackageArtifact>,
    pub package_id: Option<PackageId>,
}

/// An ordered, validated sequence of stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<StageKind>,
}

impl Pipeline {
    /// Validate and create a pipeline
    pub fn new(stages: Vec<StageKind>) -> Result<Self> {
        for (i, stage) in stages.iter().enumerate() {
            let earlier = &stages[..i];
            if earlier.contains(stage) {
                return Err(Error::PipelineError(format!(
                    "Stage '{}' appears more than once",
                    stage
                )));
            }
            for req in stage.requires() {
                if !earlier.contains(req) {
                    return Err(Error::PipelineError(format!(
                        "Stage '{}' requires '{}' to run first",
                        stage, req
                    )));
                }
            }
        }
        Ok(Self { stages })
    }

    /// source → imports → build → test → package → package_id
    pub fn standard() -> Self {
        Self {
            stages: StageKind::all().to_vec(),
        }
    }

    /// The standard pipeline without the given stage
    pub fn without(stage: StageKind) -> Result<Self> {
        Self::new(
            StageKind::all()
                .iter()
                .copied()
                .filter(|s| *s != stage)
                .collect(),
        )
    }

    pub fn stages(&self) -> &[StageKind] {
        &self.stages
    }

    /// Run every stage in order
    pub fn run(&self, kitchen: &Kitchen, ctx: &PipelineContext<'_>) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();
        let start = Instant::now();
        info!(
            "Running pipeline for {}: {}",
            ctx.recipe.reference(),
            self.stages
                .iter()
                .map(StageKind::name)
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        for stage in &self.stages {
            let stage_start = Instant::now();
            if stage.is_noop() {
                debug!("Stage: {} (nothing to do)", stage);
            } else {
                info!("Stage: {}", stage);
            }
            run_stage(*stage, kitchen, ctx, &mut report)?;
            report.completed.push(*stage);
            debug!("Stage {} complete in {:?}", stage, stage_start.elapsed());
        }

        info!("Pipeline complete in {:?}", start.elapsed());
        Ok(report)
    }
}

fn run_stage(
    stage: StageKind,
    kitchen: &Kitchen,
    ctx: &PipelineContext<'_>,
    report: &mut PipelineReport,
) -> Result<()> {
    match stage {
        StageKind::Source | StageKind::Imports => {}
        StageKind::Build => {
            report.build = Some(kitchen.build(ctx.recipe, ctx.options, ctx.settings)?);
        }
        StageKind::Test => {
            kitchen.build_test_package(ctx.recipe, ctx.settings)?;
            report.test = Some(kitchen.run_test_package(ctx.settings, ctx.host)?);
        }
        StageKind::Package => {
            let build = report.build.as_ref().ok_or_else(|| {
                Error::PipelineError("package stage has no build result".to_string())
            })?;
            report.artifact = Some(kitchen.package(ctx.recipe, build)?);
        }
        StageKind::PackageId => {
            let id = package_id(ctx.recipe, ctx.settings);
            info!("Package id: {}", id);
            report.package_id = Some(id);
        }
    }
    Ok(())
}
