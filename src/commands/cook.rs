// src/commands/cook.rs

//! Lifecycle commands - build, test, package and create

use super::{build_options, kitchen_config, load_recipe, resolve_settings};
use crate::cli::{KitchenArgs, OptionArgs, RecipeArgs, SettingsArgs};
use anyhow::{Context, Result};
use backport_recipe::pipeline::{Pipeline, PipelineContext, PipelineReport, StageKind};
use backport_recipe::{BuildOptions, Kitchen, PlatformTriple, TestOutcome};
use tracing::info;

/// Configure and compile the library
pub fn cmd_build(
    recipe: &RecipeArgs,
    settings: &SettingsArgs,
    kitchen: &KitchenArgs,
    options: &OptionArgs,
) -> Result<()> {
    let stages = vec![StageKind::Source, StageKind::Imports, StageKind::Build];
    let report = run_pipeline(stages, recipe, settings, kitchen, &build_options(options))?;

    if let Some(build) = &report.build {
        println!("[COMPLETE] Built in {}", build.build_dir.display());
        if build.built_unit_tests() {
            println!("  - Unit tests compiled");
        }
    }
    Ok(())
}

/// Build the test package and run it if the target platform allows
pub fn cmd_test(recipe: &RecipeArgs, settings: &SettingsArgs, kitchen: &KitchenArgs) -> Result<()> {
    let recipe = load_recipe(recipe)?;
    let host = PlatformTriple::host();
    let target = resolve_settings(settings, &host);
    let kitchen = Kitchen::new(kitchen_config(kitchen)?);

    kitchen
        .build_test_package(&recipe, &target)
        .with_context(|| format!("Failed to build test package for {}", recipe.reference()))?;
    let outcome = kitchen
        .run_test_package(&target, &host)
        .context("Test package failed")?;

    print_test_outcome(&outcome);
    Ok(())
}

/// Build and install the package layout
pub fn cmd_package(
    recipe: &RecipeArgs,
    settings: &SettingsArgs,
    kitchen: &KitchenArgs,
    options: &OptionArgs,
) -> Result<()> {
    let stages = vec![
        StageKind::Source,
        StageKind::Imports,
        StageKind::Build,
        StageKind::Package,
        StageKind::PackageId,
    ];
    let report = run_pipeline(stages, recipe, settings, kitchen, &build_options(options))?;
    print_package(&report);
    Ok(())
}

/// Run the whole lifecycle
pub fn cmd_create(
    recipe: &RecipeArgs,
    settings: &SettingsArgs,
    kitchen: &KitchenArgs,
    options: &OptionArgs,
    skip_tests: bool,
) -> Result<()> {
    let stages = if skip_tests {
        Pipeline::without(StageKind::Test)?.stages().to_vec()
    } else {
        Pipeline::standard().stages().to_vec()
    };
    let report = run_pipeline(stages, recipe, settings, kitchen, &build_options(options))?;

    if let Some(outcome) = &report.test {
        print_test_outcome(outcome);
    }
    print_package(&report);
    Ok(())
}

fn run_pipeline(
    stages: Vec<StageKind>,
    recipe: &RecipeArgs,
    settings: &SettingsArgs,
    kitchen: &KitchenArgs,
    options: &BuildOptions,
) -> Result<PipelineReport> {
    let recipe = load_recipe(recipe)?;
    let host = PlatformTriple::host();
    let target = resolve_settings(settings, &host);
    let kitchen = Kitchen::new(kitchen_config(kitchen)?);
    let pipeline = Pipeline::new(stages)?;

    println!("Recipe: {} ({})", recipe.reference(), target);
    let ctx = PipelineContext {
        recipe: &recipe,
        options,
        settings: &target,
        host: &host,
    };
    let report = pipeline
        .run(&kitchen, &ctx)
        .with_context(|| format!("Failed to create {}", recipe.reference()))?;

    info!(
        "Completed stages: {}",
        report
            .completed
            .iter()
            .map(StageKind::name)
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(report)
}

fn print_test_outcome(outcome: &TestOutcome) {
    match outcome {
        TestOutcome::Passed { binary } => println!("[OK] Test package passed: {}", binary.display()),
        TestOutcome::Skipped { reason, .. } => println!("[SKIPPED] {}", reason),
    }
}

fn print_package(report: &PipelineReport) {
    if let Some(artifact) = &report.artifact {
        println!(
            "\n[COMPLETE] Packaged: {} ({} files)",
            artifact.root.display(),
            artifact.files.len()
        );
        for file in &artifact.files {
            println!("  - {}", file.display());
        }
    }
    if let Some(id) = &report.package_id {
        println!("Package id: {}", id);
    }
}
