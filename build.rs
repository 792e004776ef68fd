// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Recipe selection
fn recipe_args() -> [Arg; 1] {
    [Arg::new("recipe")
        .long("recipe")
        .value_name("PATH")
        .help("Recipe file (TOML); the built-in Backport recipe is used if omitted")]
}

/// Target platform settings; each defaults to the host's value
fn settings_args() -> [Arg; 4] {
    [
        Arg::new("os")
            .long("os")
            .help("Target operating system (Windows, Linux, Macos, Android, ...)"),
        Arg::new("compiler")
            .long("compiler")
            .help("Compiler identity (gcc, clang, apple-clang, msvc, ...)"),
        Arg::new("arch")
            .long("arch")
            .help("Target architecture (x86_64, x86, armv8, ...)"),
        Arg::new("build_type")
            .long("build-type")
            .help("Build configuration"),
    ]
}

/// Directory layout and build tool
fn kitchen_args() -> [Arg; 7] {
    [
        Arg::new("source_dir")
            .long("source-dir")
            .default_value(".")
            .help("Package source root (holds CMakeLists.txt and LICENSE)"),
        Arg::new("build_dir")
            .long("build-dir")
            .help("Build directory (default: <source>/build)"),
        Arg::new("package_dir")
            .long("package-dir")
            .help("Package output directory (default: <source>/package)"),
        Arg::new("test_package_dir")
            .long("test-package-dir")
            .help("Consumer test project (default: <source>/.conan/test_package)"),
        Arg::new("cmake")
            .long("cmake")
            .env("BACKPORT_CMAKE")
            .default_value("cmake")
            .help("CMake executable"),
        Arg::new("generator")
            .short('G')
            .long("generator")
            .help("CMake generator (e.g. Ninja)"),
        Arg::new("jobs")
            .short('j')
            .long("jobs")
            .help("Number of parallel build jobs (default: auto)"),
    ]
}

/// Build options and definitions
fn option_args() -> [Arg; 3] {
    [
        Arg::new("unit_tests")
            .long("unit-tests")
            .action(ArgAction::SetTrue)
            .help("Compile the library's unit tests"),
        Arg::new("defines")
            .short('D')
            .long("define")
            .action(ArgAction::Append)
            .help("Extra CMake definition, KEY=VALUE (repeatable)"),
        Arg::new("options")
            .short('o')
            .long("option")
            .action(ArgAction::Append)
            .help("Recipe option, KEY=VALUE (repeatable)"),
    ]
}

fn build_cli() -> Command {
    Command::new("backport-recipe")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Backport Contributors")
        .about("Build, test and package the Backport header-only library")
        .subcommand_required(true)
        .subcommand(
            Command::new("info")
                .about("Show the recipe's package metadata")
                .args(recipe_args()),
        )
        .subcommand(
            Command::new("validate")
                .about("Validate a recipe and check its export patterns")
                .args(recipe_args())
                .arg(
                    Arg::new("source_dir")
                        .long("source-dir")
                        .help("Source tree to check export patterns against"),
                ),
        )
        .subcommand(
            Command::new("build")
                .about("Configure and compile the library")
                .args(recipe_args())
                .args(settings_args())
                .args(kitchen_args())
                .args(option_args()),
        )
        .subcommand(
            Command::new("test")
                .about("Build the test package and run it when the target platform allows")
                .args(recipe_args())
                .args(settings_args())
                .args(kitchen_args()),
        )
        .subcommand(
            Command::new("package")
                .about("Build and install the package layout")
                .args(recipe_args())
                .args(settings_args())
                .args(kitchen_args())
                .args(option_args()),
        )
        .subcommand(
            Command::new("create")
                .about("Run the whole lifecycle: source, imports, build, test, package, package_id")
                .args(recipe_args())
                .args(settings_args())
                .args(kitchen_args())
                .args(option_args())
                .arg(
                    Arg::new("skip_tests")
                        .long("skip-tests")
                        .action(ArgAction::SetTrue)
                        .help("Skip the test stage"),
                ),
        )
        .subcommand(
            Command::new("package-id")
                .about("Print the package's binary-compatibility id")
                .args(recipe_args())
                .args(settings_args()),
        )
        .subcommand(
            Command::new("docs")
                .about("Generate documentation with Doxygen")
                .arg(
                    Arg::new("doxygen")
                        .long("doxygen")
                        .env("BACKPORT_DOXYGEN")
                        .default_value("doxygen")
                        .help("Doxygen executable"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("backport-recipe.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
