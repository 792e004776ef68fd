// src/recipe/kitchen/cmake.rs

//! Command lines for the CMake build-system generator

use super::config::KitchenConfig;
use super::options::BuildOptions;
use super::runner::Invocation;
use crate::settings::BuildType;
use std::path::Path;

/// Target that compiles and runs the library's unit tests
pub const UNIT_TEST_TARGET: &str = "test";

/// Builds CMake invocations for one build type
pub(crate) struct CMake<'a> {
    config: &'a KitchenConfig,
    build_type: BuildType,
}

impl<'a> CMake<'a> {
    pub(crate) fn new(config: &'a KitchenConfig, build_type: BuildType) -> Self {
        Self { config, build_type }
    }

    /// `cmake -S <source> -B <build> [-G ..] -DCMAKE_BUILD_TYPE=.. -D..`
    pub(crate) fn configure(
        &self,
        source_dir: &Path,
        build_dir: &Path,
        options: &BuildOptions,
    ) -> Invocation {
        let mut inv = Invocation::new(&self.config.cmake, build_dir)
            .arg("-S")
            .arg(source_dir)
            .arg("-B")
            .arg(build_dir);
        if let Some(generator) = &self.config.generator {
            inv = inv.arg("-G").arg(generator);
        }
        inv.arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type))
            .args(options.definition_args())
    }

    /// `cmake --build <build> --config <type> [--target ..] --parallel N`
    pub(crate) fn build(&self, build_dir: &Path, target: Option<&str>) -> Invocation {
        let mut inv = Invocation::new(&self.config.cmake, build_dir)
            .arg("--build")
            .arg(build_dir)
            .arg("--config")
            .arg(self.build_type.as_str());
        if let Some(target) = target {
            inv = inv.arg("--target").arg(target);
        }
        inv.arg("--parallel").arg(self.config.jobs.max(1).to_string())
    }

    /// `cmake --install <build> --config <type> --prefix <prefix>`
    pub(crate) fn install(&self, build_dir: &Path, prefix: &Path) -> Invocation {
        Invocation::new(&self.config.cmake, build_dir)
            .arg("--install")
            .arg(build_dir)
            .arg("--config")
            .arg(self.build_type.as_str())
            .arg("--prefix")
            .arg(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config() -> KitchenConfig {
        KitchenConfig {
            jobs: 4,
            ..KitchenConfig::for_source(Path::new("/src"))
        }
    }

    #[test]
    fn test_configure_command() {
        let config = config();
        let cmake = CMake::new(&config, BuildType::Release);
        let inv = cmake.configure(
            &config.source_dir,
            &config.build_dir,
            &BuildOptions::with_unit_tests(true),
        );
        assert_eq!(
            inv.command_line(),
            "cmake -S /src -B /src/build -DCMAKE_BUILD_TYPE=Release -DBACKPORT_COMPILE_UNIT_TESTS=ON"
        );
        assert_eq!(inv.cwd, PathBuf::from("/src/build"));
    }

    #[test]
    fn test_configure_with_generator() {
        let config = KitchenConfig {
            generator: Some("Ninja".to_string()),
            ..config()
        };
        let cmake = CMake::new(&config, BuildType::Debug);
        let inv = cmake.configure(&config.source_dir, &config.build_dir, &BuildOptions::new());
        assert_eq!(
            inv.command_line(),
            "cmake -S /src -B /src/build -G Ninja -DCMAKE_BUILD_TYPE=Debug"
        );
    }

    #[test]
    fn test_build_commands() {
        let config = config();
        let cmake = CMake::new(&config, BuildType::Release);
        assert_eq!(
            cmake.build(&config.build_dir, None).command_line(),
            "cmake --build /src/build --config Release --parallel 4"
        );
        assert_eq!(
            cmake
                .build(&config.build_dir, Some(UNIT_TEST_TARGET))
                .command_line(),
            "cmake --build /src/build --config Release --target test --parallel 4"
        );
    }

    #[test]
    fn test_install_command() {
        let config = config();
        let cmake = CMake::new(&config, BuildType::Release);
        assert_eq!(
            cmake
                .install(&config.build_dir, Path::new("/stage"))
                .command_line(),
            "cmake --install /src/build --config Release --prefix /stage"
        );
    }
}
