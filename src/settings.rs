// src/settings.rs

//! Platform settings a build is configured for
//!
//! The four settings (os, compiler, arch, build type) are passed explicitly
//! into every stage instead of being read from process-wide state.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Target operating system, spelled the way package managers spell it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    WindowsStore,
    Linux,
    Macos,
    Android,
    Ios,
    WatchOs,
    TvOs,
    FreeBsd,
    SunOs,
    Aix,
    Emscripten,
    Neutrino,
    Arduino,
}

impl Os {
    const ALL: &'static [Os] = &[
        Self::Windows,
        Self::WindowsStore,
        Self::Linux,
        Self::Macos,
        Self::Android,
        Self::Ios,
        Self::WatchOs,
        Self::TvOs,
        Self::FreeBsd,
        Self::SunOs,
        Self::Aix,
        Self::Emscripten,
        Self::Neutrino,
        Self::Arduino,
    ];

    /// Canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::WindowsStore => "WindowsStore",
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::WatchOs => "watchOS",
            Self::TvOs => "tvOS",
            Self::FreeBsd => "FreeBSD",
            Self::SunOs => "SunOS",
            Self::Aix => "AIX",
            Self::Emscripten => "Emscripten",
            Self::Neutrino => "Neutrino",
            Self::Arduino => "Arduino",
        }
    }

    /// Whether binaries built for this OS can be executed by the test gate
    pub fn is_runnable(&self) -> bool {
        matches!(self, Self::Windows | Self::Linux | Self::Macos)
    }

    /// The OS this process is running on, if it has a known spelling
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Self::Windows),
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::Macos),
            "android" => Some(Self::Android),
            "ios" => Some(Self::Ios),
            "freebsd" => Some(Self::FreeBsd),
            "solaris" | "illumos" => Some(Self::SunOs),
            "aix" => Some(Self::Aix),
            "emscripten" => Some(Self::Emscripten),
            "nto" => Some(Self::Neutrino),
            _ => None,
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        // "macOS" and "Darwin" are common alternative spellings
        if s.eq_ignore_ascii_case("macos") || s.eq_ignore_ascii_case("darwin") {
            return Ok(Self::Macos);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|os| os.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::ParseError(format!("Unknown operating system: {}", s)))
    }
}

/// CMake build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// Canonical name, as passed to `CMAKE_BUILD_TYPE`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        [
            Self::Debug,
            Self::Release,
            Self::RelWithDebInfo,
            Self::MinSizeRel,
        ]
        .into_iter()
        .find(|bt| bt.as_str().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| Error::ParseError(format!("Unknown build type: {}", s)))
    }
}

/// The settings a package is built for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformTriple {
    pub os: Os,
    pub compiler: String,
    pub arch: String,
    pub build_type: BuildType,
}

impl PlatformTriple {
    /// Create settings from explicit values
    pub fn new(
        os: Os,
        compiler: impl Into<String>,
        arch: impl Into<String>,
        build_type: BuildType,
    ) -> Self {
        Self {
            os,
            compiler: compiler.into(),
            arch: arch.into(),
            build_type,
        }
    }

    /// Settings describing the executing machine
    ///
    /// Falls back to `Linux` when the host OS has no known spelling; the
    /// compiler is the platform's customary default.
    pub fn host() -> Self {
        let os = Os::host().unwrap_or(Os::Linux);
        let compiler = match os {
            Os::Windows | Os::WindowsStore => "msvc",
            Os::Macos | Os::Ios | Os::WatchOs | Os::TvOs => "apple-clang",
            Os::FreeBsd => "clang",
            _ => "gcc",
        };
        Self::new(os, compiler, host_arch(), BuildType::Release)
    }

    /// Whether this target differs from the given host in operating system
    pub fn is_cross(&self, host: &PlatformTriple) -> bool {
        self.os != host.os
    }
}

impl fmt::Display for PlatformTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "os={} compiler={} arch={} build_type={}",
            self.os, self.compiler, self.arch, self.build_type
        )
    }
}

fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "aarch64" => "armv8",
        "arm" => "armv7",
        "x86" => "x86",
        "powerpc64" => "ppc64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_parsing_is_case_insensitive() {
        assert_eq!("linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("Macos".parse::<Os>().unwrap(), Os::Macos);
        assert_eq!("macOS".parse::<Os>().unwrap(), Os::Macos);
        assert_eq!("IOS".parse::<Os>().unwrap(), Os::Ios);
        assert_eq!("Android".parse::<Os>().unwrap(), Os::Android);
        assert!("Plan9".parse::<Os>().is_err());
    }

    #[test]
    fn test_runnable_set() {
        let runnable: Vec<Os> = Os::ALL.iter().copied().filter(Os::is_runnable).collect();
        assert_eq!(runnable, vec![Os::Windows, Os::Linux, Os::Macos]);
    }

    #[test]
    fn test_build_type_parsing() {
        assert_eq!("release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert_eq!(
            "RelWithDebInfo".parse::<BuildType>().unwrap(),
            BuildType::RelWithDebInfo
        );
        assert!("Fast".parse::<BuildType>().is_err());
        assert_eq!(BuildType::default(), BuildType::Release);
    }

    #[test]
    fn test_cross_detection() {
        let host = PlatformTriple::new(Os::Linux, "gcc", "x86_64", BuildType::Release);
        let android = PlatformTriple::new(Os::Android, "clang", "armv8", BuildType::Release);
        let arm_linux = PlatformTriple::new(Os::Linux, "gcc", "armv8", BuildType::Debug);
        assert!(android.is_cross(&host));
        assert!(!arm_linux.is_cross(&host));
    }

    #[test]
    fn test_display() {
        let settings = PlatformTriple::new(Os::Linux, "gcc", "x86_64", BuildType::Release);
        assert_eq!(
            settings.to_string(),
            "os=Linux compiler=gcc arch=x86_64 build_type=Release"
        );
    }
}
