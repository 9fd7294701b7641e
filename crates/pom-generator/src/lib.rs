//! # pomsynth-generator
//!
//! Converts a directory tree of compiled archives (`.jar`, `.zip`) into a
//! synthetic Maven project descriptor (`pom.xml`).
//!
//! Each archive is identified either by an external SBOM scanner (syft-compatible,
//! structured `pkg:maven/...` purls) or by its file name (placeholder group and
//! version). Coordinates are classified into `compile` / `test` scope by path,
//! deduplicated by `groupId:artifactId` (first seen wins), and serialized in
//! discovery order.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`GeneratorError`, `ExtractionError`)
//! - [`config`]: Generator configuration (`GeneratorConfig`, builder)
//! - [`types`]: Domain types (`Coordinate`, `Scope`, `Dependency`, `ArtifactRecord`)
//! - [`discover`]: Recursive archive discovery (`ArchiveDetector`, `discover_archives`)
//! - [`identify`]: Identification sources (`ArtifactIdentifier` trait, `ScannerIdentifier`, `FilenameIdentifier`)
//! - [`extract`]: Coordinate extraction (`CoordinateExtractor` trait, `PurlExtractor`, `FilenameExtractor`)
//! - [`scope`]: Path-based scope classification
//! - [`dedup`]: Ordered deduplicating accumulator (`DependencySet`)
//! - [`pom`]: Descriptor serialization
//! - [`generator`]: Main orchestrator (`PomGenerator`, `PomGeneratorBuilder`)
//!
//! # Architecture
//!
//! ```text
//! scan root --> discover_archives --> ArtifactIdentifier --> ArtifactRecord
//!                                      (syft | filename)          |
//!                                                          CoordinateExtractor
//!                                                           (purl | filename)
//!                                                                 |
//!                                              scope::classify -> Dependency
//!                                                                 |
//!                                                           DependencySet
//!                                                                 |
//!                                                 pom::render --> <name>.tmp --> rename
//! ```

pub mod config;
pub mod dedup;
pub mod discover;
pub mod error;
pub mod extract;
pub mod generator;
pub mod identify;
pub mod pom;
pub mod scope;
pub mod types;

// --- Public API Re-exports ---

// Generator (main orchestrator)
pub use generator::{
    GenerationOutcome, GenerationReport, PomGenerator, PomGeneratorBuilder, SkippedArtifact,
};

// Configuration
pub use config::{GeneratorConfig, GeneratorConfigBuilder, IdentifierMode};

// Error
pub use error::{ExtractionError, GeneratorError};

// Types
pub use types::{
    ArtifactRecord, Coordinate, Dependency, Identification, ProjectIdentity, Scope,
    ScannerMetadata,
};

// Discovery
pub use discover::{ArchiveDetector, WalkOptions, discover_archives};

// Identification
pub use identify::{
    ArtifactIdentifier, FilenameIdentifier, Identifier, ScannerIdentifier, parse_scanner_output,
};

// Extraction
pub use extract::purl::parse_maven_purl;
pub use extract::{CoordinateExtractor, Extractors, FilenameExtractor, PurlExtractor};

// Dedup
pub use dedup::DependencySet;
