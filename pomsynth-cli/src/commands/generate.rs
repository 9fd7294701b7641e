//! `pomsynth generate` command handler

use std::collections::BTreeSet;
use std::io::Write;

use serde::Serialize;
use tracing::{debug, info};

use pomsynth_core::config::PomsynthConfig;
use pomsynth_generator::{GenerationOutcome, GenerationReport, GeneratorConfig, PomGenerator};

use crate::cli::GenerateArgs;
use crate::commands::ConfigSource;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `generate` command.
pub async fn execute(
    args: GenerateArgs,
    source: &ConfigSource,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let mut config = source.load().await?;
    let report = run(&mut config, &args).await?;
    writer.render(&report)?;
    Ok(())
}

/// Apply argument overrides, validate, and run one generation.
///
/// "Nothing to write" outcomes are reported, not returned as errors.
pub async fn run(
    config: &mut PomsynthConfig,
    args: &GenerateArgs,
) -> Result<GenerateReport, CliError> {
    apply_overrides(config, args);
    config.validate()?;

    let generator_config = GeneratorConfig::from_core(config);
    debug!(?generator_config, "effective generator configuration");

    let generator = PomGenerator::builder().config(generator_config).build()?;
    let report = generator.run().await?;

    info!(
        archives = report.discovered,
        dependencies = report.dependencies.len(),
        skipped = report.skipped.len(),
        "generate command finished"
    );

    Ok(GenerateReport::from(&report))
}

/// Layer command-line arguments on top of file and env values.
pub fn apply_overrides(config: &mut PomsynthConfig, args: &GenerateArgs) {
    if let Some(ref root) = args.root {
        config.scan.root = root.display().to_string();
    }
    if let Some(ref out) = args.out {
        config.output.path = out.display().to_string();
    }
    if let Some(mode) = args.mode {
        config.scanner.mode = mode.as_config_str().to_owned();
    }
    if let Some(ref command) = args.scanner_command {
        config.scanner.command = command.clone();
    }
    if let Some(secs) = args.timeout_secs {
        config.scanner.timeout_secs = secs;
    }
    if args.fallback_to_filename {
        config.scanner.fallback_to_filename = true;
    }
}

/// How a `generate` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Written,
    NoArtifacts,
    NoCoordinates,
}

/// Result of one `generate` run.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub archives_discovered: usize,
    /// Distinct archives that contributed at least one skip
    pub archives_skipped: usize,
    pub dependencies_written: usize,
    pub duplicates: usize,
    pub dependencies: Vec<DependencyRow>,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug, Serialize)]
pub struct DependencyRow {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub scope: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SkippedRow {
    pub path: String,
    pub reason: &'static str,
    pub detail: String,
}

impl From<&GenerationReport> for GenerateReport {
    fn from(report: &GenerationReport) -> Self {
        let (status, output_path) = match &report.outcome {
            GenerationOutcome::Written { path } => {
                (ReportStatus::Written, Some(path.display().to_string()))
            }
            GenerationOutcome::NoArtifacts => (ReportStatus::NoArtifacts, None),
            GenerationOutcome::NoCoordinates => (ReportStatus::NoCoordinates, None),
        };

        let archives_skipped = report
            .skipped
            .iter()
            .map(|s| s.path.as_path())
            .collect::<BTreeSet<_>>()
            .len();

        let dependencies: Vec<DependencyRow> = report
            .dependencies
            .iter()
            .map(|d| DependencyRow {
                group_id: d.coordinate.group_id().to_owned(),
                artifact_id: d.coordinate.artifact_id().to_owned(),
                version: d.coordinate.version().to_owned(),
                scope: d.scope.as_str(),
            })
            .collect();

        let skipped = report
            .skipped
            .iter()
            .map(|s| SkippedRow {
                path: s.path.display().to_string(),
                reason: s.reason,
                detail: s.detail.clone(),
            })
            .collect();

        Self {
            status,
            output_path,
            archives_discovered: report.discovered,
            archives_skipped,
            dependencies_written: dependencies.len(),
            duplicates: report.duplicates,
            dependencies,
            skipped,
        }
    }
}

impl Render for GenerateReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        match self.status {
            ReportStatus::NoArtifacts => {
                writeln!(w, "{}", "no artifacts found".yellow().bold())?;
                return Ok(());
            }
            ReportStatus::NoCoordinates => {
                writeln!(
                    w,
                    "{} ({} archives discovered, none produced a coordinate)",
                    "no usable coordinates".yellow().bold(),
                    self.archives_discovered
                )?;
                self.render_skipped(w)?;
                return Ok(());
            }
            ReportStatus::Written => {}
        }

        if let Some(ref path) = self.output_path {
            writeln!(w, "Descriptor written: {}", path.bold())?;
        }
        writeln!(
            w,
            "  Dependencies written: {}",
            self.dependencies_written.to_string().green().bold()
        )?;
        writeln!(w, "  Archives discovered:  {}", self.archives_discovered)?;
        writeln!(w, "  Archives skipped:     {}", self.archives_skipped)?;
        if self.duplicates > 0 {
            writeln!(w, "  Duplicates dropped:   {}", self.duplicates)?;
        }

        if !self.dependencies.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "  {:<30} {:<30} {:<15} {:<8}",
                "GROUP", "ARTIFACT", "VERSION", "SCOPE"
            )?;
            writeln!(w, "  {}", "-".repeat(86))?;
            for dep in &self.dependencies {
                let scope = match dep.scope {
                    "test" => dep.scope.cyan().to_string(),
                    other => other.to_owned(),
                };
                writeln!(
                    w,
                    "  {:<30} {:<30} {:<15} {:<8}",
                    dep.group_id, dep.artifact_id, dep.version, scope
                )?;
            }
        }

        self.render_skipped(w)
    }
}

impl GenerateReport {
    fn render_skipped(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        if self.skipped.is_empty() {
            return Ok(());
        }
        writeln!(w)?;
        writeln!(w, "  Skipped:")?;
        for s in &self.skipped {
            writeln!(
                w,
                "    {} [{}] {}",
                s.path,
                s.reason.yellow(),
                s.detail.dimmed()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pomsynth_generator::{Coordinate, Dependency, Scope, SkippedArtifact};

    use super::*;
    use crate::cli::ModeArg;

    fn dep(g: &str, a: &str, v: &str, scope: Scope) -> Dependency {
        Dependency::new(Coordinate::new(g, a, v).expect("valid coordinate"), scope)
    }

    fn skipped(path: &str, reason: &'static str) -> SkippedArtifact {
        SkippedArtifact {
            path: PathBuf::from(path),
            reason,
            detail: format!("{reason} detail"),
        }
    }

    fn written_report() -> GenerationReport {
        GenerationReport {
            outcome: GenerationOutcome::Written {
                path: PathBuf::from("out/pom.xml"),
            },
            discovered: 3,
            dependencies: vec![
                dep("org.apache.commons", "commons-lang3", "3.12.0", Scope::Compile),
                dep("org.mockito", "mockito-core", "4.5.1", Scope::Test),
            ],
            duplicates: 1,
            skipped: vec![
                skipped("libs/broken.jar", "invalid_purl"),
                skipped("libs/broken.jar", "empty_field"),
            ],
        }
    }

    fn rendered(report: &GenerateReport) -> String {
        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");
        String::from_utf8(buffer).expect("valid UTF-8")
    }

    #[test]
    fn test_apply_overrides_replaces_only_given_values() {
        let mut config = PomsynthConfig::default();
        let args = GenerateArgs {
            root: Some(PathBuf::from("/srv/artifacts")),
            out: None,
            mode: Some(ModeArg::Filename),
            scanner_command: None,
            timeout_secs: Some(5),
            fallback_to_filename: false,
        };

        apply_overrides(&mut config, &args);

        assert_eq!(config.scan.root, "/srv/artifacts");
        assert_eq!(config.output.path, "generated-pom.xml");
        assert_eq!(config.scanner.mode, "filename");
        assert_eq!(config.scanner.command, "syft");
        assert_eq!(config.scanner.timeout_secs, 5);
        assert!(!config.scanner.fallback_to_filename);
    }

    #[test]
    fn test_apply_overrides_fallback_flag_only_enables() {
        let mut config = PomsynthConfig::default();
        config.scanner.fallback_to_filename = true;

        apply_overrides(&mut config, &GenerateArgs::default());
        assert!(config.scanner.fallback_to_filename, "absent flag keeps file value");
    }

    #[test]
    fn test_report_counts_distinct_skipped_archives() {
        let report = GenerateReport::from(&written_report());
        assert_eq!(report.status, ReportStatus::Written);
        assert_eq!(report.output_path.as_deref(), Some("out/pom.xml"));
        assert_eq!(report.archives_discovered, 3);
        assert_eq!(report.archives_skipped, 1, "two skips on one archive");
        assert_eq!(report.dependencies_written, 2);
        assert_eq!(report.skipped.len(), 2);
    }

    #[test]
    fn test_render_text_written_summary() {
        let output = rendered(&GenerateReport::from(&written_report()));
        assert!(output.contains("out/pom.xml"));
        assert!(output.contains("Dependencies written"));
        assert!(output.contains("Archives discovered:  3"));
        assert!(output.contains("Archives skipped:     1"));
        assert!(output.contains("commons-lang3"));
        assert!(output.contains("mockito-core"));
        assert!(output.contains("libs/broken.jar"));
        assert!(output.contains("invalid_purl"));
    }

    #[test]
    fn test_render_text_no_artifacts() {
        let report = GenerationReport {
            outcome: GenerationOutcome::NoArtifacts,
            discovered: 0,
            dependencies: Vec::new(),
            duplicates: 0,
            skipped: Vec::new(),
        };
        let report = GenerateReport::from(&report);
        assert_eq!(report.status, ReportStatus::NoArtifacts);
        let output = rendered(&report);
        assert!(output.contains("no artifacts found"));
        assert!(!output.contains("Dependencies written"));
    }

    #[test]
    fn test_render_text_no_coordinates() {
        let report = GenerationReport {
            outcome: GenerationOutcome::NoCoordinates,
            discovered: 2,
            dependencies: Vec::new(),
            duplicates: 0,
            skipped: vec![
                skipped("a.jar", "scanner_failed"),
                skipped("b.jar", "scanner_timeout"),
            ],
        };
        let report = GenerateReport::from(&report);
        assert_eq!(report.status, ReportStatus::NoCoordinates);
        let output = rendered(&report);
        assert!(output.contains("no usable coordinates"));
        assert!(output.contains("a.jar"));
        assert!(output.contains("scanner_timeout"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = GenerateReport::from(&written_report());
        let json = serde_json::to_value(&report).expect("serialize");

        assert_eq!(json["status"], "written");
        assert_eq!(json["dependencies_written"], 2);
        assert_eq!(json["dependencies"][1]["scope"], "test");
        assert_eq!(json["dependencies"][0]["group_id"], "org.apache.commons");
        assert_eq!(json["skipped"][0]["reason"], "invalid_purl");
    }

    #[test]
    fn test_report_json_omits_path_when_not_written() {
        let report = GenerationReport {
            outcome: GenerationOutcome::NoArtifacts,
            discovered: 0,
            dependencies: Vec::new(),
            duplicates: 0,
            skipped: Vec::new(),
        };
        let json = serde_json::to_value(GenerateReport::from(&report)).expect("serialize");
        assert_eq!(json["status"], "no_artifacts");
        assert!(json.get("output_path").is_none());
    }
}
