use anyhow::bail;
use clap::{ArgAction, Parser};
use idforge::{
    CasePolicy, ExportFormat, FilterCriteria, GenerationSettings, IdFormat, IdKind, SortOrder,
    ValidationIssue,
};
use std::path::PathBuf;

/// Runtime configuration for the `idforge` binary.
///
/// Every option can also be set through its environment variable, and a
/// `.env` file in the working directory is loaded first.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "idforge",
    version,
    about = "Generate, analyse and export batches of identifiers"
)]
pub struct CliArgs {
    /// Identifier kind: uuid_v1, uuid_v4, uuid_v5, nanoid, shortid, ulid or
    /// custom. Unrecognised kinds fall back to uuid_v4.
    ///
    /// Environment variable: `IDFORGE_KIND`
    #[arg(long, env = "IDFORGE_KIND", default_value_t = String::from("uuid_v4"))]
    pub kind: String,

    /// Number of identifiers to generate.
    ///
    /// Environment variable: `IDFORGE_COUNT`
    #[arg(short = 'n', long, env = "IDFORGE_COUNT", default_value_t = idforge::DEFAULT_COUNT)]
    pub count: usize,

    /// Identifiers generated between two yield points. Pause and cancel take
    /// effect at chunk boundaries.
    ///
    /// Environment variable: `IDFORGE_CHUNK_SIZE`
    #[arg(long, env = "IDFORGE_CHUNK_SIZE", default_value_t = idforge::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Output format: standard, compact, braced, urn, base64 or hex.
    ///
    /// Environment variable: `IDFORGE_FORMAT`
    #[arg(long, env = "IDFORGE_FORMAT", default_value_t = IdFormat::Standard)]
    pub format: IdFormat,

    /// Case policy: upper, lower or preserve.
    ///
    /// Environment variable: `IDFORGE_CASE`
    #[arg(long, env = "IDFORGE_CASE", default_value_t = CasePolicy::Preserve)]
    pub case: CasePolicy,

    /// Prepended to every value after formatting.
    #[arg(long, env = "IDFORGE_PREFIX", default_value_t = String::new())]
    pub prefix: String,

    /// Appended to every value after formatting.
    #[arg(long, env = "IDFORGE_SUFFIX", default_value_t = String::new())]
    pub suffix: String,

    /// Alphabet for the custom kind.
    #[arg(long, env = "IDFORGE_CUSTOM_ALPHABET")]
    pub custom_alphabet: Option<String>,

    /// Length for the custom kind; overrides the default length of nanoid and
    /// shortid.
    #[arg(long, env = "IDFORGE_CUSTOM_LENGTH")]
    pub custom_length: Option<usize>,

    /// Namespace for uuid_v5: a UUID, or any string to hash into one.
    #[arg(long, env = "IDFORGE_NAMESPACE")]
    pub namespace: Option<String>,

    /// Attach a structure, security, quality and compatibility analysis.
    #[arg(long, env = "IDFORGE_ANALYSIS", default_value_t = true, action = ArgAction::Set)]
    pub analysis: bool,

    /// Attach entropy and collision metadata.
    #[arg(long, env = "IDFORGE_METADATA", default_value_t = true, action = ArgAction::Set)]
    pub metadata: bool,

    /// Check every value against its kind's layout.
    #[arg(long, env = "IDFORGE_VALIDATE", default_value_t = true, action = ArgAction::Set)]
    pub validate: bool,

    /// Count duplicate values in the statistics.
    #[arg(long, env = "IDFORGE_TRACK_DUPLICATES", default_value_t = true, action = ArgAction::Set)]
    pub track_duplicates: bool,

    /// Export format: json, csv, xml or text.
    ///
    /// Environment variable: `IDFORGE_EXPORT`
    #[arg(long, env = "IDFORGE_EXPORT", default_value_t = ExportFormat::Json)]
    pub export: ExportFormat,

    /// Export order: generated, value_asc, value_desc, quality_desc,
    /// security_desc or length_asc.
    #[arg(long, env = "IDFORGE_SORT", default_value_t = SortOrder::Generated)]
    pub sort: SortOrder,

    /// Only export identifiers with at least this quality score.
    #[arg(long, env = "IDFORGE_MIN_QUALITY")]
    pub min_quality: Option<f64>,

    /// Only export identifiers with at least this security score.
    #[arg(long, env = "IDFORGE_MIN_SECURITY")]
    pub min_security: Option<u32>,

    /// Leave invalid identifiers out of the export.
    #[arg(long, env = "IDFORGE_VALID_ONLY", default_value_t = false)]
    pub valid_only: bool,

    /// Write the export here instead of stdout. A directory receives the
    /// suggested filename.
    #[arg(short, long, env = "IDFORGE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Job name, used in reports and the suggested filename.
    #[arg(long, env = "IDFORGE_NAME", default_value_t = String::from("batch"))]
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub name: String,
    pub settings: GenerationSettings,
    pub output: Option<PathBuf>,
    /// Validation warnings, logged once telemetry is up.
    pub warnings: Vec<ValidationIssue>,
    /// Set when the requested kind was not recognised.
    pub unknown_kind: Option<String>,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if let Some(min) = args.min_quality {
            if !(0.0..=100.0).contains(&min) {
                bail!("IDFORGE_MIN_QUALITY must be between 0 and 100, got {min}");
            }
        }

        let kind = IdKind::from_tag(&args.kind);
        let normalized = args.kind.trim().to_ascii_lowercase().replace('-', "_");
        let unknown_kind = (kind.as_str() != normalized).then(|| args.kind.clone());

        let settings = GenerationSettings {
            kind,
            count: args.count,
            format: args.format,
            case: args.case,
            chunk_size: args.chunk_size,
            custom_alphabet: args.custom_alphabet,
            custom_length: args.custom_length,
            namespace: args.namespace,
            include_metadata: args.metadata,
            include_analysis: args.analysis,
            validate: args.validate,
            track_duplicates: args.track_duplicates,
            prefix: args.prefix,
            suffix: args.suffix,
            filter: FilterCriteria {
                min_quality: args.min_quality,
                min_security: args.min_security,
                kinds: Vec::new(),
                valid_only: args.valid_only,
            },
            sort: args.sort,
            export_format: args.export,
        };

        let report = idforge::validate(&settings);
        if !report.is_valid() {
            bail!("Invalid settings: {}", report.summary());
        }

        Ok(Self {
            name: args.name,
            settings,
            output: args.output,
            warnings: report.warnings,
            unknown_kind,
        })
    }
}
