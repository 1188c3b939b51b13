use crate::IdKind;
use serde::Serialize;

/// Ecosystem support claimed for a kind. A static reference annotation; it
/// does not inspect the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityAnalysis {
    pub databases: &'static [&'static str],
    pub languages: &'static [&'static str],
    pub web_standards: &'static [&'static str],
    pub apis: &'static [&'static str],
}

const RFC_DATABASES: &[&str] = &[
    "PostgreSQL (uuid)",
    "MySQL (BINARY(16))",
    "SQL Server (uniqueidentifier)",
    "Oracle (RAW(16))",
    "MongoDB",
    "SQLite",
];
const TEXT_DATABASES: &[&str] = &["PostgreSQL", "MySQL", "SQL Server", "MongoDB", "SQLite", "Redis"];
const COMMON_LANGUAGES: &[&str] = &["JavaScript", "TypeScript", "Python", "Java", "C#", "Go", "Rust"];
const COMMON_APIS: &[&str] = &["REST", "GraphQL", "gRPC"];

pub const fn compatibility(kind: IdKind) -> CompatibilityAnalysis {
    match kind {
        IdKind::UuidV1 | IdKind::UuidV4 | IdKind::UuidV5 => CompatibilityAnalysis {
            databases: RFC_DATABASES,
            languages: COMMON_LANGUAGES,
            web_standards: &["RFC 4122", "RFC 9562", "URN (RFC 8141)"],
            apis: COMMON_APIS,
        },
        IdKind::NanoId => CompatibilityAnalysis {
            databases: TEXT_DATABASES,
            languages: COMMON_LANGUAGES,
            web_standards: &["URL-safe (RFC 3986)"],
            apis: &["REST", "GraphQL"],
        },
        IdKind::ShortId => CompatibilityAnalysis {
            databases: TEXT_DATABASES,
            languages: &["JavaScript", "Python", "Go", "Rust"],
            web_standards: &["URL-safe (RFC 3986)"],
            apis: &["REST"],
        },
        IdKind::Ulid => CompatibilityAnalysis {
            databases: TEXT_DATABASES,
            languages: COMMON_LANGUAGES,
            web_standards: &["ULID", "Crockford Base32"],
            apis: COMMON_APIS,
        },
        IdKind::Custom => CompatibilityAnalysis {
            databases: &["Any text column"],
            languages: &["Any"],
            web_standards: &[],
            apis: &["REST"],
        },
    }
}
