// crates/ibpctl-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for localized status output.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The ibpctl CLI stores user-facing strings in a small translation catalog to
//! keep status lines consistent across locales. All runtime output should be
//! routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries loaded into the localized message bundle.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "ibpctl {version}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    (
        "usage.line",
        "Usage: ibpctl --config <PATH> [--spec <PATH>] [--lang <LANG>] [--audit-log <PATH>] \
         <COMMAND> [ARGS...]",
    ),
    ("usage.commands", "Commands:"),
    ("usage.options", "Options:"),
    ("usage.option.config", "Network profile file (YAML or JSON)"),
    ("usage.option.spec", "Operation specification file (JSON)"),
    ("usage.option.lang", "Output language: en or ca"),
    ("usage.option.audit_log", "Append JSON audit events to PATH ('-' for stderr)"),
    ("usage.option.help", "Print this help and exit"),
    ("usage.option.version", "Print version information and exit"),
    ("usage.error", "Usage error: {error}"),
    ("usage.parse_failed", "Invalid arguments: {error}"),
    ("command.summary.init", "Register and enroll the organization admin"),
    ("command.summary.enroll", "Enroll a user identity"),
    ("command.summary.cc_deploy", "Install chaincode on the organization peers"),
    ("command.summary.cc_instantiate", "Instantiate chaincode on a channel"),
    ("command.summary.cc_upgrade", "Upgrade chaincode on a channel"),
    ("command.summary.cc_query", "Query chaincode (not implemented)"),
    ("command.summary.cc_invoke", "Invoke chaincode (not implemented)"),
    ("command.summary.add_admin_cert", "Install an admin certificate on a peer"),
    ("command.summary.spec_gen", "Print a specification template for a command"),
    ("audit.open_failed", "Failed to open audit log {path}: {error}"),
    ("dispatch.failed", "Error in {verb}: {error}"),
    (
        "dispatch.partial",
        "Admin certificate installation stopped partway; completed steps remain in effect.",
    ),
    ("outcome.admin_enrolled", "Admin identity enrolled."),
    ("outcome.user_enrolled", "User {user_id} enrolled."),
    ("outcome.cc_installed", "Chaincode {cc_id} version {version} installed."),
    (
        "outcome.cc_instantiated",
        "Chaincode {cc_id} version {version} instantiated on channel {channel}.",
    ),
    ("outcome.cc_upgraded", "Chaincode {cc_id} version {version} upgraded on channel {channel}."),
    ("outcome.admin_cert_installed", "Admin certificate installed ({steps})."),
    ("spec_gen.none", "No specification template for {verb}."),
];

/// Static Catalan catalog entries loaded into the localized message bundle.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "ibpctl {version}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    (
        "usage.line",
        "Ús: ibpctl --config <RUTA> [--spec <RUTA>] [--lang <IDIOMA>] [--audit-log <RUTA>] \
         <ORDRE> [ARGUMENTS...]",
    ),
    ("usage.commands", "Ordres:"),
    ("usage.options", "Opcions:"),
    ("usage.option.config", "Fitxer de perfil de xarxa (YAML o JSON)"),
    ("usage.option.spec", "Fitxer d'especificació de l'operació (JSON)"),
    ("usage.option.lang", "Idioma de sortida: en o ca"),
    ("usage.option.audit_log", "Afegeix esdeveniments d'auditoria JSON a RUTA ('-' per a stderr)"),
    ("usage.option.help", "Mostra aquesta ajuda i surt"),
    ("usage.option.version", "Mostra la informació de versió i surt"),
    ("usage.error", "Error d'ús: {error}"),
    ("usage.parse_failed", "Arguments no vàlids: {error}"),
    ("command.summary.init", "Registra i inscriu l'administrador de l'organització"),
    ("command.summary.enroll", "Inscriu una identitat d'usuari"),
    ("command.summary.cc_deploy", "Instal·la chaincode als peers de l'organització"),
    ("command.summary.cc_instantiate", "Instancia chaincode en un canal"),
    ("command.summary.cc_upgrade", "Actualitza chaincode en un canal"),
    ("command.summary.cc_query", "Consulta chaincode (no implementat)"),
    ("command.summary.cc_invoke", "Invoca chaincode (no implementat)"),
    ("command.summary.add_admin_cert", "Instal·la un certificat d'administrador en un peer"),
    ("command.summary.spec_gen", "Mostra una plantilla d'especificació per a una ordre"),
    ("audit.open_failed", "No s'ha pogut obrir el registre d'auditoria {path}: {error}"),
    ("dispatch.failed", "Error a {verb}: {error}"),
    (
        "dispatch.partial",
        "La instal·lació del certificat d'administrador s'ha aturat a mig camí; els passos \
         completats continuen en vigor.",
    ),
    ("outcome.admin_enrolled", "Identitat d'administrador inscrita."),
    ("outcome.user_enrolled", "Usuari {user_id} inscrit."),
    ("outcome.cc_installed", "Chaincode {cc_id} versió {version} instal·lat."),
    (
        "outcome.cc_instantiated",
        "Chaincode {cc_id} versió {version} instanciat al canal {channel}.",
    ),
    ("outcome.cc_upgraded", "Chaincode {cc_id} versió {version} actualitzat al canal {channel}."),
    ("outcome.admin_cert_installed", "Certificat d'administrador instal·lat ({steps})."),
    ("spec_gen.none", "No hi ha cap plantilla d'especificació per a {verb}."),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

/// Returns the raw catalog entries for the requested locale.
#[cfg(test)]
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
