use encoding_rs::Encoding;

use crate::sync::{PassReport, PreferenceStore, Synchronizer};
use crate::sync::page::Page;
use crate::translation::{Locale, LocalizerConfig, TranslationError, TranslationResult};

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";
const DEFAULT_DOCUMENT_ENCODING: &str = "utf-8";

/// Options controlling a single offline localization run
#[derive(Debug, Default, Clone)]
pub struct LocalizeOptions {
    /// Input charset label; UTF-8 when absent
    pub encoding: Option<String>,
    /// Locale to use instead of the stored preference (not persisted)
    pub locale: Option<Locale>,
    /// Simulate one click on the toggle after startup
    pub toggle: bool,
    /// Viewport width used to place the toggle
    pub viewport_width: Option<u32>,
}

/// Result of a localization run
#[derive(Debug, Clone)]
pub struct LocalizedDocument {
    pub data: Vec<u8>,
    pub title: Option<String>,
    pub locale: Locale,
    pub report: PassReport,
}

/// Localizes an HTML document the way the live page would be after startup
///
/// Parses `input_data`, starts a synchronizer against it (reading and, on toggle, writing the
/// preference in `store`), and serializes the resulting document in the input charset.
///
/// # Examples
///
/// ```
/// use dom_i18n::core::{localize_document, LocalizeOptions};
/// use dom_i18n::sync::MemoryStore;
/// use dom_i18n::translation::{Locale, LocalizerConfig};
///
/// let mut store = MemoryStore::new();
/// let options = LocalizeOptions {
///     locale: Some(Locale::Zh),
///     ..Default::default()
/// };
/// let html = b"<html><head><title>Docs</title></head><body><p>Search</p></body></html>";
/// let result = localize_document(html, LocalizerConfig::default(), &mut store, &options).unwrap();
/// assert_eq!(result.title.as_deref(), Some("文档"));
/// ```
pub fn localize_document<S: PreferenceStore>(
    input_data: &[u8],
    config: LocalizerConfig,
    store: S,
    options: &LocalizeOptions,
) -> TranslationResult<LocalizedDocument> {
    let encoding = resolve_encoding(options.encoding.as_deref())?;

    let mut page = Page::from_html(input_data, encoding)?;
    let mut synchronizer = Synchronizer::from_config(config, store)?;
    if let Some(locale) = options.locale {
        synchronizer.set_locale(locale);
    }
    if let Some(width) = options.viewport_width {
        synchronizer.on_resize(&mut page, width);
    }

    let mut report = synchronizer.start(&mut page);
    if options.toggle {
        report = synchronizer.toggle(&mut page);
    }
    synchronizer.stop(&mut page);

    let title = Some(page.title()).filter(|title| !title.is_empty());
    Ok(LocalizedDocument {
        data: page.serialize(encoding)?,
        title,
        locale: synchronizer.locale(),
        report,
    })
}

fn resolve_encoding(label: Option<&str>) -> TranslationResult<&str> {
    match label {
        None => Ok(DEFAULT_DOCUMENT_ENCODING),
        Some(label) if Encoding::for_label(label.as_bytes()).is_some() => Ok(label),
        Some(label) => Err(TranslationError::Config(format!(
            "Unknown encoding: {}",
            label
        ))),
    }
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stderr, keeping stdout for the document
pub fn print_info_message(msg: &str) {
    eprintln!("{msg}");
}
