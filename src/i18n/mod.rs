//! Internationalization (i18n) module.
//!
//! Provides localized strings for the terminal UI and CLI output.
//! English is the default language; Spanish is available as an alternative.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Spanish
    Es,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "es", "en_US", "es_ES").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-', '.']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from `OFT2EML_LANG`, `LC_MESSAGES` or `LANG`.
pub fn detect_system_lang() -> Lang {
    ["OFT2EML_LANG", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|var| std::env::var(var).ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $es:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Es => $es,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(
    app_about,
    "oft2eml: convert Outlook template (.oft) files to standard .eml messages.",
    "oft2eml: convierte plantillas de Outlook (.oft) en mensajes .eml est\u{e1}ndar."
);
msg!(
    app_long_about,
    "oft2eml: convert Outlook template (.oft) files to standard .eml messages.\nConvert one file, a whole batch, or pick files interactively in the terminal UI.",
    "oft2eml: convierte plantillas de Outlook (.oft) en mensajes .eml est\u{e1}ndar.\nConvierte un fichero, un lote completo o elige ficheros en la interfaz de terminal."
);
msg!(
    app_after_help,
    "Run without a subcommand to open the interactive converter.",
    "Ejecuta sin subcomando para abrir el conversor interactivo."
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_cmd_ui,
    "Open the interactive converter (default if no subcommand given)",
    "Abrir el conversor interactivo (por defecto si no se da subcomando)"
);
msg!(
    help_cmd_convert,
    "Convert one or more .oft files to .eml",
    "Convertir uno o varios ficheros .oft a .eml"
);
msg!(
    help_cmd_inspect,
    "Show the fields extracted from an .oft file",
    "Mostrar los campos extra\u{ed}dos de un fichero .oft"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "Generar autocompletado para la shell"
);
msg!(help_cmd_manpage, "Generate a man page", "Generar p\u{e1}gina de manual");

// ── CLI output ───────────────────────────────────────────────────

msg!(msg_converting, "Converting", "Convirtiendo");
msg!(msg_converted, "converted", "convertidos");
msg!(msg_failed, "failed", "fallidos");
msg!(msg_output_dir, "Output directory", "Directorio de salida");
msg!(msg_file, "File", "Fichero");
msg!(msg_from, "From", "De");
msg!(msg_to, "To", "Para");
msg!(msg_cc, "Cc", "Cc");
msg!(msg_subject, "Subject", "Asunto");
msg!(msg_date, "Date", "Fecha");
msg!(msg_body, "Plain body", "Cuerpo texto");
msg!(msg_html, "HTML body", "Cuerpo HTML");
msg!(msg_attachments, "Attachments", "Adjuntos");
msg!(msg_inline, "inline", "en l\u{ed}nea");
msg!(msg_none, "(none)", "(ninguno)");
msg!(msg_chars, "chars", "caracteres");

msg!(
    err_file_not_found,
    "File not found",
    "Fichero no encontrado"
);
msg!(
    err_output_single,
    "--output can only be used with a single input file",
    "--output solo puede usarse con un \u{fa}nico fichero de entrada"
);
msg!(
    err_some_failed,
    "Some files could not be converted",
    "Algunos ficheros no se pudieron convertir"
);

// ── TUI: main window ─────────────────────────────────────────────

msg!(tui_title, "OFT to EML Converter", "Conversor OFT a EML");
msg!(tui_files_title, " Select Files ", " Seleccionar ficheros ");
msg!(
    tui_no_files,
    "Press b to browse and select OFT files (multiple files supported)",
    "Pulsa b para buscar y seleccionar ficheros OFT (admite varios ficheros)"
);
msg!(
    tui_files_ready,
    "OFT file(s) ready to convert:",
    "fichero(s) OFT listos para convertir:"
);
msg!(tui_more_files, "more files", "ficheros m\u{e1}s");
msg!(tui_and, "and", "y");
msg!(tui_output_dir, "Output Directory: ", "Directorio de salida: ");
msg!(tui_progress_title, " Progress ", " Progreso ");
msg!(tui_ready, "Ready to convert files", "Listo para convertir ficheros");
msg!(tui_converting_file, "Converting file", "Convirtiendo fichero");
msg!(tui_of, "of", "de");
msg!(
    tui_complete,
    "Conversion complete:",
    "Conversi\u{f3}n completada:"
);
msg!(tui_files_converted, "files converted", "ficheros convertidos");
msg!(tui_cancelled, "(cancelled)", "(cancelado)");
msg!(tui_results_title, " Conversion Results ", " Resultados ");
msg!(tui_error, "Error", "Error");

// ── TUI: popups ──────────────────────────────────────────────────

msg!(tui_help_title, " Help ", " Ayuda ");
msg!(tui_browser_files_title, " Select OFT Files ", " Seleccionar ficheros OFT ");
msg!(
    tui_browser_dir_title,
    " Select Output Directory ",
    " Seleccionar directorio de salida "
);
msg!(tui_browser_empty, "(empty)", "(vac\u{ed}o)");
msg!(tui_summary_ok_title, " Conversion Complete ", " Conversi\u{f3}n completada ");
msg!(tui_summary_partial_title, " Partial Success ", " \u{c9}xito parcial ");
msg!(tui_summary_failed_title, " Conversion Failed ", " Conversi\u{f3}n fallida ");
msg!(
    tui_summary_all_ok,
    "All files converted successfully!",
    "\u{a1}Todos los ficheros se convirtieron correctamente!"
);
msg!(
    tui_summary_partial,
    "files converted successfully.",
    "ficheros convertidos correctamente."
);
msg!(
    tui_summary_none,
    "No files were converted successfully.",
    "No se convirti\u{f3} ning\u{fa}n fichero."
);
msg!(tui_press_any_key, "Press any key", "Pulsa cualquier tecla");
msg!(tui_quit_title, " Quit ", " Salir ");
msg!(
    tui_quit_confirm,
    "Conversion in progress. Do you want to quit? (y/n)",
    "Conversi\u{f3}n en curso. \u{bf}Quieres salir? (s/n)"
);

// ── TUI: status messages ─────────────────────────────────────────

msg!(tui_status_added, "file(s) selected", "fichero(s) seleccionados");
msg!(tui_status_cleared, "Selection cleared", "Selecci\u{f3}n vaciada");
msg!(
    tui_status_output_set,
    "Output directory saved",
    "Directorio de salida guardado"
);
msg!(
    tui_status_no_files,
    "Select files first",
    "Selecciona ficheros primero"
);
msg!(
    tui_status_busy,
    "A conversion is already running",
    "Ya hay una conversi\u{f3}n en curso"
);
msg!(
    tui_status_nothing_converted,
    "Nothing converted yet",
    "Todav\u{ed}a no se ha convertido nada"
);
msg!(
    tui_status_opened,
    "Opened output folder",
    "Carpeta de salida abierta"
);
msg!(
    tui_status_open_failed,
    "Cannot open output folder",
    "No se puede abrir la carpeta de salida"
);
msg!(
    tui_status_read_dir_failed,
    "Cannot read directory",
    "No se puede leer el directorio"
);

// ── TUI: key hints ───────────────────────────────────────────────

msg!(tui_hint_browse, "Browse", "Buscar");
msg!(tui_hint_clear, "Clear files", "Vaciar");
msg!(tui_hint_output, "Output dir", "Salida");
msg!(tui_hint_convert, "Convert", "Convertir");
msg!(tui_hint_open_folder, "Open folder", "Abrir carpeta");
msg!(tui_hint_clear_all, "Clear all", "Limpiar todo");
msg!(tui_hint_help, "Help", "Ayuda");
msg!(tui_hint_quit, "Quit", "Salir");
msg!(tui_hint_nav, "Nav", "Nav");
msg!(tui_hint_mark, "Mark", "Marcar");
msg!(tui_hint_add, "Add", "A\u{f1}adir");
msg!(tui_hint_open_dir, "Open dir", "Abrir dir");
msg!(tui_hint_parent, "Parent", "Superior");
msg!(tui_hint_choose_dir, "Use this dir", "Usar este dir");
msg!(tui_hint_all_files, "All files", "Todos");
msg!(tui_hint_cancel, "Cancel", "Cancelar");
msg!(tui_hint_scroll, "Scroll log", "Desplazar");

// ── TUI: help popup ──────────────────────────────────────────────

msg!(tui_help_main, "Main window", "Ventana principal");
msg!(tui_help_browser, "File browser", "Explorador");
msg!(tui_help_browse_files, "Browse for OFT files", "Buscar ficheros OFT");
msg!(tui_help_clear_files, "Clear selected files", "Vaciar selecci\u{f3}n");
msg!(tui_help_output_dir, "Choose output directory", "Elegir directorio de salida");
msg!(tui_help_convert, "Convert files", "Convertir ficheros");
msg!(tui_help_open_folder, "Open output folder", "Abrir carpeta de salida");
msg!(tui_help_clear_all, "Clear all", "Limpiar todo");
msg!(tui_help_scroll_log, "Scroll results", "Desplazar resultados");
msg!(tui_help_nav, "Move", "Mover");
msg!(tui_help_enter, "Open dir / add file", "Abrir dir / a\u{f1}adir fichero");
msg!(tui_help_parent, "Parent directory", "Directorio superior");
msg!(tui_help_mark, "Mark / unmark file", "Marcar / desmarcar");
msg!(tui_help_add_marked, "Add marked files", "A\u{f1}adir marcados");
msg!(tui_help_choose_dir, "Use current directory", "Usar directorio actual");
msg!(tui_help_toggle_all, "Show all files", "Mostrar todos los ficheros");
msg!(tui_help_this_help, "This help", "Esta ayuda");
msg!(tui_help_quit, "Quit", "Salir");
msg!(tui_help_close, "Close popup", "Cerrar");
