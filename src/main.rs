//! CLI entry point for `oft2eml`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use oft2eml::config::{self, Config};
use oft2eml::convert::batch::{self, BatchEvent, BatchOptions};
use oft2eml::convert::content_type::content_type_for;
use oft2eml::i18n;
use oft2eml::model::template::TemplateMessage;
use oft2eml::parser::oft;

#[derive(Parser)]
#[command(name = "oft2eml", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Templates to pre-select in the interactive converter
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG", global = true)]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive converter
    Ui {
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },
    /// Convert templates to .eml
    Convert {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Directory for the converted messages
        #[arg(short = 'o', long, value_name = "DIR", conflicts_with = "output")]
        output_dir: Option<PathBuf>,
        /// Output file (single input only)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Write name_1.eml instead of replacing existing files
        #[arg(long, conflicts_with = "output")]
        no_overwrite: bool,
    },
    /// Show the fields extracted from a template
    Inspect {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early() -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for (i, arg) in args.iter().enumerate() {
        let code = if arg == "--lang" {
            args.get(i + 1).map(String::as_str)
        } else {
            arg.strip_prefix("--lang=")
        };
        if let Some(lang) = code.and_then(i18n::Lang::from_code) {
            return lang;
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command()
        .about(i18n::app_about())
        .long_about(i18n::app_long_about())
        .after_help(i18n::app_after_help());

    let names: Vec<String> = cmd
        .get_subcommands()
        .map(|s| s.get_name().to_string())
        .collect();
    for name in names {
        let about = match name.as_str() {
            "ui" => i18n::help_cmd_ui(),
            "convert" => i18n::help_cmd_convert(),
            "inspect" => i18n::help_cmd_inspect(),
            "completions" => i18n::help_cmd_completions(),
            "manpage" => i18n::help_cmd_manpage(),
            _ => continue,
        };
        cmd = cmd.mut_subcommand(name, |s| s.about(about));
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    // Detect language BEFORE clap parsing so --help is localized
    i18n::set_lang(detect_lang_early());

    let matches = build_localized_command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let config = config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let interactive = matches!(cli.command, None | Some(Commands::Ui { .. }));
    setup_logging(log_level, &config, !interactive);

    match cli.command {
        None => oft2eml::tui::run_tui(cli.files, config),
        Some(Commands::Ui { files }) => oft2eml::tui::run_tui(files, config),
        Some(Commands::Convert {
            files,
            output_dir,
            output,
            no_overwrite,
        }) => {
            let overwrite = config.convert.overwrite && !no_overwrite;
            match output {
                Some(output) => cmd_convert_single(&files, &output),
                None => {
                    let dir = output_dir.unwrap_or_else(|| config.output_dir());
                    cmd_convert(&files, &dir, overwrite)
                }
            }
        }
        Some(Commands::Inspect { path, json }) => cmd_inspect(&path, json),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with optional stderr output and file logging.
///
/// The interactive converter owns the terminal, so it only logs to the file.
fn setup_logging(level: &str, config: &Config, to_stderr: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = to_stderr
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let log_path = config::log_file_path(config);
    let log_dir = log_path.parent().unwrap_or(Path::new("."));
    let log_name = log_path.file_name().unwrap_or(std::ffi::OsStr::new("oft2eml.log"));
    let file_layer = std::fs::create_dir_all(log_dir).is_ok().then(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, log_name);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "oft2eml", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Convert one template to an explicit output file.
fn cmd_convert_single(files: &[PathBuf], output: &Path) -> anyhow::Result<()> {
    let [input] = files else {
        anyhow::bail!("{}", i18n::err_output_single());
    };
    if !input.exists() {
        anyhow::bail!("{}: {}", i18n::err_file_not_found(), input.display());
    }
    let written = oft2eml::convert_oft_to_eml(input, Some(output))?;
    println!("  \u{2713} {} \u{2192} {}", input.display(), written.display());
    Ok(())
}

/// Convert a batch into `output_dir`, printing one line per file.
fn cmd_convert(files: &[PathBuf], output_dir: &Path, overwrite: bool) -> anyhow::Result<()> {
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {{msg}}",
                i18n::msg_converting()
            ))?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let report = batch::convert_batch(
        files,
        output_dir,
        BatchOptions { overwrite },
        &|event: BatchEvent| match event {
            BatchEvent::Started { input, .. } => {
                pb.set_message(display_name(&input));
            }
            BatchEvent::Converted { input, output, .. } => {
                pb.println(format!(
                    "  \u{2713} {} \u{2192} {}",
                    display_name(&input),
                    output.display()
                ));
                pb.inc(1);
            }
            BatchEvent::Failed { input, error, .. } => {
                pb.println(format!("  \u{2717} {} - {error}", display_name(&input)));
                pb.inc(1);
            }
        },
        None,
    )?;
    pb.finish_and_clear();

    println!();
    println!("  {:<20} {}", i18n::msg_output_dir(), output_dir.display());
    println!(
        "  {:<20} {}/{}  ({} {}, {:.2?})",
        i18n::msg_converted(),
        report.succeeded(),
        report.total(),
        report.failed(),
        i18n::msg_failed(),
        start.elapsed()
    );
    println!();

    if report.failed() > 0 {
        anyhow::bail!("{} ({})", i18n::err_some_failed(), report.failed());
    }
    Ok(())
}

/// Print the fields read from a template.
fn cmd_inspect(path: &Path, json: bool) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("{}: {}", i18n::err_file_not_found(), path.display());
    }
    let template = oft::read_template_file(path)?;

    if json {
        print_template_json(path, &template)
    } else {
        print_template_table(path, &template);
        Ok(())
    }
}

fn print_template_table(path: &Path, template: &TemplateMessage) {
    use humansize::{format_size, BINARY};

    let none = i18n::msg_none();
    let field = |value: &Option<String>| -> String {
        value
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(none)
            .to_string()
    };
    let length = |value: &Option<String>| -> String {
        match value.as_deref() {
            Some(text) if !text.is_empty() => {
                format!("{} {}", text.chars().count(), i18n::msg_chars())
            }
            _ => none.to_string(),
        }
    };

    println!();
    println!("  {:<14} {}", i18n::msg_file(), path.display());
    println!("  {:<14} {}", i18n::msg_from(), field(&template.sender));
    println!("  {:<14} {}", i18n::msg_to(), field(&template.to));
    println!("  {:<14} {}", i18n::msg_cc(), field(&template.cc));
    println!("  {:<14} {}", i18n::msg_subject(), field(&template.subject));
    println!(
        "  {:<14} {}",
        i18n::msg_date(),
        template
            .date
            .map(|d| d.to_rfc2822())
            .unwrap_or_else(|| none.to_string())
    );
    println!("  {:<14} {}", i18n::msg_body(), length(&template.body));
    println!("  {:<14} {}", i18n::msg_html(), length(&template.html_body));

    println!("  {:<14} {}", i18n::msg_attachments(), template.attachments.len());
    for (i, att) in template.attachments.iter().enumerate() {
        let name = att.filename(i);
        let inline = if att.is_inline() {
            format!(" [{}]", i18n::msg_inline())
        } else {
            String::new()
        };
        println!(
            "    {:>3}. {name}  {}  {}{inline}",
            i + 1,
            content_type_for(&name, att.mime_tag.as_deref()),
            format_size(att.size(), BINARY)
        );
    }
    println!();
}

fn print_template_json(path: &Path, template: &TemplateMessage) -> anyhow::Result<()> {
    let attachments: Vec<serde_json::Value> = template
        .attachments
        .iter()
        .enumerate()
        .map(|(i, att)| {
            let name = att.filename(i);
            serde_json::json!({
                "filename": name,
                "content_type": content_type_for(&name, att.mime_tag.as_deref()),
                "content_id": att.content_id(),
                "inline": att.is_inline(),
                "size": att.size(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "file": path.to_string_lossy(),
        "from": template.sender,
        "to": template.to,
        "cc": template.cc,
        "subject": template.subject,
        "date": template.date.map(|d| d.to_rfc3339()),
        "body": template.body,
        "html_body": template.html_body,
        "attachments": attachments,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
