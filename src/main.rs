use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use xliffer::cli::{self, FromXlsxOptions, OutputFormat, ToXlsxOptions};
use xliffer::core::KEEP;
use xliffer::error::XlifferResult;
use xliffer::excel::{ColumnOverrides, SheetLayoutOptions};

#[derive(Parser)]
#[command(name = "xliffer")]
#[command(about = "Converts to and from XLIFF 1.2 files")]
#[command(long_about = "xliffer - XLIFF 1.2 ⇄ Excel ⇄ JSON converter

COMMANDS:
  blank-target        - Clear every target text and target language
  copy                - Copy source text into target
  swap-source-target  - Exchange source and target text
  set-lang            - Set source/target languages
  merge               - Concatenate the files of two documents
  dump                - Print the units as parsed
  to-json             - Flat key → target JSON mapping
  to-xlsx             - Write or merge units into a spreadsheet table
  from-xlsx           - One XLIFF (or JSON) file per target column

TABLE LAYOUT:
  key | note | source | DE-de | FR-fr | ...

EXAMPLES:
  xliffer -o de.xliff copy --in en.xliff
  xliffer -o texts.xlsx to-xlsx --in de.xliff --append texts.xlsx
  xliffer from-xlsx --in texts.xlsx --skip-rows 2 --out-dir l10n/

Output goes to stdout unless -o names a file.")]
#[command(version)]
struct Cli {
    /// Output file, "-" for stdout
    #[arg(short, long, global = true, default_value = "-")]
    output: PathBuf,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clear every target text and target language
    BlankTarget {
        /// Input XLIFF file
        #[arg(long = "in")]
        input: PathBuf,
    },

    /// Copy source text and attributes into target
    Copy {
        /// Input XLIFF file
        #[arg(long = "in")]
        input: PathBuf,
    },

    #[command(long_about = "Exchange source and target text of every unit.

Language attributes stay where they are. Units without a target get one.
The file-level target language is cleared.")]
    /// Exchange source and target text
    SwapSourceTarget {
        /// Input XLIFF file
        #[arg(long = "in")]
        input: PathBuf,
    },

    /// Set source and/or target language ("keep" leaves it unchanged)
    SetLang {
        /// Input XLIFF file
        #[arg(long = "in")]
        input: PathBuf,

        /// Source language
        #[arg(long, default_value = KEEP)]
        source: String,

        /// Target language
        #[arg(long, default_value = KEEP)]
        target: String,
    },

    /// Concatenate the files of two XLIFF documents
    Merge {
        /// First document
        #[arg(short)]
        a: PathBuf,

        /// Second document
        #[arg(short)]
        b: PathBuf,
    },

    /// Print the units as parsed
    Dump {
        /// Input XLIFF file
        #[arg(long = "in")]
        input: PathBuf,

        /// Dump the whole document model as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert to a flat key → target JSON mapping
    ToJson {
        /// Input XLIFF file
        #[arg(long = "in")]
        input: PathBuf,

        /// Regex applied to every key
        #[arg(long)]
        key_match: Option<String>,

        /// Replacement for --key-match ($1 refers to groups)
        #[arg(long)]
        key_to: Option<String>,

        /// Indent the JSON with tabs
        #[arg(long)]
        pretty: bool,
    },

    #[command(long_about = "Write units into a spreadsheet table.

Without --append a new workbook is created. With --append the given workbook
is read first and units are merged into one of its sheets:

  - rows whose key matches a unit get the unit's target in the target column
  - units with unknown keys are appended below the table, after a blank row
    and a bold \"added from <input>\" marker

The target column header is the input's file name. Without --target-column
it is the first free column of the header row.

EXAMPLE:
  xliffer -o texts.xlsx to-xlsx --in de.xliff --append texts.xlsx --sheet UI")]
    /// Write or merge units into a spreadsheet
    ToXlsx {
        /// Input XLIFF file
        #[arg(long = "in")]
        input: PathBuf,

        /// Existing .xlsx to merge into (may be the output file)
        #[arg(long)]
        append: Option<PathBuf>,

        /// Sheet name of the appended workbook (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// 0-based row holding the header
        #[arg(long, default_value = "0")]
        head_row: usize,

        /// 0-based column holding the keys
        #[arg(long, default_value = "0")]
        key_column: usize,

        /// 0-based column receiving the translations
        #[arg(long)]
        target_column: Option<usize>,

        /// Regex applied to every key before lookup
        #[arg(long)]
        key_match: Option<String>,

        /// Replacement for --key-match
        #[arg(long)]
        key_to: Option<String>,
    },

    #[command(long_about = "Extract one document per target column of a sheet.

The header is the first row (after --skip-rows) with a non-empty cell; that
cell marks the key column. Note and source follow it, every labelled column
from the source on is a target. Labels like DE-de give the language.

Files are named after the column header: DE-de.xliff, FR-fr.xliff, ...
The global -o option is not used; see --out-dir.")]
    /// Extract XLIFF or JSON files from a spreadsheet
    FromXlsx {
        /// Input .xlsx file
        #[arg(long = "in")]
        input: PathBuf,

        /// Rows to skip before looking for the header
        #[arg(long, default_value = "0")]
        skip_rows: usize,

        /// 1-based sheet number
        #[arg(long, default_value = "1")]
        sheet: usize,

        /// 0-based key column (default: detected)
        #[arg(long)]
        key_col: Option<usize>,

        /// 0-based note column (default: key + 1)
        #[arg(long)]
        note_col: Option<usize>,

        /// 0-based source column (default: key + 2)
        #[arg(long)]
        source_col: Option<usize>,

        /// 0-based first target column (default: source column)
        #[arg(long)]
        target_col: Option<usize>,

        /// Source language when the header carries none
        #[arg(long, env = "XLIFFER_SOURCE_LANG", default_value = "en")]
        source_lang: String,

        /// Target language when the header carries none
        #[arg(long, env = "XLIFFER_TARGET_LANG")]
        target_lang: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Xliff)]
        format: OutputFormat,

        /// Directory receiving the files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Indent the output
        #[arg(long)]
        pretty: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "xliffer=debug" } else { "xliffer=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, output: PathBuf) -> XlifferResult<()> {
    match command {
        Commands::BlankTarget { input } => cli::blank_target(input, output),

        Commands::Copy { input } => cli::copy(input, output),

        Commands::SwapSourceTarget { input } => cli::swap_source_target(input, output),

        Commands::SetLang {
            input,
            source,
            target,
        } => cli::set_lang(input, source, target, output),

        Commands::Merge { a, b } => cli::merge(a, b, output),

        Commands::Dump { input, json } => cli::dump(input, json, output),

        Commands::ToJson {
            input,
            key_match,
            key_to,
            pretty,
        } => cli::to_json(input, key_match, key_to, pretty, output),

        Commands::ToXlsx {
            input,
            append,
            sheet,
            head_row,
            key_column,
            target_column,
            key_match,
            key_to,
        } => cli::to_xlsx(
            ToXlsxOptions {
                input,
                append,
                sheet,
                head_row,
                key_column,
                target_column,
                key_match,
                key_to,
            },
            output,
        ),

        Commands::FromXlsx {
            input,
            skip_rows,
            sheet,
            key_col,
            note_col,
            source_col,
            target_col,
            source_lang,
            target_lang,
            format,
            out_dir,
            pretty,
        } => cli::from_xlsx(FromXlsxOptions {
            input,
            sheet,
            layout: SheetLayoutOptions {
                skip_rows,
                overrides: ColumnOverrides {
                    key: key_col,
                    note: note_col,
                    source: source_col,
                    target: target_col,
                },
                source_lang,
                target_lang: target_lang.unwrap_or_default(),
            },
            format,
            out_dir,
            pretty,
        }),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command, cli.output) {
        eprintln!("{} {}", "Error:".bold().red(), e);
        std::process::exit(1);
    }
}
