// GetSheet CLI - Google Sheets operations from the command line
//
// Every invocation prints exactly one JSON object to stdout; "status"
// carries success/failure and handled errors still exit 0. Diagnostics go
// to stderr via the log facade (RUST_LOG=debug shows request dispatch).

mod commands;
mod validate;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use commands::CmdError;
use getsheet_client::{ServiceAccountKey, SheetsClient};
use getsheet_config::ConfigError;

#[derive(Parser)]
#[command(name = "getsheet")]
#[command(about = "Manipulate a Google Sheet from the command line")]
#[command(version)]
#[command(after_help = "\
Setup:
  1. Create a Google Cloud project and enable the Sheets API
  2. Create a service account and download the JSON key
  3. Run: getsheet init --credentials <path-to-json> --spreadsheet <sheet-id>
  4. Share the spreadsheet with the service account email (Editor role)
  5. Run: getsheet info    to see the email address to share with

The spreadsheet ID is in the URL:
  https://docs.google.com/spreadsheets/d/<SPREADSHEET_ID>/edit")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize credentials and bind this directory to a spreadsheet
    #[command(after_help = "\
Examples:
  getsheet init --credentials ~/keys/sa.json --spreadsheet 1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgVE2upms
  getsheet init --spreadsheet 1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgVE2upms")]
    Init {
        /// Path to the Google service account JSON key
        #[arg(long)]
        credentials: Option<String>,

        /// Google spreadsheet ID
        #[arg(long)]
        spreadsheet: Option<String>,
    },

    /// Read data from the spreadsheet
    Read {
        /// Tab name (default: Sheet1)
        #[arg(long)]
        tab: Option<String>,

        /// Cell range, e.g. A1:D10 (default: the whole tab)
        #[arg(long)]
        range: Option<String>,
    },

    /// Write data to the spreadsheet
    #[command(after_help = "\
Examples:
  getsheet write --tab Sheet1 --data '[[\"Name\",\"Score\"],[\"Alice\",95]]'
  getsheet write --tab Sheet1 --range A1 --data '[[\"Name\",\"Score\"]]'")]
    Write {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Start range, e.g. A1 (default: start of tab)
        #[arg(long)]
        range: Option<String>,

        /// 2D array as a JSON string (required)
        #[arg(long)]
        data: Option<String>,
    },

    /// Append rows after the last row with data
    Append {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// 2D array as a JSON string (required)
        #[arg(long)]
        data: Option<String>,
    },

    /// Clear a range in the spreadsheet
    Clear {
        /// Tab name (default: Sheet1)
        #[arg(long)]
        tab: Option<String>,

        /// Cell range to clear (default: the whole tab)
        #[arg(long)]
        range: Option<String>,
    },

    /// Delete rows or columns
    #[command(after_help = "\
Examples:
  getsheet delete --tab Sheet1 --rows 2:5
  getsheet delete --tab Sheet1 --cols B:C")]
    Delete {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Row range, 1-based inclusive, e.g. "2:5"
        #[arg(long)]
        rows: Option<String>,

        /// Column range, e.g. "B:C"
        #[arg(long)]
        cols: Option<String>,
    },

    /// Format a cell range
    #[command(after_help = "\
Examples:
  getsheet format --tab Sheet1 --range A1:C1 --bold --bg '#4285f4' --color '#ffffff'
  getsheet format --tab Sheet1 --range A2:C50 --fontsize 11 --align center --wrap clip --font 'Courier New'")]
    Format {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Cell range, e.g. A1:O1 (required)
        #[arg(long)]
        range: Option<String>,

        /// Bold text
        #[arg(long)]
        bold: bool,

        /// Background color as hex, e.g. "#4285f4"
        #[arg(long)]
        bg: Option<String>,

        /// Text color as hex, e.g. "#333333"
        #[arg(long)]
        color: Option<String>,

        /// Font size in points
        #[arg(long)]
        fontsize: Option<String>,

        /// Horizontal alignment: left, center, right
        #[arg(long)]
        align: Option<String>,

        /// Wrap strategy: overflow, clip, wrap
        #[arg(long)]
        wrap: Option<String>,

        /// Font family, e.g. "Georgia"
        #[arg(long)]
        font: Option<String>,
    },

    /// Add a conditional-format rule (color scale, condition, or formula)
    #[command(after_help = "\
Examples:
  getsheet condformat --tab Sheet1 --range B2:B50 --scale red:yellow:green
  getsheet condformat --tab Sheet1 --range B2:B50 --scale red:green --min 0 --max 100
  getsheet condformat --tab Sheet1 --range B2:B50 --gt 90 --bg '#4caf50' --bold
  getsheet condformat --tab Sheet1 --range A1:D50 --formula '=A1>100' --bg '#fff3cd'")]
    Condformat {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Cell range, e.g. A1:N44 (required)
        #[arg(long)]
        range: Option<String>,

        /// Color scale: 2 or 3 colors separated by ":", named or hex
        #[arg(long)]
        scale: Option<String>,

        /// Fixed scale minimum (default: range minimum)
        #[arg(long)]
        min: Option<String>,

        /// Fixed scale maximum (default: range maximum)
        #[arg(long)]
        max: Option<String>,

        /// Highlight values greater than this
        #[arg(long)]
        gt: Option<String>,

        /// Highlight values less than this
        #[arg(long)]
        lt: Option<String>,

        /// Highlight values equal to this
        #[arg(long)]
        eq: Option<String>,

        /// Highlight values in "min:max"
        #[arg(long)]
        between: Option<String>,

        /// Highlight cells where this formula is true, e.g. "=A1>100"
        #[arg(long)]
        formula: Option<String>,

        /// Highlight background color as hex (required with conditions/formula)
        #[arg(long)]
        bg: Option<String>,

        /// Bold the highlighted cells
        #[arg(long)]
        bold: bool,
    },

    /// Remove all conditional-format rules from a tab
    Clearcondformat {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,
    },

    /// Freeze header rows and/or columns
    Freeze {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Number of rows to freeze
        #[arg(long)]
        rows: Option<String>,

        /// Number of columns to freeze
        #[arg(long)]
        cols: Option<String>,
    },

    /// Set a basic filter over a range
    Filter {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Cell range, e.g. A1:D100 (required)
        #[arg(long)]
        range: Option<String>,
    },

    /// Set column width in pixels
    Colwidth {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Column or range, e.g. "A" or "A:C" (required)
        #[arg(long)]
        cols: Option<String>,

        /// Width in pixels (required)
        #[arg(long)]
        width: Option<String>,
    },

    /// Set row height in pixels
    Rowheight {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Row or range, e.g. "2" or "2:5" (required)
        #[arg(long)]
        rows: Option<String>,

        /// Height in pixels (required)
        #[arg(long)]
        height: Option<String>,
    },

    /// Hide rows or columns
    Hide {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Row or range, e.g. "3" or "2:5"
        #[arg(long)]
        rows: Option<String>,

        /// Column or range, e.g. "B" or "B:C"
        #[arg(long)]
        cols: Option<String>,
    },

    /// Unhide rows or columns
    Unhide {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Row or range, e.g. "3" or "2:5"
        #[arg(long)]
        rows: Option<String>,

        /// Column or range, e.g. "B" or "B:C"
        #[arg(long)]
        cols: Option<String>,
    },

    /// List all tabs
    Tabs,

    /// Add a new tab
    Addtab {
        /// Name for the new tab (required)
        #[arg(long)]
        name: Option<String>,
    },

    /// Set a tab's color
    Tabcolor {
        /// Tab name (required)
        #[arg(long)]
        tab: Option<String>,

        /// Tab color as hex, e.g. "#ff0000" (required)
        #[arg(long)]
        color: Option<String>,
    },

    /// Create a chart from a data range
    #[command(after_help = "\
The first column of the range is the domain, each remaining column one
series; the first row is treated as headers. The chart is placed one row
below the data.

Examples:
  getsheet chart --tab Sheet1 --range A1:B4 --type BAR --title \"Scores\"
  getsheet chart --tab Sheet1 --range A1:D12")]
    Chart {
        /// Tab with the data (required)
        #[arg(long)]
        tab: Option<String>,

        /// Data range, e.g. A1:B5 (required)
        #[arg(long)]
        range: Option<String>,

        /// Chart type: BAR, LINE, PIE, COLUMN, AREA, SCATTER (default: COLUMN)
        #[arg(long)]
        r#type: Option<String>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,
    },

    /// Show the service account email and setup info
    Info,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("Usage: getsheet <command> [options]");
        eprintln!("       getsheet --help for more information");
        return ExitCode::SUCCESS;
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let envelope = match run(command, &cwd) {
        Ok(envelope) => envelope,
        Err(err) => json!({ "status": false, "error": err.to_string() }),
    };

    match serde_json::to_string_pretty(&envelope) {
        Ok(text) => println!("{}", text),
        Err(err) => {
            eprintln!("Failed to serialize result: {}", err);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

/// Per-command pipeline: validate, connect, act. Validation always runs
/// before any config read or token exchange.
fn run(command: Commands, cwd: &Path) -> Result<serde_json::Value, CmdError> {
    match command {
        Commands::Init { credentials, spreadsheet } => {
            commands::init(credentials.as_deref(), spreadsheet.as_deref(), cwd)
        }

        Commands::Info => commands::info(cwd),

        Commands::Read { tab, range } => {
            let (client, spreadsheet) = connect(cwd)?;
            commands::read(&client, &spreadsheet, tab.as_deref(), range.as_deref())
        }

        Commands::Write { tab, range, data } => {
            let data = parse_data(data)?;
            validate::validate_write(tab.as_deref(), data.as_ref()).map_err(CmdError::Validation)?;
            let data = data.unwrap_or_else(|| json!([]));
            let (client, spreadsheet) = connect(cwd)?;
            commands::write(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                range.as_deref(),
                &data,
            )
        }

        Commands::Append { tab, data } => {
            let data = parse_data(data)?;
            validate::validate_write(tab.as_deref(), data.as_ref()).map_err(CmdError::Validation)?;
            let data = data.unwrap_or_else(|| json!([]));
            let (client, spreadsheet) = connect(cwd)?;
            commands::append(&client, &spreadsheet, tab.as_deref().unwrap_or_default(), &data)
        }

        Commands::Clear { tab, range } => {
            let (client, spreadsheet) = connect(cwd)?;
            commands::clear(&client, &spreadsheet, tab.as_deref(), range.as_deref())
        }

        Commands::Delete { tab, rows, cols } => {
            validate::validate_delete(tab.as_deref(), rows.as_deref(), cols.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::delete(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                rows.as_deref(),
                cols.as_deref(),
            )
        }

        Commands::Format { tab, range, bold, bg, color, fontsize, align, wrap, font } => {
            validate::validate_format(
                tab.as_deref(),
                range.as_deref(),
                bold,
                bg.as_deref(),
                color.as_deref(),
                fontsize.as_deref(),
                align.as_deref(),
                wrap.as_deref(),
                font.as_deref(),
            )
            .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::format(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                range.as_deref().unwrap_or_default(),
                bold,
                bg.as_deref(),
                color.as_deref(),
                fontsize.as_deref(),
                align.as_deref(),
                wrap.as_deref(),
                font.as_deref(),
            )
        }

        Commands::Condformat {
            tab, range, scale, min, max, gt, lt, eq, between, formula, bg, bold,
        } => {
            validate::validate_condformat(
                tab.as_deref(),
                range.as_deref(),
                scale.as_deref(),
                gt.as_deref(),
                lt.as_deref(),
                eq.as_deref(),
                between.as_deref(),
                formula.as_deref(),
                bg.as_deref(),
            )
            .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::condformat(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                range.as_deref().unwrap_or_default(),
                scale.as_deref(),
                min.as_deref(),
                max.as_deref(),
                gt.as_deref(),
                lt.as_deref(),
                eq.as_deref(),
                between.as_deref(),
                formula.as_deref(),
                bg.as_deref(),
                bold,
            )
        }

        Commands::Clearcondformat { tab } => {
            validate::validate_clearcondformat(tab.as_deref()).map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::clearcondformat(&client, &spreadsheet, tab.as_deref().unwrap_or_default())
        }

        Commands::Freeze { tab, rows, cols } => {
            validate::validate_freeze(tab.as_deref(), rows.as_deref(), cols.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::freeze(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                rows.as_deref(),
                cols.as_deref(),
            )
        }

        Commands::Filter { tab, range } => {
            validate::validate_filter(tab.as_deref(), range.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::filter(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                range.as_deref().unwrap_or_default(),
            )
        }

        Commands::Colwidth { tab, cols, width } => {
            validate::validate_colwidth(tab.as_deref(), cols.as_deref(), width.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::colwidth(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                cols.as_deref().unwrap_or_default(),
                width.as_deref().unwrap_or_default(),
            )
        }

        Commands::Rowheight { tab, rows, height } => {
            validate::validate_rowheight(tab.as_deref(), rows.as_deref(), height.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::rowheight(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                rows.as_deref().unwrap_or_default(),
                height.as_deref().unwrap_or_default(),
            )
        }

        Commands::Hide { tab, rows, cols } => {
            validate::validate_hide(tab.as_deref(), rows.as_deref(), cols.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::set_hidden(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                rows.as_deref(),
                cols.as_deref(),
                true,
            )
        }

        Commands::Unhide { tab, rows, cols } => {
            validate::validate_hide(tab.as_deref(), rows.as_deref(), cols.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::set_hidden(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                rows.as_deref(),
                cols.as_deref(),
                false,
            )
        }

        Commands::Tabs => {
            let (client, spreadsheet) = connect(cwd)?;
            commands::tabs(&client, &spreadsheet)
        }

        Commands::Addtab { name } => {
            validate::validate_addtab(name.as_deref()).map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::addtab(&client, &spreadsheet, name.as_deref().unwrap_or_default())
        }

        Commands::Tabcolor { tab, color } => {
            validate::validate_tabcolor(tab.as_deref(), color.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::tabcolor(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                color.as_deref().unwrap_or_default(),
            )
        }

        Commands::Chart { tab, range, r#type, title } => {
            validate::validate_chart(tab.as_deref(), range.as_deref(), r#type.as_deref())
                .map_err(CmdError::Validation)?;
            let (client, spreadsheet) = connect(cwd)?;
            commands::chart(
                &client,
                &spreadsheet,
                tab.as_deref().unwrap_or_default(),
                range.as_deref().unwrap_or_default(),
                r#type.as_deref(),
                title.as_deref(),
            )
        }
    }
}

/// Load both config layers and build an authenticated client. Called only
/// after validation has passed, so bad flags never cost a token exchange.
fn connect(cwd: &Path) -> Result<(SheetsClient, String), CmdError> {
    let (global, local) = getsheet_config::load(cwd)?;

    let key = ServiceAccountKey::load(Path::new(&global.credentials)).ok_or_else(|| {
        CmdError::Config(ConfigError::Io(format!(
            "Could not read credentials file: {}",
            global.credentials
        )))
    })?;

    let client = SheetsClient::from_service_account(&key).map_err(CmdError::Auth)?;
    log::debug!("authenticated as {} for spreadsheet {}", key.client_email, local.spreadsheet);
    Ok((client, local.spreadsheet))
}

/// Decode the `--data` JSON string. A missing flag stays `None` so the
/// validator reports the required-field message.
fn parse_data(raw: Option<String>) -> Result<Option<serde_json::Value>, CmdError> {
    match raw {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|_| {
            CmdError::Validation(r#"--data must be valid JSON. Example: [["a","b"],["c","d"]]"#.into())
        }),
        None => Ok(None),
    }
}
