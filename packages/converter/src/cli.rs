//! Command-line interface for the converter.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use wordcards_segmenter::{create_default_rules, Section, SegmentOptions, Segmenter};

use crate::cards::AnswerStyle;
use crate::config::{
    default_output_path, load_rules, DEFAULT_PREVIEW_ITEMS, PREVIEW_CONTENT_LINES,
    PREVIEW_TEXT_WIDTH,
};
use crate::converter::{convert_file, load_sections};
use crate::error::Result;
use crate::export::{save_deck, ExportFormat};

/// Wordcards - Turn numbered Word documents into flashcard decks.
#[derive(Parser)]
#[command(name = "wordcards")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a document into a flashcard deck.
    Convert {
        /// Input document (.docx, .txt, .text or .md)
        input: PathBuf,

        /// Output file (default: input name with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (default: from the output extension, else csv)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,

        /// Deck name (default: input file name)
        #[arg(short, long)]
        deck_name: Option<String>,

        /// YAML rule file replacing the built-in heading rules
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Treat lone numeral lines as headings titled by the next line
        #[arg(long)]
        title_markers: bool,

        /// Join answer lines with newlines instead of <br>
        #[arg(long)]
        plain: bool,
    },

    /// Show the sections a document splits into, without writing anything.
    Preview {
        /// Input document (.docx, .txt, .text or .md)
        input: PathBuf,

        /// Maximum number of sections to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_PREVIEW_ITEMS)]
        max_items: usize,

        /// YAML rule file replacing the built-in heading rules
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Treat lone numeral lines as headings titled by the next line
        #[arg(long)]
        title_markers: bool,
    },

    /// Print the built-in heading rules as YAML.
    Rules,
}

/// Output format as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
    Yaml,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::Yaml => Self::Yaml,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            deck_name,
            rules,
            title_markers,
            plain,
        } => {
            let style = if plain {
                AnswerStyle::Plain
            } else {
                AnswerStyle::Html
            };
            convert_command(
                &input,
                output.as_deref(),
                format.map(ExportFormat::from),
                deck_name.as_deref(),
                rules.as_deref(),
                title_markers,
                style,
            )
        }
        Commands::Preview {
            input,
            max_items,
            rules,
            title_markers,
        } => preview_command(&input, max_items, rules.as_deref(), title_markers),
        Commands::Rules => rules_command(),
    }
}

fn build_segmenter(rules: Option<&Path>, title_markers: bool) -> Result<Segmenter> {
    let rules = load_rules(rules)?;
    let options = SegmentOptions::default().with_title_markers(title_markers);
    Ok(Segmenter::new(rules, options))
}

/// Pick the output format: explicit flag, then output extension, then CSV.
fn resolve_format(format: Option<ExportFormat>, output: Option<&Path>) -> ExportFormat {
    format
        .or_else(|| output.and_then(ExportFormat::from_path))
        .unwrap_or(ExportFormat::Csv)
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Execute the convert command.
fn convert_command(
    input: &Path,
    output: Option<&Path>,
    format: Option<ExportFormat>,
    deck_name: Option<&str>,
    rules: Option<&Path>,
    title_markers: bool,
    answer_style: AnswerStyle,
) -> Result<()> {
    // Rule file problems should surface before the document is read
    let segmenter = build_segmenter(rules, title_markers)?;
    let format = resolve_format(format, output);
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, format.extension()));

    println!(
        "{} {}",
        style("Converting").bold(),
        style(input.display()).cyan()
    );
    println!();

    let pb = spinner();
    pb.set_message("Reading and segmenting...");

    let deck = match convert_file(input, &segmenter, deck_name, answer_style) {
        Ok(deck) => deck,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    println!("  Deck: {}", style(&deck.name).green());
    println!("  Cards: {}", deck.len());

    pb.set_message("Saving deck...");

    let saved = match save_deck(&deck, format, &output_path) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!();
    println!("{} {}", style("Saved to:").green().bold(), saved.display());

    Ok(())
}

/// Execute the preview command.
fn preview_command(
    input: &Path,
    max_items: usize,
    rules: Option<&Path>,
    title_markers: bool,
) -> Result<()> {
    let segmenter = build_segmenter(rules, title_markers)?;
    let sections = load_sections(input, &segmenter)?;

    println!(
        "{} {} ({} sections)",
        style("Preview of").bold(),
        style(input.display()).cyan(),
        sections.len()
    );

    if sections.is_empty() {
        println!();
        println!("{}", style("No numbered headings with content found.").yellow());
        return Ok(());
    }

    for (index, section) in sections.iter().take(max_items).enumerate() {
        println!();
        print!("{}", format_section(index + 1, section));
    }

    if sections.len() > max_items {
        println!();
        println!(
            "{}",
            style(format!("... and {} more", sections.len() - max_items)).dim()
        );
    }

    Ok(())
}

/// Render one section for the preview listing.
fn format_section(number: usize, section: &Section) -> String {
    let mut out = format!(
        "{} {}  {}\n",
        style(format!("{number}.")).bold(),
        style(truncate(&section.heading.full_text)).green(),
        style(format!(
            "[{} {}]",
            section.numeral_kind(),
            section.numeral_value()
        ))
        .dim()
    );

    for line in section.content_lines().take(PREVIEW_CONTENT_LINES) {
        out.push_str("   ");
        out.push_str(&truncate(line));
        out.push('\n');
    }

    let remaining = section.content.len().saturating_sub(PREVIEW_CONTENT_LINES);
    if remaining > 0 {
        out.push_str(&format!("   {}\n", style(format!("(+{remaining} lines)")).dim()));
    }
    out
}

/// Shorten text to the preview width on a single line.
fn truncate(text: &str) -> String {
    let single_line = text.replace(['\n', '\t'], " ");
    let single_line = single_line.trim();
    textwrap::wrap(single_line, PREVIEW_TEXT_WIDTH)
        .into_iter()
        .next()
        .map(|first| {
            if first.len() < single_line.len() {
                format!("{first}...")
            } else {
                first.into_owned()
            }
        })
        .unwrap_or_default()
}

/// Execute the rules command.
fn rules_command() -> Result<()> {
    let yaml = create_default_rules().to_yaml()?;
    print!("{yaml}");
    Ok(())
}
