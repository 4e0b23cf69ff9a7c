use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use loomkit::codes::{message_template, CodeLedger, CodeRecord, SheetsStore, Wrap};
use loomkit::gradient::{generate, GradientConfig, Palette, ShadeId};
use loomkit::project::{cm_to_m, estimate, ProjectReport, WarpPlan};
use loomkit::render::{ruled_line, separator, warp_card, warp_preview};
use loomkit::splitter::{non_conforming, split_paired, split_threads, BiasMode};

/// Hand-weaving toolkit: warp splitting, colour gradients, project
/// planning, discount codes.
#[derive(Parser)]
#[command(name = "loomkit")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a thread count into balanced batches
    Split {
        /// Total number of threads
        total: u32,

        /// Number of batches to split into
        #[arg(short, long, default_value = "1")]
        batches: usize,

        /// Keep every batch divisible by this number
        #[arg(short = 'd', long = "divisible-by", default_value = "1")]
        divisor: u32,

        /// Where surplus threads go
        #[arg(long, value_enum, default_value = "center")]
        bias: BiasArg,

        /// Use the mirrored pairwise split instead of the blocked one
        #[arg(long)]
        paired: bool,
    },
    /// Generate a randomized colour-gradient warp layout
    Gradient {
        /// Total number of warp ends
        #[arg(long, default_value = "1532")]
        threads: u32,

        /// Gaussian spread around each shade's center
        #[arg(long, default_value = "120")]
        sigma: f64,

        /// How far to search for a free slot around a draw
        #[arg(long, default_value = "50")]
        max_jump: usize,

        /// Dead draws tolerated before the deterministic fill
        #[arg(long, default_value = "1000")]
        max_tries: u32,

        /// Lock the outermost shades in place first
        #[arg(long)]
        prefer_edges: bool,

        /// RNG seed; the same seed always gives the same warp
        #[arg(long, default_value = "42")]
        seed: u64,

        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormat,

        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Split a warp read from stdin into braid cards
    Braids {
        /// Number of braids
        #[arg(short = 'n', long, default_value = "4")]
        count: usize,

        /// Threads per lang pair; braids stay divisible by this
        #[arg(long = "per-pair", default_value = "5")]
        per_pair: u32,

        /// Output file prefix; cards land in PREFIX1.tex, PREFIX2.tex, ...
        #[arg(long, default_value = "braid")]
        prefix: String,
    },
    /// Estimate warp length, ends, yarn and cost for a project file
    Plan {
        /// YAML project description
        file: PathBuf,

        /// Dump the full report as YAML
        #[arg(long)]
        dump: Option<PathBuf>,
    },
    /// Issue and redeem discount codes
    Codes {
        /// Spreadsheet id (defaults to $GOOGLE_SHEET_ID)
        #[arg(short, long)]
        sheet_id: Option<String>,

        /// Tab holding the codes
        #[arg(long, default_value = "Codes")]
        tab: String,

        /// OAuth bearer token (defaults to $GOOGLE_SHEETS_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Suppress the message template output
        #[arg(short, long)]
        quiet: bool,

        #[command(subcommand)]
        command: CodesCommand,
    },
}

#[derive(Subcommand)]
enum CodesCommand {
    /// Create a new discount code
    Create {
        /// Name of the person to issue the code to
        name: String,

        /// Discount as a percentage
        #[arg(short, long, default_value = "10")]
        discount: u32,

        /// Wrap(s) the code is limited to; none means all
        #[arg(short, long = "wrap")]
        wrap: Vec<String>,
    },
    /// Use a discount code
    Use {
        /// The code to redeem
        code: String,

        /// Name the code must have been issued to
        #[arg(short, long)]
        name: Option<String>,

        /// Wrap(s) being bought
        #[arg(short, long = "wrap")]
        wrap: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BiasArg {
    Edges,
    Center,
}

impl From<BiasArg> for BiasMode {
    fn from(arg: BiasArg) -> Self {
        match arg {
            BiasArg::Edges => BiasMode::EdgesHeavy,
            BiasArg::Center => BiasMode::CenterHeavy,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Comma-separated shade letters
    Plain,
    /// Counting-friendly ruled text
    Ruled,
    /// Typeset colour card
    Latex,
    /// Stripe preview image
    Svg,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    match cli.command {
        Commands::Split {
            total,
            batches,
            divisor,
            bias,
            paired,
        } => run_split(total, batches, divisor, bias.into(), paired),
        Commands::Gradient {
            threads,
            sigma,
            max_jump,
            max_tries,
            prefer_edges,
            seed,
            format,
            output,
        } => {
            let config = GradientConfig {
                threads,
                sigma,
                max_jump,
                max_tries,
                prefer_edges,
            };
            run_gradient(&config, seed, format, output)
        }
        Commands::Braids {
            count,
            per_pair,
            prefix,
        } => run_braids(count, per_pair, &prefix),
        Commands::Plan { file, dump } => run_plan(&file, dump.as_deref()),
        Commands::Codes {
            sheet_id,
            tab,
            token,
            quiet,
            command,
        } => run_codes(sheet_id, tab, token, quiet, command),
    }
}

fn run_split(total: u32, batches: usize, divisor: u32, bias: BiasMode, paired: bool) -> Result<()> {
    let counts = if paired {
        split_paired(total, batches, bias)?
    } else {
        split_threads(total, batches, bias, divisor)?
    };

    for (i, count) in counts.iter().enumerate() {
        println!("Batch {}: {}", i + 1, count);
    }
    if let Some(index) = non_conforming(&counts, divisor) {
        println!(
            "Warning: batch {} is not divisible by {} ({} threads)",
            index + 1,
            divisor,
            counts[index]
        );
    }
    Ok(())
}

fn run_gradient(
    config: &GradientConfig,
    seed: u64,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let palette = Palette::purple_dawn();
    let layout = generate(&palette, config, seed)?;
    debug!(targets = ?layout.targets, "shade targets");

    let labels = palette.labels(&layout.placement);
    let rendered = match format {
        OutputFormat::Plain => {
            let mut line = labels
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(",");
            line.push('\n');
            line
        }
        OutputFormat::Ruled => {
            format!("{}\n{}\n{}\n", separator(), ruled_line(&labels), separator())
        }
        OutputFormat::Latex => warp_card(&palette, &layout.placement),
        OutputFormat::Svg => warp_preview(&palette, &layout.placement),
    };

    match output {
        Some(path) => std::fs::write(&path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_braids(count: usize, per_pair: u32, prefix: &str) -> Result<()> {
    let mut first_line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut first_line)
        .context("failed to read the warp from stdin")?;

    let palette = Palette::purple_dawn();
    let placement: Vec<ShadeId> = first_line
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(|label| shade_id_for(&palette, label))
        .collect::<Result<_>>()?;

    if placement.len() as u32 % per_pair != 0 {
        println!(
            "Warning: the total number of threads is not evenly divisible into lang pairs ({}/{}). \
             One braid will have an incomplete lang pair.",
            placement.len(),
            per_pair
        );
    }

    let batches = split_threads(
        placement.len() as u32,
        count,
        BiasMode::CenterHeavy,
        per_pair,
    )?;

    let mut offset = 0usize;
    for (i, batch) in batches.iter().enumerate() {
        let braid = &placement[offset..offset + *batch as usize];
        offset += *batch as usize;

        println!("Braid {}: {}", i + 1, braid.len());
        let path = format!("{prefix}{}.tex", i + 1);
        std::fs::write(&path, warp_card(&palette, braid))
            .with_context(|| format!("failed to write {path}"))?;
    }
    Ok(())
}

fn shade_id_for(palette: &Palette, label: &str) -> Result<ShadeId> {
    let wanted = label
        .chars()
        .next()
        .context("empty thread label")?
        .to_ascii_uppercase();
    palette
        .iter()
        .find(|shade| shade.label == wanted)
        .map(|shade| shade.id)
        .with_context(|| format!("thread label {label:?} is not in the palette"))
}

fn run_plan(file: &std::path::Path, dump: Option<&std::path::Path>) -> Result<()> {
    let plan = WarpPlan::load(file)?;
    let est = estimate(&plan)?;

    if !plan.name.is_empty() {
        println!("Project: {}", plan.name);
    }
    println!(
        "Warp length:     {:.1} cm ({:.2} m)",
        est.warp_length,
        cm_to_m(est.warp_length)
    );
    println!("Ends:            {}", est.n_ends);
    if est.n_pattern_repeats > 0 {
        println!("Pattern repeats: {}", est.n_pattern_repeats);
    }
    println!("Weaving width:   {:.1} cm", est.adjusted_weaving_width);
    println!("Final width:     {:.1} cm", est.adjusted_final_width);

    if !est.yarn_usage.is_empty() {
        println!();
        for usage in &est.yarn_usage {
            println!(
                "{:12} {} ({}): {:.0} m, {:.3} kg, {:.2} {}",
                usage.used_for,
                usage.material,
                usage.colour,
                usage.meters,
                usage.kilograms,
                usage.cost,
                usage.currency
            );
        }
        println!("Total cost:      {:.2}", est.total_cost);
    }

    if let Some(path) = dump {
        let report = ProjectReport {
            input: plan,
            output: est,
        };
        report.dump(path)?;
        println!("\nReport dumped to {}", path.display());
    }
    Ok(())
}

fn run_codes(
    sheet_id: Option<String>,
    tab: String,
    token: Option<String>,
    quiet: bool,
    command: CodesCommand,
) -> Result<()> {
    let sheet_id = match sheet_id {
        Some(id) => id,
        None => std::env::var("GOOGLE_SHEET_ID")
            .context("no sheet id: pass --sheet-id or set GOOGLE_SHEET_ID")?,
    };
    let token = match token {
        Some(token) => token,
        None => std::env::var("GOOGLE_SHEETS_TOKEN")
            .context("no API token: pass --token or set GOOGLE_SHEETS_TOKEN")?,
    };
    let mut ledger = CodeLedger::new(SheetsStore::new(sheet_id, tab, token));

    match command {
        CodesCommand::Create {
            name,
            discount,
            wrap,
        } => {
            let scope = parse_wraps(&wrap)?;
            let record = ledger.issue(&name, scope, discount)?;
            println!("New code created for {}: {}", record.name, record.code);
            if !quiet {
                println!("\nMESSAGE TEMPLATE:\n{}", message_template(&record));
            }
        }
        CodesCommand::Use { code, name, wrap } => {
            let wraps = parse_wraps(&wrap)?;
            let (_, record) = ledger.check(&code, name.as_deref(), &wraps)?;
            print_code_info(&record);

            if !confirm("Do you want to use this code? [y/N] ")? {
                println!("Ok, code was not used");
                return Ok(());
            }

            let redeemed = ledger.redeem(&code, name.as_deref(), &wraps)?;
            if let Some(used_on) = redeemed.used_on() {
                println!(
                    "Code {} was used on {}",
                    redeemed.code,
                    used_on.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
    }
    Ok(())
}

fn parse_wraps(names: &[String]) -> Result<Vec<Wrap>> {
    names
        .iter()
        .map(|name| name.parse::<Wrap>().map_err(Into::into))
        .collect()
}

fn print_code_info(record: &CodeRecord) {
    let wraps = if record.scope.is_empty() {
        "all".to_string()
    } else {
        record
            .scope
            .iter()
            .map(Wrap::name)
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("\nVALID CODE FOUND:");
    println!("Code:     {}", record.code);
    println!("Name:     {}", record.name);
    println!(
        "Created:  {}",
        record.created_on().format("%Y-%m-%d %H:%M:%S")
    );
    println!("Wraps:    {wraps}");
    println!("Discount: {}%\n", record.percentage);
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "" | "n" | "no" => Ok(false),
        other => bail!("response {other:?} not recognised"),
    }
}
