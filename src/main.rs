use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

use blood_inheritance::{
    AboRh, AnalysisResults, BloodGroupAnalyzer, DuffyPhenotype, KellPhenotype, Lang, MnPhenotype,
    ParentPair, ParentPhenotypes, ReportFormat, ReportGenerator, Text,
};

/// Blood group inheritance and compatibility calculator
#[derive(Parser, Debug)]
#[command(
    name = "blood-inheritance",
    version,
    about = "Offspring blood-type probabilities with clinical advisories",
    long_about = r#"
Computes the probability distribution of a baby's blood type from the two
parents' phenotypes:
- ABO/Rh primary panel with Punnett squares
- Kell, MN and Duffy extra systems
- Hemolytic-disease advisories (Rh, ABO, Kell) and the Duffy malaria note
- Donor/recipient compatibility for every possible baby type

Phenotype labels match the selector options: A+ .. O-, K+/K-, M/N/MN,
Fy(a+b-) .. Fy(a-b-).
"#
)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Father's ABO/Rh blood group (e.g. "A+")
    #[arg(short = 'F', long, value_name = "PHENOTYPE")]
    father: Option<String>,

    /// Mother's ABO/Rh blood group (e.g. "O-")
    #[arg(short = 'M', long, value_name = "PHENOTYPE")]
    mother: Option<String>,

    /// Father's Kell phenotype (K+ or K-)
    #[arg(long, value_name = "PHENOTYPE")]
    kell_father: Option<String>,

    /// Mother's Kell phenotype (K+ or K-)
    #[arg(long, value_name = "PHENOTYPE")]
    kell_mother: Option<String>,

    /// Father's MN phenotype (M, N or MN)
    #[arg(long, value_name = "PHENOTYPE")]
    mn_father: Option<String>,

    /// Mother's MN phenotype (M, N or MN)
    #[arg(long, value_name = "PHENOTYPE")]
    mn_mother: Option<String>,

    /// Father's Duffy phenotype (e.g. "Fy(a+b-)")
    #[arg(long, value_name = "PHENOTYPE")]
    duffy_father: Option<String>,

    /// Mother's Duffy phenotype (e.g. "Fy(a+b-)")
    #[arg(long, value_name = "PHENOTYPE")]
    duffy_mother: Option<String>,

    /// Interactive mode with prompts for all parameters
    #[arg(short, long, help = "Interactive mode with default values")]
    interactive: bool,

    /// Display language
    #[arg(short, long, value_enum, default_value = "en")]
    lang: Lang,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Output directory for file reports
    #[arg(short, long, default_value = "./reports")]
    output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions
    Completions { shell: Shell },
    /// List supported blood-group systems and their phenotype labels
    Systems,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return Ok(());
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        generate_completions(shell);
        return Ok(());
    }

    if let Some(Commands::Systems) = cli.command {
        list_systems();
        return Ok(());
    }

    // Initialize logging
    init_logging(cli.verbose);

    // Run interactive mode if requested
    let config = if cli.interactive {
        run_interactive_mode()?
    } else {
        AppConfig::from_cli(&cli)?
    };

    info!(
        "Crossing {} x {}",
        config.parents.abo_rh.father, config.parents.abo_rh.mother
    );

    run_analysis(config)?;

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn list_systems() {
    println!("{}", style("Supported blood-group systems:").bold().cyan());
    println!();

    let systems: Vec<(&str, Vec<String>)> = vec![
        (
            "ABO/Rh (primary panel)",
            AboRh::ALL.iter().map(|p| p.to_string()).collect(),
        ),
        (
            "Kell",
            KellPhenotype::ALL.iter().map(|p| p.to_string()).collect(),
        ),
        (
            "MN",
            MnPhenotype::ALL.iter().map(|p| p.to_string()).collect(),
        ),
        (
            "Duffy",
            DuffyPhenotype::ALL.iter().map(|p| p.to_string()).collect(),
        ),
    ];

    for (name, options) in systems {
        println!(
            "  {} - {}",
            style(name).green().bold(),
            style(options.join(", ")).yellow()
        );
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("blood_inheritance={}", level))
        .init();
}

fn run_interactive_mode() -> Result<AppConfig> {
    println!(
        "{}",
        style("╔══════════════════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║        Blood Group Inheritance - Interactive Mode            ║")
            .cyan()
            .bold()
    );
    println!(
        "{}",
        style("╚══════════════════════════════════════════════════════════════╝").cyan()
    );
    println!();

    let theme = ColorfulTheme::default();

    // Display language
    let lang_idx = Select::with_theme(&theme)
        .with_prompt("Language / ভাষা")
        .default(0)
        .items(&["English", "বাংলা"])
        .interact()?;
    let lang = if lang_idx == 1 { Lang::Bn } else { Lang::En };

    // Primary panel
    let father = select_phenotype(&theme, lang.text(Text::FatherBloodGroup), &AboRh::ALL)?;
    let mother = select_phenotype(&theme, lang.text(Text::MotherBloodGroup), &AboRh::ALL)?;

    let mut parents = ParentPhenotypes::new(father, mother);

    // Extra systems, hidden behind a toggle like the advanced panel
    let advanced = Confirm::with_theme(&theme)
        .with_prompt(lang.text(Text::ShowAdvanced))
        .default(false)
        .interact()?;

    if advanced {
        parents.kell = Some(select_pair(&theme, lang, Text::KellTitle, &KellPhenotype::ALL)?);
        parents.mn = Some(select_pair(&theme, lang, Text::MnTitle, &MnPhenotype::ALL)?);
        parents.duffy = Some(select_pair(&theme, lang, Text::DuffyTitle, &DuffyPhenotype::ALL)?);
    }

    // Output format
    let formats = ["Text", "HTML", "JSON", "CSV", "All formats"];
    let format_idx = Select::with_theme(&theme)
        .with_prompt("Select output format")
        .default(0)
        .items(&formats)
        .interact()?;

    let format = match format_idx {
        1 => ReportFormat::Html,
        2 => ReportFormat::Json,
        3 => ReportFormat::Csv,
        4 => ReportFormat::All,
        _ => ReportFormat::Text,
    };

    // Output directory
    let output: String = Input::with_theme(&theme)
        .with_prompt("Output directory")
        .default("./reports".to_string())
        .interact_text()?;

    Ok(AppConfig {
        parents,
        lang,
        format,
        output: PathBuf::from(output),
    })
}

fn select_phenotype<P: Copy + ToString>(
    theme: &ColorfulTheme,
    prompt: &str,
    options: &[P],
) -> Result<P> {
    let labels: Vec<String> = options.iter().map(|p| p.to_string()).collect();
    let idx = Select::with_theme(theme)
        .with_prompt(prompt)
        .default(0)
        .items(&labels)
        .interact()?;
    Ok(options[idx])
}

fn select_pair<P: Copy + ToString>(
    theme: &ColorfulTheme,
    lang: Lang,
    title: Text,
    options: &[P],
) -> Result<ParentPair<P>> {
    println!("{}", style(lang.text(title)).bold());
    let father = select_phenotype(theme, lang.text(Text::SelectorFather), options)?;
    let mother = select_phenotype(theme, lang.text(Text::SelectorMother), options)?;
    Ok(ParentPair::new(father, mother))
}

fn run_analysis(config: AppConfig) -> Result<()> {
    let analyzer = BloodGroupAnalyzer::new();
    let results: AnalysisResults = analyzer.analyze(&config.parents)?;

    info!(
        "{} possible baby types, {} advisories",
        results.abo_rh.outcomes().len(),
        results.risks.len()
    );

    let generator = ReportGenerator::new(&config.output, config.lang);
    generator.generate(&results, config.format)?;

    if !matches!(config.format, ReportFormat::Text) {
        println!(
            "\n{} Reports saved to: {}",
            style("✓").green().bold(),
            style(config.output.display()).cyan()
        );
    }

    Ok(())
}

#[derive(Debug)]
struct AppConfig {
    parents: ParentPhenotypes,
    lang: Lang,
    format: ReportFormat,
    output: PathBuf,
}

impl AppConfig {
    fn from_cli(cli: &Cli) -> Result<Self> {
        let father = required_phenotype(&cli.father, "--father")?;
        let mother = required_phenotype(&cli.mother, "--mother")?;

        let mut parents = ParentPhenotypes::new(father, mother);
        parents.kell = optional_pair(&cli.kell_father, &cli.kell_mother, "--kell")?;
        parents.mn = optional_pair(&cli.mn_father, &cli.mn_mother, "--mn")?;
        parents.duffy = optional_pair(&cli.duffy_father, &cli.duffy_mother, "--duffy")?;

        Ok(Self {
            parents,
            lang: cli.lang,
            format: cli.format,
            output: cli.output.clone(),
        })
    }
}

fn required_phenotype<P>(label: &Option<String>, flag: &str) -> Result<P>
where
    P: FromStr,
    P::Err: std::error::Error + Send + Sync + 'static,
{
    match label {
        Some(label) => label
            .parse()
            .with_context(|| format!("Invalid value for {}", flag)),
        None => bail!("{} is required (or use --interactive)", flag),
    }
}

fn optional_pair<P>(
    father: &Option<String>,
    mother: &Option<String>,
    flag: &str,
) -> Result<Option<ParentPair<P>>>
where
    P: FromStr,
    P::Err: std::error::Error + Send + Sync + 'static,
{
    match (father, mother) {
        (Some(f), Some(m)) => {
            let father = f
                .parse()
                .with_context(|| format!("Invalid value for {}-father", flag))?;
            let mother = m
                .parse()
                .with_context(|| format!("Invalid value for {}-mother", flag))?;
            Ok(Some(ParentPair::new(father, mother)))
        }
        (None, None) => Ok(None),
        _ => bail!("{}-father and {}-mother must be given together", flag, flag),
    }
}
