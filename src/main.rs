//! causal-prune CLI: causal signature closure and ontology module extraction.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use causal_prune::config::PruneConfig;
use causal_prune::diff::IriStyle;
use causal_prune::keyword::KeywordQuery;
use causal_prune::persist::Replacement;
use causal_prune::workflow::{
    self, AugmentRequest, DiffRequest, ExtractRequest, FindRequest, SignatureRequest,
};

#[derive(Parser)]
#[command(
    name = "causal-prune",
    version,
    about = "Causal signature closure and ⊥-module extraction for OWL ontologies"
)]
struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/causal-prune/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the causal signature of seed classes and save its module.
    Extract {
        /// Input ontology.
        #[arg(short, long)]
        input: PathBuf,

        /// Seed classes, one IRI per line.
        #[arg(short, long)]
        classes: PathBuf,

        /// Causal properties, one IRI per line.
        #[arg(short, long)]
        props: PathBuf,

        /// Output module; the RDF syntax follows the extension.
        #[arg(short, long)]
        output: PathBuf,

        /// Do not copy labels, comments and other annotations.
        #[arg(long)]
        no_annotations: bool,
    },

    /// Inject a class into an existing module, re-extracting from the full ontology.
    Augment {
        /// The original, unpruned ontology.
        #[arg(short, long)]
        full: PathBuf,

        /// The current module.
        #[arg(short, long)]
        module: PathBuf,

        /// IRI of the class to add.
        #[arg(short, long)]
        add: String,

        /// Causal properties, one IRI per line.
        #[arg(short, long)]
        props: PathBuf,

        /// Write here instead of replacing --module in place.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not copy labels, comments and other annotations.
        #[arg(long)]
        no_annotations: bool,
    },

    /// Find causal candidate properties by keyword and close them.
    FindProps {
        /// Input ontology.
        #[arg(short, long)]
        input: PathBuf,

        /// Output file, one IRI per line.
        #[arg(short, long, default_value = workflow::DEFAULT_PROPERTIES_FILE)]
        output: PathBuf,

        /// Keyword to search for (default from config: "cause").
        #[arg(short, long)]
        keyword: Option<String>,

        /// Do not match IRI local names.
        #[arg(long)]
        no_iri: bool,

        /// Do not match rdfs:comment text.
        #[arg(long)]
        no_comments: bool,
    },

    /// Report classes and object properties present in only one of two ontologies.
    Diff {
        /// First ontology (A).
        #[arg(short = 'a', long = "onto-a")]
        a: PathBuf,

        /// Second ontology (B).
        #[arg(short = 'b', long = "onto-b")]
        b: PathBuf,

        /// Print local names instead of full IRIs.
        #[arg(long)]
        short: bool,

        /// Report file (default: <A>__vs__<B>__diff.txt).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print causal signatures as JSON, one per seed class file.
    Signature {
        /// Input ontology.
        #[arg(short, long)]
        input: PathBuf,

        /// Seed class files; each yields one signature.
        #[arg(short, long, required = true, num_args = 1..)]
        classes: Vec<PathBuf>,

        /// Causal properties, one IRI per line.
        #[arg(short, long)]
        props: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PruneConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            input,
            classes,
            props,
            output,
            no_annotations,
        } => {
            let outcome = workflow::extract(&ExtractRequest {
                ontology: input,
                classes,
                properties: props,
                output,
                include_annotations: config.extract.include_annotations && !no_annotations,
            })?;
            println!(
                "Saved module {} ({} entities, {} axioms) to {}",
                outcome.module_iri,
                outcome.signature.len(),
                outcome.axioms,
                outcome.saved.path.display()
            );
        }

        Commands::Augment {
            full,
            module,
            add,
            props,
            output,
            no_annotations,
        } => {
            let request = AugmentRequest {
                full,
                module,
                add,
                properties: props,
                output,
                include_annotations: config.extract.include_annotations && !no_annotations,
            };
            let outcome = workflow::augment(&request)?;
            let target = std::path::absolute(&outcome.saved.path).into_diagnostic()?;
            let mut note = String::new();
            if request.in_place() {
                note.push_str(" (in-place)");
            }
            if outcome.saved.replacement == Replacement::Copied {
                note.push_str(" (non-atomic copy)");
            }
            println!(
                "Injected {} and saved to {}{note}",
                request.add,
                target.display()
            );
        }

        Commands::FindProps {
            input,
            output,
            keyword,
            no_iri,
            no_comments,
        } => {
            let search = &config.search;
            let query = KeywordQuery::new(keyword.as_deref().unwrap_or(&search.keyword))
                .with_iri(search.match_iri && !no_iri)
                .with_comments(search.match_comments && !no_comments);
            let outcome = workflow::find_properties(&FindRequest {
                ontology: input,
                output,
                query,
            })?;
            println!(
                "Found {} causal candidate properties.",
                outcome.properties.len()
            );
            println!("Saved to {}", outcome.output.display());
        }

        Commands::Diff {
            a,
            b,
            short,
            output,
        } => {
            let style = if short { IriStyle::Short } else { IriStyle::Full };
            let outcome = workflow::diff(&DiffRequest {
                a,
                b,
                style,
                output,
            })?;
            print!("{}", outcome.report);
            let path = std::path::absolute(&outcome.output).into_diagnostic()?;
            println!("Report saved to: {}", path.display());
        }

        Commands::Signature {
            input,
            classes,
            props,
        } => {
            let reports = workflow::signatures(&SignatureRequest {
                ontology: input,
                class_files: classes,
                properties: props,
            })?;
            let json = serde_json::to_string_pretty(&reports).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}
