use clap::{Parser as ClapParser, Subcommand};
use rule_tree::LogicalOp;
use rule_tree::cli::{
    self, CheckOptions, CheckResult, CliError, CombineOptions, EvalDocumentOptions,
};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "ruletree")]
#[command(about = "Compile, evaluate and store boolean attribute rules")]
#[command(version)]
struct Cli {
    /// Log filter used when RUST_LOG is unset (e.g. "debug", "rule_tree=trace")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a rule; print its document, or evaluate it against input
    Check {
        /// The rule, e.g. "age > 30 AND department = 'Sales'"
        rule: String,

        /// JSON record (reads from stdin if not provided and stdin is piped)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Compare numeric attributes numerically under = and !=
        #[arg(long)]
        numeric_equality: bool,
    },

    /// Combine several rules into one and print its document
    Combine {
        /// Rules to combine, left to right
        #[arg(required = true)]
        rules: Vec<String>,

        /// Operator joining the rules (AND or OR)
        #[arg(short, long, default_value = "AND")]
        operator: LogicalOp,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Evaluate a stored rule document against input
    Eval {
        /// Rule document (JSON)
        document: String,

        /// JSON record (reads from stdin if not provided and stdin is piped)
        #[arg(short, long)]
        input: Option<String>,

        /// Compare numeric attributes numerically under = and !=
        #[arg(long)]
        numeric_equality: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Check {
            rule,
            input,
            pretty,
            syntax_only,
            numeric_equality,
        } => run_check(rule, input, pretty, syntax_only, numeric_equality),
        Commands::Combine {
            rules,
            operator,
            pretty,
        } => cli::execute_combine(&CombineOptions { rules, operator })
            .map(|doc| print_json(&doc, pretty)),
        Commands::Eval {
            document,
            input,
            numeric_equality,
        } => read_input(input).and_then(|input| {
            cli::execute_eval(&EvalDocumentOptions {
                document,
                input,
                numeric_equality,
            })
            .map(|out| print_json(&out, false))
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_input(input: Option<String>) -> Result<Option<String>, CliError> {
    match input {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            debug!("reading input record from stdin");
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_check(
    rule: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    numeric_equality: bool,
) -> Result<(), CliError> {
    let input = if syntax_only { input } else { read_input(input)? };

    let options = CheckOptions {
        rule,
        input,
        syntax_only,
        numeric_equality,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Document(doc) | CheckResult::Evaluated(doc) => print_json(&doc, pretty),
    }
    Ok(())
}

fn print_json(value: &serde_json::Value, pretty: bool) {
    if pretty {
        println!("{:#}", value);
    } else {
        println!("{}", value);
    }
}
