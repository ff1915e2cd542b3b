use clap::{Args, Parser, Subcommand};
use json2sql::{descriptor, validate, Compiler, Options};
use log::debug;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

/// JSON to SQL compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a JSON query descriptor to SQL
    Compile(CompileArgs),
}

#[derive(Debug, Args)]
struct CompileArgs {
    /// The JSON query descriptor. If empty, stdin will be used.
    query: Option<String>,
    /// The input is a JSON array of descriptors to be joined with UNION
    #[arg(short, long)]
    union: bool,
    /// Reject statements that look like SQL injection
    #[arg(short, long)]
    sanitize: bool,
    /// Print SQL with positional placeholders, followed by a line with the JSON array of values
    #[arg(short, long)]
    params: bool,
    /// Fail on unknown operators and datatypes instead of compiling around them
    #[arg(long)]
    strict: bool,
    /// Maximum nesting of subqueries and composite conditions
    #[arg(long)]
    max_depth: Option<usize>,
    /// Path to a TOML file with compiler options. Flags take precedence over it.
    #[arg(short, long)]
    config: Option<String>,
}

fn get_stdin() -> io::Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn load_options(args: &CompileArgs) -> Result<Options, Box<dyn Error>> {
    let mut options = match &args.config {
        Some(path) => toml::from_str::<Options>(&fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    options.with_union |= args.union;
    options.with_sanitized_injection |= args.sanitize;
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    Ok(options)
}

fn check_vocabulary(input: &str, options: &Options) -> Result<(), Box<dyn Error>> {
    let descriptors = if options.with_union {
        descriptor::parse_union(input)?
    } else {
        vec![descriptor::parse(input)?]
    };
    for descriptor in &descriptors {
        validate(descriptor)?;
    }
    Ok(())
}

fn compile(args: CompileArgs) -> Result<(), Box<dyn Error>> {
    let options = load_options(&args)?;
    debug!("Compiling with {options:?}");
    let input = match args.query {
        Some(query) => query,
        None => get_stdin()?,
    };
    if args.strict {
        check_vocabulary(&input, &options)?;
    }
    let compiler = Compiler::new(options);
    if args.params {
        let statement = compiler.generate_json(&input)?;
        println!("{}", statement.sql);
        println!("{}", serde_json::to_string(&statement.params)?);
    } else {
        println!("{}", compiler.build_json(&input)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Cli::parse();
    let result = match args.command {
        Command::Compile(args) => compile(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
