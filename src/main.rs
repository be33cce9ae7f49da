//! Quadrate Programming Language - CLI

use std::path::PathBuf;
use std::process::{Command, ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use quadrate::frontend::module::Resolver;
use quadrate::util::config::Config;
use quadrate::util::diagnostic::{EmitterConfig, TextEmitter};
use quadrate::util::logger;
use quadrate::{CompileError, Compiler, NAME, VERSION};

/// Ahead-of-time compiler for the Quadrate stack language
#[derive(Parser, Debug)]
#[command(name = "quadrate")]
#[command(author = "Quadrate Team")]
#[command(version = VERSION)]
#[command(about = NAME, long_about = None)]
struct Args {
    /// Source files to compile
    #[arg(value_name = "SOURCES", required = true)]
    sources: Vec<PathBuf>,

    /// Output executable
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Run the executable after building it
    #[arg(long)]
    run: bool,

    /// Keep the generated C sources
    #[arg(long)]
    save_temps: bool,

    /// Print the token stream of every unit as JSON and stop
    #[arg(long)]
    dump_tokens: bool,

    /// Value stack depth
    #[arg(long, value_name = "N")]
    stack_depth: Option<usize>,

    /// Mark stack depth
    #[arg(long, value_name = "N")]
    mark_stack_depth: Option<usize>,

    /// Link against a library
    #[arg(short = 'l', value_name = "LIB")]
    libraries: Vec<String>,

    /// Add a library search path
    #[arg(short = 'L', value_name = "DIR")]
    library_paths: Vec<PathBuf>,

    /// C compiler to invoke
    #[arg(long, value_name = "CC")]
    cc: Option<String>,

    /// Project configuration file (default: ./quadrate.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable colored diagnostics
    #[arg(long)]
    no_colors: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Project file overridden by command-line flags
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::discover()?,
        };

        if let Some(output) = &self.output {
            config.compiler.output = output.clone();
        }
        if let Some(cc) = &self.cc {
            config.compiler.cc = cc.clone();
        }
        if self.save_temps {
            config.compiler.save_temps = true;
        }
        if let Some(depth) = self.stack_depth {
            config.runtime.stack_depth = depth;
        }
        if let Some(depth) = self.mark_stack_depth {
            config.runtime.mark_stack_depth = depth;
        }
        config.link.libraries.extend(self.libraries.iter().cloned());
        config
            .link
            .library_paths
            .extend(self.library_paths.iter().cloned());
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init_cli(args.verbose);

    if args.verbose {
        eprintln!("{} version: {}", NAME, VERSION);
        eprintln!("Host: {}", std::env::consts::OS);
    }

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            report(&args, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = args.load_config()?;
    let mut compiler = Compiler::new(config, Resolver::from_env());

    if args.dump_tokens {
        let units = compiler.compile(&args.sources)?;
        let dump: Vec<_> = units
            .iter()
            .map(|unit| {
                serde_json::json!({
                    "file": unit.path().display().to_string(),
                    "module": unit.module_name,
                    "tokens": unit.tokens,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(ExitCode::SUCCESS);
    }

    let artifact = compiler.build(&args.sources)?;
    if !args.run {
        return Ok(ExitCode::SUCCESS);
    }

    // a bare file name would be looked up on PATH
    let program = if artifact.is_relative() && artifact.parent() == Some(std::path::Path::new("")) {
        PathBuf::from(".").join(&artifact)
    } else {
        artifact
    };
    let status = Command::new(&program)
        .status()
        .with_context(|| format!("Failed to run: {}", program.display()))?;
    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// Compile errors are rendered with their source line; anything else as is
fn report(
    args: &Args,
    err: &anyhow::Error,
) {
    match err.downcast_ref::<CompileError>() {
        Some(compile_error) => {
            let emitter = TextEmitter::with_config(EmitterConfig {
                use_colors: !args.no_colors,
                ..EmitterConfig::default()
            });
            eprint!("{}", emitter.render_from_disk(&compile_error.diagnostic()));
        }
        None => eprintln!("quadrate: error: {:#}", err),
    }
}
