use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vecadd::io_utils::{bench_cli_error, CliError};
use vecadd::{
    parse_work_group_size, prompt_work_group_size, render_text, run_benchmark, BenchError,
    BenchReport, ComputeBackend, Config, HostBackend, InputVectors, JsonReport, SelectionPolicy,
    DEFAULT_VECTOR_LEN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// Simulated device on the host CPU
    Host,
    /// First OpenCL platform/device (needs the `gpu` feature)
    Opencl,
}

impl Default for BackendKind {
    fn default() -> Self {
        if cfg!(feature = "gpu") {
            BackendKind::Opencl
        } else {
            BackendKind::Host
        }
    }
}

/// Time an element-wise sum of two random integer vectors on a compute device.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Work-group size. Prompted for on stdin when omitted
    #[arg(short, long)]
    threads: Option<String>,
    /// Elements per input vector
    #[arg(long, default_value_t = DEFAULT_VECTOR_LEN)]
    size: usize,
    /// Seed for the input generator (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Compute backend
    #[arg(long, value_enum, default_value_t = BackendKind::default())]
    backend: BackendKind,
    /// Device selection policy: first or most-compute-units
    #[arg(long, default_value = "first")]
    policy: SelectionPolicy,
    /// Device ordinal from --list-devices, overrides --policy
    #[arg(long)]
    device: Option<usize>,
    /// Check every element of the result against the host sum
    #[arg(long)]
    verify: bool,
    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
    /// List available devices and exit
    #[arg(long)]
    list_devices: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn run() -> Result<(), CliError> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.backend {
        BackendKind::Host => execute(HostBackend::new(), &args),
        BackendKind::Opencl => execute_opencl(&args),
    }
}

#[cfg(feature = "gpu")]
fn execute_opencl(args: &Args) -> Result<(), CliError> {
    execute(vecadd::OpenClBackend::new(), args)
}

#[cfg(not(feature = "gpu"))]
fn execute_opencl(_args: &Args) -> Result<(), CliError> {
    Err(bench_cli_error(
        "selecting backend",
        BenchError::NoDeviceFound(
            "this build has no OpenCL support (enable the `gpu` feature)".into(),
        ),
    ))
}

fn execute<B: ComputeBackend>(mut backend: B, args: &Args) -> Result<(), CliError> {
    if args.list_devices {
        let devices = backend
            .enumerate_devices()
            .map_err(|e| bench_cli_error("listing devices", e))?;
        if devices.is_empty() {
            println!("no {} devices found", backend.name());
        }
        for device in &devices {
            println!("{device}");
        }
        return Ok(());
    }

    let work_group_size = match &args.threads {
        Some(text) => parse_work_group_size(text),
        None => {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            // keep stdout clean for the JSON document
            if args.json {
                prompt_work_group_size(&mut reader, &mut io::stderr())
            } else {
                prompt_work_group_size(&mut reader, &mut io::stdout())
            }
        }
    }
    .map_err(|e| bench_cli_error("reading work-group size", e))?;

    let config = Config {
        vector_len: args.size,
        work_group_size: Some(work_group_size),
        seed: args.seed,
        policy: args.policy,
        device: args.device,
    };
    let (inputs, seed) = InputVectors::from_config(&config)
        .map_err(|e| bench_cli_error("checking configuration", e))?;
    info!(seed, "input seed");

    let report = run_benchmark(&mut backend, &config, &inputs)
        .map_err(|e| bench_cli_error("running benchmark", e))?;

    let verified = if args.verify {
        report
            .verify(&inputs)
            .map_err(|e| bench_cli_error("verifying result", e))?;
        Some(true)
    } else {
        None
    };

    write_report(&report, seed, verified, args.json)
        .map_err(|e| bench_cli_error("writing report", e))?;
    Ok(())
}

fn write_report(
    report: &BenchReport,
    seed: u64,
    verified: Option<bool>,
    json: bool,
) -> Result<(), BenchError> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &JsonReport::new(report, Some(seed), verified))
            .map_err(io::Error::from)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", render_text(report))?;
    }
    stdout.flush()?;
    Ok(())
}
