use clap::Parser;
use perfreport_cli::{endpoints_over_threshold, load_run, signed};
use perfreport_common::parse_percentiles;
use perfreport_core::PerformanceReport;
use std::path::PathBuf;
use std::process;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "perfreport", about = "Per-endpoint latency statistics for a load-test run")]
struct Args {
    /// JSON run file with the samples of the current run
    #[arg(long)]
    samples: PathBuf,

    /// JSON run file of the previous run to diff against
    #[arg(long)]
    previous: Option<PathBuf>,

    /// Comma-separated percentiles to report
    #[arg(long, default_value = "0,50,90,100")]
    percentiles: String,

    /// Fail if any endpoint's error percentage exceeds this value
    #[arg(long, default_value_t = 100.0)]
    max_error_percent: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let percentiles = parse_percentiles(&args.percentiles)?;
    let mut report = load_run(&args.samples, &percentiles)?;

    if let Some(path) = &args.previous {
        let previous = load_run(path, &percentiles)?;
        report.set_last_build(&previous);
    }

    let over = endpoints_over_threshold(&report, args.max_error_percent);
    print_report(&report, args.previous.is_some());

    if !over.is_empty() {
        for uri in over {
            warn!(uri, threshold = args.max_error_percent, "error percentage over threshold");
        }
        process::exit(1);
    }
    Ok(())
}

fn print_report(report: &PerformanceReport, with_diff: bool) {
    println!("Performance Report");
    println!("==================");
    println!("Endpoints:             {}", report.size());
    println!("Samples:               {}", report.samples_count());
    println!("Average:               {}", report.average());
    println!("Errors:                {} ({:.3}%)", report.count_errors(), report.error_percent());

    for uri_report in report.uri_reports() {
        println!();
        println!("{}", uri_report.uri());
        println!("  Samples:             {}", uri_report.samples_count());
        println!(
            "  Average / Min / Max: {} / {} / {}",
            uri_report.average(),
            uri_report.min(),
            uri_report.max()
        );
        println!("  Median:              {}", uri_report.median());
        for p in uri_report.percentile_values() {
            println!("  P{:<19} {}", format!("{}:", p.percentile), p.value);
        }
        println!("  Errors:              {:.3}%", uri_report.error_percent());
        println!("  Status:              {}", if uri_report.is_failed() { "FAILED" } else { "OK" });

        if with_diff {
            let diff = uri_report.diff();
            println!(
                "  Diff:                avg {}  median {}  errors {:+.3}%  samples {}",
                signed(diff.average_diff),
                signed(diff.median_diff),
                diff.error_percent_diff,
                signed(diff.samples_count_diff),
            );
        }
    }
}
