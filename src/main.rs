use clap::Parser;
use late_fees::config::cli::{Cli, Command, FeesArgs};
use late_fees::utils::{logger, validation::Validate};
use late_fees::{
    date_range, parse_day_count, reformat_dates, FeeError, FeesPipeline, LocalStorage,
    ReportEngine,
};

fn main() {
    let cli = Cli::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI args: {:?}", cli);

    let result = match cli.command_or_default() {
        Command::Fees(args) => run_fees(&args),
        Command::Reformat { dates } => reformat_dates(dates.as_slice()).map(|out| {
            for line in out {
                println!("{}", line);
            }
        }),
        Command::Range { start, n } => parse_day_count(&n)
            .and_then(|n| date_range(&start, n))
            .map(|dates| {
                for date in dates {
                    println!("{}", date);
                }
            }),
    };

    if let Err(e) = result {
        report_failure(&e);
    }
}

fn run_fees(args: &FeesArgs) -> late_fees::Result<()> {
    let config = args.resolve()?;
    config.validate()?;
    tracing::info!(
        "📋 input={} output={} rate={}",
        config.input_path,
        config.output_path,
        config.daily_rate
    );

    let storage = LocalStorage::default();
    let pipeline = FeesPipeline::new(storage.clone(), config);
    let engine = ReportEngine::new(pipeline);

    let output_path = engine.run()?;
    tracing::info!("✅ Late fee report completed successfully!");

    if !args.no_print {
        let written = std::fs::read_to_string(storage.resolve(&output_path))?;
        print!("{}", written);
    }

    Ok(())
}

fn report_failure(e: &FeeError) -> ! {
    tracing::error!(
        "❌ Failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 退出碼依嚴重程度決定
    std::process::exit(e.exit_code())
}
