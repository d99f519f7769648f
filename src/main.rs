use clap::Parser;
use oldest::cli::{init_logging, run, Args, Reporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let invoked_as = std::env::args_os().next();
    match run(&args, invoked_as.as_deref()) {
        Ok(name) => {
            println!("{}", name);
            ExitCode::SUCCESS
        }
        Err(err) => Reporter::new(args.verbose).fail(&err),
    }
}
