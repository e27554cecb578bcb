use clap::Parser;
use std::process::ExitCode;
use tlint::args::Args;
use tlint::run;
use tlint::status::ExitStatus;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(status) => status.into(),
        Err(err) => {
            use std::io::Write;

            // Use `writeln` instead of `eprintln` to avoid panicking when the stderr pipe is broken.
            let mut stderr = std::io::stderr().lock();

            // tlint itself hard-errored, e.g. an invalid `tlint.toml` or an
            // unknown rule name.
            writeln!(stderr, "tlint failed").ok();

            for cause in err.chain() {
                writeln!(stderr, "  Cause: {cause}").ok();
            }

            ExitStatus::Error.into()
        }
    }
}
