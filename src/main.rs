use std::process::ExitCode;

fn main() -> ExitCode {
    match progress_pace::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
