use std::process::ExitCode;

fn main() -> ExitCode {
    match letter_register::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
