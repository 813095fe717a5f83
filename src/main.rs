use std::process::ExitCode;

fn main() -> ExitCode {
    match baton::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
