use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match pharmassist_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("pharmassist: {e}");
            ExitCode::FAILURE
        }
    }
}
